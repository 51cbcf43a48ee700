mod render;

use clap::{Parser, Subcommand};
use ioplan_solver::{Method, ProblemKind, ProblemModel, SolveError, Solver, SolverSession};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ioplan")]
#[command(about = "Transportation and assignment problems, solved step by step", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print every step
    Solve {
        /// JSON problem file
        file: PathBuf,
        /// Method: nw, lc, vogel or hungarian
        #[arg(short, long)]
        method: Method,
        /// Balance the problem before solving
        #[arg(short, long)]
        balance: bool,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Walk through the solution one step at a time
    Step {
        /// JSON problem file
        file: PathBuf,
        /// Method: nw, lc, vogel or hungarian
        #[arg(short, long)]
        method: Method,
        /// Balance the problem before solving
        #[arg(short, long)]
        balance: bool,
    },
    /// Add a fictitious origin or destination so totals match
    Balance {
        /// JSON problem file
        file: PathBuf,
        /// Write the balanced problem here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a problem file for errors
    Check {
        /// JSON problem file
        file: PathBuf,
    },
    /// Print a built-in example problem as JSON
    Example {
        /// transportation or assignment
        #[arg(default_value = "transportation")]
        kind: ProblemKind,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(file: &Path) -> ProblemModel {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::from_str::<ProblemModel>(&source) {
        Ok(model) => {
            tracing::info!(
                file = %file.display(),
                kind = %model.kind(),
                rows = model.rows(),
                cols = model.cols(),
                "loaded problem"
            );
            model
        }
        Err(e) => {
            eprintln!("Invalid problem in {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn to_json(model: &ProblemModel) -> String {
    match serde_json::to_string_pretty(model) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error serializing problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            method,
            balance,
            format,
        } => {
            let solver = Solver::new();
            let mut model = load_model(&file);
            if balance {
                let balanced = solver.balance(&model);
                if format != "json" {
                    println!("{}", balanced.outcome.message());
                    println!();
                }
                model = balanced.model;
            }

            let result = match solver.solve(&model, method) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Solve error: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                match serde_json::to_string_pretty(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error serializing result: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            for (i, step) in result.steps.iter().enumerate() {
                render::print_step(i + 1, step, model.cost());
            }
            println!("Final allocation:");
            render::print_matrix(&result.allocation, Some(model.cost()));
            println!();
            render::print_summary(&result, &result.insight(model.kind()));
        }
        Commands::Step { file, method, balance } => {
            let mut session = SolverSession::new(load_model(&file));
            session.set_method(method);
            if balance {
                println!("{}", session.balance().message());
            }

            println!("Press Enter for the next step, 'r' to rewind, 'q' to quit.");
            let stdin = std::io::stdin();
            let mut lines = stdin.lock().lines();
            loop {
                print!("> ");
                let _ = std::io::stdout().flush();

                let line = match lines.next() {
                    Some(Ok(line)) => line,
                    _ => break,
                };
                match line.trim() {
                    "q" | "quit" => break,
                    "r" | "rewind" => {
                        if session.rewind() {
                            println!("Rewound to the first step.");
                        }
                        continue;
                    }
                    _ => {}
                }

                match session.step().cloned() {
                    Ok(step) => {
                        let number = session.stepper().map_or(0, |s| s.cursor());
                        render::print_step(number, &step, session.model().cost());
                    }
                    Err(SolveError::StepsExhausted) => {
                        println!("No more steps.");
                        if let Some(stepper) = session.stepper() {
                            let result = stepper.result();
                            render::print_summary(result, &result.insight(session.model().kind()));
                        }
                    }
                    Err(e) => {
                        eprintln!("Solve error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Balance { file, output } => {
            let model = load_model(&file);
            let balanced = Solver::new().balance(&model);
            let json = to_json(&balanced.model);

            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        eprintln!("Error writing {}: {}", path.display(), e);
                        std::process::exit(1);
                    }
                    println!("{}", balanced.outcome.message());
                    println!("Wrote {}", path.display());
                }
                None => {
                    eprintln!("{}", balanced.outcome.message());
                    println!("{}", json);
                }
            }
        }
        Commands::Check { file } => {
            let model = load_model(&file);
            let balanced = model.is_balanced(Solver::new().tolerance());

            println!("✓ {} is valid", file.display());
            println!("  kind: {}", model.kind());
            println!("  {} x {} cost matrix", model.rows(), model.cols());
            println!("  total supply: {}", ioplan_solver::format_amount(model.total_supply()));
            println!("  total demand: {}", ioplan_solver::format_amount(model.total_demand()));
            if balanced {
                println!("  balanced");
            } else {
                println!("  not balanced; run `ioplan balance` or pass --balance");
            }
            let methods: Vec<&str> = Method::ALL
                .iter()
                .filter(|m| m.kind() == model.kind())
                .map(|m| m.as_str())
                .collect();
            println!("  methods: {}", methods.join(", "));
        }
        Commands::Example { kind } => {
            println!("{}", to_json(&ProblemModel::example(kind)));
        }
    }
}
