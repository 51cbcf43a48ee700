use ioplan_solver::{SolveResult, Step, StepSnapshot, format_amount};

const CELL_WIDTH: usize = 12;

/// Print a matrix with origin/destination labels. When `costs` is given,
/// each cell shows its unit cost and allocated cells are starred.
pub fn print_matrix(values: &[Vec<f64>], costs: Option<&[Vec<f64>]>) {
    let cols = values.first().map_or(0, Vec::len);

    print!("{:>6}", "");
    for j in 0..cols {
        print!("{:>width$}", format!("D{}", j + 1), width = CELL_WIDTH);
    }
    println!();

    for (i, row) in values.iter().enumerate() {
        print!("{:>6}", format!("O{}", i + 1));
        for (j, &v) in row.iter().enumerate() {
            let text = match costs.and_then(|c| c.get(i)).and_then(|r| r.get(j)) {
                Some(&c) => {
                    let mark = if v > 0.0 { "*" } else { "" };
                    format!("{}{} c={}", mark, format_amount(v), format_amount(c))
                }
                None => format_amount(v),
            };
            print!("{:>width$}", text, width = CELL_WIDTH);
        }
        println!();
    }
}

pub fn print_step(number: usize, step: &Step, costs: &[Vec<f64>]) {
    println!("Step {}: {}", number, step.description);
    match &step.snapshot {
        StepSnapshot::Allocation(alloc) => print_matrix(alloc, Some(costs)),
        StepSnapshot::Reduced(reduced) => {
            println!("  Reduced matrix");
            print_matrix(reduced, None);
        }
        StepSnapshot::Assignment(pairs) => {
            for (i, col) in pairs.iter().enumerate() {
                match col {
                    Some(j) => println!("  Task {} -> Resource {}", i + 1, j + 1),
                    None => println!("  Task {} -> unassigned", i + 1),
                }
            }
        }
    }
    println!();
}

pub fn print_summary(result: &SolveResult, insight: &str) {
    println!("Method: {}", result.method.display_name());
    println!("Total cost: {}", format_amount(result.total_cost));
    if !result.is_complete() {
        println!("Stopped early: no eligible cell remained.");
    }
    println!("Note: {}", result.note);
    println!();
    println!("{}", insight);
}
