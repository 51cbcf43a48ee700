mod balance;
mod cost;
pub mod hungarian;
mod least_cost;
mod method;
mod northwest;
mod problem;
mod session;
mod solution;
mod solver;
mod stepper;
mod steps;
mod vogel;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use balance::{BalanceOutcome, Balanced, balance_with_tolerance};
pub use cost::{total_cost, total_quantity};
pub use method::{Method, ParseMethodError};
pub use problem::{Matrix, ModelError, ParseKindError, ProblemKind, ProblemModel};
pub use session::SolverSession;
pub use solution::{SolveResult, Termination, format_amount};
pub use solver::{DEFAULT_TOLERANCE, SolveError, Solver};
pub use stepper::StepIterator;
pub use steps::{Step, StepRecorder, StepSnapshot};

/// Solve `model` with `method` using the default solver settings
pub fn solve(model: &ProblemModel, method: Method) -> Result<SolveResult, SolveError> {
    Solver::default().solve(model, method)
}

/// Balance a transportation model with the default tolerance
pub fn balance(model: &ProblemModel) -> Balanced {
    Solver::default().balance(model)
}

/// Solve once and return a cursor for stepwise replay
pub fn begin_stepping(model: &ProblemModel, method: Method) -> Result<StepIterator, SolveError> {
    Solver::default().begin_stepping(model, method)
}
