use tracing::debug;

use crate::balance::BalanceOutcome;
use crate::method::Method;
use crate::problem::{ProblemKind, ProblemModel};
use crate::solution::SolveResult;
use crate::solver::{SolveError, Solver};
use crate::stepper::StepIterator;
use crate::steps::Step;

/// Caller-owned solving state: the model being edited, the chosen method,
/// the last full result and a lazily built step cursor.
///
/// Any change to the model, kind, balance or method drops the cached
/// cursor; `solve_all` always recomputes and never touches it.
#[derive(Debug, Clone)]
pub struct SolverSession {
    solver: Solver,
    model: ProblemModel,
    method: Option<Method>,
    balanced: bool,
    last_result: Option<SolveResult>,
    stepper: Option<StepIterator>,
}

impl SolverSession {
    pub fn new(model: ProblemModel) -> Self {
        Self {
            solver: Solver::default(),
            model,
            method: None,
            balanced: false,
            last_result: None,
            stepper: None,
        }
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self.invalidate();
        self
    }

    pub fn model(&self) -> &ProblemModel {
        &self.model
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// Whether the balancer has run successfully on the current model
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    pub fn last_result(&self) -> Option<&SolveResult> {
        self.last_result.as_ref()
    }

    pub fn stepper(&self) -> Option<&StepIterator> {
        self.stepper.as_ref()
    }

    pub fn set_model(&mut self, model: ProblemModel) {
        self.model = model;
        self.balanced = false;
        self.invalidate();
    }

    pub fn set_method(&mut self, method: Method) {
        if self.method != Some(method) {
            self.method = Some(method);
            self.invalidate();
        }
    }

    pub fn set_kind(&mut self, kind: ProblemKind) {
        if self.model.kind() != kind {
            let model = self.model.clone().into_kind(kind);
            self.set_model(model);
        }
    }

    /// Replace the model with a zero-filled grid of the given size
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.set_model(ProblemModel::blank(self.model.kind(), rows, cols));
    }

    pub fn load_example(&mut self, kind: ProblemKind) {
        self.set_model(ProblemModel::example(kind));
    }

    /// Clear every value and result, keeping the grid size, kind and method
    pub fn reset(&mut self) {
        self.resize(self.model.rows(), self.model.cols());
        self.last_result = None;
    }

    pub fn balance(&mut self) -> BalanceOutcome {
        let balanced = self.solver.balance(&self.model);
        if balanced.model != self.model {
            self.model = balanced.model;
            self.invalidate();
        }
        if balanced.outcome.is_balanced() {
            self.balanced = true;
        }
        debug!(outcome = ?balanced.outcome, "session balanced");
        balanced.outcome
    }

    /// Compute a fresh result for the current model and method
    pub fn solve_all(&mut self) -> Result<&SolveResult, SolveError> {
        let method = self.method.ok_or(SolveError::NoMethodSelected)?;
        let result = self.solver.solve(&self.model, method)?;
        Ok(self.last_result.insert(result))
    }

    /// Advance the cached cursor, solving first if there is none
    pub fn step(&mut self) -> Result<&Step, SolveError> {
        let method = self.method.ok_or(SolveError::NoMethodSelected)?;
        let stepper = match self.stepper.take() {
            Some(stepper) => stepper,
            None => {
                debug!(%method, "building step cache");
                self.solver.begin_stepping(&self.model, method)?
            }
        };
        self.stepper.insert(stepper).advance()
    }

    /// Rewind the cursor without recomputing; false when nothing is cached
    pub fn rewind(&mut self) -> bool {
        match self.stepper.as_mut() {
            Some(stepper) => {
                stepper.reset();
                true
            }
            None => false,
        }
    }

    fn invalidate(&mut self) {
        self.stepper = None;
    }
}
