use crate::solution::SolveResult;
use crate::solver::SolveError;
use crate::steps::Step;

/// Cursor over the steps of a finished solve.
///
/// The result is computed once up front; advancing only moves the cursor,
/// so replay never re-runs the solver.
#[derive(Debug, Clone)]
pub struct StepIterator {
    result: SolveResult,
    cursor: usize,
}

impl StepIterator {
    pub fn new(result: SolveResult) -> Self {
        Self { result, cursor: 0 }
    }

    /// Next step, or `StepsExhausted` once every step has been returned
    pub fn advance(&mut self) -> Result<&Step, SolveError> {
        let step = self
            .result
            .steps
            .get(self.cursor)
            .ok_or(SolveError::StepsExhausted)?;
        self.cursor += 1;
        Ok(step)
    }

    /// Step that the next `advance` would return
    pub fn peek(&self) -> Option<&Step> {
        self.result.steps.get(self.cursor)
    }

    /// Rewind to the first step, keeping the result
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.result.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.steps.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.len()
    }

    /// Steps already returned by `advance`
    pub fn shown(&self) -> &[Step] {
        &self.result.steps[..self.cursor]
    }

    pub fn result(&self) -> &SolveResult {
        &self.result
    }

    pub fn into_result(self) -> SolveResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::problem::{ProblemKind, ProblemModel};
    use crate::solver::Solver;

    fn stepper() -> StepIterator {
        Solver::new()
            .begin_stepping(&ProblemModel::example(ProblemKind::Transportation), Method::NorthwestCorner)
            .unwrap()
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut it = stepper();
        let total = it.len();
        assert_eq!(total, 5);

        for n in 1..=total {
            let step = it.advance().unwrap();
            assert!(step.allocation().is_some());
            assert_eq!(it.cursor(), n);
        }
        assert!(it.is_exhausted());
        assert_eq!(it.remaining(), 0);

        // call number len + 1
        assert_eq!(it.advance().unwrap_err(), SolveError::StepsExhausted);
        assert_eq!(it.cursor(), total);
    }

    #[test]
    fn test_reset_replays_same_steps() {
        let mut it = stepper();
        let first = it.advance().unwrap().clone();
        it.advance().unwrap();
        assert_eq!(it.shown().len(), 2);

        it.reset();
        assert_eq!(it.cursor(), 0);
        assert_eq!(it.peek(), Some(&first));
        assert_eq!(it.advance().unwrap(), &first);
        assert_eq!(it.len(), 5);
    }

    #[test]
    fn test_steps_match_full_solve() {
        let model = ProblemModel::example(ProblemKind::Transportation);
        let full = Solver::new().solve(&model, Method::Vogel).unwrap();
        let mut it = Solver::new().begin_stepping(&model, Method::Vogel).unwrap();

        let mut replayed = Vec::new();
        while let Ok(step) = it.advance() {
            replayed.push(step.clone());
        }
        assert_eq!(replayed, full.steps);
        assert_eq!(it.into_result(), full);
    }
}
