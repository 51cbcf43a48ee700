use thiserror::Error;
use tracing::{debug, instrument};

use crate::balance::{self, Balanced};
use crate::method::Method;
use crate::problem::{ModelError, ProblemKind, ProblemModel};
use crate::solution::SolveResult;
use crate::stepper::StepIterator;
use crate::{hungarian, least_cost, northwest, vogel};

/// Tolerance used when comparing supply and demand totals
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Problem is not balanced: total supply {supply} vs total demand {demand}. Balance it first.")]
    UnbalancedProblem { supply: f64, demand: f64 },
    #[error("Method '{method}' does not solve {kind} problems")]
    MethodKindMismatch { method: Method, kind: ProblemKind },
    #[error("No cost matrix supplied")]
    EmptyModel,
    #[error("No more steps")]
    StepsExhausted,
    #[error("No method selected")]
    NoMethodSelected,
    #[error("Invalid model: {0}")]
    Model(ModelError),
}

impl From<ModelError> for SolveError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::EmptyModel => SolveError::EmptyModel,
            other => SolveError::Model(other),
        }
    }
}

/// Front-end that checks a model against a method and dispatches to it
#[derive(Debug, Clone)]
pub struct Solver {
    /// Tolerance for floating point comparisons of totals
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Run `method` on `model` to completion
    #[instrument(level = "debug", skip_all, fields(method = %method, kind = %model.kind()))]
    pub fn solve(&self, model: &ProblemModel, method: Method) -> Result<SolveResult, SolveError> {
        self.check(model, method)?;

        let result = match method {
            Method::NorthwestCorner => northwest::solve(model),
            Method::LeastCost => least_cost::solve(model),
            Method::Vogel => vogel::solve(model),
            Method::Hungarian => hungarian::solve(model),
        };

        debug!(
            steps = result.steps.len(),
            total_cost = result.total_cost,
            termination = ?result.termination,
            "solve finished"
        );
        Ok(result)
    }

    /// Solve once and wrap the result for one-step-at-a-time replay
    pub fn begin_stepping(&self, model: &ProblemModel, method: Method) -> Result<StepIterator, SolveError> {
        self.solve(model, method).map(StepIterator::new)
    }

    pub fn balance(&self, model: &ProblemModel) -> Balanced {
        balance::balance_with_tolerance(model, self.tolerance)
    }

    fn check(&self, model: &ProblemModel, method: Method) -> Result<(), SolveError> {
        if model.rows() == 0 || model.cols() == 0 {
            return Err(SolveError::EmptyModel);
        }
        if method.kind() != model.kind() {
            return Err(SolveError::MethodKindMismatch {
                method,
                kind: model.kind(),
            });
        }
        if model.kind() == ProblemKind::Transportation && !model.is_balanced(self.tolerance) {
            return Err(SolveError::UnbalancedProblem {
                supply: model.total_supply(),
                demand: model.total_demand(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{total_cost, total_quantity};

    fn transport_models() -> Vec<ProblemModel> {
        vec![
            ProblemModel::example(ProblemKind::Transportation),
            ProblemModel::transportation(
                vec![vec![2.0, 3.0, 1.0, 4.0], vec![5.0, 4.0, 8.0, 2.0], vec![5.0, 6.0, 8.0, 7.0]],
                vec![35.0, 45.0, 20.0],
                vec![20.0, 30.0, 25.0, 25.0],
            )
            .unwrap(),
            ProblemModel::transportation(
                vec![vec![19.0, 30.0, 50.0, 10.0], vec![70.0, 30.0, 40.0, 60.0], vec![40.0, 8.0, 70.0, 20.0]],
                vec![7.0, 9.0, 18.0],
                vec![5.0, 8.0, 7.0, 14.0],
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_transportation_solutions_are_feasible() {
        let solver = Solver::new();
        for model in transport_models() {
            for method in [Method::NorthwestCorner, Method::LeastCost, Method::Vogel] {
                let result = solver.solve(&model, method).unwrap();

                for (i, row) in result.allocation.iter().enumerate() {
                    assert!(row.iter().sum::<f64>() <= model.supply()[i] + 1e-9, "{method} row {i}");
                }
                for j in 0..model.cols() {
                    let shipped: f64 = result.allocation.iter().map(|r| r[j]).sum();
                    assert!(shipped <= model.demand()[j] + 1e-9, "{method} column {j}");
                }
                assert!((total_quantity(&result.allocation) - model.total_supply()).abs() < 1e-9);
                assert!((result.total_cost() - total_cost(result.allocation(), model.cost())).abs() < 1e-9);
                assert!(result.is_complete());
            }
        }
    }

    #[test]
    fn test_known_initial_costs() {
        // textbook instance: NW 1015, least cost 814, VAM 779
        let model = &transport_models()[2];
        let solver = Solver::new();
        assert_eq!(solver.solve(model, Method::NorthwestCorner).unwrap().total_cost, 1015.0);
        assert_eq!(solver.solve(model, Method::LeastCost).unwrap().total_cost, 814.0);
        assert_eq!(solver.solve(model, Method::Vogel).unwrap().total_cost, 779.0);
    }

    #[test]
    fn test_method_kind_mismatch() {
        let solver = Solver::new();
        let transport = ProblemModel::example(ProblemKind::Transportation);
        let assignment = ProblemModel::example(ProblemKind::Assignment);

        assert_eq!(
            solver.solve(&transport, Method::Hungarian).unwrap_err(),
            SolveError::MethodKindMismatch {
                method: Method::Hungarian,
                kind: ProblemKind::Transportation
            }
        );
        for method in [Method::NorthwestCorner, Method::LeastCost, Method::Vogel] {
            assert!(matches!(
                solver.solve(&assignment, method),
                Err(SolveError::MethodKindMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_unbalanced_rejected_until_balanced() {
        let solver = Solver::new();
        let model = ProblemModel::transportation(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![10.0, 20.0],
            vec![5.0, 5.0],
        )
        .unwrap();

        let err = solver.solve(&model, Method::NorthwestCorner).unwrap_err();
        assert_eq!(
            err,
            SolveError::UnbalancedProblem {
                supply: 30.0,
                demand: 10.0
            }
        );

        let balanced = solver.balance(&model);
        let result = solver.solve(&balanced.model, Method::Vogel).unwrap();
        assert_eq!(result.allocation[0].len(), 3);
        assert_eq!(total_quantity(&result.allocation), 30.0);
    }

    #[test]
    fn test_model_errors_convert() {
        assert_eq!(SolveError::from(ModelError::EmptyModel), SolveError::EmptyModel);
        let err = SolveError::from(ModelError::NotSquare { rows: 2, cols: 3 });
        assert_eq!(err.to_string(), "Invalid model: Assignment problems need a square matrix, got 2x3");
    }
}
