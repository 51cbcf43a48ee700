use tracing::instrument;

use crate::cost::total_cost;
use crate::method::Method;
use crate::problem::ProblemModel;
use crate::solution::{SolveResult, Termination};
use crate::steps::StepRecorder;

const NOTE: &str = "Quick initial solution; optimality is not guaranteed. Useful as a starting point.";

/// Northwest Corner rule: walk from the top-left cell, filling each cell
/// with as much as its row and column allow.
#[instrument(level = "debug", skip_all, fields(rows = model.rows(), cols = model.cols()))]
pub(crate) fn solve(model: &ProblemModel) -> SolveResult {
    let (m, n) = (model.rows(), model.cols());
    let mut supply = model.supply().to_vec();
    let mut demand = model.demand().to_vec();
    let mut allocation = vec![vec![0.0; n]; m];
    let mut recorder = StepRecorder::new();

    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        let qty = supply[i].min(demand[j]);
        allocation[i][j] = qty;
        recorder.record_allocation(
            format!("Allocate {} at (O{}, D{}) by Northwest Corner.", qty, i + 1, j + 1),
            &allocation,
        );
        supply[i] -= qty;
        demand[j] -= qty;

        // Simultaneous exhaustion advances the column.
        match (supply[i] == 0.0, demand[j] == 0.0) {
            (true, false) => i += 1,
            _ => j += 1,
        }
    }

    SolveResult {
        method: Method::NorthwestCorner,
        total_cost: total_cost(&allocation, model.cost()),
        allocation,
        steps: recorder.into_steps(),
        note: NOTE.to_string(),
        termination: Termination::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemKind;

    #[test]
    fn test_worked_example() {
        let model = ProblemModel::example(ProblemKind::Transportation);
        let result = solve(&model);

        assert_eq!(
            result.allocation,
            vec![vec![10.0, 10.0, 0.0], vec![0.0, 25.0, 5.0], vec![0.0, 0.0, 25.0]]
        );
        assert_eq!(result.total_cost, 500.0);
        assert_eq!(result.steps.len(), 5);
        assert_eq!(result.steps[0].description, "Allocate 10 at (O1, D1) by Northwest Corner.");
        assert_eq!(result.steps[4].description, "Allocate 25 at (O3, D3) by Northwest Corner.");
        assert!(result.note.contains("not guaranteed"));
    }

    #[test]
    fn test_simultaneous_exhaustion_moves_right() {
        let model = ProblemModel::transportation(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![10.0, 10.0],
            vec![10.0, 10.0],
        )
        .unwrap();
        let result = solve(&model);

        // (0,0) empties both, so the walk visits (0,1) with a zero allocation
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[1].description, "Allocate 0 at (O1, D2) by Northwest Corner.");
        assert_eq!(result.allocation, vec![vec![10.0, 0.0], vec![0.0, 10.0]]);
        assert_eq!(result.total_cost, 50.0);
    }

    #[test]
    fn test_step_count_bound() {
        let model = ProblemModel::transportation(
            vec![vec![2.0, 3.0, 1.0, 4.0], vec![5.0, 4.0, 8.0, 2.0]],
            vec![35.0, 45.0],
            vec![20.0, 20.0, 25.0, 15.0],
        )
        .unwrap();
        let result = solve(&model);
        assert!(result.steps.len() <= model.rows() + model.cols() - 1);
        assert_eq!(crate::cost::total_quantity(&result.allocation), 80.0);
    }
}
