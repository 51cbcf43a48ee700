use tracing::{debug, instrument};

use crate::cost::total_cost;
use crate::method::Method;
use crate::problem::ProblemModel;
use crate::solution::{SolveResult, Termination};
use crate::steps::StepRecorder;

const NOTE: &str = "Usually improves on the Northwest Corner; not always optimal.";

/// Least Cost rule: repeatedly fill the cheapest cell whose row and column
/// still have quantity left. Ties go to the first cell in row-major order.
#[instrument(level = "debug", skip_all, fields(rows = model.rows(), cols = model.cols()))]
pub(crate) fn solve(model: &ProblemModel) -> SolveResult {
    let (m, n) = (model.rows(), model.cols());
    let cost = model.cost();
    let mut supply = model.supply().to_vec();
    let mut demand = model.demand().to_vec();
    let mut allocation = vec![vec![0.0; n]; m];
    let mut row_used = vec![false; m];
    let mut col_used = vec![false; n];
    let mut recorder = StepRecorder::new();
    let mut termination = Termination::Completed;

    while supply.iter().any(|&s| s > 0.0) && demand.iter().any(|&d| d > 0.0) {
        let Some((i, j)) = cheapest_cell(cost, &supply, &demand, &row_used, &col_used) else {
            debug!("no eligible cell left");
            termination = Termination::NoEligibleCell;
            break;
        };

        let qty = supply[i].min(demand[j]);
        allocation[i][j] = qty;
        recorder.record_allocation(
            format!(
                "Take the least-cost cell c={} and allocate {} at (O{}, D{}).",
                cost[i][j],
                qty,
                i + 1,
                j + 1
            ),
            &allocation,
        );
        supply[i] -= qty;
        demand[j] -= qty;

        if supply[i] == 0.0 {
            row_used[i] = true;
        }
        if demand[j] == 0.0 {
            col_used[j] = true;
        }
    }

    SolveResult {
        method: Method::LeastCost,
        total_cost: total_cost(&allocation, cost),
        allocation,
        steps: recorder.into_steps(),
        note: NOTE.to_string(),
        termination,
    }
}

fn cheapest_cell(
    cost: &[Vec<f64>],
    supply: &[f64],
    demand: &[f64],
    row_used: &[bool],
    col_used: &[bool],
) -> Option<(usize, usize)> {
    let mut min = f64::INFINITY;
    let mut pos = None;

    for (i, row) in cost.iter().enumerate() {
        if row_used[i] || supply[i] <= 0.0 {
            continue;
        }
        for (j, &c) in row.iter().enumerate() {
            if col_used[j] || demand[j] <= 0.0 {
                continue;
            }
            // strict comparison keeps the first cell on ties
            if c < min {
                min = c;
                pos = Some((i, j));
            }
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemKind;

    #[test]
    fn test_worked_example() {
        let model = ProblemModel::example(ProblemKind::Transportation);
        let result = solve(&model);

        // c=4 at (O1,D1), c=6 at (O1,D3), c=6 at (O2,D3), c=7 at (O2,D2), c=9 at (O3,D2)
        assert_eq!(
            result.steps[0].description,
            "Take the least-cost cell c=4 and allocate 10 at (O1, D1)."
        );
        assert_eq!(
            result.allocation,
            vec![vec![10.0, 0.0, 10.0], vec![0.0, 10.0, 20.0], vec![0.0, 25.0, 0.0]]
        );
        assert_eq!(result.total_cost, 40.0 + 60.0 + 70.0 + 120.0 + 225.0);
        assert_eq!(result.termination, Termination::Completed);
    }

    #[test]
    fn test_ties_take_first_cell_in_row_major_order() {
        let model = ProblemModel::transportation(
            vec![vec![3.0, 1.0], vec![1.0, 3.0]],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
        )
        .unwrap();
        let result = solve(&model);

        assert_eq!(
            result.steps[0].description,
            "Take the least-cost cell c=1 and allocate 5 at (O1, D2)."
        );
        assert_eq!(
            result.steps[1].description,
            "Take the least-cost cell c=1 and allocate 5 at (O2, D1)."
        );
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_row_and_column_exhausted_together() {
        let model = ProblemModel::transportation(
            vec![vec![1.0, 5.0], vec![5.0, 2.0]],
            vec![4.0, 6.0],
            vec![4.0, 6.0],
        )
        .unwrap();
        let result = solve(&model);
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.allocation, vec![vec![4.0, 0.0], vec![0.0, 6.0]]);
    }

    #[test]
    fn test_zero_supply_row_is_skipped() {
        let model = ProblemModel::transportation(
            vec![vec![0.0, 0.0], vec![3.0, 4.0]],
            vec![0.0, 7.0],
            vec![3.0, 4.0],
        )
        .unwrap();
        let result = solve(&model);
        assert_eq!(result.allocation[0], vec![0.0, 0.0]);
        assert_eq!(result.total_cost, 9.0 + 16.0);
    }
}
