use tracing::{debug, instrument};

use crate::cost::total_cost;
use crate::method::Method;
use crate::problem::{Matrix, ProblemModel, cell};
use crate::solution::{SolveResult, Termination};
use crate::steps::StepRecorder;

const NOTE: &str = "Condensed Hungarian procedure. Complex cases may need additional covering and adjustment steps.";

/// Pad to a square of side `max(rows, cols)` with zero cost
pub fn pad_square(cost: &[Vec<f64>]) -> Matrix {
    let rows = cost.len();
    let cols = cost.first().map_or(0, Vec::len);
    let n = rows.max(cols);
    (0..n)
        .map(|i| (0..n).map(|j| cell(cost, i, j)).collect())
        .collect()
}

/// Subtract each row's minimum from every entry in that row
pub fn reduce_rows(matrix: &mut Matrix) {
    for row in matrix.iter_mut() {
        let min = row.iter().copied().fold(f64::INFINITY, f64::min);
        row.iter_mut().for_each(|v| *v -= min);
    }
}

/// Subtract each column's minimum from every entry in that column
pub fn reduce_columns(matrix: &mut Matrix) {
    let cols = matrix.first().map_or(0, Vec::len);
    for j in 0..cols {
        let min = matrix.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min);
        matrix.iter_mut().for_each(|row| row[j] -= min);
    }
}

/// Greedy pass over a reduced matrix: rows with the fewest zeros pick
/// first, each taking its first zero in a column nobody has taken yet.
///
/// This does not cover zeros or adjust the matrix, so rows can end up
/// unassigned when the zeros admit no immediate perfect matching.
pub fn greedy_assign(reduced: &[Vec<f64>]) -> Vec<Option<usize>> {
    let n = reduced.len();
    let zeros = |i: usize| reduced[i].iter().filter(|&&v| v == 0.0).count();

    let mut order: Vec<usize> = (0..n).collect();
    // stable, so rows with equal zero counts keep ascending order
    order.sort_by_key(|&i| zeros(i));

    let mut assigned = vec![None; n];
    let mut used_cols = vec![false; reduced.first().map_or(0, Vec::len)];
    for i in order {
        let free_zero = (0..reduced[i].len()).find(|&j| reduced[i][j] == 0.0 && !used_cols[j]);
        if let Some(j) = free_zero {
            assigned[i] = Some(j);
            used_cols[j] = true;
        }
    }
    assigned
}

#[instrument(level = "debug", skip_all, fields(rows = model.rows(), cols = model.cols()))]
pub(crate) fn solve(model: &ProblemModel) -> SolveResult {
    let (rows, cols) = (model.rows(), model.cols());
    let mut recorder = StepRecorder::new();

    let mut reduced = pad_square(model.cost());
    reduce_rows(&mut reduced);
    recorder.record_reduction("Row reduction: subtract each row's minimum.", &reduced);
    reduce_columns(&mut reduced);
    recorder.record_reduction("Column reduction: subtract each column's minimum.", &reduced);

    let assigned = greedy_assign(&reduced);
    recorder.record_assignment(
        "Cover zeros and select independent zeros for the assignment.",
        &assigned,
    );

    let mut allocation = vec![vec![0.0; cols]; rows];
    for (i, col) in assigned.iter().enumerate().take(rows) {
        match col {
            Some(j) if *j < cols => allocation[i][*j] = 1.0,
            _ => {}
        }
    }

    let unassigned = assigned.iter().filter(|c| c.is_none()).count();
    let note = if unassigned == 0 {
        NOTE.to_string()
    } else {
        debug!(unassigned, "greedy pass left rows without an independent zero");
        format!("{NOTE} {unassigned} row(s) found no independent zero and remain unassigned.")
    };

    SolveResult {
        method: Method::Hungarian,
        total_cost: total_cost(&allocation, model.cost()),
        allocation,
        steps: recorder.into_steps(),
        note,
        termination: Termination::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemKind;

    fn assert_one_to_one(allocation: &Matrix) {
        for row in allocation {
            assert_eq!(row.iter().sum::<f64>(), 1.0, "row {:?}", row);
        }
        for j in 0..allocation[0].len() {
            assert_eq!(allocation.iter().map(|r| r[j]).sum::<f64>(), 1.0, "column {}", j);
        }
    }

    #[test]
    fn test_worked_example() {
        let model = ProblemModel::example(ProblemKind::Assignment);
        let result = solve(&model);

        assert_eq!(result.steps.len(), 3);
        assert_eq!(
            result.steps[0].reduced().unwrap(),
            &vec![
                vec![7.0, 0.0, 5.0, 6.0],
                vec![3.0, 1.0, 0.0, 4.0],
                vec![4.0, 7.0, 0.0, 7.0],
                vec![3.0, 2.0, 5.0, 0.0],
            ]
        );
        assert_eq!(
            result.steps[1].reduced().unwrap(),
            &vec![
                vec![4.0, 0.0, 5.0, 6.0],
                vec![0.0, 1.0, 0.0, 4.0],
                vec![1.0, 7.0, 0.0, 7.0],
                vec![0.0, 2.0, 5.0, 0.0],
            ]
        );
        assert_eq!(
            result.steps[2].assignment().unwrap(),
            &[Some(1), Some(0), Some(2), Some(3)]
        );
        assert_one_to_one(&result.allocation);
        assert_eq!(result.total_cost, 2.0 + 6.0 + 1.0 + 4.0);
        assert_eq!(result.note, NOTE);
    }

    #[test]
    fn test_unique_zero_matching_is_reproduced() {
        let model = ProblemModel::assignment(vec![
            vec![3.0, 1.0, 2.0],
            vec![2.0, 3.0, 1.0],
            vec![1.0, 2.0, 3.0],
        ])
        .unwrap();
        let result = solve(&model);

        assert_eq!(result.steps[2].assignment().unwrap(), &[Some(1), Some(2), Some(0)]);
        assert_eq!(
            result.allocation,
            vec![vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 0.0]]
        );
        assert_eq!(result.total_cost, 3.0);
    }

    #[test]
    fn test_greedy_pass_can_leave_rows_unassigned() {
        let model = ProblemModel::assignment(vec![
            vec![0.0, 5.0, 5.0],
            vec![0.0, 5.0, 5.0],
            vec![5.0, 0.0, 0.0],
        ])
        .unwrap();
        let result = solve(&model);

        assert_eq!(result.steps[2].assignment().unwrap(), &[Some(0), None, Some(1)]);
        assert_eq!(result.allocation[1], vec![0.0, 0.0, 0.0]);
        assert!(result.note.contains("1 row(s)"));
    }

    #[test]
    fn test_rectangular_costs_are_padded() {
        let cost = vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 0.0]];
        let mut padded = pad_square(&cost);
        assert_eq!(padded.len(), 3);
        assert_eq!(padded[2], vec![0.0, 0.0, 0.0]);

        reduce_rows(&mut padded);
        reduce_columns(&mut padded);
        assert_eq!(padded, vec![vec![3.0, 0.0, 2.0], vec![2.0, 5.0, 0.0], vec![0.0, 0.0, 0.0]]);
        // the padding row has the most zeros and picks last
        assert_eq!(greedy_assign(&padded), vec![Some(1), Some(2), Some(0)]);
    }
}
