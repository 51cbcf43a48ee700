use crate::problem::cell;

/// Total cost of an allocation: `Σ allocation[i][j] * cost[i][j]`.
/// Cells missing from either matrix count as zero.
pub fn total_cost(allocation: &[Vec<f64>], cost: &[Vec<f64>]) -> f64 {
    allocation
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &qty)| (i, j, qty)))
        .map(|(i, j, qty)| qty * cell(cost, i, j))
        .sum()
}

/// Sum of every allocated quantity
pub fn total_quantity(allocation: &[Vec<f64>]) -> f64 {
    allocation.iter().flatten().sum()
}
