use std::fmt;

use tracing::{debug, instrument, trace};

use crate::cost::total_cost;
use crate::method::Method;
use crate::problem::ProblemModel;
use crate::solution::{SolveResult, Termination};
use crate::steps::StepRecorder;

const NOTE: &str = "Effective heuristic that usually lands close to the optimum in fewer iterations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Row(usize),
    Column(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(i) => write!(f, "row {}", i + 1),
            Line::Column(j) => write!(f, "column {}", j + 1),
        }
    }
}

/// Working state shared by the penalty and selection passes
struct Vogel<'a> {
    cost: &'a [Vec<f64>],
    supply: Vec<f64>,
    demand: Vec<f64>,
    active_rows: Vec<bool>,
    active_cols: Vec<bool>,
}

impl<'a> Vogel<'a> {
    fn new(model: &'a ProblemModel) -> Self {
        Self {
            cost: model.cost(),
            supply: model.supply().to_vec(),
            demand: model.demand().to_vec(),
            active_rows: vec![true; model.rows()],
            active_cols: vec![true; model.cols()],
        }
    }

    fn row_open(&self, i: usize) -> bool {
        self.active_rows[i] && self.supply[i] > 0.0
    }

    fn col_open(&self, j: usize) -> bool {
        self.active_cols[j] && self.demand[j] > 0.0
    }

    fn row_penalty(&self, i: usize) -> f64 {
        penalty(
            (0..self.demand.len())
                .filter(|&j| self.col_open(j))
                .map(|j| self.cost[i][j]),
        )
    }

    fn column_penalty(&self, j: usize) -> f64 {
        penalty(
            (0..self.supply.len())
                .filter(|&i| self.row_open(i))
                .map(|i| self.cost[i][j]),
        )
    }

    /// Rows are scanned before columns and only a strictly larger penalty
    /// replaces the running best, so the earliest line wins ties.
    fn select_line(&self) -> Option<(Line, f64)> {
        let mut best = None;
        let mut best_penalty = -1.0;

        for i in (0..self.supply.len()).filter(|&i| self.row_open(i)) {
            let p = self.row_penalty(i);
            if p > best_penalty {
                best_penalty = p;
                best = Some(Line::Row(i));
            }
        }
        for j in (0..self.demand.len()).filter(|&j| self.col_open(j)) {
            let p = self.column_penalty(j);
            if p > best_penalty {
                best_penalty = p;
                best = Some(Line::Column(j));
            }
        }

        best.map(|line| (line, best_penalty))
    }

    /// First minimum-cost open cell along the line
    fn cheapest_in(&self, line: Line) -> Option<(usize, usize)> {
        let cells: Box<dyn Iterator<Item = (usize, usize)> + '_> = match line {
            Line::Row(i) => Box::new((0..self.demand.len()).filter(|&j| self.col_open(j)).map(move |j| (i, j))),
            Line::Column(j) => Box::new((0..self.supply.len()).filter(|&i| self.row_open(i)).map(move |i| (i, j))),
        };

        let mut min = f64::INFINITY;
        let mut pos = None;
        for (i, j) in cells {
            if self.cost[i][j] < min {
                min = self.cost[i][j];
                pos = Some((i, j));
            }
        }
        pos
    }

    fn has_remaining(&self) -> bool {
        self.supply.iter().any(|&s| s > 0.0) && self.demand.iter().any(|&d| d > 0.0)
    }
}

/// Gap between the two smallest costs; a lone candidate's penalty is its own cost
fn penalty(costs: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = costs.collect();
    match values.len() {
        0 => 0.0,
        1 => values[0],
        _ => {
            values.sort_by(f64::total_cmp);
            values[1] - values[0]
        }
    }
}

/// Vogel's Approximation Method
#[instrument(level = "debug", skip_all, fields(rows = model.rows(), cols = model.cols()))]
pub(crate) fn solve(model: &ProblemModel) -> SolveResult {
    let mut state = Vogel::new(model);
    let mut allocation = vec![vec![0.0; model.cols()]; model.rows()];
    let mut recorder = StepRecorder::new();
    let mut termination = Termination::Completed;

    while state.has_remaining() {
        let Some((line, line_penalty)) = state.select_line() else {
            debug!("no penalty candidate left");
            termination = Termination::NoEligibleCell;
            break;
        };
        trace!(%line, line_penalty, "selected line");

        let Some((i, j)) = state.cheapest_in(line) else {
            debug!(%line, "no eligible cell on selected line");
            termination = Termination::NoEligibleCell;
            break;
        };

        let qty = state.supply[i].min(state.demand[j]);
        allocation[i][j] += qty;
        recorder.record_allocation(
            format!(
                "Penalty {} on {}. Allocate {} at (O{}, D{}) with c={}.",
                line_penalty,
                line,
                qty,
                i + 1,
                j + 1,
                state.cost[i][j]
            ),
            &allocation,
        );
        state.supply[i] -= qty;
        state.demand[j] -= qty;

        if state.supply[i] == 0.0 {
            state.active_rows[i] = false;
        }
        if state.demand[j] == 0.0 {
            state.active_cols[j] = false;
        }
    }

    SolveResult {
        method: Method::Vogel,
        total_cost: total_cost(&allocation, model.cost()),
        allocation,
        steps: recorder.into_steps(),
        note: NOTE.to_string(),
        termination,
    }
}
