use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Dense row-major matrix of costs or quantities
pub type Matrix = Vec<Vec<f64>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("No cost matrix supplied")]
    EmptyModel,
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{what} has {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Cost at ({row}, {col}) is {value}; costs must be finite and non-negative")]
    InvalidCost { row: usize, col: usize, value: f64 },
    #[error("{what} entry {index} is {value}; quantities must be finite and non-negative")]
    InvalidQuantity {
        what: &'static str,
        index: usize,
        value: f64,
    },
    #[error("Assignment problems need a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown problem kind '{0}' (expected transportation or assignment)")]
pub struct ParseKindError(pub String);

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Ship divisible quantities from origins to destinations
    Transportation,
    /// Pair each task with exactly one resource
    Assignment,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Transportation => "transportation",
            ProblemKind::Assignment => "assignment",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transportation" | "transport" | "transporte" => Ok(ProblemKind::Transportation),
            "assignment" | "asignacion" => Ok(ProblemKind::Assignment),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// A validated cost/supply/demand snapshot.
///
/// Construction checks shape and non-negativity, so solvers can index freely.
/// For assignment problems the matrix is square and supply/demand are all ones.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProblem", into = "RawProblem"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemModel {
    kind: ProblemKind,
    cost: Matrix,
    supply: Vec<f64>,
    demand: Vec<f64>,
}

impl ProblemModel {
    /// Largest grid `blank` will build
    pub const MAX_DIMENSION: usize = 6;

    pub fn new(
        kind: ProblemKind,
        cost: Matrix,
        supply: Vec<f64>,
        demand: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let (rows, cols) = validate_cost(&cost)?;
        match kind {
            ProblemKind::Transportation => {
                validate_quantities("supply", &supply, rows)?;
                validate_quantities("demand", &demand, cols)?;
                Ok(Self {
                    kind,
                    cost,
                    supply,
                    demand,
                })
            }
            ProblemKind::Assignment => {
                if rows != cols {
                    return Err(ModelError::NotSquare { rows, cols });
                }
                Ok(Self {
                    kind,
                    cost,
                    supply: vec![1.0; rows],
                    demand: vec![1.0; cols],
                })
            }
        }
    }

    pub fn transportation(cost: Matrix, supply: Vec<f64>, demand: Vec<f64>) -> Result<Self, ModelError> {
        Self::new(ProblemKind::Transportation, cost, supply, demand)
    }

    pub fn assignment(cost: Matrix) -> Result<Self, ModelError> {
        Self::new(ProblemKind::Assignment, cost, Vec::new(), Vec::new())
    }

    /// Zero-filled grid with dimensions clamped to `1..=MAX_DIMENSION`.
    /// Assignment grids are squared up to the larger dimension.
    pub fn blank(kind: ProblemKind, rows: usize, cols: usize) -> Self {
        let mut rows = rows.clamp(1, Self::MAX_DIMENSION);
        let mut cols = cols.clamp(1, Self::MAX_DIMENSION);
        let fill = match kind {
            ProblemKind::Transportation => 0.0,
            ProblemKind::Assignment => {
                rows = rows.max(cols);
                cols = rows;
                1.0
            }
        };
        Self {
            kind,
            cost: vec![vec![0.0; cols]; rows],
            supply: vec![fill; rows],
            demand: vec![fill; cols],
        }
    }

    /// Built-in sample problem for each kind
    pub fn example(kind: ProblemKind) -> Self {
        match kind {
            ProblemKind::Transportation => Self {
                kind,
                cost: vec![
                    vec![4.0, 8.0, 6.0],
                    vec![5.0, 7.0, 6.0],
                    vec![8.0, 9.0, 7.0],
                ],
                supply: vec![20.0, 30.0, 25.0],
                demand: vec![10.0, 35.0, 30.0],
            },
            ProblemKind::Assignment => Self {
                kind,
                cost: vec![
                    vec![9.0, 2.0, 7.0, 8.0],
                    vec![6.0, 4.0, 3.0, 7.0],
                    vec![5.0, 8.0, 1.0, 8.0],
                    vec![7.0, 6.0, 9.0, 4.0],
                ],
                supply: vec![1.0; 4],
                demand: vec![1.0; 4],
            },
        }
    }

    /// Reinterpret the model as another kind.
    ///
    /// Switching to assignment pads the matrix with zeros to `max(rows, cols)`
    /// and replaces supply/demand with ones. Switching to transportation keeps
    /// the current vectors.
    pub fn into_kind(self, kind: ProblemKind) -> Self {
        match kind {
            ProblemKind::Transportation => Self { kind, ..self },
            ProblemKind::Assignment => {
                let n = self.rows().max(self.cols());
                let cost = (0..n)
                    .map(|i| (0..n).map(|j| cell(&self.cost, i, j)).collect())
                    .collect();
                Self {
                    kind,
                    cost,
                    supply: vec![1.0; n],
                    demand: vec![1.0; n],
                }
            }
        }
    }

    pub(crate) fn from_validated_parts(
        kind: ProblemKind,
        cost: Matrix,
        supply: Vec<f64>,
        demand: Vec<f64>,
    ) -> Self {
        Self {
            kind,
            cost,
            supply,
            demand,
        }
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn cost(&self) -> &Matrix {
        &self.cost
    }

    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn rows(&self) -> usize {
        self.cost.len()
    }

    pub fn cols(&self) -> usize {
        self.cost.first().map_or(0, Vec::len)
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.total_supply() - self.total_demand()).abs() <= tolerance
    }
}

/// Cost lookup that treats cells outside the matrix as zero
pub(crate) fn cell(matrix: &[Vec<f64>], row: usize, col: usize) -> f64 {
    matrix
        .get(row)
        .and_then(|r| r.get(col))
        .copied()
        .unwrap_or(0.0)
}

fn validate_cost(cost: &[Vec<f64>]) -> Result<(usize, usize), ModelError> {
    let cols = match cost.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(ModelError::EmptyModel),
    };

    for (i, row) in cost.iter().enumerate() {
        if row.len() != cols {
            return Err(ModelError::RaggedRow {
                row: i,
                expected: cols,
                found: row.len(),
            });
        }
        for (j, &value) in row.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidCost { row: i, col: j, value });
            }
        }
    }

    Ok((cost.len(), cols))
}

fn validate_quantities(what: &'static str, values: &[f64], expected: usize) -> Result<(), ModelError> {
    if values.len() != expected {
        return Err(ModelError::LengthMismatch {
            what,
            expected,
            found: values.len(),
        });
    }
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        Some((index, &value)) => Err(ModelError::InvalidQuantity { what, index, value }),
        None => Ok(()),
    }
}

/// Wire shape of a problem; supply and demand may be omitted for assignment
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawProblem {
    kind: ProblemKind,
    cost: Matrix,
    #[serde(default)]
    supply: Vec<f64>,
    #[serde(default)]
    demand: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblem> for ProblemModel {
    type Error = ModelError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        ProblemModel::new(raw.kind, raw.cost, raw.supply, raw.demand)
    }
}

#[cfg(feature = "serde")]
impl From<ProblemModel> for RawProblem {
    fn from(model: ProblemModel) -> Self {
        Self {
            kind: model.kind,
            cost: model.cost,
            supply: model.supply,
            demand: model.demand,
        }
    }
}
