use crate::problem::Matrix;

/// What a step captured at the moment it was recorded
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "type", content = "data"))]
#[derive(Debug, Clone, PartialEq)]
pub enum StepSnapshot {
    /// Allocation in progress
    Allocation(Matrix),
    /// Hungarian reduced cost matrix
    Reduced(Matrix),
    /// Row to column pairing; `None` marks a row left unassigned
    Assignment(Vec<Option<usize>>),
}

/// One narrated decision of a solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub description: String,
    pub snapshot: StepSnapshot,
}

impl Step {
    pub fn allocation(&self) -> Option<&Matrix> {
        match &self.snapshot {
            StepSnapshot::Allocation(m) => Some(m),
            _ => None,
        }
    }

    pub fn reduced(&self) -> Option<&Matrix> {
        match &self.snapshot {
            StepSnapshot::Reduced(m) => Some(m),
            _ => None,
        }
    }

    pub fn assignment(&self) -> Option<&[Option<usize>]> {
        match &self.snapshot {
            StepSnapshot::Assignment(a) => Some(a),
            _ => None,
        }
    }
}

/// Append-only trace. Every payload is copied on record so later
/// mutation of the working matrices cannot reach earlier steps.
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_allocation(&mut self, description: impl Into<String>, allocation: &[Vec<f64>]) {
        self.push(description.into(), StepSnapshot::Allocation(allocation.to_vec()));
    }

    pub fn record_reduction(&mut self, description: impl Into<String>, reduced: &[Vec<f64>]) {
        self.push(description.into(), StepSnapshot::Reduced(reduced.to_vec()));
    }

    pub fn record_assignment(&mut self, description: impl Into<String>, assignment: &[Option<usize>]) {
        self.push(description.into(), StepSnapshot::Assignment(assignment.to_vec()));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    fn push(&mut self, description: String, snapshot: StepSnapshot) {
        tracing::trace!(step = self.steps.len() + 1, %description, "recorded step");
        self.steps.push(Step { description, snapshot });
    }
}
