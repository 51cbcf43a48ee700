use crate::method::Method;
use crate::problem::{Matrix, ProblemKind};
use crate::steps::Step;

/// How a solver loop ended
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Supply and demand ran out, or every row was processed
    Completed,
    /// No valid next cell existed while quantities remained (degenerate input)
    NoEligibleCell,
}

/// The result of one solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Procedure that produced this result
    pub method: Method,
    /// Final allocation, same shape as the cost matrix
    pub allocation: Matrix,
    /// Ordered trace of intermediate states
    pub steps: Vec<Step>,
    /// Total cost of `allocation` against the model costs
    pub total_cost: f64,
    /// Explanation of the result's quality
    pub note: String,
    pub termination: Termination,
}

impl SolveResult {
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }

    /// One-paragraph economic reading of the result
    pub fn insight(&self, kind: ProblemKind) -> String {
        let name = self.method.display_name();
        let cost = format_amount(self.total_cost);
        match kind {
            ProblemKind::Transportation => {
                let priority = if self.method == Method::NorthwestCorner {
                    "operational speed"
                } else {
                    "lower unit costs"
                };
                format!(
                    "{name}: the estimated total cost is $ {cost}. This allocation meets supply and demand, \
                     prioritizing {priority}, and suggests potential savings over unstructured decisions."
                )
            }
            ProblemKind::Assignment => format!(
                "{name}: the assignment brings the total cost to $ {cost} by selecting exclusive pairings. \
                 It suggests better productivity by avoiding idle resources and cost overruns."
            ),
        }
    }
}

/// Human formatting with at most two decimals; non-finite values render as a dash
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(method: Method, total_cost: f64) -> SolveResult {
        SolveResult {
            method,
            allocation: vec![vec![1.0]],
            steps: Vec::new(),
            total_cost,
            note: String::new(),
            termination: Termination::Completed,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(500.0), "500");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(1.0 / 3.0), "0.33");
        assert_eq!(format_amount(-0.001), "0");
        assert_eq!(format_amount(f64::INFINITY), "—");
    }

    #[test]
    fn test_insight_mentions_priority() {
        let nw = result(Method::NorthwestCorner, 500.0).insight(ProblemKind::Transportation);
        assert!(nw.starts_with("Northwest Corner: "));
        assert!(nw.contains("$ 500"));
        assert!(nw.contains("operational speed"));

        let vogel = result(Method::Vogel, 470.0).insight(ProblemKind::Transportation);
        assert!(vogel.contains("lower unit costs"));

        let hungarian = result(Method::Hungarian, 13.0).insight(ProblemKind::Assignment);
        assert!(hungarian.contains("exclusive pairings"));
    }
}
