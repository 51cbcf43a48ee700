use tracing::debug;

use crate::problem::ProblemModel;

/// What the balancer did to a model
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceOutcome {
    /// Supply and demand totals already match
    AlreadyBalanced,
    /// Both totals are zero; nothing was changed
    NothingToBalance,
    /// A zero-cost destination column absorbing the surplus was appended
    AddedDestination { surplus: f64 },
    /// A zero-cost origin row covering the deficit was appended
    AddedOrigin { deficit: f64 },
}

impl BalanceOutcome {
    /// Whether the model can now be solved as a balanced problem
    pub fn is_balanced(&self) -> bool {
        !matches!(self, BalanceOutcome::NothingToBalance)
    }

    pub fn message(&self) -> &'static str {
        match self {
            BalanceOutcome::AlreadyBalanced => "The problem is already balanced.",
            BalanceOutcome::NothingToBalance => "Supply and demand are both zero; nothing to balance.",
            BalanceOutcome::AddedDestination { .. } => "Added a fictitious destination to balance the problem.",
            BalanceOutcome::AddedOrigin { .. } => "Added a fictitious origin to balance the problem.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Balanced {
    pub model: ProblemModel,
    pub outcome: BalanceOutcome,
}

/// Balance a model, adding at most one fictitious row or column.
/// The input model is never modified.
pub fn balance_with_tolerance(model: &ProblemModel, tolerance: f64) -> Balanced {
    let total_supply = model.total_supply();
    let total_demand = model.total_demand();

    if total_supply == 0.0 && total_demand == 0.0 {
        return Balanced {
            model: model.clone(),
            outcome: BalanceOutcome::NothingToBalance,
        };
    }
    if (total_supply - total_demand).abs() <= tolerance {
        return Balanced {
            model: model.clone(),
            outcome: BalanceOutcome::AlreadyBalanced,
        };
    }

    let mut cost = model.cost().clone();
    let mut supply = model.supply().to_vec();
    let mut demand = model.demand().to_vec();

    let outcome = if total_supply > total_demand {
        let surplus = total_supply - total_demand;
        cost.iter_mut().for_each(|row| row.push(0.0));
        demand.push(surplus);
        BalanceOutcome::AddedDestination { surplus }
    } else {
        let deficit = total_demand - total_supply;
        cost.push(vec![0.0; model.cols()]);
        supply.push(deficit);
        BalanceOutcome::AddedOrigin { deficit }
    };
    debug!(?outcome, total_supply, total_demand, "balanced model");

    Balanced {
        model: ProblemModel::from_validated_parts(model.kind(), cost, supply, demand),
        outcome,
    }
}
