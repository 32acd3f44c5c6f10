//! Bill calculation (per-owner cost breakdown)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::BillPeriod;

/// What to do with variable costs when no consumption was metered.
///
/// With zero total consumption there is nothing to divide the variable
/// pool (`total_amount - fixed_costs`) by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnattributedCostPolicy {
    /// Split the pool equally, like fixed costs.
    #[default]
    SplitEqually,
    /// Leave the pool unallocated; owners pay fixed costs only.
    Drop,
}

impl std::fmt::Display for UnattributedCostPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SplitEqually => write!(f, "split_equally"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

/// One owner's share of a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CalculatedExpense {
    pub owner_id: String,
    pub owner_name: String,
    /// kWh consumed in the period
    #[validate(range(min = 0.0))]
    pub consumption: f64,
    /// `consumption * cost_per_kwh`
    pub consumption_cost: f64,
    /// Equal share of the bill's fixed costs
    pub fixed_cost: f64,
    /// Equal share of a variable pool nobody consumed against
    #[serde(default)]
    pub unattributed_cost: f64,
    #[validate(range(min = 0.0))]
    pub total_cost: f64,
    /// Share of the period's total consumption, 0..=100
    pub percentage: f64,
}

/// Result of splitting one bill among its owners.
///
/// Derived data: recomputable at any time from the bill, its two readings
/// and the owner list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BillCalculation {
    pub bill_id: String,
    pub date: NaiveDate,
    pub period: BillPeriod,
    pub total_amount: f64,
    pub cost_per_kwh: f64,
    /// Sum of owner consumption across the period
    pub total_consumption: f64,
    /// Variable cost that could not be attributed by consumption
    #[serde(default)]
    pub unattributed_cost: f64,
    #[serde(default)]
    pub policy: UnattributedCostPolicy,
    #[validate(nested)]
    pub expenses: Vec<CalculatedExpense>,
}

impl BillCalculation {
    /// Sum of every owner's `total_cost`.
    pub fn allocated_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.total_cost).sum()
    }

    pub fn expense_for(&self, owner_id: &str) -> Option<&CalculatedExpense> {
        self.expenses.iter().find(|e| e.owner_id == owner_id)
    }
}
