//! Calculation aggregate
//!
//! Per-owner cost breakdowns and the summaries built from them.

pub mod model;
pub mod stats;

pub use model::{BillCalculation, CalculatedExpense, UnattributedCostPolicy};
pub use stats::{DashboardSummary, MonthlyTotals, OwnerConsumption};
