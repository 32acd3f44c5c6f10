//! Summary records built from previously computed calculations

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Total cost per owner name for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub per_owner: BTreeMap<String, f64>,
}

/// Total consumption attributed to one owner across many bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OwnerConsumption {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Headline figures for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub owner_count: usize,
    pub last_reading_date: Option<NaiveDate>,
    /// Sum of the latest reading's cumulative values (kWh)
    pub last_reading_total: f64,
    pub last_bill_amount: Option<f64>,
}
