//! Allocation engine, statistics and the service that fronts them

pub mod allocation;
pub mod services;
pub mod stats;

pub use allocation::{
    allocate, allocate_bill, allocate_with_policy, resolve_by_ids, resolve_in_period,
};
pub use services::AllocationService;
pub use stats::{dashboard_summary, monthly_aggregate, owner_consumption_totals, period_consumption};
