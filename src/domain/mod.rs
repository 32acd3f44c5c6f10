//! Domain records
//!
//! Plain values handed in by whatever stores owners, readings and bills.
//! Nothing in here performs I/O.

pub mod bill;
pub mod calculation;
pub mod meter_reading;
pub mod owner;

pub use bill::{Bill, BillPeriod, ReadingRefs};
pub use calculation::{
    BillCalculation, CalculatedExpense, DashboardSummary, MonthlyTotals, OwnerConsumption,
    UnattributedCostPolicy,
};
pub use meter_reading::MeterReading;
pub use owner::{validate_owner_list, Owner, DEFAULT_OWNER_COLOR};

pub use crate::shared::errors::{DomainError, DomainResult};
