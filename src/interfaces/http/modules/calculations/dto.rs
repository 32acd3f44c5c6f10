//! Calculation request DTOs
//!
//! The service keeps no records: each request carries the bill, the owners
//! and the readings the calculation needs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{validate_owner_list, Bill, MeterReading, Owner, UnattributedCostPolicy};

/// Allocate a bill between two explicit readings.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AllocateRequest {
    #[validate(nested)]
    pub bill: Bill,
    #[validate(nested)]
    pub start_reading: MeterReading,
    #[validate(nested)]
    pub end_reading: MeterReading,
    #[validate(nested, custom(function = "validate_owner_list"))]
    pub owners: Vec<Owner>,
    /// Overrides the configured policy for this request
    #[serde(default)]
    pub policy: Option<UnattributedCostPolicy>,
}

/// Allocate a bill, resolving its readings from a list.
///
/// Uses `bill.reading_refs` when set, otherwise the earliest and latest
/// readings dated inside `bill.period`.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResolveAllocationRequest {
    #[validate(nested)]
    pub bill: Bill,
    #[validate(nested)]
    pub readings: Vec<MeterReading>,
    #[validate(nested, custom(function = "validate_owner_list"))]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub policy: Option<UnattributedCostPolicy>,
}
