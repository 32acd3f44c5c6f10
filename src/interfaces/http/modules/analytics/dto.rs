//! Analytics API data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Bill, BillCalculation, MeterReading, Owner};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PeriodConsumptionRequest {
    #[validate(nested)]
    pub readings: Vec<MeterReading>,
    #[validate(nested)]
    pub owners: Vec<Owner>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PeriodConsumptionResponse {
    /// kWh consumed by all owners between the earliest and latest reading
    pub total_consumption: f64,
    pub reading_count: usize,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct MonthlyStatsRequest {
    #[validate(nested)]
    pub calculations: Vec<BillCalculation>,
    /// Number of months to return, ending at the current month
    #[validate(range(min = 1, max = 120, message = "months_back must be between 1 and 120"))]
    #[serde(default)]
    pub months_back: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OwnerStatsRequest {
    #[validate(nested)]
    pub calculations: Vec<BillCalculation>,
    /// Used for display colors only
    #[validate(nested)]
    #[serde(default)]
    pub owners: Vec<Owner>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SummaryRequest {
    #[validate(nested)]
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[validate(nested)]
    #[serde(default)]
    pub readings: Vec<MeterReading>,
    #[validate(nested)]
    #[serde(default)]
    pub bills: Vec<Bill>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_back_out_of_range_is_rejected() {
        let req: MonthlyStatsRequest =
            serde_json::from_str(r#"{"calculations":[],"months_back":0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: MonthlyStatsRequest = serde_json::from_str(r#"{"calculations":[]}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.months_back, None);
    }

    #[test]
    fn period_consumption_response_serialization() {
        let json = serde_json::to_string(&PeriodConsumptionResponse {
            total_consumption: 42.5,
            reading_count: 3,
        })
        .unwrap();
        assert!(json.contains("\"total_consumption\":42.5"));
        assert!(json.contains("\"reading_count\":3"));
    }
}
