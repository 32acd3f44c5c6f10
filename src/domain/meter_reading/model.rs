//! Meter reading domain entity

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Owner;
use crate::shared::validations::validate_meter_values;

/// Snapshot of every owner's cumulative meter value (kWh) on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MeterReading {
    #[validate(length(min = 1, max = 128, message = "reading id is required"))]
    pub id: String,
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// Owner id -> cumulative kWh. Owners without an entry read as 0.
    #[validate(custom(function = "validate_meter_values"))]
    #[serde(default)]
    pub readings: BTreeMap<String, f64>,
}

impl MeterReading {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            readings: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, owner_id: impl Into<String>, kwh: f64) -> Self {
        self.readings.insert(owner_id.into(), kwh);
        self
    }

    /// Cumulative value for `owner_id`, `0` when the owner has no entry.
    pub fn value_for(&self, owner_id: &str) -> f64 {
        self.readings.get(owner_id).copied().unwrap_or(0.0)
    }

    /// Consumption of one owner from `self` to `later`.
    ///
    /// Floored at zero: a meter replaced or reset between the two readings
    /// yields no consumption rather than a negative one.
    pub fn consumption_until(&self, later: &MeterReading, owner_id: &str) -> f64 {
        (later.value_for(owner_id) - self.value_for(owner_id)).max(0.0)
    }

    /// Sum of [`consumption_until`](Self::consumption_until) over `owners`.
    pub fn total_consumption_until(&self, later: &MeterReading, owners: &[Owner]) -> f64 {
        owners
            .iter()
            .map(|o| self.consumption_until(later, &o.id))
            .sum()
    }

    /// Sum of all cumulative values in this snapshot.
    pub fn cumulative_total(&self) -> f64 {
        self.readings.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn missing_owner_reads_as_zero() {
        let r = MeterReading::new("r1", day(1)).with_value("a", 12.5);
        assert_eq!(r.value_for("a"), 12.5);
        assert_eq!(r.value_for("ghost"), 0.0);
    }

    #[test]
    fn consumption_is_floored_on_meter_reset() {
        let start = MeterReading::new("r1", day(1)).with_value("a", 900.0);
        let end = MeterReading::new("r2", day(31)).with_value("a", 15.0);
        assert_eq!(start.consumption_until(&end, "a"), 0.0);
        assert_eq!(end.consumption_until(&start, "a"), 885.0);
    }

    #[test]
    fn total_consumption_skips_negative_deltas() {
        let owners = vec![Owner::new("a", "Anna"), Owner::new("b", "Bruno")];
        let start = MeterReading::new("r1", day(1))
            .with_value("a", 100.0)
            .with_value("b", 300.0);
        let end = MeterReading::new("r2", day(31))
            .with_value("a", 160.0)
            .with_value("b", 20.0);
        assert_eq!(start.total_consumption_until(&end, &owners), 60.0);
    }

    #[test]
    fn negative_value_fails_validation() {
        let r = MeterReading::new("r1", day(1)).with_value("a", -3.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn deserializes_from_json() {
        let r: MeterReading = serde_json::from_str(
            r#"{"id":"r1","date":"2024-03-01","readings":{"a":10.0,"b":4}}"#,
        )
        .unwrap();
        assert_eq!(r.date, day(1));
        assert_eq!(r.value_for("b"), 4.0);
        assert_eq!(r.cumulative_total(), 14.0);
    }
}
