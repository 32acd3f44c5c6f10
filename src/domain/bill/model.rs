//! Bill domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::shared::validations::validation_error;

/// Calendar range a bill covers, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_period_order"))]
pub struct BillPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl BillPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

fn validate_period_order(period: &BillPeriod) -> Result<(), ValidationError> {
    if period.from > period.to {
        return Err(validation_error(
            "period_order",
            "period end must not precede period start",
        ));
    }
    Ok(())
}

/// Explicit ids of the readings bracketing a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReadingRefs {
    #[validate(length(min = 1, message = "start reading id is required"))]
    pub start_reading_id: String,
    #[validate(length(min = 1, message = "end reading id is required"))]
    pub end_reading_id: String,
}

/// A utility invoice for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_bill_amounts"))]
pub struct Bill {
    #[validate(length(min = 1, max = 128, message = "bill id is required"))]
    pub id: String,
    /// Invoice date
    pub date: NaiveDate,
    /// Full invoiced amount
    #[validate(range(min = 0.0, message = "total amount must be non-negative"))]
    pub total_amount: f64,
    /// Portion of `total_amount` not tied to consumption
    #[validate(range(min = 0.0, message = "fixed costs must be non-negative"))]
    pub fixed_costs: f64,
    /// The utility's own metered total; informational, never used in the split
    #[validate(range(min = 0.0, message = "total consumption must be non-negative"))]
    #[serde(default)]
    pub total_consumption: f64,
    #[validate(nested)]
    pub period: BillPeriod,
    /// When present, the bill is allocated against these two readings
    /// instead of the readings found inside `period`.
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_refs: Option<ReadingRefs>,
}

impl Bill {
    /// Amount left once fixed costs are taken out.
    pub fn variable_costs(&self) -> f64 {
        (self.total_amount - self.fixed_costs).max(0.0)
    }
}

fn validate_bill_amounts(bill: &Bill) -> Result<(), ValidationError> {
    let amounts = [bill.total_amount, bill.fixed_costs, bill.total_consumption];
    if amounts.iter().any(|v| !v.is_finite()) {
        return Err(validation_error(
            "non_finite_amount",
            "bill amounts must be finite numbers",
        ));
    }
    if bill.fixed_costs > bill.total_amount {
        return Err(validation_error(
            "fixed_exceeds_total",
            "fixed costs cannot exceed the total amount",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn bill(total: f64, fixed: f64) -> Bill {
        Bill {
            id: "b1".into(),
            date: date(2, 5),
            total_amount: total,
            fixed_costs: fixed,
            total_consumption: 420.0,
            period: BillPeriod::new(date(1, 1), date(1, 31)),
            reading_refs: None,
        }
    }

    #[test]
    fn variable_costs() {
        assert_eq!(bill(150.0, 30.0).variable_costs(), 120.0);
        assert_eq!(bill(30.0, 30.0).variable_costs(), 0.0);
    }

    #[test]
    fn fixed_costs_above_total_is_rejected() {
        let errors = bill(20.0, 30.0).validate().unwrap_err();
        let msgs = crate::shared::validations::describe_errors(&errors);
        assert_eq!(msgs, vec!["fixed costs cannot exceed the total amount"]);
    }

    #[test]
    fn negative_fixed_costs_is_rejected() {
        assert!(bill(20.0, -1.0).validate().is_err());
    }

    #[test]
    fn reversed_period_is_rejected() {
        let mut b = bill(100.0, 10.0);
        b.period = BillPeriod::new(date(2, 1), date(1, 1));
        let errors = b.validate().unwrap_err();
        let msgs = crate::shared::validations::describe_errors(&errors);
        assert_eq!(
            msgs,
            vec!["period: period end must not precede period start"]
        );
    }

    #[test]
    fn period_contains_is_inclusive() {
        let p = BillPeriod::new(date(1, 1), date(1, 31));
        assert!(p.contains(date(1, 1)));
        assert!(p.contains(date(1, 31)));
        assert!(!p.contains(date(2, 1)));
    }

    #[test]
    fn reading_refs_are_optional_on_the_wire() {
        let b: Bill = serde_json::from_str(
            r#"{"id":"b1","date":"2024-02-05","total_amount":150,"fixed_costs":30,
                "period":{"from":"2024-01-01","to":"2024-01-31"}}"#,
        )
        .unwrap();
        assert!(b.reading_refs.is_none());
        assert_eq!(b.total_consumption, 0.0);
    }
}
