//! Dashboard statistics
//!
//! Summaries over readings and already computed calculations. Nothing here
//! allocates a bill; all functions are pure.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{
    Bill, BillCalculation, DashboardSummary, MeterReading, MonthlyTotals, Owner,
    OwnerConsumption, DEFAULT_OWNER_COLOR,
};

/// Total owner consumption between the earliest and latest of `readings`.
///
/// Returns `0` with fewer than two readings. Same per-owner floor as the
/// allocation engine.
pub fn period_consumption(readings: &[MeterReading], owners: &[Owner]) -> f64 {
    if readings.len() < 2 {
        return 0.0;
    }

    let mut sorted: Vec<&MeterReading> = readings.iter().collect();
    sorted.sort_by_key(|r| r.date);
    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    first.total_consumption_until(last, owners)
}

/// Sum `total_cost` per owner name into calendar-month buckets.
///
/// Produces exactly `months_back` buckets, oldest first, the last one being
/// the month of `today`. A calculation lands in the month its period ends.
pub fn monthly_aggregate(
    calculations: &[BillCalculation],
    months_back: u32,
    today: NaiveDate,
) -> Vec<MonthlyTotals> {
    (0..months_back)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(today.year(), today.month(), back);
            let mut per_owner: BTreeMap<String, f64> = BTreeMap::new();

            for calc in calculations
                .iter()
                .filter(|c| c.period.to.year() == year && c.period.to.month() == month)
            {
                for expense in &calc.expenses {
                    *per_owner.entry(expense.owner_name.clone()).or_insert(0.0) +=
                        expense.total_cost;
                }
            }

            MonthlyTotals {
                month: format!("{:04}-{:02}", year, month),
                per_owner,
            }
        })
        .collect()
}

/// `(year, month)` that lies `back` months before the given one.
fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(back);
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}

/// Total consumption per owner name across `calculations`, in first-seen
/// order. Colors come from `owners` (matched by id).
pub fn owner_consumption_totals(
    calculations: &[BillCalculation],
    owners: &[Owner],
) -> Vec<OwnerConsumption> {
    let mut totals: Vec<OwnerConsumption> = Vec::new();

    for expense in calculations.iter().flat_map(|c| c.expenses.iter()) {
        match totals.iter_mut().find(|t| t.name == expense.owner_name) {
            Some(entry) => entry.value += expense.consumption,
            None => {
                let color = owners
                    .iter()
                    .find(|o| o.id == expense.owner_id)
                    .map(|o| o.color.clone())
                    .unwrap_or_else(|| DEFAULT_OWNER_COLOR.to_string());
                totals.push(OwnerConsumption {
                    name: expense.owner_name.clone(),
                    value: expense.consumption,
                    color,
                });
            }
        }
    }

    totals
}

/// Headline numbers: owner count, latest reading and latest bill.
pub fn dashboard_summary(
    owners: &[Owner],
    readings: &[MeterReading],
    bills: &[Bill],
) -> DashboardSummary {
    let last_reading = readings.iter().max_by_key(|r| r.date);
    let last_bill = bills.iter().max_by_key(|b| b.date);

    DashboardSummary {
        owner_count: owners.len(),
        last_reading_date: last_reading.map(|r| r.date),
        last_reading_total: last_reading.map(|r| r.cumulative_total()).unwrap_or(0.0),
        last_bill_amount: last_bill.map(|b| b.total_amount),
    }
}
