//! Expense allocation engine
//!
//! Splits a bill among co-owners: fixed costs equally, variable costs in
//! proportion to each owner's metered consumption over the billing period.
//! Every function here is pure; identical inputs give identical output.

use crate::domain::{
    validate_owner_list, Bill, BillCalculation, BillPeriod, CalculatedExpense, DomainError,
    DomainResult, MeterReading, Owner, ReadingRefs, UnattributedCostPolicy,
};
use crate::shared::validations::ensure_valid;

/// Allocate `bill` using the default [`UnattributedCostPolicy`].
pub fn allocate(
    bill: &Bill,
    start_reading: &MeterReading,
    end_reading: &MeterReading,
    owners: &[Owner],
) -> DomainResult<BillCalculation> {
    allocate_with_policy(
        bill,
        start_reading,
        end_reading,
        owners,
        UnattributedCostPolicy::default(),
    )
}

/// Allocate `bill` between `start_reading` and `end_reading`.
///
/// Readings are not re-ordered. Each owner's consumption is floored at
/// zero, so a swapped pair or a reset meter never produces negative
/// consumption or cost. Output expenses follow the order of `owners`.
pub fn allocate_with_policy(
    bill: &Bill,
    start_reading: &MeterReading,
    end_reading: &MeterReading,
    owners: &[Owner],
    policy: UnattributedCostPolicy,
) -> DomainResult<BillCalculation> {
    validate_inputs(bill, start_reading, end_reading, owners)?;

    let consumptions: Vec<f64> = owners
        .iter()
        .map(|o| start_reading.consumption_until(end_reading, &o.id))
        .collect();
    let total_consumption: f64 = consumptions.iter().sum();
    if !total_consumption.is_finite() {
        return Err(DomainError::validation(
            "metered consumption exceeds the representable range",
        ));
    }

    // Shares are taken from deltas normalised by the largest one, so the
    // weights stay in 0..=1 whatever the magnitude of the readings.
    let scale = consumptions.iter().copied().fold(0.0_f64, f64::max);
    let weights: Vec<f64> = consumptions
        .iter()
        .map(|c| if scale > 0.0 { c / scale } else { 0.0 })
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let owner_count = owners.len() as f64;
    let variable_costs = bill.variable_costs();
    let cost_per_kwh = if total_consumption > 0.0 {
        variable_costs / total_consumption
    } else {
        0.0
    };
    if !cost_per_kwh.is_finite() {
        return Err(DomainError::validation(
            "metered consumption is too small to price",
        ));
    }

    // Variable costs with no consumption to divide them by.
    let unattributed_cost = if total_consumption > 0.0 {
        0.0
    } else {
        variable_costs
    };
    let unattributed_share = match policy {
        UnattributedCostPolicy::SplitEqually => unattributed_cost / owner_count,
        UnattributedCostPolicy::Drop => 0.0,
    };
    let fixed_share = bill.fixed_costs / owner_count;

    let expenses = owners
        .iter()
        .zip(consumptions)
        .zip(weights)
        .map(|((owner, consumption), weight)| {
            let share = if weight_sum > 0.0 {
                weight / weight_sum
            } else {
                0.0
            };
            let consumption_cost = variable_costs * share;

            CalculatedExpense {
                owner_id: owner.id.clone(),
                owner_name: owner.name.clone(),
                consumption,
                consumption_cost,
                fixed_cost: fixed_share,
                unattributed_cost: unattributed_share,
                total_cost: consumption_cost + fixed_share + unattributed_share,
                percentage: share * 100.0,
            }
        })
        .collect();

    Ok(BillCalculation {
        bill_id: bill.id.clone(),
        date: bill.date,
        period: bill.period,
        total_amount: bill.total_amount,
        cost_per_kwh,
        total_consumption,
        unattributed_cost,
        policy,
        expenses,
    })
}

/// Resolve the bill's bracketing readings, then allocate.
///
/// Uses the bill's explicit reading ids when it has them, otherwise the
/// earliest and latest readings dated inside its period.
pub fn allocate_bill(
    bill: &Bill,
    readings: &[MeterReading],
    owners: &[Owner],
    policy: UnattributedCostPolicy,
) -> DomainResult<BillCalculation> {
    let (start, end) = match &bill.reading_refs {
        Some(refs) => resolve_by_ids(refs, readings)?,
        None => resolve_in_period(&bill.period, readings)?,
    };
    allocate_with_policy(bill, start, end, owners, policy)
}

/// Find the two readings a bill references by id.
pub fn resolve_by_ids<'a>(
    refs: &ReadingRefs,
    readings: &'a [MeterReading],
) -> DomainResult<(&'a MeterReading, &'a MeterReading)> {
    let find = |id: &str| {
        readings
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "MeterReading",
                field: "id",
                value: id.to_string(),
            })
    };

    Ok((
        find(refs.start_reading_id.as_str())?,
        find(refs.end_reading_id.as_str())?,
    ))
}

/// Earliest and latest readings dated inside `period` (inclusive).
///
/// Readings sharing a date keep their input order. A period needs two
/// readings to be allocated; fewer is an error, never a zero result.
pub fn resolve_in_period<'a>(
    period: &BillPeriod,
    readings: &'a [MeterReading],
) -> DomainResult<(&'a MeterReading, &'a MeterReading)> {
    let mut in_period: Vec<&MeterReading> = readings
        .iter()
        .filter(|r| period.contains(r.date))
        .collect();

    if in_period.len() < 2 {
        return Err(DomainError::InsufficientReadings {
            from: period.from,
            to: period.to,
            found: in_period.len(),
        });
    }

    in_period.sort_by_key(|r| r.date);
    let first = in_period[0];
    let last = in_period[in_period.len() - 1];
    Ok((first, last))
}

fn validate_inputs(
    bill: &Bill,
    start_reading: &MeterReading,
    end_reading: &MeterReading,
    owners: &[Owner],
) -> DomainResult<()> {
    ensure_valid(bill)?;
    ensure_valid(start_reading).map_err(|e| prefixed("start_reading", &e))?;
    ensure_valid(end_reading).map_err(|e| prefixed("end_reading", &e))?;
    validate_owner_list(owners)
        .map_err(|e| DomainError::validation(format!("owners: {}", owner_list_message(&e))))?;
    for (idx, owner) in owners.iter().enumerate() {
        ensure_valid(owner).map_err(|e| prefixed(&format!("owners[{}]", idx), &e))?;
    }
    Ok(())
}

fn owner_list_message(err: &validator::ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// Re-raise a validation failure under the path of the offending input.
fn prefixed(path: &str, err: &DomainError) -> DomainError {
    let message = match err {
        DomainError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    };
    DomainError::validation(format!("{}: {}", path, message))
}
