//! Allocation service: the configured, observable entry point to the engine

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::application::{allocation, stats};
use crate::config::AllocationConfig;
use crate::domain::{
    Bill, BillCalculation, DashboardSummary, DomainResult, MeterReading, MonthlyTotals, Owner,
    OwnerConsumption, UnattributedCostPolicy,
};

/// Applies the configured policy to every allocation, logs the outcome and
/// records metrics. Holds no mutable state; share it behind an `Arc`.
pub struct AllocationService {
    config: AllocationConfig,
}

impl AllocationService {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    pub fn default_policy(&self) -> UnattributedCostPolicy {
        self.config.unattributed_cost
    }

    pub fn monthly_window(&self) -> u32 {
        self.config.monthly_window
    }

    /// Allocate a bill between two explicit readings.
    pub fn calculate(
        &self,
        bill: &Bill,
        start_reading: &MeterReading,
        end_reading: &MeterReading,
        owners: &[Owner],
        policy: Option<UnattributedCostPolicy>,
    ) -> DomainResult<BillCalculation> {
        let policy = policy.unwrap_or(self.config.unattributed_cost);
        let result =
            allocation::allocate_with_policy(bill, start_reading, end_reading, owners, policy);
        self.record(bill, result)
    }

    /// Allocate a bill, resolving its readings from `readings`.
    pub fn calculate_bill(
        &self,
        bill: &Bill,
        readings: &[MeterReading],
        owners: &[Owner],
        policy: Option<UnattributedCostPolicy>,
    ) -> DomainResult<BillCalculation> {
        let policy = policy.unwrap_or(self.config.unattributed_cost);
        let result = allocation::allocate_bill(bill, readings, owners, policy);
        self.record(bill, result)
    }

    pub fn period_consumption(&self, readings: &[MeterReading], owners: &[Owner]) -> f64 {
        stats::period_consumption(readings, owners)
    }

    /// Monthly totals ending at the current UTC month.
    pub fn monthly_stats(
        &self,
        calculations: &[BillCalculation],
        months_back: Option<u32>,
    ) -> Vec<MonthlyTotals> {
        self.monthly_stats_at(calculations, months_back, Utc::now().date_naive())
    }

    pub fn monthly_stats_at(
        &self,
        calculations: &[BillCalculation],
        months_back: Option<u32>,
        today: NaiveDate,
    ) -> Vec<MonthlyTotals> {
        let months = months_back.unwrap_or(self.config.monthly_window);
        stats::monthly_aggregate(calculations, months, today)
    }

    pub fn owner_stats(
        &self,
        calculations: &[BillCalculation],
        owners: &[Owner],
    ) -> Vec<OwnerConsumption> {
        stats::owner_consumption_totals(calculations, owners)
    }

    pub fn summary(
        &self,
        owners: &[Owner],
        readings: &[MeterReading],
        bills: &[Bill],
    ) -> DashboardSummary {
        stats::dashboard_summary(owners, readings, bills)
    }

    fn record(
        &self,
        bill: &Bill,
        result: DomainResult<BillCalculation>,
    ) -> DomainResult<BillCalculation> {
        match &result {
            Ok(calc) => {
                metrics::counter!("allocations_total", "policy" => calc.policy.to_string())
                    .increment(1);

                if calc.unattributed_cost > 0.0 {
                    warn!(
                        bill_id = %calc.bill_id,
                        unattributed_cost = calc.unattributed_cost,
                        policy = %calc.policy,
                        "No metered consumption in period; variable costs not attributable by usage"
                    );
                }

                info!(
                    bill_id = %calc.bill_id,
                    owners = calc.expenses.len(),
                    total_amount = calc.total_amount,
                    total_consumption = calc.total_consumption,
                    cost_per_kwh = calc.cost_per_kwh,
                    "Bill allocation calculated"
                );
            }
            Err(e) => {
                metrics::counter!("allocation_errors_total", "kind" => e.kind()).increment(1);
                warn!(bill_id = %bill.id, error = %e, "Bill allocation rejected");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillPeriod, DomainError, ReadingRefs};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn fixture() -> (Bill, Vec<MeterReading>, Vec<Owner>) {
        let bill = Bill {
            id: "b1".into(),
            date: date(2, 2),
            total_amount: 100.0,
            fixed_costs: 20.0,
            total_consumption: 0.0,
            period: BillPeriod::new(date(1, 1), date(1, 31)),
            reading_refs: None,
        };
        let readings = vec![
            MeterReading::new("r1", date(1, 1)).with_value("a", 5.0),
            MeterReading::new("r2", date(1, 31)).with_value("a", 5.0),
        ];
        let owners = vec![Owner::new("a", "Anna"), Owner::new("b", "Bruno")];
        (bill, readings, owners)
    }

    #[test]
    fn configured_policy_applies_when_none_requested() {
        let (bill, readings, owners) = fixture();
        let service = AllocationService::new(AllocationConfig {
            unattributed_cost: UnattributedCostPolicy::Drop,
            monthly_window: 6,
        });

        let calc = service
            .calculate(&bill, &readings[0], &readings[1], &owners, None)
            .unwrap();
        assert_eq!(calc.policy, UnattributedCostPolicy::Drop);
        assert_eq!(calc.allocated_total(), 20.0);

        let calc = service
            .calculate(
                &bill,
                &readings[0],
                &readings[1],
                &owners,
                Some(UnattributedCostPolicy::SplitEqually),
            )
            .unwrap();
        assert_eq!(calc.allocated_total(), 100.0);
    }

    #[test]
    fn calculate_bill_surfaces_missing_reading() {
        let (mut bill, readings, owners) = fixture();
        bill.reading_refs = Some(ReadingRefs {
            start_reading_id: "r1".into(),
            end_reading_id: "nope".into(),
        });
        let service = AllocationService::new(AllocationConfig::default());
        let err = service
            .calculate_bill(&bill, &readings, &owners, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn monthly_stats_uses_configured_window() {
        let service = AllocationService::new(AllocationConfig {
            unattributed_cost: UnattributedCostPolicy::SplitEqually,
            monthly_window: 6,
        });
        assert_eq!(service.monthly_stats_at(&[], None, date(5, 1)).len(), 6);
        assert_eq!(service.monthly_stats_at(&[], Some(2), date(5, 1)).len(), 2);
        assert_eq!(service.monthly_stats(&[], None).len(), 6);
    }
}
