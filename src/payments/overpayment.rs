use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::payments::amortization::AmortizationSimulator;
use crate::types::{validate_non_negative, Debt, Projection};

/// savings from a one-time principal prepayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentSavingsResult {
    pub interest_saved: Money,
    pub months_saved: u32,
    /// balance plus interest without the prepayment
    pub original_total: Money,
    /// balance plus interest with the prepayment
    pub new_total: Money,
    pub original_months: u32,
    pub new_months: u32,
    /// prepayment actually used, capped at the balance
    pub prepayment_applied: Money,
}

/// compares a debt's payoff with and without an immediate prepayment
pub struct PrepaymentSavingsCalculator {
    simulator: AmortizationSimulator,
}

impl PrepaymentSavingsCalculator {
    pub fn new(simulator: AmortizationSimulator) -> Self {
        Self { simulator }
    }

    pub fn calculate(
        &self,
        balance: Money,
        monthly_rate: Rate,
        minimum_payment: Money,
        prepayment: Money,
    ) -> Result<PrepaymentSavingsResult> {
        validate_non_negative("debtBalance", balance)?;
        validate_non_negative("minimumPayment", minimum_payment)?;
        validate_non_negative("prepaymentAmount", prepayment)?;
        if monthly_rate.is_negative() {
            return Err(EngineError::invalid(
                "monthlyInterestRate",
                format!("{} is negative", monthly_rate),
            ));
        }

        let debt = Debt::with_id(Uuid::nil(), balance, monthly_rate, minimum_payment, 1);
        let baseline = self.simulator.project(std::slice::from_ref(&debt), Money::ZERO)?;

        let prepayment_applied = prepayment.min(balance);
        let reduced_debt = Debt {
            balance: balance - prepayment_applied,
            ..debt
        };
        let reduced = self.simulator.project(std::slice::from_ref(&reduced_debt), Money::ZERO)?;

        let result = Self::diff(balance, prepayment_applied, &baseline, &reduced)?;
        debug!(
            "prepayment of {} saves {} interest and {} months",
            prepayment_applied, result.interest_saved, result.months_saved
        );
        Ok(result)
    }

    fn diff(
        balance: Money,
        prepayment_applied: Money,
        baseline: &Projection,
        reduced: &Projection,
    ) -> Result<PrepaymentSavingsResult> {
        // a smaller starting balance can never accrue more interest or take longer
        debug_assert!(reduced.total_interest <= baseline.total_interest);
        debug_assert!(reduced.months_to_payoff <= baseline.months_to_payoff);

        let total_with = |interest: Money| {
            balance
                .checked_add(interest)
                .ok_or_else(|| EngineError::invalid("debtBalance", "total cost overflows"))
        };

        Ok(PrepaymentSavingsResult {
            interest_saved: baseline.total_interest - reduced.total_interest,
            months_saved: baseline.months_to_payoff.saturating_sub(reduced.months_to_payoff),
            original_total: total_with(baseline.total_interest)?,
            new_total: total_with(reduced.total_interest)?,
            original_months: baseline.months_to_payoff,
            new_months: reduced.months_to_payoff,
            prepayment_applied,
        })
    }
}

impl Default for PrepaymentSavingsCalculator {
    fn default() -> Self {
        Self::new(AmortizationSimulator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prepayment_saves_interest_and_time() {
        let result = PrepaymentSavingsCalculator::default()
            .calculate(
                Money::from_major(10_000),
                Rate::from_percentage(dec!(2)),
                Money::from_major(300),
                Money::from_major(2_000),
            )
            .unwrap();

        assert!(result.interest_saved.is_positive());
        assert!(result.months_saved > 0);
        assert_eq!(result.original_months - result.new_months, result.months_saved);
        assert_eq!(result.original_total - result.new_total, result.interest_saved);
        assert_eq!(result.prepayment_applied, Money::from_major(2_000));
    }

    #[test]
    fn test_zero_prepayment_saves_nothing() {
        let result = PrepaymentSavingsCalculator::default()
            .calculate(
                Money::from_major(3_000),
                Rate::from_percentage(dec!(1.5)),
                Money::from_major(150),
                Money::ZERO,
            )
            .unwrap();
        assert_eq!(result.interest_saved, Money::ZERO);
        assert_eq!(result.months_saved, 0);
        assert_eq!(result.original_total, result.new_total);
    }

    #[test]
    fn test_prepayment_above_balance_clears_debt() {
        let result = PrepaymentSavingsCalculator::default()
            .calculate(
                Money::from_major(1_000),
                Rate::from_percentage(dec!(3)),
                Money::from_major(100),
                Money::from_major(5_000),
            )
            .unwrap();
        assert_eq!(result.new_months, 0);
        assert_eq!(result.months_saved, result.original_months);
        assert_eq!(result.new_total, Money::from_major(1_000));
        assert_eq!(result.prepayment_applied, Money::from_major(1_000));
    }

    #[test]
    fn test_non_convergent_baseline_is_an_error() {
        let result = PrepaymentSavingsCalculator::default().calculate(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(10)),
            Money::from_major(5),
            Money::from_major(100),
        );
        assert!(matches!(result, Err(EngineError::NonConvergent { .. })));
    }

    #[test]
    fn test_balance_near_decimal_limit_is_an_error() {
        let result = PrepaymentSavingsCalculator::default().calculate(
            Money::from_decimal(Decimal::from_i128_with_scale(71 * 10_i128.pow(27), 0)),
            Rate::from_percentage(dec!(5)),
            Money::from_decimal(Decimal::from_i128_with_scale(79 * 10_i128.pow(26), 0)),
            Money::from_major(1_000),
        );
        assert!(matches!(result, Err(EngineError::NonConvergent { .. })));
    }

    #[test]
    fn test_negative_prepayment_rejected() {
        let result = PrepaymentSavingsCalculator::default().calculate(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(1)),
            Money::from_major(100),
            Money::from_major(-10),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { field: "prepaymentAmount", .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_prepaying_never_costs_more(
            balance in 100i64..50_000,
            rate_bps in 0i64..500,
            headroom in 1i64..2_000,
            prepayment in 0i64..60_000,
        ) {
            let rate = Rate::from_percentage(Decimal::new(rate_bps, 2));
            let interest = Money::from_major(balance).percentage(rate);
            // at least 1% of the balance above the first month's interest
            let minimum = interest + Money::from_major(balance / 100 + headroom);

            let result = PrepaymentSavingsCalculator::default()
                .calculate(Money::from_major(balance), rate, minimum, Money::from_major(prepayment))
                .unwrap();

            prop_assert!(!result.interest_saved.is_negative());
            prop_assert!(result.new_months <= result.original_months);
            prop_assert_eq!(result.original_total - result.new_total, result.interest_saved);
        }
    }
}
