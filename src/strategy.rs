use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::amortization::AmortizationSimulator;
use crate::types::{Debt, Projection, StrategyType};

/// primary sort key for a strategy, ties broken by ascending id
fn compare_debts(a: &Debt, b: &Debt, strategy: StrategyType) -> Ordering {
    let primary = match strategy {
        StrategyType::Snowball => a.balance.cmp(&b.balance),
        StrategyType::Avalanche => b.monthly_interest_rate.cmp(&a.monthly_interest_rate),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Sort a copy of `debts` for the strategy.
///
/// Snowball puts the smallest balance first, avalanche the highest monthly
/// rate. The sort is stable, so debts sharing both key and id keep their
/// input order.
pub fn order_debts(debts: &[Debt], strategy: StrategyType) -> Vec<Debt> {
    let mut ordered = debts.to_vec();
    ordered.sort_by(|a, b| compare_debts(a, b, strategy));
    ordered
}

/// debt that receives the monthly extra first
pub fn focus_debt(debts: &[Debt], strategy: StrategyType) -> Option<&Debt> {
    debts
        .iter()
        .filter(|d| !d.is_settled())
        .min_by(|a, b| compare_debts(a, b, strategy))
}

/// snowball and avalanche side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub snowball: Projection,
    pub avalanche: Projection,
    /// snowball interest minus avalanche interest
    pub interest_difference: Money,
    /// snowball months minus avalanche months
    pub months_difference: i64,
    pub recommended: StrategyType,
}

/// run both strategies over the same debts and extra
pub fn compare_strategies(
    debts: &[Debt],
    monthly_extra: Money,
    simulator: &AmortizationSimulator,
) -> Result<StrategyComparison> {
    let snowball = simulator.project(&order_debts(debts, StrategyType::Snowball), monthly_extra)?;
    let avalanche = simulator.project(&order_debts(debts, StrategyType::Avalanche), monthly_extra)?;

    let recommended = match snowball
        .total_interest
        .cmp(&avalanche.total_interest)
        .then(snowball.months_to_payoff.cmp(&avalanche.months_to_payoff))
    {
        Ordering::Less => StrategyType::Snowball,
        Ordering::Equal | Ordering::Greater => StrategyType::Avalanche,
    };

    debug!(
        "snowball {:?} vs avalanche {:?}, recommending {:?}",
        snowball, avalanche, recommended
    );

    Ok(StrategyComparison {
        snowball,
        avalanche,
        interest_difference: snowball.total_interest - avalanche.total_interest,
        months_difference: i64::from(snowball.months_to_payoff)
            - i64::from(avalanche.months_to_payoff),
        recommended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn debt(id: u128, balance: i64, rate: Decimal) -> Debt {
        Debt::with_id(
            Uuid::from_u128(id),
            Money::from_major(balance),
            Rate::from_percentage(rate),
            Money::from_major(25),
            5,
        )
    }

    fn balances(debts: &[Debt]) -> Vec<Money> {
        debts.iter().map(|d| d.balance).collect()
    }

    #[test]
    fn test_snowball_orders_by_balance() {
        let debts = vec![debt(1, 500, dec!(1)), debt(2, 100, dec!(1)), debt(3, 1_000, dec!(1))];
        let ordered = order_debts(&debts, StrategyType::Snowball);
        assert_eq!(
            balances(&ordered),
            vec![Money::from_major(100), Money::from_major(500), Money::from_major(1_000)]
        );
    }

    #[test]
    fn test_avalanche_orders_by_rate() {
        let debts = vec![debt(1, 100, dec!(2)), debt(2, 100, dec!(10)), debt(3, 100, dec!(5))];
        let ordered = order_debts(&debts, StrategyType::Avalanche);
        let rates: Vec<Decimal> = ordered
            .iter()
            .map(|d| d.monthly_interest_rate.as_percentage())
            .collect();
        assert_eq!(rates, vec![dec!(10), dec!(5), dec!(2)]);
    }

    #[test]
    fn test_ties_break_by_id() {
        let debts = vec![debt(9, 300, dec!(3)), debt(4, 300, dec!(3)), debt(6, 300, dec!(3))];
        for strategy in [StrategyType::Snowball, StrategyType::Avalanche] {
            let ids: Vec<Uuid> = order_debts(&debts, strategy).iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![Uuid::from_u128(4), Uuid::from_u128(6), Uuid::from_u128(9)]);
        }
    }

    #[test]
    fn test_input_is_not_reordered() {
        let debts = vec![debt(1, 500, dec!(1)), debt(2, 100, dec!(1))];
        let _ = order_debts(&debts, StrategyType::Snowball);
        assert_eq!(debts[0].id, Uuid::from_u128(1));
    }

    #[test]
    fn test_focus_skips_settled_debts() {
        let debts = vec![debt(1, 0, dec!(1)), debt(2, 400, dec!(1)), debt(3, 200, dec!(1))];
        let focus = focus_debt(&debts, StrategyType::Snowball).unwrap();
        assert_eq!(focus.id, Uuid::from_u128(3));
        assert!(focus_debt(&[], StrategyType::Avalanche).is_none());
    }

    #[test]
    fn test_single_debt_same_under_both_strategies() {
        let simulator = AmortizationSimulator::default();
        let debts = vec![debt(1, 1_200, dec!(2))];
        let comparison = compare_strategies(&debts, Money::from_major(40), &simulator).unwrap();
        assert_eq!(comparison.snowball, comparison.avalanche);
        assert_eq!(comparison.interest_difference, Money::ZERO);
        assert_eq!(comparison.months_difference, 0);
        assert_eq!(comparison.recommended, StrategyType::Avalanche);
    }

    #[test]
    fn test_avalanche_cheaper_when_big_debt_is_costly() {
        let mut small = debt(1, 300, dec!(0));
        small.minimum_payment = Money::from_major(30);
        let mut costly = debt(2, 3_000, dec!(3));
        costly.minimum_payment = Money::from_major(100);

        let comparison = compare_strategies(
            &[small, costly],
            Money::from_major(300),
            &AmortizationSimulator::default(),
        )
        .unwrap();

        assert!(comparison.avalanche.total_interest < comparison.snowball.total_interest);
        assert!(comparison.interest_difference.is_positive());
        assert_eq!(comparison.recommended, StrategyType::Avalanche);
    }

    proptest! {
        #[test]
        fn prop_ordering_is_a_sorted_permutation(
            inputs in proptest::collection::vec((0i64..10_000, 0i64..1_000, 0u128..8), 0..12)
        ) {
            let debts: Vec<Debt> = inputs
                .iter()
                .map(|(balance, rate_cents, id)| debt(*id, *balance, Decimal::new(*rate_cents, 2)))
                .collect();

            let snowball = order_debts(&debts, StrategyType::Snowball);
            prop_assert_eq!(snowball.len(), debts.len());
            for pair in snowball.windows(2) {
                prop_assert!(pair[0].balance <= pair[1].balance);
            }

            let avalanche = order_debts(&debts, StrategyType::Avalanche);
            for pair in avalanche.windows(2) {
                prop_assert!(pair[0].monthly_interest_rate >= pair[1].monthly_interest_rate);
            }

            // same output regardless of input order
            let mut reversed = debts.clone();
            reversed.reverse();
            prop_assert_eq!(
                balances(&order_debts(&reversed, StrategyType::Snowball)),
                balances(&snowball)
            );
        }
    }
}
