use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for a debt
pub type DebtId = Uuid;

/// a single debt as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: DebtId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// current principal owed
    pub balance: Money,
    /// percent per month, e.g. 2.5 for 2.5%
    pub monthly_interest_rate: Rate,
    pub minimum_payment: Money,
    /// calendar day each month the payment is due
    pub due_day: u32,
}

impl Debt {
    pub fn new(
        balance: Money,
        monthly_interest_rate: Rate,
        minimum_payment: Money,
        due_day: u32,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), balance, monthly_interest_rate, minimum_payment, due_day)
    }

    pub fn with_id(
        id: DebtId,
        balance: Money,
        monthly_interest_rate: Rate,
        minimum_payment: Money,
        due_day: u32,
    ) -> Self {
        Self {
            id,
            name: None,
            balance,
            monthly_interest_rate,
            minimum_payment,
            due_day,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_settled(&self) -> bool {
        !self.balance.is_positive()
    }

    /// reject negative amounts and impossible due days
    pub fn validate(&self) -> Result<()> {
        if self.balance.is_negative() {
            return Err(EngineError::invalid("balance", format!("{} is negative", self.balance)));
        }
        if self.monthly_interest_rate.is_negative() {
            return Err(EngineError::invalid(
                "monthlyInterestRate",
                format!("{} is negative", self.monthly_interest_rate),
            ));
        }
        if self.minimum_payment.is_negative() {
            return Err(EngineError::invalid(
                "minimumPayment",
                format!("{} is negative", self.minimum_payment),
            ));
        }
        validate_due_day(self.due_day)
    }
}

pub(crate) fn validate_due_day(due_day: u32) -> Result<()> {
    if !(1..=31).contains(&due_day) {
        return Err(EngineError::invalid("dueDay", format!("{} is outside 1-31", due_day)));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &'static str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(EngineError::invalid(field, format!("{} is negative", amount)));
    }
    Ok(())
}

/// payoff strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyType {
    /// smallest balance first
    Snowball,
    /// highest monthly rate first
    Avalanche,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyParameters {
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    /// applied entirely to the focus debt each month
    #[serde(default)]
    pub monthly_extra: Money,
}

impl StrategyParameters {
    pub fn new(strategy_type: StrategyType, monthly_extra: Money) -> Self {
        Self {
            strategy_type,
            monthly_extra,
        }
    }
}

/// aggregate outcome of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub months_to_payoff: u32,
    pub total_interest: Money,
}

impl Projection {
    pub const EMPTY: Projection = Projection {
        months_to_payoff: 0,
        total_interest: Money::ZERO,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Paid,
    Pending,
}

/// one scheduled payment of a fixed-count loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    /// 1-based position in the schedule
    pub number: u32,
    pub status: InstallmentStatus,
    pub due_date: NaiveDate,
}

impl Installment {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }
}

/// advisory bucket for the cost of paying late
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostComparison {
    Cheap,
    Moderate,
    Expensive,
}

impl CostComparison {
    /// bucket a cost/balance ratio given in percent
    pub fn classify(ratio_percent: Decimal, cheap_below: Rate, expensive_from: Rate) -> Self {
        if ratio_percent < cheap_below.as_percentage() {
            CostComparison::Cheap
        } else if ratio_percent < expensive_from.as_percentage() {
            CostComparison::Moderate
        } else {
            CostComparison::Expensive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card() -> Debt {
        Debt::new(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(2.5)),
            Money::from_major(50),
            10,
        )
    }

    #[test]
    fn test_valid_debt() {
        assert!(card().validate().is_ok());
    }

    #[test]
    fn test_negative_fields_are_named() {
        let mut debt = card();
        debt.balance = Money::from_major(-1);
        match debt.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "balance"),
            other => panic!("unexpected {:?}", other),
        }

        let mut debt = card();
        debt.monthly_interest_rate = Rate::from_percentage(dec!(-0.5));
        match debt.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "monthlyInterestRate")
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut debt = card();
        debt.minimum_payment = Money::from_major(-5);
        match debt.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "minimumPayment"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_due_day_range() {
        let mut debt = card();
        debt.due_day = 0;
        assert!(debt.validate().is_err());
        debt.due_day = 32;
        assert!(debt.validate().is_err());
        debt.due_day = 31;
        assert!(debt.validate().is_ok());
    }

    #[test]
    fn test_debt_json_shape() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "balance": 1500.5,
            "monthlyInterestRate": 3.2,
            "minimumPayment": 75,
            "dueDay": 15
        }"#;
        let debt: Debt = serde_json::from_str(json).unwrap();
        assert_eq!(debt.id, Uuid::from_u128(1));
        assert_eq!(debt.balance, Money::from_str_exact("1500.50").unwrap());
        assert_eq!(debt.monthly_interest_rate, Rate::from_percentage(dec!(3.2)));
        assert_eq!(debt.due_day, 15);
        assert!(debt.name.is_none());
    }

    #[test]
    fn test_strategy_parameters_json() {
        let params: StrategyParameters =
            serde_json::from_str(r#"{"type": "AVALANCHE", "monthlyExtra": 200}"#).unwrap();
        assert_eq!(params.strategy_type, StrategyType::Avalanche);
        assert_eq!(params.monthly_extra, Money::from_major(200));
    }

    #[test]
    fn test_cost_classification() {
        let cheap = Rate::from_percentage(dec!(1));
        let expensive = Rate::from_percentage(dec!(5));
        assert_eq!(CostComparison::classify(dec!(0.5), cheap, expensive), CostComparison::Cheap);
        assert_eq!(CostComparison::classify(dec!(1), cheap, expensive), CostComparison::Moderate);
        assert_eq!(CostComparison::classify(dec!(12), cheap, expensive), CostComparison::Expensive);
    }
}
