use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DelayCostPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::interest::simple_interest;
use crate::types::{validate_non_negative, CostComparison};

/// cost of paying a single debt late
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayCostResult {
    pub interest: Money,
    pub fine: Money,
    pub total_cost: Money,
    pub comparison: CostComparison,
    /// percent per day
    pub daily_rate: Rate,
    pub days_late: u32,
}

/// closed-form late payment calculator
pub struct DelayCostCalculator {
    pub policy: DelayCostPolicy,
}

impl DelayCostCalculator {
    pub fn new(policy: DelayCostPolicy) -> Self {
        Self { policy }
    }

    /// extra interest plus late fee for paying `days_late` days after the due date
    pub fn calculate(
        &self,
        balance: Money,
        monthly_rate: Rate,
        days_late: u32,
    ) -> Result<DelayCostResult> {
        validate_non_negative("debtBalance", balance)?;
        if monthly_rate.is_negative() {
            return Err(EngineError::invalid(
                "monthlyInterestRate",
                format!("{} is negative", monthly_rate),
            ));
        }
        if days_late == 0 {
            return Err(EngineError::invalid("daysLate", "must be at least one day"));
        }

        let accrual = simple_interest(balance, monthly_rate, days_late, self.policy.day_basis)
            .ok_or_else(|| EngineError::invalid("debtBalance", "interest overflows"))?;

        let fine = if days_late <= self.policy.grace_period_days {
            Money::ZERO
        } else {
            self.policy.late_fee.fee_for(balance)
        };

        let total_cost = accrual
            .interest_amount
            .checked_add(fine)
            .ok_or_else(|| EngineError::invalid("debtBalance", "cost overflows"))?;

        Ok(DelayCostResult {
            interest: accrual.interest_amount,
            fine,
            total_cost,
            comparison: self.compare(total_cost, balance),
            daily_rate: accrual.daily_rate,
            days_late,
        })
    }

    fn compare(&self, total_cost: Money, balance: Money) -> CostComparison {
        let ratio = total_cost
            .as_decimal()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(balance.as_decimal()));

        match ratio {
            Some(ratio) => CostComparison::classify(
                ratio,
                self.policy.cheap_threshold,
                self.policy.expensive_threshold,
            ),
            // nothing owed: any cost at all is out of proportion
            None if total_cost.is_zero() => CostComparison::Cheap,
            None => CostComparison::Expensive,
        }
    }
}
