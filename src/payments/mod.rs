pub mod amortization;
pub mod installments;
pub mod overpayment;

use rust_decimal::Decimal;

use crate::decimal::{round2, Money};
use crate::errors::{EngineError, Result};

pub use amortization::{AmortizationSimulator, DebtPayoff, SimulationReport};
pub use installments::{InstallmentRequest, InstallmentSchedule, InstallmentScheduleGenerator};
pub use overpayment::{PrepaymentSavingsCalculator, PrepaymentSavingsResult};

/// hours of work needed to pay `amount` at `hourly_rate`, to two places
pub fn time_cost(amount: Money, hourly_rate: Money) -> Result<Decimal> {
    if amount.is_negative() {
        return Err(EngineError::invalid("amount", format!("{} is negative", amount)));
    }
    if !hourly_rate.is_positive() {
        return Err(EngineError::invalid("hourlyRate", "must be greater than zero"));
    }

    amount
        .as_decimal()
        .checked_div(hourly_rate.as_decimal())
        .map(round2)
        .ok_or_else(|| EngineError::invalid("hourlyRate", "division overflows"))
}
