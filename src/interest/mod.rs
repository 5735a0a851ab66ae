pub mod penalty;

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

pub use penalty::{DelayCostCalculator, DelayCostResult};

/// interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: u32,
    pub principal_base: Money,
}

/// one month of interest on `balance`, rounded to cents; `None` on overflow
pub fn monthly_interest(balance: Money, monthly_rate: Rate) -> Option<Money> {
    balance.checked_percentage(monthly_rate)
}

/// simple (non-compounding) interest for `days`, pro-rating the monthly rate
/// over `day_basis` days per month
pub fn simple_interest(
    principal: Money,
    monthly_rate: Rate,
    days: u32,
    day_basis: u32,
) -> Option<InterestCalculation> {
    let daily_rate = monthly_rate.daily(day_basis)?;
    // multiply before dividing so whole-month periods stay exact
    let interest = principal
        .as_decimal()
        .checked_mul(monthly_rate.as_fraction())?
        .checked_mul(Decimal::from(days))?
        .checked_div(Decimal::from(day_basis))?;

    Some(InterestCalculation {
        interest_amount: Money::from_decimal(interest),
        daily_rate,
        days,
        principal_base: principal,
    })
}
