use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub simulation: SimulationLimits,
    pub delay_cost: DelayCostPolicy,
}

/// iteration bounds for the amortization simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationLimits {
    /// consecutive months a debt may go without reducing principal
    pub max_stalled_months: u32,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            // 100 years
            max_stalled_months: 1200,
        }
    }
}

impl SimulationLimits {
    pub fn new(max_stalled_months: u32) -> Self {
        Self { max_stalled_months }
    }

    /// Most months a run over `debt_count` debts may take.
    ///
    /// One stall window plus a month per debt, so a stalled debt always
    /// trips the stall guard before the horizon is reached.
    pub fn horizon(&self, debt_count: usize) -> u32 {
        let count = u32::try_from(debt_count.max(1)).unwrap_or(u32::MAX);
        self.max_stalled_months.saturating_add(1).saturating_mul(count)
    }
}

/// how the late fee is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum LateFeePolicy {
    /// fixed amount per late payment
    Flat(Money),
    /// percent of the outstanding balance
    Percentage(Rate),
}

impl LateFeePolicy {
    pub fn fee_for(&self, balance: Money) -> Money {
        match self {
            LateFeePolicy::Flat(amount) => *amount,
            LateFeePolicy::Percentage(rate) => balance.percentage(*rate),
        }
    }
}

/// late payment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelayCostPolicy {
    pub late_fee: LateFeePolicy,
    /// days late before the fee applies; interest accrues regardless
    pub grace_period_days: u32,
    /// days per month used to pro-rate the monthly rate
    pub day_basis: u32,
    /// cost below this share of the balance is "cheap"
    pub cheap_threshold: Rate,
    /// cost at or above this share of the balance is "expensive"
    pub expensive_threshold: Rate,
}

impl Default for DelayCostPolicy {
    fn default() -> Self {
        Self {
            late_fee: LateFeePolicy::Percentage(Rate::from_percentage(dec!(2))),
            grace_period_days: 0,
            day_basis: 30,
            cheap_threshold: Rate::from_percentage(dec!(1)),
            expensive_threshold: Rate::from_percentage(dec!(5)),
        }
    }
}

impl DelayCostPolicy {
    /// flat fee policy, everything else default
    pub fn flat_fee(amount: Money) -> Self {
        Self {
            late_fee: LateFeePolicy::Flat(amount),
            ..Self::default()
        }
    }
}

impl EngineConfig {
    /// parse a config document; missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.simulation.max_stalled_months == 0 {
            return Err(EngineError::InvalidConfiguration {
                message: "maxStalledMonths must be positive".to_string(),
            });
        }

        let policy = &self.delay_cost;
        if policy.day_basis == 0 {
            return Err(EngineError::InvalidConfiguration {
                message: "dayBasis must be positive".to_string(),
            });
        }
        let negative_fee = match policy.late_fee {
            LateFeePolicy::Flat(amount) => amount.is_negative(),
            LateFeePolicy::Percentage(rate) => rate.is_negative(),
        };
        if negative_fee {
            return Err(EngineError::InvalidConfiguration {
                message: "lateFee must not be negative".to_string(),
            });
        }
        if policy.cheap_threshold.is_negative()
            || policy.cheap_threshold > policy.expensive_threshold
        {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "thresholds out of order: cheap {} expensive {}",
                    policy.cheap_threshold, policy.expensive_threshold
                ),
            });
        }

        Ok(())
    }
}
