//! request and response bodies for the json layer
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::payments::DebtPayoff;
use crate::types::{Debt, Projection, StrategyParameters};

pub use crate::payments::InstallmentRequest as InstallmentsRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    #[serde(flatten)]
    pub parameters: StrategyParameters,
    pub debts: Vec<Debt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResponse {
    /// in strategy order, focus debt first
    pub debts: Vec<Debt>,
    pub projection: Projection,
    #[serde(default)]
    pub payoffs: Vec<DebtPayoff>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareStrategiesRequest {
    #[serde(default)]
    pub monthly_extra: Money,
    pub debts: Vec<Debt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayCostRequest {
    pub debt_balance: Money,
    pub monthly_interest_rate: Rate,
    pub days_late: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentSavingsRequest {
    pub debt_balance: Money,
    pub monthly_interest_rate: Rate,
    pub minimum_payment: Money,
    pub prepayment_amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCostRequest {
    pub amount: Money,
    pub hourly_rate: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCostResponse {
    /// hours of work
    pub time_cost: Decimal,
}

/// operations reachable through [`crate::engine::PayoffEngine::dispatch_json`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Strategy,
    CompareStrategies,
    DelayCost,
    PrepaymentSavings,
    TimeCost,
    Installments,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Strategy,
        Operation::CompareStrategies,
        Operation::DelayCost,
        Operation::PrepaymentSavings,
        Operation::TimeCost,
        Operation::Installments,
    ];

    pub fn route(&self) -> &'static str {
        match self {
            Operation::Strategy => "strategy",
            Operation::CompareStrategies => "compare-strategies",
            Operation::DelayCost => "delay-cost",
            Operation::PrepaymentSavings => "prepayment-savings",
            Operation::TimeCost => "time-cost",
            Operation::Installments => "installments",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.route() == s)
            .ok_or_else(|| EngineError::invalid("operation", format!("unknown operation {}", s)))
    }
}
