use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    CompareStrategiesRequest, DelayCostRequest, InstallmentsRequest, Operation,
    PrepaymentSavingsRequest, StrategyRequest, StrategyResponse, TimeCostRequest, TimeCostResponse,
};
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::interest::{DelayCostCalculator, DelayCostResult};
use crate::payments::{
    time_cost, AmortizationSimulator, InstallmentScheduleGenerator, PrepaymentSavingsCalculator,
    PrepaymentSavingsResult,
};
use crate::strategy::{compare_strategies, order_debts, StrategyComparison};
use crate::types::Installment;

/// Entry point for every engine operation.
///
/// Holds only configuration and the clock; each call builds its own
/// simulation state, so one engine can serve concurrent requests.
pub struct PayoffEngine {
    pub config: EngineConfig,
    time_provider: SafeTimeProvider,
}

impl PayoffEngine {
    pub fn new(config: EngineConfig, time_provider: SafeTimeProvider) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            time_provider,
        })
    }

    /// default configuration on the system clock
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            time_provider: SafeTimeProvider::new(TimeSource::System),
        }
    }

    fn simulator(&self) -> AmortizationSimulator {
        AmortizationSimulator::new(self.config.simulation)
    }

    /// order debts for the strategy and project the payoff
    pub fn strategy(&self, request: &StrategyRequest) -> Result<StrategyResponse> {
        let ordered = order_debts(&request.debts, request.parameters.strategy_type);
        let report = self
            .simulator()
            .simulate(&ordered, request.parameters.monthly_extra)?;

        debug!(
            "{:?} plan: {} months, {} interest",
            request.parameters.strategy_type,
            report.projection.months_to_payoff,
            report.projection.total_interest
        );

        Ok(StrategyResponse {
            debts: ordered,
            projection: report.projection,
            payoffs: report.payoffs,
        })
    }

    pub fn compare_strategies(
        &self,
        request: &CompareStrategiesRequest,
    ) -> Result<StrategyComparison> {
        compare_strategies(&request.debts, request.monthly_extra, &self.simulator())
    }

    pub fn delay_cost(&self, request: &DelayCostRequest) -> Result<DelayCostResult> {
        DelayCostCalculator::new(self.config.delay_cost.clone()).calculate(
            request.debt_balance,
            request.monthly_interest_rate,
            request.days_late,
        )
    }

    pub fn prepayment_savings(
        &self,
        request: &PrepaymentSavingsRequest,
    ) -> Result<PrepaymentSavingsResult> {
        PrepaymentSavingsCalculator::new(self.simulator()).calculate(
            request.debt_balance,
            request.monthly_interest_rate,
            request.minimum_payment,
            request.prepayment_amount,
        )
    }

    pub fn time_cost(&self, request: &TimeCostRequest) -> Result<TimeCostResponse> {
        Ok(TimeCostResponse {
            time_cost: time_cost(request.amount, request.hourly_rate)?,
        })
    }

    pub fn generate_installments(&self, request: &InstallmentsRequest) -> Result<Vec<Installment>> {
        Ok(InstallmentScheduleGenerator::new(&self.time_provider)
            .generate(request)?
            .into_vec())
    }

    /// decode a json request body, run the operation and encode the response
    pub fn dispatch_json(&self, operation: Operation, body: &str) -> Result<String> {
        match operation {
            Operation::Strategy => respond(body, |r: StrategyRequest| self.strategy(&r)),
            Operation::CompareStrategies => {
                respond(body, |r: CompareStrategiesRequest| self.compare_strategies(&r))
            }
            Operation::DelayCost => respond(body, |r: DelayCostRequest| self.delay_cost(&r)),
            Operation::PrepaymentSavings => {
                respond(body, |r: PrepaymentSavingsRequest| self.prepayment_savings(&r))
            }
            Operation::TimeCost => respond(body, |r: TimeCostRequest| self.time_cost(&r)),
            Operation::Installments => {
                respond(body, |r: InstallmentsRequest| self.generate_installments(&r))
            }
        }
    }
}

fn respond<Req, Resp, F>(body: &str, handler: F) -> Result<String>
where
    Req: DeserializeOwned,
    Resp: Serialize,
    F: FnOnce(Req) -> Result<Resp>,
{
    let request: Req = serde_json::from_str(body)?;
    let response = handler(request)?;
    Ok(serde_json::to_string(&response)?)
}
