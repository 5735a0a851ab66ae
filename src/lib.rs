pub mod api;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod interest;
pub mod payments;
pub mod state;
pub mod strategy;
pub mod types;

// re-export key types
pub use decimal::{approx_eq, round2, Money, Rate};
pub use engine::PayoffEngine;
pub use errors::{EngineError, Result};
pub use events::{EventStore, SimulationEvent};
pub use config::{DelayCostPolicy, EngineConfig, LateFeePolicy, SimulationLimits};
pub use interest::{DelayCostCalculator, DelayCostResult};
pub use payments::{
    AmortizationSimulator, DebtPayoff, InstallmentRequest, InstallmentSchedule,
    InstallmentScheduleGenerator, PrepaymentSavingsCalculator, PrepaymentSavingsResult,
    SimulationReport,
};
pub use strategy::{compare_strategies, focus_debt, order_debts, StrategyComparison};
pub use types::{
    CostComparison, Debt, DebtId, Installment, InstallmentStatus, Projection, StrategyParameters,
    StrategyType,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
