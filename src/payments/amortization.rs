use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::SimulationLimits;
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{EventStore, SimulationEvent};
use crate::interest::monthly_interest;
use crate::state::{DebtState, SimulationState};
use crate::types::{validate_non_negative, Debt, DebtId, Projection};

/// per-debt outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub debt_id: DebtId,
    /// month in which the balance reached zero, 0 if it started at zero
    pub payoff_month: u32,
    pub interest_paid: Money,
    pub total_paid: Money,
}

/// full result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub projection: Projection,
    /// in the order the debts were supplied
    pub payoffs: Vec<DebtPayoff>,
    pub events: EventStore,
}

impl SimulationReport {
    pub fn payoff_for(&self, debt_id: DebtId) -> Option<&DebtPayoff> {
        self.payoffs.iter().find(|p| p.debt_id == debt_id)
    }
}

/// Discrete monthly payoff simulation over a strategy-ordered debt list.
///
/// Each month every open debt accrues `balance * rate`, then receives its
/// minimum payment. The first open debt in order (the focus) additionally
/// receives the whole monthly extra. A payment larger than what is owed only
/// clears that debt; the surplus is not carried to another debt in the same
/// month. A debt that clears hands the focus to the next open debt from the
/// following month.
///
/// A run ends in `NonConvergent` when a debt stalls for longer than
/// `max_stalled_months`, when the plan is still open after the horizon from
/// [`SimulationLimits::horizon`] (slow plans that never stall), or when a
/// balance or running total no longer fits a `Decimal`.
pub struct AmortizationSimulator {
    limits: SimulationLimits,
}

impl Default for AmortizationSimulator {
    fn default() -> Self {
        Self::new(SimulationLimits::default())
    }
}

impl AmortizationSimulator {
    pub fn new(limits: SimulationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SimulationLimits {
        self.limits
    }

    /// months to payoff and total interest for `debts` in the given order
    pub fn project(&self, debts: &[Debt], monthly_extra: Money) -> Result<Projection> {
        Ok(self.simulate(debts, monthly_extra)?.projection)
    }

    /// run the simulation and keep per-debt payoffs and the event trace
    pub fn simulate(&self, debts: &[Debt], monthly_extra: Money) -> Result<SimulationReport> {
        validate_non_negative("monthlyExtra", monthly_extra)?;
        for debt in debts {
            debt.validate()?;
        }

        let mut state = SimulationState::new(debts);
        let outstanding = state
            .outstanding()
            .ok_or_else(|| EngineError::invalid("balance", "combined balances overflow"))?;
        let mut events = EventStore::new();
        let horizon = self.limits.horizon(debts.len());
        let mut current_focus: Option<DebtId> = None;

        debug!(
            "simulating {} debts, outstanding {}, monthly extra {}",
            debts.len(),
            outstanding,
            monthly_extra
        );

        while let Some(focus_index) = state.focus_index() {
            if state.month >= horizon {
                let debt_id = state.debts[focus_index].debt_id;
                warn!(
                    "payoff horizon of {} months reached with debt {} still open",
                    horizon, debt_id
                );
                return Err(EngineError::NonConvergent {
                    debt_id,
                    months: state.month,
                });
            }

            state.month += 1;
            let month = state.month;

            let focus_id = state.debts[focus_index].debt_id;
            if current_focus != Some(focus_id) {
                trace!("month {}: focus moves to debt {}", month, focus_id);
                events.emit(SimulationEvent::FocusChanged {
                    month,
                    debt_id: focus_id,
                });
                current_focus = Some(focus_id);
            }

            for (index, debt) in state.debts.iter_mut().enumerate() {
                if !debt.is_open() {
                    continue;
                }

                let extra = if index == focus_index { monthly_extra } else { Money::ZERO };
                let interest = self.accrue_month(debt, extra, month, &mut events)?;
                state.total_interest = state
                    .total_interest
                    .checked_add(interest)
                    .ok_or_else(|| self.diverged(debt))?;
            }
        }

        debug!(
            "all debts paid after {} months, total interest {}",
            state.month, state.total_interest
        );

        Ok(SimulationReport {
            projection: Projection {
                months_to_payoff: state.month,
                total_interest: state.total_interest,
            },
            payoffs: state
                .debts
                .iter()
                .map(|d| DebtPayoff {
                    debt_id: d.debt_id,
                    payoff_month: d.paid_off_month.unwrap_or(state.month),
                    interest_paid: d.interest_paid,
                    total_paid: d.total_paid,
                })
                .collect(),
            events,
        })
    }

    /// one month for one open debt; returns the interest accrued
    fn accrue_month(
        &self,
        debt: &mut DebtState,
        extra: Money,
        month: u32,
        events: &mut EventStore,
    ) -> Result<Money> {
        let interest = monthly_interest(debt.balance, debt.monthly_interest_rate)
            .ok_or_else(|| self.diverged(debt))?;
        let owed = debt.balance.checked_add(interest).ok_or_else(|| self.diverged(debt))?;
        let payment = debt
            .minimum_payment
            .checked_add(extra)
            .ok_or_else(|| EngineError::invalid("monthlyExtra", "payment overflows"))?;

        if payment <= interest {
            debt.stalled_months += 1;
            if debt.stalled_months == 1 {
                events.emit(SimulationEvent::PaymentStalled {
                    month,
                    debt_id: debt.debt_id,
                    payment,
                    interest,
                });
            }
            if debt.stalled_months > self.limits.max_stalled_months {
                return Err(self.diverged(debt));
            }
        } else {
            debt.stalled_months = 0;
        }

        let applied = payment.min(owed);
        debt.balance = owed - applied;
        debt.interest_paid = debt
            .interest_paid
            .checked_add(interest)
            .ok_or_else(|| self.diverged(debt))?;
        debt.total_paid = debt
            .total_paid
            .checked_add(applied)
            .ok_or_else(|| self.diverged(debt))?;

        if debt.balance.is_zero() {
            trace!("month {}: debt {} paid off", month, debt.debt_id);
            debt.paid_off_month = Some(month);
            events.emit(SimulationEvent::DebtPaidOff {
                month,
                debt_id: debt.debt_id,
                interest_paid: debt.interest_paid,
            });
        }

        Ok(interest)
    }

    fn diverged(&self, debt: &DebtState) -> EngineError {
        warn!(
            "debt {} does not converge: payment {} stalled for {} months",
            debt.debt_id, debt.minimum_payment, debt.stalled_months
        );
        EngineError::NonConvergent {
            debt_id: debt.debt_id,
            months: debt.stalled_months,
        }
    }
}
