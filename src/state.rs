use crate::decimal::{Money, Rate};
use crate::types::{Debt, DebtId};

/// mutable per-debt state owned by one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct DebtState {
    pub debt_id: DebtId,
    pub balance: Money,
    pub monthly_interest_rate: Rate,
    pub minimum_payment: Money,
    pub interest_paid: Money,
    pub total_paid: Money,
    pub paid_off_month: Option<u32>,
    /// consecutive months in which the payment did not exceed interest
    pub stalled_months: u32,
}

impl DebtState {
    pub fn from_debt(debt: &Debt) -> Self {
        let settled = debt.is_settled();
        Self {
            debt_id: debt.id,
            balance: if settled { Money::ZERO } else { debt.balance },
            monthly_interest_rate: debt.monthly_interest_rate,
            minimum_payment: debt.minimum_payment,
            interest_paid: Money::ZERO,
            total_paid: Money::ZERO,
            paid_off_month: if settled { Some(0) } else { None },
            stalled_months: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.balance.is_positive()
    }
}

/// cloned balances for a whole debt set, in strategy order
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub month: u32,
    pub total_interest: Money,
    pub debts: Vec<DebtState>,
}

impl SimulationState {
    pub fn new(debts: &[Debt]) -> Self {
        Self {
            month: 0,
            total_interest: Money::ZERO,
            debts: debts.iter().map(DebtState::from_debt).collect(),
        }
    }

    /// index of the first debt in order that still has a balance
    pub fn focus_index(&self) -> Option<usize> {
        self.debts.iter().position(DebtState::is_open)
    }

    pub fn is_settled(&self) -> bool {
        self.focus_index().is_none()
    }

    /// sum of open balances; `None` if it does not fit a `Decimal`
    pub fn outstanding(&self) -> Option<Money> {
        Money::checked_sum(self.debts.iter().map(|d| d.balance))
    }
}
