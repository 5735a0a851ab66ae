use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::DebtId;

/// milestones recorded while simulating a payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SimulationEvent {
    /// debt starts receiving the monthly extra
    #[serde(rename_all = "camelCase")]
    FocusChanged {
        month: u32,
        debt_id: DebtId,
    },
    #[serde(rename_all = "camelCase")]
    DebtPaidOff {
        month: u32,
        debt_id: DebtId,
        interest_paid: Money,
    },
    /// payment did not cover the month's interest
    #[serde(rename_all = "camelCase")]
    PaymentStalled {
        month: u32,
        debt_id: DebtId,
        payment: Money,
        interest: Money,
    },
}

impl SimulationEvent {
    pub fn month(&self) -> u32 {
        match self {
            SimulationEvent::FocusChanged { month, .. }
            | SimulationEvent::DebtPaidOff { month, .. }
            | SimulationEvent::PaymentStalled { month, .. } => *month,
        }
    }

    pub fn debt_id(&self) -> DebtId {
        match self {
            SimulationEvent::FocusChanged { debt_id, .. }
            | SimulationEvent::DebtPaidOff { debt_id, .. }
            | SimulationEvent::PaymentStalled { debt_id, .. } => *debt_id,
        }
    }
}

/// event store for collecting events during a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    events: Vec<SimulationEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// events concerning a single debt, in emission order
    pub fn for_debt(&self, debt_id: DebtId) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter().filter(move |e| e.debt_id() == debt_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_store_filters_by_debt() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let mut store = EventStore::new();
        store.emit(SimulationEvent::FocusChanged { month: 1, debt_id: a });
        store.emit(SimulationEvent::DebtPaidOff {
            month: 4,
            debt_id: a,
            interest_paid: Money::from_major(12),
        });
        store.emit(SimulationEvent::FocusChanged { month: 5, debt_id: b });

        assert_eq!(store.len(), 3);
        assert_eq!(store.for_debt(a).count(), 2);
        assert_eq!(store.for_debt(b).next().map(|e| e.month()), Some(5));

        let taken = store.take_events();
        assert_eq!(taken.len(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = SimulationEvent::FocusChanged {
            month: 2,
            debt_id: Uuid::nil(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "focusChanged");
        assert_eq!(value["month"], 2);
        assert!(value.get("debtId").is_some());
    }
}
