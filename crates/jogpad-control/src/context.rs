//! Machine context read by the jog engine
//!
//! The engine never owns connection or controller state; it reads the
//! current values through [`MachineContext`] each time an intent arrives.

use jogpad_core::event_bus::{ConnectionEvent, MachineEvent, UiEvent};
use jogpad_core::{
    AppEvent, ControllerState, EventBus, EventCategory, EventFilter, MeasurementSystem,
    Subscription,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Read-only view of connection, controller state, and display units
pub trait MachineContext: Send + Sync {
    /// Whether a machine is connected
    fn is_connected(&self) -> bool;

    /// Controller state from the latest status report
    fn active_state(&self) -> ControllerState;

    /// Display units
    fn unit_system(&self) -> MeasurementSystem;
}

/// Fixed context values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub connected: bool,
    pub active_state: ControllerState,
    pub unit_system: MeasurementSystem,
}

impl MachineSnapshot {
    /// Connected, idle, metric
    pub fn idle() -> Self {
        Self {
            connected: true,
            active_state: ControllerState::Idle,
            unit_system: MeasurementSystem::Metric,
        }
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn with_state(mut self, state: ControllerState) -> Self {
        self.active_state = state;
        self
    }

    pub fn with_units(mut self, units: MeasurementSystem) -> Self {
        self.unit_system = units;
        self
    }
}

impl MachineContext for MachineSnapshot {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn active_state(&self) -> ControllerState {
        self.active_state
    }

    fn unit_system(&self) -> MeasurementSystem {
        self.unit_system
    }
}

/// Context kept current from connection, machine, and UI events
///
/// Clones share state. Disconnecting also drops the controller state back
/// to [`ControllerState::Disconnected`].
#[derive(Debug, Clone, Default)]
pub struct TrackedMachineContext {
    state: Arc<RwLock<MachineSnapshot>>,
}

impl TrackedMachineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given values
    pub fn from_snapshot(snapshot: MachineSnapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Current values
    pub fn snapshot(&self) -> MachineSnapshot {
        *self.state.read()
    }

    pub fn set_connected(&self, connected: bool) {
        let mut state = self.state.write();
        state.connected = connected;
        if !connected {
            state.active_state = ControllerState::Disconnected;
        }
    }

    pub fn set_state(&self, active_state: ControllerState) {
        self.state.write().active_state = active_state;
    }

    pub fn set_units(&self, units: MeasurementSystem) {
        self.state.write().unit_system = units;
    }

    /// Apply one bus event; events of other kinds are ignored
    pub fn apply(&self, event: &AppEvent) {
        match event {
            AppEvent::Connection(ConnectionEvent::Connected { .. }) => self.set_connected(true),
            AppEvent::Connection(ConnectionEvent::Disconnected { .. }) => {
                self.set_connected(false)
            }
            AppEvent::Machine(MachineEvent::StateChanged { new, .. }) => self.set_state(*new),
            AppEvent::Ui(UiEvent::UnitsChanged { units }) => self.set_units(*units),
            _ => {}
        }
    }

    /// Follow events on `bus` for as long as the returned handle lives
    pub fn follow(&self, bus: &EventBus) -> Subscription {
        let tracked = self.clone();
        bus.subscribe_scoped(
            EventFilter::Categories(vec![
                EventCategory::Connection,
                EventCategory::Machine,
                EventCategory::Ui,
            ]),
            move |event| tracked.apply(&event),
        )
    }
}

impl MachineContext for TrackedMachineContext {
    fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    fn active_state(&self) -> ControllerState {
        self.state.read().active_state
    }

    fn unit_system(&self) -> MeasurementSystem {
        self.state.read().unit_system
    }
}
