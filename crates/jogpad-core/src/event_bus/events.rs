//! Event type definitions for the event bus.
//!
//! This module defines all application events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::data::ControllerState;
use crate::units::MeasurementSystem;

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Machine connection events
    Connection(ConnectionEvent),
    /// Machine state and status
    Machine(MachineEvent),
    /// G-code program run lifecycle
    Program(ProgramEvent),
    /// User interface events
    Ui(UiEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Connection(_) => EventCategory::Connection,
            AppEvent::Machine(_) => EventCategory::Machine,
            AppEvent::Program(_) => EventCategory::Program,
            AppEvent::Ui(_) => EventCategory::Ui,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Connection(e) => e.description(),
            AppEvent::Machine(e) => e.description(),
            AppEvent::Program(e) => e.description(),
            AppEvent::Ui(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Machine connection events.
    Connection,
    /// Machine state and status events.
    Machine,
    /// Program run lifecycle events.
    Program,
    /// User interface events.
    Ui,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Connection => write!(f, "Connection"),
            EventCategory::Machine => write!(f, "Machine"),
            EventCategory::Program => write!(f, "Program"),
            EventCategory::Ui => write!(f, "Ui"),
        }
    }
}

/// Reason for disconnection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DisconnectReason {
    /// User requested disconnect
    UserRequested,
    /// Connection lost unexpectedly
    ConnectionLost,
    /// Error occurred
    Error(String),
}

/// Connection-related events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConnectionEvent {
    /// Successfully connected.
    Connected {
        /// Port path or address that was connected.
        port: String,
    },
    /// Disconnected from device.
    Disconnected {
        /// Port path or address that was disconnected.
        port: String,
        /// Reason for the disconnection.
        reason: DisconnectReason,
    },
}

impl ConnectionEvent {
    fn description(&self) -> String {
        match self {
            ConnectionEvent::Connected { port } => format!("Connected to {}", port),
            ConnectionEvent::Disconnected { port, reason } => {
                format!("Disconnected from {}: {:?}", port, reason)
            }
        }
    }
}

/// Machine state and status events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MachineEvent {
    /// Controller state changed.
    StateChanged {
        /// Previous controller state.
        old: ControllerState,
        /// New controller state.
        new: ControllerState,
    },
}

impl MachineEvent {
    fn description(&self) -> String {
        match self {
            MachineEvent::StateChanged { old, new } => {
                format!("State: {:?} -> {:?}", old, new)
            }
        }
    }
}

/// Program run lifecycle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramEvent {
    /// A program started streaming to the machine.
    Started {
        /// Total number of lines to stream.
        total_lines: usize,
    },
    /// The running program was paused.
    Paused,
    /// A paused program resumed.
    Resumed,
    /// The program was stopped before completion.
    Stopped,
    /// The program finished.
    Completed,
}

impl ProgramEvent {
    /// Whether autonomous motion begins with this event
    pub fn starts_motion(&self) -> bool {
        matches!(self, ProgramEvent::Started { .. } | ProgramEvent::Resumed)
    }

    fn description(&self) -> String {
        match self {
            ProgramEvent::Started { total_lines } => {
                format!("Program started: {} lines", total_lines)
            }
            ProgramEvent::Paused => "Program paused".to_string(),
            ProgramEvent::Resumed => "Program resumed".to_string(),
            ProgramEvent::Stopped => "Program stopped".to_string(),
            ProgramEvent::Completed => "Program completed".to_string(),
        }
    }
}

/// UI-related events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UiEvent {
    /// Display units changed.
    UnitsChanged {
        /// The new measurement system.
        units: MeasurementSystem,
    },
    /// Action triggered.
    ActionTriggered {
        /// Name of the action that was triggered.
        action: String,
    },
}

impl UiEvent {
    fn description(&self) -> String {
        match self {
            UiEvent::UnitsChanged { units } => format!("Units: {}", units),
            UiEvent::ActionTriggered { action } => format!("Action: {}", action),
        }
    }
}
