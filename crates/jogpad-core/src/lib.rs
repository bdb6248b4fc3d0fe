//! # Jogpad Core
//!
//! Core types and utilities for Jogpad.
//! Provides axis and controller-state models, unit conversion, the
//! preferences accessor, error types, and the application event bus.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod preferences;
pub mod units;

pub use data::{Axis, ControllerState};

pub use error::{ConnectionError, ControllerError, Error, Result};

pub use preferences::{MemoryPreferences, PreferenceKey, Preferences};

pub use units::MeasurementSystem;

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, ProgramEvent,
    Subscription, SubscriptionId,
};
