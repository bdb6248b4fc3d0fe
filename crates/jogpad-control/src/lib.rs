//! # Jogpad Control
//!
//! The jog control engine: axis selection, jog distance resolution, shuttle
//! wheel motion, and translation of operator intents into G-code lines.
//!
//! ```
//! use std::sync::Arc;
//! use jogpad_communication::RecordingSink;
//! use jogpad_control::{Intent, JogEngine, MachineSnapshot};
//! use jogpad_core::{Axis, MemoryPreferences, PreferenceKey};
//!
//! let prefs = MemoryPreferences::new().with(PreferenceKey::SelectedDistance, "1");
//! let sink = RecordingSink::new();
//! let mut engine = JogEngine::new(Arc::new(MachineSnapshot::idle()), Arc::new(prefs), sink.clone());
//!
//! engine.handle(Intent::SelectAxis(Axis::X));
//! engine.handle(Intent::ShuttleZone(7));
//! assert_eq!(sink.lines(), vec!["G91 G1 F1500 X2.5", "G90"]);
//! ```

pub mod bindings;
pub mod command;
pub mod context;
pub mod distance;
pub mod engine;
pub mod intent;
pub mod panel;
pub mod service;
pub mod shuttle;

pub use bindings::{BindingError, InputBindings};
pub use context::{MachineContext, MachineSnapshot, TrackedMachineContext};
pub use engine::JogEngine;
pub use intent::Intent;
pub use panel::{PanelAction, PanelButton, PanelState};
pub use service::{JogHandle, JogRequest, JogService, ServiceError, ShuttleSampler};
pub use shuttle::ShuttleStep;
