//! # Jogpad
//!
//! Keyboard and pointer jog control for CNC machines.
//!
//! ## Architecture
//!
//! Jogpad is organized as a workspace with multiple crates:
//!
//! 1. **jogpad-core** - Axes, controller states, units, preferences, errors, event bus
//! 2. **jogpad-communication** - Line sinks that carry G-code to the machine
//! 3. **jogpad-settings** - Configuration file, persistence, key binding storage
//! 4. **jogpad-control** - Jog engine, shuttle wheel, panel, async service
//! 5. **jogpad** - Console binary that wires the crates together
//!
//! ## Features
//!
//! - **Axis selection**: toggle X, Y, or Z for keyboard jogging
//! - **Step jogging**: unit-aware jog distances from presets or a custom value
//! - **Shuttle wheel**: continuous motion scaled by wheel deflection
//! - **Panel buttons**: directional and diagonal jogs, move to zero

pub mod console;
pub mod host;

pub use jogpad_communication::{CommandSink, WriterSink};
pub use jogpad_control::{
    InputBindings, Intent, JogEngine, JogHandle, JogService, PanelButton, PanelState,
    ShuttleSampler, TrackedMachineContext,
};
pub use jogpad_core::{event_bus, Axis, ControllerState, Error, MeasurementSystem, Result};
pub use jogpad_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so stdout stays free for G-code. The level comes from
/// `RUST_LOG` and defaults to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
