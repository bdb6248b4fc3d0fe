//! # Event Bus Module
//!
//! Provides a unified event bus for decoupled communication between
//! application components.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Scoped [`Subscription`] handles unsubscribe when dropped
//! - Async consumers can poll a broadcast receiver instead
//!
//! ## Usage
//!
//! ```rust
//! use jogpad_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, ProgramEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe_scoped(
//!     EventFilter::Categories(vec![EventCategory::Program]),
//!     |event| {
//!         if let AppEvent::Program(program) = event {
//!             println!("Program event: {:?}", program);
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::Program(ProgramEvent::Resumed)).ok();
//!
//! // Unsubscribes
//! drop(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
