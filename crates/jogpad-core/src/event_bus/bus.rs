//! Event Bus implementation.
//!
//! Provides the core EventBus struct, scoped subscriptions, and the global
//! instance for application-wide event distribution.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription identifier for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Arc<dyn Fn(AppEvent) + Send + Sync>;
type HandlerMap = HashMap<SubscriptionId, (EventFilter, EventHandler)>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// Error types for event bus operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Scoped subscription handle
///
/// The handler stays registered for as long as this value lives. Dropping it
/// (or calling [`Subscription::cancel`]) removes the handler from the bus.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    handlers: Weak<RwLock<HandlerMap>>,
}

impl Subscription {
    /// Identifier of the underlying subscription
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether the handler is still registered on a live bus
    pub fn is_active(&self) -> bool {
        self.handlers
            .upgrade()
            .is_some_and(|handlers| handlers.read().contains_key(&self.id))
    }

    /// Unsubscribe now instead of at drop
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            if handlers.write().remove(&self.id).is_some() {
                tracing::debug!("Subscription {} released", self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Central event bus for application-wide event distribution
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    handlers: Arc<RwLock<HandlerMap>>,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity);
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Synchronous handlers run on the calling thread before this returns.
    /// Returns the number of async receivers that will receive the event,
    /// or an error if nobody at all is listening.
    pub fn publish(&self, event: AppEvent) -> Result<usize, EventBusError> {
        tracing::trace!("Publishing {}", event.description());

        // Snapshot matching handlers so a handler may subscribe or
        // unsubscribe without deadlocking on the registry lock.
        let matching: Vec<EventHandler> = self
            .handlers
            .read()
            .values()
            .filter(|(filter, _)| filter.matches(&event))
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &matching {
            handler(event.clone());
        }

        match self.sender.send(event) {
            Ok(count) => Ok(count),
            Err(_) if self.subscriber_count() == 0 => Err(EventBusError::NoSubscribers),
            Err(_) => Ok(0),
        }
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler will be called on the publishing thread, so it should
    /// return quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers
            .write()
            .insert(id, (filter, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Subscribe with a handle that unsubscribes when dropped
    pub fn subscribe_scoped<F>(&self, filter: EventFilter, handler: F) -> Subscription
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = self.subscribe(filter, handler);
        Subscription {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Get a receiver for manual event polling
    ///
    /// This is useful for async contexts where you want to receive events
    /// in a tokio task.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}

static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Get or initialize the global event bus
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}

/// Convenience macro to publish an event to the global event bus
#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::event_bus::event_bus().publish($event)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{ConnectionEvent, ProgramEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_scoped_subscription_released_on_drop() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        {
            let sub = bus.subscribe_scoped(EventFilter::All, move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            });
            assert!(sub.is_active());
            assert_eq!(bus.subscriber_count(), 1);
            bus.publish(AppEvent::Program(ProgramEvent::Resumed)).ok();
        }

        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(AppEvent::Program(ProgramEvent::Resumed)).ok();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_subscription_cancel() {
        let bus = EventBus::new();
        let sub = bus.subscribe_scoped(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);
        sub.cancel();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = EventBus::new();
        let sub = bus.subscribe_scoped(EventFilter::All, |_| {});
        drop(bus);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_handler_may_unsubscribe_during_publish() {
        let bus = Arc::new(EventBus::new());
        let id_slot: Arc<parking_lot::Mutex<Option<SubscriptionId>>> =
            Arc::new(parking_lot::Mutex::new(None));

        let bus_clone = bus.clone();
        let slot = id_slot.clone();
        let id = bus.subscribe(EventFilter::All, move |_| {
            if let Some(id) = slot.lock().take() {
                bus_clone.unsubscribe(id);
            }
        });
        *id_slot.lock() = Some(id);

        bus.publish(AppEvent::Program(ProgramEvent::Paused)).ok();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let connection_count = Arc::new(AtomicUsize::new(0));
        let program_count = Arc::new(AtomicUsize::new(0));

        let cc = connection_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Connection]),
            move |_| {
                cc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let pc = program_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Program]),
            move |_| {
                pc.fetch_add(1, Ordering::SeqCst);
            },
        );

        bus.publish(AppEvent::Connection(ConnectionEvent::Connected {
            port: "test".to_string(),
        }))
        .ok();
        bus.publish(AppEvent::Program(ProgramEvent::Started { total_lines: 3 }))
            .ok();
        bus.publish(AppEvent::Program(ProgramEvent::Completed)).ok();

        assert_eq!(connection_count.load(Ordering::SeqCst), 1);
        assert_eq!(program_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_publish_without_listeners() {
        let bus = EventBus::new();
        let result = bus.publish(AppEvent::Program(ProgramEvent::Paused));
        assert!(matches!(result, Err(EventBusError::NoSubscribers)));
    }

    #[test]
    fn test_channel_capacity_bounds_receiver_backlog() {
        let bus = EventBus::with_config(EventBusConfig {
            channel_capacity: 2,
        });
        assert_eq!(bus.config().channel_capacity, 2);

        let mut rx = bus.receiver();
        for i in 0..3 {
            bus.publish(AppEvent::Program(ProgramEvent::Started { total_lines: i }))
                .ok();
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::Program(ProgramEvent::Started { total_lines: 1 }))
        ));
    }

    #[tokio::test]
    async fn test_async_receiver() {
        let bus = EventBus::new();
        let mut receiver = bus.receiver();

        bus.publish(AppEvent::Connection(ConnectionEvent::Connected {
            port: "test".to_string(),
        }))
        .ok();

        match receiver.try_recv() {
            Ok(AppEvent::Connection(ConnectionEvent::Connected { port })) => {
                assert_eq!(port, "test")
            }
            other => panic!("Wrong event received: {:?}", other),
        }
    }
}
