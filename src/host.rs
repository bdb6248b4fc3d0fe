//! Console host
//!
//! Wires configuration, the event bus, the tracked machine context, the jog
//! service, and the shuttle sampler together, and executes parsed console
//! commands against them.

use jogpad_communication::CommandSink;
use jogpad_control::{
    InputBindings, Intent, JogEngine, JogHandle, JogRequest, JogService, MachineContext,
    MachineSnapshot, PanelAction, PanelState, ShuttleSampler, TrackedMachineContext,
};
use jogpad_core::event_bus::{ConnectionEvent, DisconnectReason, MachineEvent, UiEvent};
use jogpad_core::{AppEvent, ControllerState, EventBus, MeasurementSystem, Subscription};
use jogpad_settings::Config;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::console::ConsoleCommand;

/// Result of executing one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Status {
        panel: PanelState,
        units: MeasurementSystem,
    },
    Quit,
}

/// Running console session
pub struct Host<'a> {
    bus: &'a EventBus,
    context: TrackedMachineContext,
    bindings: InputBindings,
    handle: JogHandle,
    sampler: ShuttleSampler,
    task: JoinHandle<JogEngine>,
    port: Option<String>,
    _follow: Subscription,
}

impl<'a> Host<'a> {
    /// Start the jog service on the current runtime
    pub fn start(
        bus: &'a EventBus,
        config: &Config,
        sink: impl CommandSink + 'static,
    ) -> anyhow::Result<Self> {
        let bindings = InputBindings::from_pairs(&config.keybindings)?;

        let context = TrackedMachineContext::from_snapshot(
            MachineSnapshot::default().with_units(config.ui.measurement_system),
        );
        let follow = context.follow(bus);

        let mut engine = JogEngine::new(Arc::new(context.clone()), Arc::new(config.clone()), sink);
        engine.attach(bus);

        let (handle, task) = JogService::spawn(engine);
        let sampler = ShuttleSampler::spawn(handle.clone());
        tracing::info!("Jog service started with {} key bindings", bindings.len());

        Ok(Self {
            bus,
            context,
            bindings,
            handle,
            sampler,
            task,
            port: None,
            _follow: follow,
        })
    }

    /// Execute one console command
    pub async fn execute(&mut self, command: ConsoleCommand) -> anyhow::Result<Outcome> {
        match command {
            ConsoleCommand::Connect { port } => {
                self.settle().await?;
                self.publish(AppEvent::Connection(ConnectionEvent::Connected {
                    port: port.clone(),
                }));
                self.port = Some(port);
                self.change_state(ControllerState::Idle);
            }
            ConsoleCommand::Disconnect => {
                self.settle().await?;
                let port = self.port.take().unwrap_or_default();
                self.publish(AppEvent::Connection(ConnectionEvent::Disconnected {
                    port,
                    reason: DisconnectReason::UserRequested,
                }));
            }
            ConsoleCommand::State(state) => {
                self.settle().await?;
                self.change_state(state);
            }
            ConsoleCommand::Units(units) => {
                self.settle().await?;
                self.publish(AppEvent::Ui(UiEvent::UnitsChanged { units }));
            }
            ConsoleCommand::Program(event) => {
                self.settle().await?;
                self.publish(AppEvent::Program(event));
            }
            ConsoleCommand::Press(button) => self.handle.press(button)?,
            ConsoleCommand::Jog(offsets) => {
                self.handle.submit(JogRequest::Click(PanelAction::Jog(offsets)))?
            }
            ConsoleCommand::Move(targets) => {
                self.handle.submit(JogRequest::Click(PanelAction::Move(targets)))?
            }
            ConsoleCommand::Shuttle(value) => self.sampler.set(value),
            ConsoleCommand::Intent(intent) => self.handle.intent(intent)?,
            // A shuttle key holds the wheel at its zone until a key bound
            // to SHUTTLE_ZONE 0 (or a typed one) centers it again.
            ConsoleCommand::Key(key) => match self.bindings.resolve(&key) {
                Some(Intent::ShuttleZone(value)) => self.sampler.set(value),
                Some(intent) => self.handle.intent(intent)?,
                None => tracing::warn!("No binding for key '{}'", key),
            },
            ConsoleCommand::Status => {
                return Ok(Outcome::Status {
                    panel: self.handle.panel_state().await?,
                    units: self.context.unit_system(),
                })
            }
            ConsoleCommand::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    /// Stop sampling, drain queued requests, and hand back the engine
    pub async fn shutdown(self) -> anyhow::Result<JogEngine> {
        self.sampler.stop().await;
        drop(self.handle);
        let engine = self.task.await?;
        tracing::info!("Jog service stopped");
        Ok(engine)
    }

    // Context changes must not overtake intents still in the queue.
    async fn settle(&self) -> anyhow::Result<()> {
        self.handle.panel_state().await?;
        Ok(())
    }

    fn change_state(&self, new: ControllerState) {
        let old = self.context.active_state();
        self.publish(AppEvent::Machine(MachineEvent::StateChanged { old, new }));
    }

    fn publish(&self, event: AppEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::debug!("Event dropped: {}", e);
        }
    }
}
