//! Jog engine
//!
//! Owns the axis selection and turns operator intents into G-code lines.
//! Everything else (connection, controller state, units, distances, the
//! transport) is read from collaborators handed in at construction.
//!
//! Every sequence that switches to relative positioning ends with `G90`, and
//! that restore line is attempted even if an earlier line failed to send.

use jogpad_communication::CommandSink;
use jogpad_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, Subscription};
use jogpad_core::{Axis, Preferences, ProgramEvent};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::command::{jog_lines, move_line, Positioning};
use crate::context::MachineContext;
use crate::distance::resolve_jog_distance;
use crate::intent::Intent;
use crate::panel::{PanelAction, PanelButton, PanelState};
use crate::shuttle::ShuttleStep;

/// Jog control engine
pub struct JogEngine {
    context: Arc<dyn MachineContext>,
    preferences: Arc<dyn Preferences>,
    sink: Box<dyn CommandSink>,
    selected: Arc<Mutex<Option<Axis>>>,
    subscription: Option<Subscription>,
}

impl JogEngine {
    /// Create an engine with no axis selected
    pub fn new(
        context: Arc<dyn MachineContext>,
        preferences: Arc<dyn Preferences>,
        sink: impl CommandSink + 'static,
    ) -> Self {
        Self {
            context,
            preferences,
            sink: Box::new(sink),
            selected: Arc::new(Mutex::new(None)),
            subscription: None,
        }
    }

    /// Listen for program start/resume on `bus` and drop the selection when
    /// either arrives. Replaces any earlier attachment.
    pub fn attach(&mut self, bus: &EventBus) {
        let selected = Arc::clone(&self.selected);
        let subscription = bus.subscribe_scoped(
            EventFilter::Categories(vec![EventCategory::Program]),
            move |event| {
                if let AppEvent::Program(program) = event {
                    if program.starts_motion() {
                        if let Some(axis) = selected.lock().take() {
                            tracing::info!("{}: released {} axis", event_name(&program), axis);
                        }
                    }
                }
            },
        );
        self.subscription = Some(subscription);
    }

    /// Stop listening for lifecycle events
    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| subscription.is_active())
    }

    /// Currently selected axis
    pub fn selected_axis(&self) -> Option<Axis> {
        *self.selected.lock()
    }

    /// Whether the direction labels of `axis` are highlighted
    pub fn is_highlighted(&self, axis: Axis) -> bool {
        self.selected_axis() == Some(axis)
    }

    /// Axis selection is accepted only when connected and idle
    pub fn can_select(&self) -> bool {
        self.context.is_connected() && self.context.active_state().is_idle()
    }

    /// Keyboard jogs are accepted when connected and idle or running
    pub fn can_jog(&self) -> bool {
        self.context.is_connected() && self.context.active_state().allows_jog()
    }

    /// Panel buttons are enabled only when connected and idle
    pub fn can_click(&self) -> bool {
        self.can_select()
    }

    pub fn panel_state(&self) -> PanelState {
        PanelState {
            selected_axis: self.selected_axis(),
            enabled: self.can_click(),
        }
    }

    /// Magnitude of one jog step in the current display units
    pub fn jog_distance(&self) -> f64 {
        resolve_jog_distance(self.preferences.as_ref(), self.context.unit_system())
    }

    /// Process one intent
    pub fn handle(&mut self, intent: Intent) {
        tracing::trace!("Intent {}", intent);
        match intent {
            Intent::SelectAxis(axis) => self.select_axis(axis),
            Intent::JogForward => self.jog_selected(1.0),
            Intent::JogBackward => self.jog_selected(-1.0),
            Intent::ShuttleZone(deflection) => self.shuttle(deflection),
        }
    }

    /// Toggle selection of `axis`
    pub fn select_axis(&mut self, axis: Axis) {
        if !self.can_select() {
            tracing::debug!(
                "Ignoring {} selection: connected={}, state={}",
                axis,
                self.context.is_connected(),
                self.context.active_state()
            );
            return;
        }

        let mut selected = self.selected.lock();
        *selected = match *selected {
            Some(current) if current == axis => None,
            _ => Some(axis),
        };
        match *selected {
            Some(axis) => tracing::info!("Selected {} axis", axis),
            None => tracing::info!("Deselected {} axis", axis),
        }
    }

    /// Clear the selection unconditionally
    pub fn reset_selection(&self) {
        if let Some(axis) = self.selected.lock().take() {
            tracing::info!("Released {} axis", axis);
        }
    }

    fn jog_selected(&mut self, sign: f64) {
        if !self.can_jog() {
            tracing::debug!(
                "Ignoring jog: connected={}, state={}",
                self.context.is_connected(),
                self.context.active_state()
            );
            return;
        }

        let Some(axis) = self.selected_axis() else {
            tracing::debug!("Ignoring jog: no axis selected");
            return;
        };

        let distance = self.jog_distance();
        self.jog(&[(axis, sign * distance)]);
    }

    /// Apply one shuttle wheel sample
    ///
    /// A centered wheel sends a lone `G90` while an axis is selected, which
    /// closes out a shuttle run. No guard applies.
    pub fn shuttle(&mut self, deflection: i32) {
        let Some(axis) = self.selected_axis() else {
            return;
        };

        match ShuttleStep::compute(deflection, self.jog_distance()) {
            None => self.send_all(&[Positioning::Absolute.word().to_string()]),
            Some(step) => self.send_all(&step.lines(axis)),
        }
    }

    /// Relative jog by `offsets`, regardless of selection
    pub fn jog(&mut self, offsets: &[(Axis, f64)]) {
        self.send_all(&jog_lines(offsets));
    }

    /// Absolute rapid to `targets`, regardless of selection
    pub fn move_to(&mut self, targets: &[(Axis, f64)]) {
        if let Some(line) = move_line(targets) {
            self.send_all(&[line]);
        }
    }

    /// Press a panel button. Returns false if the panel is disabled.
    pub fn press(&mut self, button: PanelButton) -> bool {
        if !self.can_click() {
            tracing::debug!("Ignoring {} press: panel disabled", button);
            return false;
        }
        self.perform(button.action(self.jog_distance()));
        true
    }

    /// Run a direct jog or move only while the panel is enabled
    /// (connected and Idle). Returns false if it was dropped.
    pub fn click(&mut self, action: PanelAction) -> bool {
        if !self.can_click() {
            tracing::debug!("Ignoring direct {:?}: panel disabled", action);
            return false;
        }
        self.perform(action);
        true
    }

    fn perform(&mut self, action: PanelAction) {
        match action {
            PanelAction::Jog(offsets) => self.jog(&offsets),
            PanelAction::Move(targets) => self.move_to(&targets),
        }
    }

    fn send_all(&mut self, lines: &[String]) {
        for line in lines {
            tracing::debug!("> {}", line);
            if let Err(e) = self.sink.send_line(line) {
                tracing::warn!("Failed to send '{}': {}", line, e);
            }
        }
    }
}

fn event_name(program: &ProgramEvent) -> &'static str {
    match program {
        ProgramEvent::Started { .. } => "Program started",
        ProgramEvent::Resumed => "Program resumed",
        _ => "Program event",
    }
}

impl std::fmt::Debug for JogEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JogEngine")
            .field("selected", &self.selected_axis())
            .field("attached", &self.is_attached())
            .finish()
    }
}
