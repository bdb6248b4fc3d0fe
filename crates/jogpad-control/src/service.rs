//! Async front end for the jog engine
//!
//! [`JogService`] moves a [`JogEngine`] onto a tokio task and feeds it
//! requests from a single queue, so sequences from concurrent producers
//! never interleave. [`ShuttleSampler`] turns a continuously updated wheel
//! deflection into one `SHUTTLE_ZONE` intent per cycle.

use jogpad_core::Axis;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::JogEngine;
use crate::intent::Intent;
use crate::panel::{PanelAction, PanelButton, PanelState};
use crate::shuttle::SHUTTLE_CYCLE;

/// Request processed by the service task
#[derive(Debug)]
pub enum JogRequest {
    /// A named intent
    Intent(Intent),
    /// A panel button press
    Press(PanelButton),
    /// Direct relative jog
    Jog(Vec<(Axis, f64)>),
    /// Direct absolute move
    Move(Vec<(Axis, f64)>),
    /// Direct jog or move, dropped unless the panel is enabled
    Click(PanelAction),
    /// Clear the axis selection
    ResetSelection,
    /// Report the panel state once all earlier requests are done
    Query(oneshot::Sender<PanelState>),
}

/// Errors returned by [`JogHandle`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service task has stopped
    #[error("Jog service stopped")]
    Stopped,
}

/// Cloneable submitter for a running [`JogService`]
#[derive(Debug, Clone)]
pub struct JogHandle {
    tx: mpsc::UnboundedSender<JogRequest>,
}

impl JogHandle {
    /// Queue a request
    pub fn submit(&self, request: JogRequest) -> Result<(), ServiceError> {
        self.tx.send(request).map_err(|_| ServiceError::Stopped)
    }

    pub fn intent(&self, intent: Intent) -> Result<(), ServiceError> {
        self.submit(JogRequest::Intent(intent))
    }

    pub fn press(&self, button: PanelButton) -> Result<(), ServiceError> {
        self.submit(JogRequest::Press(button))
    }

    /// Panel state after every request queued so far has been processed
    pub async fn panel_state(&self) -> Result<PanelState, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.submit(JogRequest::Query(reply))?;
        rx.await.map_err(|_| ServiceError::Stopped)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Engine running on its own task
pub struct JogService;

impl JogService {
    /// Spawn the service on the current runtime
    ///
    /// The task ends, handing the engine back, once every [`JogHandle`] has
    /// been dropped.
    pub fn spawn(engine: JogEngine) -> (JogHandle, JoinHandle<JogEngine>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut engine = engine;
            while let Some(request) = rx.recv().await {
                apply(&mut engine, request);
            }
            tracing::debug!("Jog service stopped");
            engine
        });
        (JogHandle { tx }, task)
    }
}

fn apply(engine: &mut JogEngine, request: JogRequest) {
    match request {
        JogRequest::Intent(intent) => engine.handle(intent),
        JogRequest::Press(button) => {
            engine.press(button);
        }
        JogRequest::Jog(offsets) => engine.jog(&offsets),
        JogRequest::Move(targets) => engine.move_to(&targets),
        JogRequest::Click(action) => {
            engine.click(action);
        }
        JogRequest::ResetSelection => engine.reset_selection(),
        JogRequest::Query(reply) => {
            // Requester may have given up waiting.
            let _ = reply.send(engine.panel_state());
        }
    }
}

/// Samples the shuttle wheel every cycle
///
/// While the wheel is deflected each cycle submits `SHUTTLE_ZONE(v)`. When
/// it returns to center a single `SHUTTLE_ZONE(0)` follows, then nothing
/// until the next deflection.
pub struct ShuttleSampler {
    deflection: watch::Sender<i32>,
    task: JoinHandle<()>,
}

impl ShuttleSampler {
    /// Start sampling on the current runtime
    pub fn spawn(handle: JogHandle) -> Self {
        let (deflection, rx) = watch::channel(0);
        let task = tokio::spawn(sample(handle, rx));
        Self { deflection, task }
    }

    /// Report the current wheel deflection
    pub fn set(&self, value: i32) {
        self.deflection.send_replace(value);
    }

    pub fn current(&self) -> i32 {
        *self.deflection.borrow()
    }

    /// Stop sampling and wait for the task to finish
    pub async fn stop(self) {
        drop(self.deflection);
        if let Err(e) = self.task.await {
            tracing::warn!("Shuttle sampler ended abnormally: {}", e);
        }
    }
}

async fn sample(handle: JogHandle, rx: watch::Receiver<i32>) {
    let mut ticker = tokio::time::interval(SHUTTLE_CYCLE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut active = false;

    loop {
        ticker.tick().await;
        if rx.has_changed().is_err() {
            break;
        }

        let value = *rx.borrow();
        let intent = if value != 0 {
            active = true;
            Intent::ShuttleZone(value)
        } else if active {
            active = false;
            Intent::ShuttleZone(0)
        } else {
            continue;
        };

        if handle.intent(intent).is_err() {
            break;
        }
    }
    tracing::debug!("Shuttle sampler stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MachineSnapshot;
    use jogpad_communication::RecordingSink;
    use jogpad_core::{MemoryPreferences, PreferenceKey};
    use std::sync::Arc;

    fn spawn_service() -> (JogHandle, JoinHandle<JogEngine>, RecordingSink) {
        let sink = RecordingSink::new();
        let prefs = MemoryPreferences::new().with(PreferenceKey::SelectedDistance, "1");
        let engine = JogEngine::new(Arc::new(MachineSnapshot::idle()), Arc::new(prefs), sink.clone());
        let (handle, task) = JogService::spawn(engine);
        (handle, task, sink)
    }

    #[tokio::test]
    async fn test_requests_processed_in_order() {
        let (handle, task, sink) = spawn_service();

        handle.intent(Intent::SelectAxis(Axis::Y)).unwrap();
        handle.intent(Intent::JogForward).unwrap();
        handle.press(PanelButton::XyZero).unwrap();
        handle.submit(JogRequest::Jog(vec![(Axis::Z, 2.0)])).unwrap();

        let state = handle.panel_state().await.unwrap();
        assert_eq!(state.selected_axis, Some(Axis::Y));
        assert!(state.enabled);

        handle.submit(JogRequest::ResetSelection).unwrap();
        drop(handle);
        let engine = task.await.unwrap();
        assert_eq!(engine.selected_axis(), None);
        assert_eq!(
            sink.lines(),
            vec!["G91 G0 Y1", "G90", "G0 X0 Y0", "G91 G0 Z2", "G90"]
        );
    }

    #[tokio::test]
    async fn test_handle_reports_stopped_service() {
        let (handle, task, _) = spawn_service();
        task.abort();
        let _ = task.await;
        assert!(handle.is_closed());
        assert_eq!(handle.intent(Intent::JogForward), Err(ServiceError::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sampler_emits_until_centered() {
        let (handle, task, sink) = spawn_service();
        handle.intent(Intent::SelectAxis(Axis::X)).unwrap();

        let sampler = ShuttleSampler::spawn(handle.clone());
        sampler.set(7);
        tokio::time::sleep(SHUTTLE_CYCLE * 3 + SHUTTLE_CYCLE / 2).await;
        sampler.set(0);
        tokio::time::sleep(SHUTTLE_CYCLE * 3).await;
        assert_eq!(sampler.current(), 0);
        sampler.stop().await;

        drop(handle);
        task.await.unwrap();

        let lines = sink.lines();
        let (last, moves) = lines.split_last().unwrap();
        assert_eq!(last, "G90");
        assert!(moves.len() >= 6);
        for pair in moves.chunks(2) {
            assert_eq!(pair, ["G91 G1 F1500 X2.5", "G90"]);
        }
    }
}
