//! Shuttle wheel motion
//!
//! The wheel reports a deflection zone in [-7, 7]. Each 100 ms sample
//! becomes one short relative G1 move whose feed rate scales linearly with
//! the deflection, sized so the move lasts exactly one sample period.

use jogpad_core::units::round_to;
use jogpad_core::Axis;
use std::time::Duration;

use crate::command::{motion_line, Motion, Positioning};

/// Feed rate at full deflection and unit distance (units/min)
pub const SHUTTLE_MAX_FEEDRATE: f64 = 1500.0;

/// Largest deflection zone in either direction
pub const SHUTTLE_MAX_DEFLECTION: i32 = 7;

/// Sampling period of the wheel
pub const SHUTTLE_CYCLE: Duration = Duration::from_millis(100);

/// Jog distances above this are capped before scaling the feed rate
pub const SHUTTLE_DISTANCE_CEILING: f64 = 1.0;

/// One computed shuttle move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuttleStep {
    /// Feed rate, rounded to 3 decimals
    pub feedrate: f64,
    /// Signed distance covered in one cycle, rounded to 4 decimals
    pub relative_distance: f64,
}

impl ShuttleStep {
    /// Compute the step for a deflection and a resolved jog distance
    ///
    /// Returns `None` for the centered wheel. Out-of-range deflections are
    /// clamped.
    pub fn compute(deflection: i32, jog_distance: f64) -> Option<Self> {
        let deflection = deflection.clamp(-SHUTTLE_MAX_DEFLECTION, SHUTTLE_MAX_DEFLECTION);
        if deflection == 0 {
            return None;
        }

        let distance = jog_distance.clamp(0.0, SHUTTLE_DISTANCE_CEILING);
        let direction = f64::from(deflection.signum());
        let zone = f64::from(deflection.abs()) / f64::from(SHUTTLE_MAX_DEFLECTION);

        let feedrate = round_to(SHUTTLE_MAX_FEEDRATE * distance * zone, 3);
        let relative_distance =
            round_to(direction * (feedrate / 60.0) * SHUTTLE_CYCLE.as_secs_f64(), 4);

        Some(Self {
            feedrate,
            relative_distance,
        })
    }

    /// Lines moving `axis` by this step: the relative G1 move, then G90
    pub fn lines(&self, axis: Axis) -> Vec<String> {
        vec![
            motion_line(
                Some(Positioning::Relative),
                Motion::Linear {
                    feedrate: self.feedrate,
                },
                &[(axis, self.relative_distance)],
            ),
            Positioning::Absolute.word().to_string(),
        ]
    }
}
