//! Data models for axes and controller state
//!
//! This module provides:
//! - The three jog axes (X, Y, Z)
//! - Controller state machine states as reported by the machine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ControllerError;

/// Linear machine axis that can be jogged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X-axis (typically left-right).
    X,
    /// Y-axis (typically front-back).
    Y,
    /// Z-axis (typically up-down).
    Z,
}

impl Axis {
    /// All jog axes in panel order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Upper-case G-code word letter for this axis
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(format!("Unknown axis: {}", other)),
        }
    }
}

/// Machine/Controller state machine states
///
/// Represents the operational state of the CNC controller as reported in
/// its status reports. The jog engine only distinguishes Idle and Run; every
/// other state blocks operator motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControllerState {
    /// Not connected to any controller
    #[default]
    Disconnected,
    /// Connected and idle, ready for commands
    Idle,
    /// Executing a G-code program
    Run,
    /// Program paused, awaiting resume
    Hold,
    /// Manual jog/movement mode
    Jog,
    /// Machine alarm state (requires manual intervention)
    Alarm,
    /// Check mode (dry-run without machine movement)
    Check,
    /// Safety door interlock triggered
    Door,
    /// Homing/homing cycle in progress
    Home,
    /// Low-power sleep/idle state
    Sleep,
}

impl ControllerState {
    /// Check if this state indicates the controller is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, ControllerState::Idle)
    }

    /// Check if this state allows jogging the selected axis (Idle or Run)
    pub fn allows_jog(&self) -> bool {
        matches!(self, ControllerState::Idle | ControllerState::Run)
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Idle => write!(f, "Idle"),
            Self::Run => write!(f, "Run"),
            Self::Hold => write!(f, "Hold"),
            Self::Jog => write!(f, "Jog"),
            Self::Alarm => write!(f, "Alarm"),
            Self::Check => write!(f, "Check"),
            Self::Door => write!(f, "Door"),
            Self::Home => write!(f, "Home"),
            Self::Sleep => write!(f, "Sleep"),
        }
    }
}

impl FromStr for ControllerState {
    type Err = ControllerError;

    /// Parse a GRBL-style state name. Sub-states such as `Hold:0` or
    /// `Door:1` map onto their parent state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().split(':').next().unwrap_or_default();
        match name.to_ascii_lowercase().as_str() {
            "disconnected" => Ok(Self::Disconnected),
            "idle" => Ok(Self::Idle),
            "run" => Ok(Self::Run),
            "hold" => Ok(Self::Hold),
            "jog" => Ok(Self::Jog),
            "alarm" => Ok(Self::Alarm),
            "check" => Ok(Self::Check),
            "door" => Ok(Self::Door),
            "home" => Ok(Self::Home),
            "sleep" => Ok(Self::Sleep),
            _ => Err(ControllerError::UnknownState {
                state: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::X.letter(), 'X');
        assert_eq!(Axis::Z.to_string(), "Z");
        assert_eq!("y".parse::<Axis>().unwrap(), Axis::Y);
        assert!("a".parse::<Axis>().is_err());
    }

    #[test]
    fn test_state_gates() {
        assert!(ControllerState::Idle.is_idle());
        assert!(ControllerState::Idle.allows_jog());
        assert!(ControllerState::Run.allows_jog());
        assert!(!ControllerState::Hold.allows_jog());
        assert!(!ControllerState::Alarm.allows_jog());
        assert!(!ControllerState::Run.is_idle());
    }

    #[test]
    fn test_state_parse() {
        assert_eq!("Idle".parse::<ControllerState>().unwrap(), ControllerState::Idle);
        assert_eq!("run".parse::<ControllerState>().unwrap(), ControllerState::Run);
        assert_eq!("Hold:0".parse::<ControllerState>().unwrap(), ControllerState::Hold);
        assert!("Spinning".parse::<ControllerState>().is_err());
    }
}
