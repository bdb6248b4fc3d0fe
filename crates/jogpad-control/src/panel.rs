//! Pointer-driven panel buttons
//!
//! Twelve buttons laid out in a 3x4 grid: the eight X/Y directions around a
//! "move to XY zero" center, and a Z column with Z+, "move to Z zero", and
//! Z-. Buttons are only effective while the machine is connected and idle.

use jogpad_core::Axis;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Panel button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelButton {
    XMinusYPlus,
    YPlus,
    XPlusYPlus,
    ZPlus,
    XMinus,
    XyZero,
    XPlus,
    ZZero,
    XMinusYMinus,
    YMinus,
    XPlusYMinus,
    ZMinus,
}

/// What pressing a button does, given the resolved jog distance
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Relative jog by these offsets
    Jog(Vec<(Axis, f64)>),
    /// Absolute rapid to these targets
    Move(Vec<(Axis, f64)>),
}

impl PanelButton {
    /// All buttons, row by row
    pub const GRID: [[PanelButton; 4]; 3] = [
        [Self::XMinusYPlus, Self::YPlus, Self::XPlusYPlus, Self::ZPlus],
        [Self::XMinus, Self::XyZero, Self::XPlus, Self::ZZero],
        [Self::XMinusYMinus, Self::YMinus, Self::XPlusYMinus, Self::ZMinus],
    ];

    /// Tooltip text
    pub fn title(self) -> &'static str {
        match self {
            Self::XMinusYPlus => "Move X- Y+",
            Self::YPlus => "Move Y+",
            Self::XPlusYPlus => "Move X+ Y+",
            Self::ZPlus => "Move Z+",
            Self::XMinus => "Move X-",
            Self::XyZero => "Move To XY Zero (G0 X0 Y0)",
            Self::XPlus => "Move X+",
            Self::ZZero => "Move To Z Zero (G0 Z0)",
            Self::XMinusYMinus => "Move X- Y-",
            Self::YMinus => "Move Y-",
            Self::XPlusYMinus => "Move X+ Y-",
            Self::ZMinus => "Move Z-",
        }
    }

    /// Short label, also accepted by [`FromStr`]
    pub fn label(self) -> &'static str {
        match self {
            Self::XMinusYPlus => "X-Y+",
            Self::YPlus => "Y+",
            Self::XPlusYPlus => "X+Y+",
            Self::ZPlus => "Z+",
            Self::XMinus => "X-",
            Self::XyZero => "X0Y0",
            Self::XPlus => "X+",
            Self::ZZero => "Z0",
            Self::XMinusYMinus => "X-Y-",
            Self::YMinus => "Y-",
            Self::XPlusYMinus => "X+Y-",
            Self::ZMinus => "Z-",
        }
    }

    /// Resolve the button against a jog distance
    pub fn action(self, distance: f64) -> PanelAction {
        let d = distance;
        match self {
            Self::XMinusYPlus => PanelAction::Jog(vec![(Axis::X, -d), (Axis::Y, d)]),
            Self::YPlus => PanelAction::Jog(vec![(Axis::Y, d)]),
            Self::XPlusYPlus => PanelAction::Jog(vec![(Axis::X, d), (Axis::Y, d)]),
            Self::ZPlus => PanelAction::Jog(vec![(Axis::Z, d)]),
            Self::XMinus => PanelAction::Jog(vec![(Axis::X, -d)]),
            Self::XyZero => PanelAction::Move(vec![(Axis::X, 0.0), (Axis::Y, 0.0)]),
            Self::XPlus => PanelAction::Jog(vec![(Axis::X, d)]),
            Self::ZZero => PanelAction::Move(vec![(Axis::Z, 0.0)]),
            Self::XMinusYMinus => PanelAction::Jog(vec![(Axis::X, -d), (Axis::Y, -d)]),
            Self::YMinus => PanelAction::Jog(vec![(Axis::Y, -d)]),
            Self::XPlusYMinus => PanelAction::Jog(vec![(Axis::X, d), (Axis::Y, -d)]),
            Self::ZMinus => PanelAction::Jog(vec![(Axis::Z, -d)]),
        }
    }
}

impl fmt::Display for PanelButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PanelButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        PanelButton::GRID
            .iter()
            .flatten()
            .copied()
            .find(|button| button.label() == wanted)
            .ok_or_else(|| format!("Unknown panel button: {}", s))
    }
}

/// Snapshot of what a renderer needs to draw the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PanelState {
    /// Axis armed for continuous jog
    pub selected_axis: Option<Axis>,
    /// Whether buttons accept clicks
    pub enabled: bool,
}

impl PanelState {
    /// Whether the direction labels of `axis` are highlighted
    pub fn is_highlighted(&self, axis: Axis) -> bool {
        self.selected_axis == Some(axis)
    }
}
