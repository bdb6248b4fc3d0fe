//! G-code line generation
//!
//! Jogs are relative moves bracketed by a restore to absolute positioning;
//! moves are absolute rapids that leave the positioning mode alone.
//!
//! ```
//! use jogpad_control::command::{jog_lines, move_line};
//! use jogpad_core::Axis;
//!
//! assert_eq!(jog_lines(&[(Axis::X, -1.0), (Axis::Y, 1.0)]), vec!["G91 G0 X-1 Y1", "G90"]);
//! assert_eq!(move_line(&[(Axis::Z, 0.0)]), Some("G0 Z0".to_string()));
//! ```

use jogpad_core::Axis;
use std::fmt;

/// Distance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    /// G90
    Absolute,
    /// G91
    Relative,
}

impl Positioning {
    /// Modal word for this mode
    pub fn word(self) -> &'static str {
        match self {
            Positioning::Absolute => "G90",
            Positioning::Relative => "G91",
        }
    }
}

impl fmt::Display for Positioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Motion mode of a generated line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// G0 rapid
    Rapid,
    /// G1 linear move at a feed rate (units/min)
    Linear { feedrate: f64 },
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motion::Rapid => f.write_str("G0"),
            Motion::Linear { feedrate } => write!(f, "G1 F{}", format_number(*feedrate)),
        }
    }
}

/// Format a number in its shortest round-trip decimal form
///
/// Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn axis_words(words: &[(Axis, f64)]) -> String {
    words
        .iter()
        .map(|(axis, value)| format!("{}{}", axis.letter(), format_number(*value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a single motion line: optional positioning word, motion, axis words
pub fn motion_line(positioning: Option<Positioning>, motion: Motion, words: &[(Axis, f64)]) -> String {
    let words = axis_words(words);
    match positioning {
        Some(positioning) => format!("{} {} {}", positioning, motion, words),
        None => format!("{} {}", motion, words),
    }
}

/// Relative rapid jog followed by a restore to absolute positioning
///
/// Empty offsets produce no lines.
pub fn jog_lines(offsets: &[(Axis, f64)]) -> Vec<String> {
    if offsets.is_empty() {
        return Vec::new();
    }
    vec![
        motion_line(Some(Positioning::Relative), Motion::Rapid, offsets),
        Positioning::Absolute.word().to_string(),
    ]
}

/// Absolute rapid to the given targets
pub fn move_line(targets: &[(Axis, f64)]) -> Option<String> {
    if targets.is_empty() {
        return None;
    }
    Some(motion_line(None, Motion::Rapid, targets))
}
