//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) systems and the
//! fixed-decimal rounding used for jog distances and feed rates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Number of decimals a jog distance is rounded to in this system
    pub fn distance_decimals(self) -> u32 {
        match self {
            Self::Metric => 3,
            Self::Imperial => 4,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Convert millimeters to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert inches to millimeters
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Every finite `f64` has a terminating decimal expansion of at most this
/// many fraction digits.
const EXACT_DECIMALS: usize = 1074;

/// Round `value` to a fixed number of decimals, halves away from zero.
///
/// Rounding looks at the exact decimal expansion of the double, not at
/// `value * 10^decimals`, so `1.0005` (stored as 1.000499999...) rounds to
/// `1.0` at three decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let exact = format!("{:.*}", EXACT_DECIMALS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = &fraction[..(decimals as usize).min(fraction.len())];
    let round_up = matches!(fraction.as_bytes().get(kept.len()), Some(b'5'..=b'9'));

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    if round_up {
        increment_digits(&mut digits);
    }

    let split = digits.len() - kept.len();
    let mut text: String = digits.iter().map(|&d| char::from(d)).collect();
    if !kept.is_empty() {
        text.insert(split, '.');
    }

    let magnitude = text.parse::<f64>().unwrap_or(0.0);
    // Never hand out negative zero; it would print as "-0" in G-code.
    if magnitude == 0.0 {
        0.0
    } else if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Convert a millimeter value into the given system, rounded the way jog
/// distances are displayed and sent (3 decimals metric, 4 decimals imperial).
pub fn to_unit_value(value_mm: f64, system: MeasurementSystem) -> f64 {
    let value = match system {
        MeasurementSystem::Metric => value_mm,
        MeasurementSystem::Imperial => mm_to_inches(value_mm),
    };
    round_to(value, system.distance_decimals())
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
