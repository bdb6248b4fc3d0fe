//! Operator intents and their action names

use jogpad_core::Axis;
use std::fmt;
use std::str::FromStr;

use crate::bindings::BindingError;

/// A named action delivered by key bindings or the shuttle wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Toggle selection of an axis (`X_AXIS`, `Y_AXIS`, `Z_AXIS`)
    SelectAxis(Axis),
    /// Jog the selected axis by +distance (`JOG_FORWARD`)
    JogForward,
    /// Jog the selected axis by -distance (`JOG_BACKWARD`)
    JogBackward,
    /// Shuttle wheel deflection sample (`SHUTTLE_ZONE`)
    ShuttleZone(i32),
}

impl Intent {
    /// Action name as delivered by the binding layer
    pub fn action_name(&self) -> &'static str {
        match self {
            Intent::SelectAxis(Axis::X) => "X_AXIS",
            Intent::SelectAxis(Axis::Y) => "Y_AXIS",
            Intent::SelectAxis(Axis::Z) => "Z_AXIS",
            Intent::JogForward => "JOG_FORWARD",
            Intent::JogBackward => "JOG_BACKWARD",
            Intent::ShuttleZone(_) => "SHUTTLE_ZONE",
        }
    }

    /// Build an intent from an action name and its optional argument
    ///
    /// Only `SHUTTLE_ZONE` takes an argument; it defaults to 0 (centered).
    pub fn from_action(name: &str, argument: Option<&str>) -> Result<Self, BindingError> {
        let intent = match name {
            "X_AXIS" => Intent::SelectAxis(Axis::X),
            "Y_AXIS" => Intent::SelectAxis(Axis::Y),
            "Z_AXIS" => Intent::SelectAxis(Axis::Z),
            "JOG_FORWARD" => Intent::JogForward,
            "JOG_BACKWARD" => Intent::JogBackward,
            "SHUTTLE_ZONE" => {
                let value = match argument {
                    None => 0,
                    Some(text) => {
                        text.trim()
                            .parse::<i32>()
                            .map_err(|_| BindingError::InvalidArgument {
                                action: name.to_string(),
                                value: text.to_string(),
                            })?
                    }
                };
                return Ok(Intent::ShuttleZone(value));
            }
            other => return Err(BindingError::UnknownAction(other.to_string())),
        };

        match argument {
            Some(value) => Err(BindingError::InvalidArgument {
                action: name.to_string(),
                value: value.to_string(),
            }),
            None => Ok(intent),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::ShuttleZone(value) => write!(f, "SHUTTLE_ZONE {}", value),
            other => f.write_str(other.action_name()),
        }
    }
}

/// Parses `JOG_FORWARD`, `SHUTTLE_ZONE 5`, or `SHUTTLE_ZONE(-3)`
impl FromStr for Intent {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((name, rest)) = s.split_once('(') {
            let argument = rest
                .strip_suffix(')')
                .ok_or_else(|| BindingError::InvalidArgument {
                    action: name.trim().to_string(),
                    value: rest.to_string(),
                })?;
            return Intent::from_action(name.trim(), Some(argument));
        }
        match s.split_once(char::is_whitespace) {
            Some((name, argument)) => Intent::from_action(name, Some(argument)),
            None => Intent::from_action(s, None),
        }
    }
}
