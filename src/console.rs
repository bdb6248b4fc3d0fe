//! Operator console input
//!
//! One command per line. Besides bound keys and action names the console
//! accepts a few host commands that stand in for the parts of a full sender
//! (connection, status reports, program streaming) this binary does not have.

use anyhow::{anyhow, bail, Context};
use jogpad_control::{BindingError, Intent, PanelButton};
use jogpad_core::{Axis, ControllerState, MeasurementSystem, ProgramEvent};

/// Parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// `connect [port]`
    Connect { port: String },
    /// `disconnect`
    Disconnect,
    /// `state <name>`, as a status report would deliver it
    State(ControllerState),
    /// `units metric|imperial`
    Units(MeasurementSystem),
    /// `program start [lines]|resume|pause|stop|complete`
    Program(ProgramEvent),
    /// `press <button>`
    Press(PanelButton),
    /// `jog X1 Y-1`
    Jog(Vec<(Axis, f64)>),
    /// `move X0 Y0`
    Move(Vec<(Axis, f64)>),
    /// `SHUTTLE_ZONE <v>`: sets the wheel deflection
    Shuttle(i32),
    /// Any other action name
    Intent(Intent),
    /// A single key, resolved through key bindings
    Key(String),
    /// `status`
    Status,
    /// `quit` or `exit`
    Quit,
}

/// Parse one console line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "connect" => ConsoleCommand::Connect {
            port: rest.first().copied().unwrap_or("console").to_string(),
        },
        "disconnect" => ConsoleCommand::Disconnect,
        "state" => {
            let name = single(&rest, "state")?;
            ConsoleCommand::State(name.parse()?)
        }
        "units" => {
            let name = single(&rest, "units")?;
            ConsoleCommand::Units(name.parse().map_err(|e: String| anyhow!(e))?)
        }
        "program" => ConsoleCommand::Program(program_event(&rest)?),
        "press" => {
            let label = rest.concat();
            ConsoleCommand::Press(label.parse().map_err(|e: String| anyhow!(e))?)
        }
        "jog" => ConsoleCommand::Jog(axis_words(&rest)?),
        "move" => ConsoleCommand::Move(axis_words(&rest)?),
        "status" => ConsoleCommand::Status,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return action_or_key(line).map(Some),
    };
    Ok(Some(command))
}

fn single<'a>(rest: &[&'a str], command: &str) -> anyhow::Result<&'a str> {
    match rest {
        [value] => Ok(*value),
        _ => bail!("usage: {} <value>", command),
    }
}

fn program_event(rest: &[&str]) -> anyhow::Result<ProgramEvent> {
    let event = match rest {
        ["start"] => ProgramEvent::Started { total_lines: 0 },
        ["start", lines] => ProgramEvent::Started {
            total_lines: lines
                .parse()
                .with_context(|| format!("invalid line count '{}'", lines))?,
        },
        ["resume"] => ProgramEvent::Resumed,
        ["pause"] => ProgramEvent::Paused,
        ["stop"] => ProgramEvent::Stopped,
        ["complete"] => ProgramEvent::Completed,
        _ => bail!("usage: program start [lines]|resume|pause|stop|complete"),
    };
    Ok(event)
}

/// Parse `X10 y-2.5 Z0` into axis/value pairs, keeping their order
pub fn axis_words(words: &[&str]) -> anyhow::Result<Vec<(Axis, f64)>> {
    if words.is_empty() {
        bail!("expected at least one axis word such as X10");
    }
    words
        .iter()
        .map(|word| {
            let split = word
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (letter, value) = word.split_at(split);
            let axis: Axis = letter.parse().map_err(|e: String| anyhow!(e))?;
            let value: f64 = value
                .parse()
                .with_context(|| format!("invalid value in '{}'", word))?;
            if !value.is_finite() {
                bail!("invalid value in '{}'", word);
            }
            Ok((axis, value))
        })
        .collect()
}

fn action_or_key(line: &str) -> anyhow::Result<ConsoleCommand> {
    match line.parse::<Intent>() {
        Ok(Intent::ShuttleZone(value)) => Ok(ConsoleCommand::Shuttle(value)),
        Ok(intent) => Ok(ConsoleCommand::Intent(intent)),
        Err(BindingError::UnknownAction(_)) if !line.contains(char::is_whitespace) => {
            Ok(ConsoleCommand::Key(line.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_words() {
        assert_eq!(
            axis_words(&["X10", "y-2.5"]).unwrap(),
            vec![(Axis::X, 10.0), (Axis::Y, -2.5)]
        );
        assert!(axis_words(&["W1"]).is_err());
        assert!(axis_words(&["X"]).is_err());
        assert!(axis_words(&["Xinf"]).is_err());
        assert!(axis_words(&[]).is_err());
    }

    #[test]
    fn test_comments_and_blanks() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# warm-up").unwrap(), None);
    }
}
