use jogpad::console::{parse, ConsoleCommand};
use jogpad::{Axis, ControllerState, Intent, MeasurementSystem, PanelButton};
use jogpad_core::ProgramEvent;

fn parsed(line: &str) -> ConsoleCommand {
    parse(line).unwrap().unwrap()
}

#[test]
fn test_host_commands() {
    assert_eq!(
        parsed("connect /dev/ttyUSB0"),
        ConsoleCommand::Connect {
            port: "/dev/ttyUSB0".to_string()
        }
    );
    assert_eq!(
        parsed("connect"),
        ConsoleCommand::Connect {
            port: "console".to_string()
        }
    );
    assert_eq!(parsed("DISCONNECT"), ConsoleCommand::Disconnect);
    assert_eq!(parsed("state Hold:0"), ConsoleCommand::State(ControllerState::Hold));
    assert_eq!(parsed("units in"), ConsoleCommand::Units(MeasurementSystem::Imperial));
    assert_eq!(
        parsed("program start 250"),
        ConsoleCommand::Program(ProgramEvent::Started { total_lines: 250 })
    );
    assert_eq!(parsed("program resume"), ConsoleCommand::Program(ProgramEvent::Resumed));
    assert_eq!(parsed("status"), ConsoleCommand::Status);
    assert_eq!(parsed("exit"), ConsoleCommand::Quit);
}

#[test]
fn test_motion_commands() {
    assert_eq!(parsed("press x+ y-"), ConsoleCommand::Press(PanelButton::XPlusYMinus));
    assert_eq!(
        parsed("jog Z-1"),
        ConsoleCommand::Jog(vec![(Axis::Z, -1.0)])
    );
    assert_eq!(
        parsed("move X0 Y0"),
        ConsoleCommand::Move(vec![(Axis::X, 0.0), (Axis::Y, 0.0)])
    );
}

#[test]
fn test_actions_and_keys() {
    assert_eq!(parsed("JOG_FORWARD"), ConsoleCommand::Intent(Intent::JogForward));
    assert_eq!(parsed("Y_AXIS"), ConsoleCommand::Intent(Intent::SelectAxis(Axis::Y)));
    assert_eq!(parsed("SHUTTLE_ZONE -4"), ConsoleCommand::Shuttle(-4));
    assert_eq!(parsed("SHUTTLE_ZONE"), ConsoleCommand::Shuttle(0));
    assert_eq!(parsed("x"), ConsoleCommand::Key("x".to_string()));
    assert_eq!(parsed("="), ConsoleCommand::Key("=".to_string()));
}

#[test]
fn test_rejected_lines() {
    for line in [
        "state flying",
        "units furlongs",
        "program rewind",
        "press w+",
        "jog",
        "move Q1",
        "SHUTTLE_ZONE fast",
        "two words",
    ] {
        assert!(parse(line).is_err(), "{}", line);
    }
}
