use jogpad_core::event_bus::{MachineEvent, UiEvent};
use jogpad_core::{
    emit, event_bus, AppEvent, ControllerState, EventCategory, EventFilter, MeasurementSystem,
    ProgramEvent,
};
use std::sync::{Arc, Mutex};

#[test]
fn test_global_bus_delivers_to_scoped_subscribers() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    let subscription = event_bus().subscribe_scoped(
        EventFilter::Categories(vec![EventCategory::Program, EventCategory::Ui]),
        move |event| {
            seen_clone.lock().unwrap().push(event.description());
        },
    );

    emit!(AppEvent::Program(ProgramEvent::Started { total_lines: 42 })).unwrap();
    emit!(AppEvent::Machine(MachineEvent::StateChanged {
        old: ControllerState::Idle,
        new: ControllerState::Run,
    }))
    .ok();
    emit!(AppEvent::Ui(UiEvent::UnitsChanged {
        units: MeasurementSystem::Imperial,
    }))
    .unwrap();

    drop(subscription);
    emit!(AppEvent::Program(ProgramEvent::Resumed)).ok();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            "Program started: 42 lines".to_string(),
            "Units: Imperial".to_string()
        ]
    );
}
