//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use process_canvas::{Step, StepKind};

/// The five-step course enrollment flow used throughout the scenarios.
pub fn course_module() -> Vec<Step> {
    vec![
        Step::new("P100", StepKind::Start)
            .with_description("Receive enrollment request")
            .with_function("Registrar")
            .with_next(["P200"]),
        Step::new("P200", StepKind::Process)
            .with_description("Check prerequisites")
            .with_function("Advising")
            .with_next(["P300"]),
        Step::new("P300", StepKind::Decision)
            .with_description("Prerequisites met?")
            .with_function("Advising")
            .with_next(["P400", "P500"])
            .with_labels(["Yes", "No"]),
        Step::new("P400", StepKind::Process)
            .with_description("Enroll student")
            .with_function("Registrar"),
        Step::new("P500", StepKind::End)
            .with_description("Notify student")
            .with_function("Registrar")
            .with_next(["P400"]),
    ]
}

pub const EPS: f64 = 1e-9;

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
