//! Step list loading.
//!
//! Hosts hand over step lists as JSON. Only one format exists today, but the
//! [`StepParser`] seam keeps the CLI and bindings format-agnostic.

pub mod json;

pub use json::JsonStepParser;

use crate::error::Result;
use crate::model::Step;

/// Turns serialized input into a step list.
pub trait StepParser {
    fn parse(&self, src: &str) -> Result<Vec<Step>>;
}

/// Parse a JSON step list.
///
/// Accepts a bare array of steps or an object wrapping one under `steps`,
/// `processSteps` or `visualization_data`.
pub fn parse_steps(src: &str) -> Result<Vec<Step>> {
    JsonStepParser.parse(src)
}
