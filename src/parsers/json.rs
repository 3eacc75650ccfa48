//! JSON step lists, in either the camelCase field names or the process
//! editor's legacy ones.

use serde_json::Value;

use super::StepParser;
use crate::error::{Error, Result};
use crate::model::Step;

/// Keys under which a wrapper object may carry the step array.
pub const WRAPPER_KEYS: &[&str] = &["steps", "processSteps", "visualization_data"];

pub struct JsonStepParser;

impl StepParser for JsonStepParser {
    fn parse(&self, src: &str) -> Result<Vec<Step>> {
        let value: Value = serde_json::from_str(src)?;
        let array = unwrap_step_array(value)?;
        let steps: Vec<Step> = serde_json::from_value(array)?;
        tracing::debug!(count = steps.len(), "parsed step list");
        Ok(steps)
    }
}

/// Find the step array, descending through at most one wrapper per level.
fn unwrap_step_array(value: Value) -> Result<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => {
            let Some(inner) = WRAPPER_KEYS.iter().find_map(|k| map.remove(*k)) else {
                let keys: Vec<&String> = map.keys().collect();
                return Err(Error::invalid_step_list(format!(
                    "expected an array of steps or an object with one of {WRAPPER_KEYS:?}, found keys {keys:?}"
                )));
            };
            match inner {
                Value::Null => Ok(Value::Array(Vec::new())),
                other => unwrap_step_array(other),
            }
        }
        other => Err(Error::invalid_step_list(format!(
            "expected an array of steps, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
