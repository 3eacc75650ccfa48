//! Process step data structures.
//!
//! A step list is owned by whatever edits it; this crate only reads a
//! snapshot of it per render cycle. Ids are not required to be unique and
//! `next_ids` may name steps that do not exist.

use serde::{Deserialize, Deserializer, Serialize};

// ─── StepKind ────────────────────────────────────────────────────────────────

/// The four node kinds a step can be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepKind {
    /// Drawn as an ellipse.
    Start,
    /// Drawn as a rounded rectangle.
    #[default]
    Process,
    /// Drawn as a diamond; the only kind whose outgoing connections carry labels.
    Decision,
    /// Drawn as a double ellipse.
    End,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::Start,
        StepKind::Process,
        StepKind::Decision,
        StepKind::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Start => "Start",
            StepKind::Process => "Process",
            StepKind::Decision => "Decision",
            StepKind::End => "End",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Step ────────────────────────────────────────────────────────────────────

/// One node of the process graph.
///
/// Field names serialize as camelCase. The legacy names used by the process
/// editor (`processStepId`, `shapeType`, `nextStepIds`, `function`, ...) are
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(alias = "processStepId")]
    pub id: String,
    #[serde(
        default,
        alias = "processStepDescription",
        deserialize_with = "null_as_default"
    )]
    pub description: String,
    #[serde(default, alias = "shapeType", deserialize_with = "null_as_default")]
    pub kind: StepKind,
    #[serde(default, alias = "nextStepIds", deserialize_with = "id_list")]
    pub next_ids: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub decision_labels: Vec<String>,
    #[serde(default, alias = "function", deserialize_with = "null_as_default")]
    pub owning_function: String,
    /// Free-form notes. Carried along for the host, never drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            kind,
            next_ids: Vec::new(),
            decision_labels: Vec::new(),
            owning_function: String::new(),
            notes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.owning_function = function.into();
        self
    }

    pub fn with_next<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decision_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Label for the connection at `index` of `next_ids`.
    ///
    /// Only decisions label their branches, and an empty label counts as none.
    pub fn label_for(&self, index: usize) -> Option<&str> {
        if self.kind != StepKind::Decision {
            return None;
        }
        self.decision_labels
            .get(index)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// The secondary text drawn under the description, e.g. `(PMO)`.
    pub fn function_caption(&self) -> Option<String> {
        if self.owning_function.is_empty() {
            None
        } else {
            Some(format!("({})", self.owning_function))
        }
    }
}

// ─── Connection ──────────────────────────────────────────────────────────────

/// A directed, optionally labeled edge derived from one `next_ids` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn labeled(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
        }
    }
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `["P200", "P300"]`, `"P200, P300"` or `null`.
fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdList {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Option::<IdList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(IdList::List(ids)) => ids,
        Some(IdList::Joined(joined)) => split_id_list(&joined),
    })
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_id_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_new_defaults() {
        let s = Step::new("P100", StepKind::Start);
        assert_eq!(s.id, "P100");
        assert_eq!(s.kind, StepKind::Start);
        assert!(s.next_ids.is_empty());
        assert!(s.function_caption().is_none());
    }

    #[test]
    fn test_label_for_only_on_decisions() {
        let decision = Step::new("D", StepKind::Decision)
            .with_next(["A", "B", "C"])
            .with_labels(["Yes", ""]);
        assert_eq!(decision.label_for(0), Some("Yes"));
        assert_eq!(decision.label_for(1), None);
        assert_eq!(decision.label_for(2), None);

        let process = Step::new("P", StepKind::Process)
            .with_next(["A"])
            .with_labels(["Yes"]);
        assert_eq!(process.label_for(0), None);
    }

    #[test]
    fn test_function_caption() {
        let s = Step::new("P", StepKind::Process).with_function("PMO");
        assert_eq!(s.function_caption().as_deref(), Some("(PMO)"));
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{
            "processStepId": "P300",
            "processStepDescription": "Module passes review?",
            "nextStepIds": ["P400", "P500"],
            "decisionLabels": ["Yes", "No"],
            "shapeType": "Decision",
            "function": "PMO"
        }"#;
        let s: Step = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "P300");
        assert_eq!(s.kind, StepKind::Decision);
        assert_eq!(s.next_ids, vec!["P400", "P500"]);
        assert_eq!(s.owning_function, "PMO");
        assert_eq!(s.description, "Module passes review?");
    }

    #[test]
    fn test_deserialize_minimal_step() {
        let s: Step = serde_json::from_str(r#"{"id": "A"}"#).unwrap();
        assert_eq!(s.kind, StepKind::Process);
        assert!(s.description.is_empty());
        assert!(s.decision_labels.is_empty());
    }

    #[test]
    fn test_deserialize_comma_separated_next_ids() {
        let s: Step =
            serde_json::from_str(r#"{"id": "A", "nextIds": " B, ,C ", "decisionLabels": null}"#)
                .unwrap();
        assert_eq!(s.next_ids, vec!["B", "C"]);
        assert!(s.decision_labels.is_empty());
    }

    #[test]
    fn test_serialize_camel_case() {
        let s = Step::new("A", StepKind::End).with_next(["B"]);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["nextIds"][0], "B");
        assert_eq!(v["kind"], "End");
        assert!(v.get("notes").is_none());
    }
}
