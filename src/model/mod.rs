//! Step list data model: steps, node kinds and derived connections.

pub mod types;

pub use types::{Connection, Step, StepKind, split_id_list};
