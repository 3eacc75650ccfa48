//! Layout engine: step list → grid positions plus derived connections.
//!
//! The layout is a pure function of its inputs and is recomputed from
//! scratch whenever the steps or the canvas size change.

pub mod graph;
pub mod types;

pub use graph::FlowGraph;
pub use types::{Grid, Layout, Position};

use indexmap::IndexMap;

use crate::config::LayoutParams;
use crate::geometry::Rect;
use crate::model::{Connection, Step};

/// Lay out `steps` on a `canvas_width`×`canvas_height` canvas with default
/// node size and spacing.
pub fn compute_layout(steps: &[Step], canvas_width: f64, canvas_height: f64) -> Layout {
    compute_layout_with(steps, canvas_width, canvas_height, &LayoutParams::default())
}

/// Lay out `steps` with explicit node size and spacing.
///
/// Nodes fill a near-square grid row by row in list order. Spacing grows
/// with the canvas but never drops below the configured minimums, and the
/// whole grid is centered on the canvas. A repeated id keeps its first slot
/// in `positions` but takes the geometry of its last occurrence.
pub fn compute_layout_with(
    steps: &[Step],
    canvas_width: f64,
    canvas_height: f64,
    params: &LayoutParams,
) -> Layout {
    if steps.is_empty() {
        return Layout::default();
    }

    let grid = Grid::for_count(steps.len());
    let columns = grid.columns as f64;
    let rows = grid.rows as f64;

    let h_spacing = params
        .min_horizontal_spacing
        .max((canvas_width - params.padding) / columns);
    let v_spacing = params
        .min_vertical_spacing
        .max((canvas_height - params.padding) / rows);

    let start_x = (canvas_width - (columns - 1.0) * h_spacing - params.node_width) / 2.0;
    let start_y = (canvas_height - (rows - 1.0) * v_spacing - params.node_height) / 2.0;

    let mut positions: IndexMap<String, Position> = IndexMap::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let (row, col) = grid.cell(index);
        let rect = Rect::new(
            start_x + col as f64 * h_spacing,
            start_y + row as f64 * v_spacing,
            params.node_width,
            params.node_height,
        );
        positions.insert(step.id.clone(), rect);
    }

    let connections = derive_connections(steps);

    tracing::debug!(
        steps = steps.len(),
        columns = grid.columns,
        rows = grid.rows,
        h_spacing,
        v_spacing,
        connections = connections.len(),
        "computed layout"
    );

    Layout {
        grid,
        positions,
        connections,
    }
}

/// One connection per `next_ids` entry, in step order then entry order.
pub fn derive_connections(steps: &[Step]) -> Vec<Connection> {
    steps
        .iter()
        .flat_map(|step| {
            step.next_ids.iter().enumerate().map(move |(i, to)| Connection {
                from: step.id.clone(),
                to: to.clone(),
                label: step.label_for(i).map(str::to_string),
            })
        })
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
