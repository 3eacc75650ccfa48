//! Layout types: Grid, Position, Layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::model::Connection;

/// A node's placed rectangle in logical units.
pub type Position = Rect;

// ─── Grid ────────────────────────────────────────────────────────────────────

/// Row-major grid dimensions for a step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Near-square grid for `count` nodes: `ceil(sqrt(n))` columns, then just
    /// enough rows. Zero nodes give a 0×0 grid.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self::default();
        }
        let columns = ((count as f64).sqrt().ceil() as usize).max(1);
        let mut rows = count.div_ceil(columns).max(1);
        if rows > 1 && columns * (rows - 1) >= count {
            rows -= 1;
        }
        Self { columns, rows }
    }

    /// `(row, column)` of the `index`th node.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        if self.columns == 0 {
            return (0, 0);
        }
        (index / self.columns, index % self.columns)
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Result of laying out a step list.
///
/// `positions` holds one entry per unique id in first-appearance order.
/// `connections` holds one entry per `next_ids` reference, resolved or not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub grid: Grid,
    pub positions: IndexMap<String, Position>,
    pub connections: Vec<Connection>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.get(id)
    }

    /// Union of every node rectangle, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Rect> {
        let mut rects = self.positions.values();
        let first = *rects.next()?;
        Some(rects.fold(first, |acc, r| acc.union(r)))
    }

    /// Whether both ends of `connection` have a position.
    pub fn resolves(&self, connection: &Connection) -> bool {
        self.positions.contains_key(&connection.from) && self.positions.contains_key(&connection.to)
    }

    /// Connections whose target (or source) has no position.
    pub fn dangling(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(|c| !self.resolves(c))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
