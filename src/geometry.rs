//! Geometry in logical space: points, rectangles, connector routing,
//! point-in-shape tests and arrowheads.
//!
//! Everything here is total. Missing ids and degenerate sizes produce
//! empty results rather than errors.

use std::f64::consts::FRAC_PI_6;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::StepKind;

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// `point` relative to this rectangle's center.
    pub fn to_local(&self, point: Point) -> Point {
        let c = self.center();
        Point::new(point.x - c.x, point.y - c.y)
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }
}

// ─── Segment ─────────────────────────────────────────────────────────────────

/// A straight connector from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Direction of travel in radians, measured from the +x axis.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

// ─── Connectors ──────────────────────────────────────────────────────────────

/// Pick the facing edges of two node rectangles and join their midpoints.
///
/// Mostly-horizontal pairs connect side to side, everything else (including
/// an exact diagonal) connects bottom to top. The target being left of or
/// level with the source reverses the sides.
pub fn connector_endpoints(from: &Rect, to: &Rect) -> Segment {
    let fc = from.center();
    let tc = to.center();
    let dx = tc.x - fc.x;
    let dy = tc.y - fc.y;

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Segment::new(Point::new(from.right(), fc.y), Point::new(to.x, tc.y))
        } else {
            Segment::new(Point::new(from.x, fc.y), Point::new(to.right(), tc.y))
        }
    } else if dy > 0.0 {
        Segment::new(Point::new(fc.x, from.bottom()), Point::new(tc.x, to.y))
    } else {
        Segment::new(Point::new(fc.x, from.y), Point::new(tc.x, to.bottom()))
    }
}

/// Connector between two ids of a position map.
///
/// A missing id yields the zero segment at the origin.
pub fn connector_between(positions: &IndexMap<String, Rect>, from: &str, to: &str) -> Segment {
    match (positions.get(from), positions.get(to)) {
        (Some(a), Some(b)) => connector_endpoints(a, b),
        _ => Segment::default(),
    }
}

// ─── Point-in-shape ──────────────────────────────────────────────────────────

/// Whether a center-relative point lies inside a `kind` shape of size `w`×`h`.
pub fn contains_local(kind: StepKind, local: Point, width: f64, height: f64) -> bool {
    if !(width > 0.0 && height > 0.0) {
        return false;
    }
    let rx = width / 2.0;
    let ry = height / 2.0;
    match kind {
        StepKind::Decision => local.x.abs() / rx + local.y.abs() / ry <= 1.0,
        StepKind::Start | StepKind::End => {
            let nx = local.x / rx;
            let ny = local.y / ry;
            nx * nx + ny * ny <= 1.0
        }
        StepKind::Process => local.x.abs() <= rx && local.y.abs() <= ry,
    }
}

/// Whether a logical-space `point` hits a `kind` node drawn in `rect`.
pub fn hit_test(kind: StepKind, rect: &Rect, point: Point) -> bool {
    contains_local(kind, rect.to_local(point), rect.width, rect.height)
}

// ─── Arrowheads ──────────────────────────────────────────────────────────────

/// The two barbs of an open arrowhead, both anchored at `tip`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

/// Barbs of length `size` at ±30° from the reversed segment direction.
pub fn arrow_head(segment: &Segment, size: f64) -> ArrowHead {
    let angle = segment.angle();
    let tip = segment.end;
    let barb = |a: f64| Point::new(tip.x - size * a.cos(), tip.y - size * a.sin());
    ArrowHead {
        tip,
        left: barb(angle - FRAC_PI_6),
        right: barb(angle + FRAC_PI_6),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
