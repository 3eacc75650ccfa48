//! TextCanvas — a character-grid surface for terminal previews.
//!
//! One cell covers `CELL_W`×`CELL_H` device units. Shapes snap to the
//! nearest cell; text rows use the cell containing the baseline.

use std::fmt;

use super::charset::{Arms, BoxChars, CharSet};
use super::{Paint, PathShape, Surface, TextRun, TransformStack};
use crate::geometry::Point;

pub const CELL_W: f64 = 10.0;
pub const CELL_H: f64 = 20.0;

// ─── CellRect ────────────────────────────────────────────────────────────────

/// A rectangle in character-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: i64,
    pub row: i64,
    pub width: i64,
    pub height: i64,
}

impl CellRect {
    pub fn new(col: i64, row: i64, width: i64, height: i64) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.col + self.width - 1
    }

    pub fn bottom(&self) -> i64 {
        self.row + self.height - 1
    }

    /// Whether `self` lies inside `outer` within one cell on every side.
    fn nested_in(&self, outer: &CellRect) -> bool {
        self.col >= outer.col
            && self.row >= outer.row
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
            && self.col - outer.col <= 1
            && self.row - outer.row <= 1
            && outer.right() - self.right() <= 1
            && outer.bottom() - self.bottom() <= 1
    }
}

// ─── TextCanvas ──────────────────────────────────────────────────────────────

/// A 2D character grid used as a drawing surface.
pub struct TextCanvas {
    pub width: usize,
    pub height: usize,
    pub charset: CharSet,
    cells: Vec<Vec<char>>,
    transform: TransformStack,
    last_outline: Option<CellRect>,
}

impl TextCanvas {
    pub fn new(charset: CharSet) -> Self {
        Self {
            width: 0,
            height: 0,
            charset,
            cells: Vec::new(),
            transform: TransformStack::default(),
            last_outline: None,
        }
    }

    /// A blank grid of `width`×`height` cells.
    pub fn with_cells(width: usize, height: usize, charset: CharSet) -> Self {
        let mut canvas = Self::new(charset);
        canvas.resize_cells(width, height);
        canvas
    }

    fn resize_cells(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![vec![' '; width]; height];
    }

    fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    pub fn get(&self, col: i64, row: i64) -> char {
        if self.in_bounds(col, row) {
            self.cells[row as usize][col as usize]
        } else {
            ' '
        }
    }

    pub fn set(&mut self, col: i64, row: i64, ch: char) {
        if self.in_bounds(col, row) {
            self.cells[row as usize][col as usize] = ch;
        }
    }

    /// Set a cell, merging junction characters if both old and new are box-drawing chars.
    pub fn set_merge(&mut self, col: i64, row: i64, ch: char) {
        if !self.in_bounds(col, row) {
            return;
        }
        let existing = self.get(col, row);
        let merged = match (Arms::from_char(existing), Arms::from_char(ch)) {
            (Some(e), Some(n)) => e.merge(n).to_char(self.charset),
            _ => ch,
        };
        self.set(col, row, merged);
    }

    /// Draw a horizontal line from c1 to c2 (inclusive) at `row`.
    pub fn hline(&mut self, row: i64, c1: i64, c2: i64, ch: char) {
        let (lo, hi) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
        for col in lo..=hi {
            self.set_merge(col, row, ch);
        }
    }

    /// Draw a vertical line from r1 to r2 (inclusive) at `col`.
    pub fn vline(&mut self, col: i64, r1: i64, r2: i64, ch: char) {
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        for row in lo..=hi {
            self.set_merge(col, row, ch);
        }
    }

    /// Draw a box outline.
    pub fn draw_box(&mut self, rect: CellRect, bc: &BoxChars) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (x0, y0, x1, y1) = (rect.col, rect.row, rect.right(), rect.bottom());
        self.set(x0, y0, bc.top_left);
        self.set(x1, y0, bc.top_right);
        self.set(x0, y1, bc.bottom_left);
        self.set(x1, y1, bc.bottom_right);
        for col in (x0 + 1)..x1 {
            self.set(col, y0, bc.horizontal);
            self.set(col, y1, bc.horizontal);
        }
        for row in (y0 + 1)..y1 {
            self.set(x0, row, bc.vertical);
            self.set(x1, row, bc.vertical);
        }
    }

    /// Blank every cell of `rect`.
    pub fn clear_rect(&mut self, rect: CellRect) {
        for row in rect.row..=rect.bottom() {
            for col in rect.col..=rect.right() {
                self.set(col, row, ' ');
            }
        }
    }

    /// Write a string starting at (col, row), clipped to the grid.
    pub fn write_str(&mut self, col: i64, row: i64, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.set(col + i as i64, row, ch);
        }
    }

    /// Render the canvas to a string, trimming trailing whitespace per line.
    pub fn render_to_string(&self) -> String {
        let mut lines: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    // ── Device → cell mapping ────────────────────────────────────────────────

    fn device(&self, p: Point) -> Point {
        self.transform.current().apply(p)
    }

    fn cell_of(&self, p: Point) -> (i64, i64) {
        let d = self.device(p);
        ((d.x / CELL_W).round() as i64, (d.y / CELL_H).round() as i64)
    }

    fn cell_rect_of(&self, shape: &PathShape) -> CellRect {
        let b = shape.bounds();
        let (c0, r0) = self.cell_of(Point::new(b.x, b.y));
        let (c1, r1) = self.cell_of(Point::new(b.right(), b.bottom()));
        CellRect::new(c0, r0, c1 - c0 + 1, r1 - r0 + 1)
    }

    // ── Primitives ───────────────────────────────────────────────────────────

    fn draw_segment(&mut self, a: Point, b: Point, bc: &BoxChars) {
        let (c0, r0) = self.cell_of(a);
        let (c1, r1) = self.cell_of(b);
        if r0 == r1 {
            self.hline(r0, c0, c1, bc.horizontal);
            return;
        }
        if c0 == c1 {
            self.vline(c0, r0, r1, bc.vertical);
            return;
        }
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let glyph = if dx.abs() * 0.3 > dy.abs() {
            bc.horizontal
        } else if dy.abs() * 0.3 > dx.abs() {
            bc.vertical
        } else if (dx > 0.0) == (dy > 0.0) {
            bc.diagonal_down
        } else {
            bc.diagonal_up
        };
        let steps = (c1 - c0).abs().max((r1 - r0).abs());
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let col = (c0 as f64 + t * (c1 - c0) as f64).round() as i64;
            let row = (r0 as f64 + t * (r1 - r0) as f64).round() as i64;
            self.set_merge(col, row, glyph);
        }
    }

    /// An open chevron collapses to one arrow glyph just short of its apex,
    /// so the node border drawn afterwards does not cover it.
    fn draw_chevron(&mut self, left: Point, tip: Point, right: Point, bc: &BoxChars) {
        let dx = tip.x - (left.x + right.x) / 2.0;
        let dy = tip.y - (left.y + right.y) / 2.0;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let (col, row) = self.cell_of(tip);
        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                self.set(col - 1, row, bc.arrow_right);
            } else {
                self.set(col + 1, row, bc.arrow_left);
            }
        } else if dy > 0.0 {
            self.set(col, row - 1, bc.arrow_down);
        } else {
            self.set(col, row + 1, bc.arrow_up);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], rect: CellRect) {
        let device: Vec<Point> = points.iter().map(|p| self.device(*p)).collect();
        for row in rect.row..=rect.bottom() {
            for col in rect.col..=rect.right() {
                let center = Point::new(col as f64 * CELL_W, row as f64 * CELL_H);
                if point_in_polygon(center, &device) {
                    self.set(col, row, ' ');
                }
            }
        }
    }
}

fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    let mut inside = false;
    let mut j = poly.len().wrapping_sub(1);
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for TextCanvas {
    fn begin_frame(&mut self, width: f64, height: f64) {
        let cols = (width.max(0.0) / CELL_W).ceil() as usize;
        let rows = (height.max(0.0) / CELL_H).ceil() as usize;
        self.resize_cells(cols, rows);
        self.transform.reset();
        self.last_outline = None;
    }

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn scale(&mut self, factor: f64) {
        self.transform.scale(factor);
    }

    fn draw_path(&mut self, shape: &PathShape, paint: &Paint) {
        let heavy = paint.stroke.is_some_and(|s| s.width >= 3.0);
        let plain = BoxChars::for_charset(self.charset);

        match shape {
            PathShape::Polyline { points } => {
                if let [left, tip, right] = points.as_slice() {
                    self.draw_chevron(*left, *tip, *right, &plain);
                } else {
                    for pair in points.windows(2) {
                        self.draw_segment(pair[0], pair[1], &plain);
                    }
                }
            }
            PathShape::Polygon { points } => {
                let rect = self.cell_rect_of(shape);
                if paint.fill.is_some() {
                    self.fill_polygon(points, rect);
                }
                if paint.stroke.is_some() && rect.width >= 3 && rect.height >= 3 {
                    for i in 0..points.len() {
                        let next = points[(i + 1) % points.len()];
                        self.draw_segment(points[i], next, &plain);
                    }
                    self.last_outline = Some(rect);
                }
            }
            PathShape::Ellipse { .. } | PathShape::RoundedRect { .. } | PathShape::Rect { .. } => {
                let rect = self.cell_rect_of(shape);
                let outlined = paint.stroke.is_some() && rect.width >= 3 && rect.height >= 3;
                if paint.fill.is_none() && outlined {
                    // A second ring collapses onto the first at cell resolution.
                    if self.last_outline.is_some_and(|outer| rect.nested_in(&outer)) {
                        return;
                    }
                }
                if paint.fill.is_some() {
                    self.clear_rect(rect);
                }
                if outlined {
                    let bc = if heavy {
                        BoxChars::heavy(self.charset)
                    } else if matches!(shape, PathShape::Ellipse { .. }) {
                        BoxChars::rounded(self.charset)
                    } else {
                        plain
                    };
                    self.draw_box(rect, &bc);
                    self.last_outline = Some(rect);
                }
            }
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.text.is_empty() {
            return;
        }
        let d = self.device(run.position);
        let len = run.text.chars().count() as i64;
        let col = (d.x / CELL_W).round() as i64 - len / 2;
        let row = (d.y / CELL_H).floor() as i64;
        self.write_str(col, row, &run.text);
    }

    fn end_frame(&mut self) {}
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_to_string())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::renderers::{Color, Font};

    fn boxed(rect: Rect) -> PathShape {
        PathShape::RoundedRect { rect, radius: 4.0 }
    }

    #[test]
    fn test_cell_rect_edges() {
        let r = CellRect::new(1, 2, 10, 5);
        assert_eq!(r.right(), 10);
        assert_eq!(r.bottom(), 6);
    }

    #[test]
    fn test_set_get_out_of_bounds() {
        let mut c = TextCanvas::with_cells(3, 3, CharSet::Unicode);
        c.set(10, 10, 'X');
        c.set(-1, 0, 'X');
        assert_eq!(c.get(10, 10), ' ');
        assert_eq!(c.get(-1, 0), ' ');
    }

    #[test]
    fn test_set_merge_junction() {
        let mut c = TextCanvas::with_cells(10, 10, CharSet::Unicode);
        c.hline(5, 0, 9, '─');
        c.vline(5, 0, 9, '│');
        assert_eq!(c.get(5, 5), '┼');
    }

    #[test]
    fn test_render_to_string_trims() {
        let mut c = TextCanvas::with_cells(10, 3, CharSet::Ascii);
        c.set(0, 0, 'A');
        let s = c.to_string();
        assert_eq!(s, "A\n");
    }

    #[test]
    fn test_begin_frame_sizes_grid() {
        let mut c = TextCanvas::new(CharSet::Ascii);
        c.begin_frame(800.0, 600.0);
        assert_eq!((c.width, c.height), (80, 30));
        c.begin_frame(15.0, 25.0);
        assert_eq!((c.width, c.height), (2, 2));
    }

    #[test]
    fn test_process_box_and_label() {
        let mut c = TextCanvas::new(CharSet::Unicode);
        c.begin_frame(200.0, 200.0);
        c.draw_path(
            &boxed(Rect::new(0.0, 0.0, 140.0, 80.0)),
            &Paint::fill(Color::WHITE).with_stroke(Color::INK, 2.0),
        );
        c.draw_text(&TextRun {
            text: "Draft".into(),
            position: Point::new(70.0, 35.0),
            font: Font::new(12.0, true),
            color: Color::INK,
        });
        assert_eq!(c.get(0, 0), '┌');
        assert_eq!(c.get(14, 4), '┘');
        // 35 / 20 floors to row 1; "Draft" centered on column 7.
        assert_eq!(c.get(5, 1), 'D');
        assert_eq!(c.get(9, 1), 't');
    }

    #[test]
    fn test_heavy_ring_hides_nested_inner_ring() {
        let mut c = TextCanvas::new(CharSet::Unicode);
        c.begin_frame(200.0, 200.0);
        let outer = Rect::new(0.0, 0.0, 140.0, 80.0);
        c.draw_path(
            &PathShape::Ellipse {
                center: outer.center(),
                rx: 70.0,
                ry: 40.0,
            },
            &Paint::fill(Color::WHITE).with_stroke(Color::INK, 3.0),
        );
        let inner = outer.inset(5.0);
        c.draw_path(
            &PathShape::Ellipse {
                center: inner.center(),
                rx: inner.width / 2.0,
                ry: inner.height / 2.0,
            },
            &Paint::stroke(Color::INK, 2.0),
        );
        assert_eq!(c.get(0, 0), '┏');
        assert_eq!(c.get(14, 4), '┛');
        assert_eq!(c.get(1, 1), ' ');
    }

    #[test]
    fn test_start_ellipse_rounded_ascii() {
        let mut c = TextCanvas::new(CharSet::Ascii);
        c.begin_frame(200.0, 200.0);
        c.draw_path(
            &PathShape::Ellipse {
                center: Point::new(70.0, 40.0),
                rx: 70.0,
                ry: 40.0,
            },
            &Paint::fill(Color::WHITE).with_stroke(Color::INK, 2.0),
        );
        assert_eq!(c.get(0, 0), '(');
        assert_eq!(c.get(14, 0), ')');
        assert_eq!(c.get(5, 0), '-');
    }

    #[test]
    fn test_horizontal_connector_with_arrow() {
        let mut c = TextCanvas::new(CharSet::Unicode);
        c.begin_frame(300.0, 100.0);
        let ink = Paint::stroke(Color::INK, 2.0);
        c.draw_path(
            &PathShape::Polyline {
                points: vec![Point::new(0.0, 40.0), Point::new(100.0, 40.0)],
            },
            &ink,
        );
        let head = crate::geometry::arrow_head(
            &crate::geometry::Segment::new(Point::new(0.0, 40.0), Point::new(100.0, 40.0)),
            10.0,
        );
        c.draw_path(
            &PathShape::Polyline {
                points: vec![head.left, head.tip, head.right],
            },
            &ink,
        );
        assert_eq!(c.get(0, 2), '─');
        assert_eq!(c.get(9, 2), '►');
        assert_eq!(c.get(10, 2), '─');
    }

    #[test]
    fn test_vertical_connector_with_arrow() {
        let mut c = TextCanvas::new(CharSet::Ascii);
        c.begin_frame(100.0, 200.0);
        let ink = Paint::stroke(Color::INK, 2.0);
        let seg = crate::geometry::Segment::new(Point::new(50.0, 0.0), Point::new(50.0, 100.0));
        c.draw_path(
            &PathShape::Polyline {
                points: vec![seg.start, seg.end],
            },
            &ink,
        );
        let head = crate::geometry::arrow_head(&seg, 10.0);
        c.draw_path(
            &PathShape::Polyline {
                points: vec![head.left, head.tip, head.right],
            },
            &ink,
        );
        assert_eq!(c.get(5, 1), '|');
        assert_eq!(c.get(5, 4), 'v');
    }

    #[test]
    fn test_viewport_transform_moves_cells() {
        let mut c = TextCanvas::new(CharSet::Unicode);
        c.begin_frame(400.0, 400.0);
        c.save();
        c.translate(100.0, 40.0);
        c.scale(2.0);
        c.draw_path(
            &boxed(Rect::new(0.0, 0.0, 50.0, 40.0)),
            &Paint::stroke(Color::INK, 2.0),
        );
        c.restore();
        // Device rect is (100, 40)–(200, 120): columns 10..20, rows 2..6.
        assert_eq!(c.get(10, 2), '┌');
        assert_eq!(c.get(20, 6), '┘');
    }

    #[test]
    fn test_filled_diamond_clears_interior() {
        let mut c = TextCanvas::new(CharSet::Unicode);
        c.begin_frame(200.0, 200.0);
        c.hline(2, 0, 19, '─');
        let r = Rect::new(0.0, 0.0, 140.0, 80.0);
        let cx = r.center();
        c.draw_path(
            &PathShape::Polygon {
                points: vec![
                    Point::new(cx.x, r.y),
                    Point::new(r.right(), cx.y),
                    Point::new(cx.x, r.bottom()),
                    Point::new(r.x, cx.y),
                ],
            },
            &Paint::fill(Color::WHITE).with_stroke(Color::INK, 2.0),
        );
        assert_eq!(c.get(7, 2), ' ');
        assert_eq!(c.get(18, 2), '─');
    }
}
