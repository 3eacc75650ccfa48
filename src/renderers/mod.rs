//! Drawing surfaces and the shape renderer.
//!
//! The renderer issues canvas-style calls (save/restore, translate, scale,
//! fill and stroke a path, draw text) against a [`Surface`]. Surfaces turn
//! them into an SVG document, a replayable display list, or a character
//! grid.

pub mod canvas;
pub mod charset;
pub mod display_list;
#[cfg(feature = "raster")]
pub mod raster;
pub mod shapes;
pub mod svg;

pub use canvas::TextCanvas;
pub use charset::CharSet;
pub use display_list::{DisplayList, DrawCommand};
pub use shapes::{NodeStyle, Scene, VisualState, draw_connection, draw_node, draw_scene, node_style};
pub use svg::SvgSurface;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

// ─── Color ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Default ink for outlines, arrows and labels.
    pub const INK: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }

    /// Hex without the alpha channel.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// How a path is filled, stroked and shadowed. Any part may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Paint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(Stroke { color, width }),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn with_shadow(mut self, shadow: Option<Shadow>) -> Self {
        self.shadow = shadow;
        self
    }
}

// ─── PathShape ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PathShape {
    Ellipse { center: Point, rx: f64, ry: f64 },
    RoundedRect { rect: Rect, radius: f64 },
    Rect { rect: Rect },
    /// Closed.
    Polygon { points: Vec<Point> },
    /// Open.
    Polyline { points: Vec<Point> },
}

impl PathShape {
    /// Axis-aligned bounds in the shape's own coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            PathShape::Ellipse { center, rx, ry } => {
                Rect::new(center.x - rx, center.y - ry, 2.0 * rx, 2.0 * ry)
            }
            PathShape::RoundedRect { rect, .. } | PathShape::Rect { rect } => *rect,
            PathShape::Polygon { points } | PathShape::Polyline { points } => {
                let Some(first) = points.first() else {
                    return Rect::default();
                };
                let seed = Rect::new(first.x, first.y, 0.0, 0.0);
                points
                    .iter()
                    .fold(seed, |acc, p| acc.union(&Rect::new(p.x, p.y, 0.0, 0.0)))
            }
        }
    }
}

// ─── Text ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, bold: bool) -> Self {
        Self {
            size,
            bold,
            family: "Arial".to_string(),
        }
    }

    /// CSS font shorthand, e.g. `bold 12px Arial`.
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size, self.family)
        } else {
            format!("{}px {}", self.size, self.family)
        }
    }
}

/// A single line of text horizontally centered on `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub position: Point,
    pub font: Font,
    pub color: Color,
}

// ─── Surface ─────────────────────────────────────────────────────────────────

/// A 2D drawing target with a canvas-like transform stack.
///
/// `translate` and `scale` compose onto the current transform; `save` and
/// `restore` push and pop it. Unbalanced `restore` calls are ignored.
pub trait Surface {
    fn begin_frame(&mut self, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, factor: f64);
    fn draw_path(&mut self, shape: &PathShape, paint: &Paint);
    fn draw_text(&mut self, run: &TextRun);
    fn end_frame(&mut self);
}

// ─── Affine ──────────────────────────────────────────────────────────────────

/// Uniform-scale transform: `p' = p * scale + (tx, ty)`.
///
/// The renderer only ever translates and scales uniformly, so surfaces
/// that must map coordinates themselves track this instead of a full matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn then_translate(self, dx: f64, dy: f64) -> Self {
        Self {
            tx: self.tx + self.scale * dx,
            ty: self.ty + self.scale * dy,
            ..self
        }
    }

    pub fn then_scale(self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            ..self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.tx, p.y * self.scale + self.ty)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Transform stack shared by the surfaces that track their own transform.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.then_translate(dx, dy);
    }

    pub fn scale(&mut self, factor: f64) {
        self.current = self.current.then_scale(factor);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
