//! SvgSurface — renders drawing calls into a standalone SVG document.
//!
//! Each element carries the transform current when it was drawn, so the
//! document needs no nested groups. Shadows become `feDropShadow` filters
//! collected into `<defs>`.

use super::{Affine, Color, Paint, PathShape, Shadow, Surface, TextRun, TransformStack};
use crate::geometry::Point;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format with at most `decimals` decimals and no trailing zeros.
fn fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// Geometry attribute: two decimals.
fn num(v: f64) -> String {
    fixed(v, 2)
}

/// Transform entry: kept precise so the drawn scale matches the viewport
/// used for hit-testing.
fn matrix_num(v: f64) -> String {
    fixed(v, 6)
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn color_attrs(name: &str, color: &Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{name}="{}""#, color.to_hex())
    } else {
        format!(r#"{name}="{}" {name}-opacity="{}""#, color.to_hex(), color.a)
    }
}

fn transform_attr(t: &Affine) -> String {
    if t.is_identity() {
        String::new()
    } else {
        format!(
            r#" transform="matrix({} 0 0 {} {} {})""#,
            matrix_num(t.scale),
            matrix_num(t.scale),
            matrix_num(t.tx),
            matrix_num(t.ty)
        )
    }
}

// ── SvgSurface ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    transform: TransformStack,
    filters: Vec<Shadow>,
    body: Vec<String>,
    finished: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter_ref(&mut self, shadow: &Option<Shadow>) -> String {
        let Some(shadow) = shadow else {
            return String::new();
        };
        let index = match self.filters.iter().position(|s| s == shadow) {
            Some(i) => i,
            None => {
                self.filters.push(*shadow);
                self.filters.len() - 1
            }
        };
        format!(r#" filter="url(#shadow-{index})""#)
    }

    fn paint_attrs(&mut self, paint: &Paint, default_fill: &str) -> String {
        let fill = match &paint.fill {
            Some(c) => color_attrs("fill", c),
            None => format!(r#"fill="{default_fill}""#),
        };
        let stroke = match &paint.stroke {
            Some(s) => format!(
                r#" {} stroke-width="{}""#,
                color_attrs("stroke", &s.color),
                num(s.width)
            ),
            None => String::new(),
        };
        let filter = self.filter_ref(&paint.shadow);
        format!("{fill}{stroke}{filter}")
    }

    fn defs(&self) -> Vec<String> {
        if self.filters.is_empty() {
            return Vec::new();
        }
        let mut parts = vec!["<defs>".to_string()];
        for (i, s) in self.filters.iter().enumerate() {
            parts.push(format!(
                r#"  <filter id="shadow-{i}" x="-50%" y="-50%" width="200%" height="200%">"#
            ));
            parts.push(format!(
                r#"    <feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/>"#,
                num(s.offset_x),
                num(s.offset_y),
                num(s.blur / 2.0),
                s.color.to_hex(),
                s.color.a
            ));
            parts.push("  </filter>".to_string());
        }
        parts.push("</defs>".to_string());
        parts
    }

    /// The complete SVG document for the last frame.
    pub fn to_svg(&self) -> String {
        let (w, h) = (num(self.width), num(self.height));
        let mut parts = vec![format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )];
        parts.extend(self.defs());
        parts.push(format!(r#"<rect width="{w}" height="{h}" fill="white"/>"#));
        parts.extend(self.body.iter().cloned());
        parts.push("</svg>".to_string());
        parts.join("\n")
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Surface for SvgSurface {
    fn begin_frame(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.transform.reset();
        self.filters.clear();
        self.body.clear();
        self.finished = false;
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
        let t = transform_attr(&self.transform.current());
        let element = match shape {
            PathShape::Ellipse { center, rx, ry } => {
                let attrs = self.paint_attrs(paint, "none");
                format!(
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {attrs}{t}/>"#,
                    num(center.x),
                    num(center.y),
                    num(*rx),
                    num(*ry)
                )
            }
            PathShape::RoundedRect { rect, radius } => {
                let attrs = self.paint_attrs(paint, "none");
                format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" {attrs}{t}/>"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width),
                    num(rect.height),
                    num(*radius)
                )
            }
            PathShape::Rect { rect } => {
                let attrs = self.paint_attrs(paint, "none");
                format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" {attrs}{t}/>"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width),
                    num(rect.height)
                )
            }
            PathShape::Polygon { points } => {
                let attrs = self.paint_attrs(paint, "none");
                format!(
                    r#"<polygon points="{}" {attrs}{t}/>"#,
                    points_attr(points)
                )
            }
            PathShape::Polyline { points } => {
                let attrs = self.paint_attrs(paint, "none");
                format!(
                    r#"<polyline points="{}" {attrs} stroke-linecap="round"{t}/>"#,
                    points_attr(points)
                )
            }
        };
        self.body.push(element);
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.text.is_empty() {
            return;
        }
        let t = transform_attr(&self.transform.current());
        let weight = if run.font.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        self.body.push(format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="{}" font-size="{}"{weight} {}{t}>{}</text>"#,
            num(run.position.x),
            num(run.position.y),
            escape(&run.font.family),
            num(run.font.size),
            color_attrs("fill", &run.color),
            escape(&run.text)
        ));
    }

    fn end_frame(&mut self) {
        self.finished = true;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
