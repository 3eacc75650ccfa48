//! Shape renderer: nodes, connections and whole scenes onto a [`Surface`].
//!
//! Drawing never mutates interaction state. Connections are drawn first so
//! nodes sit on top of arrow tails.

use crate::geometry::{Point, Rect, Segment, arrow_head, connector_between};
use crate::layout::Layout;
use crate::model::{Connection, Step, StepKind};

use super::{Color, Font, Paint, PathShape, Shadow, Surface, TextRun};

// ─── Constants ───────────────────────────────────────────────────────────────

const PROCESS_CORNER_RADIUS: f64 = 4.0;
const END_RING_INSET: f64 = 5.0;
const LABEL_OFFSET_Y: f64 = -5.0;
const CAPTION_OFFSET_Y: f64 = 10.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const CAPTION_FONT_SIZE: f64 = 10.0;

const CONNECTION_WIDTH: f64 = 2.0;
const BADGE_WIDTH: f64 = 30.0;
const BADGE_HEIGHT: f64 = 16.0;
const BADGE_FONT_SIZE: f64 = 10.0;
const BADGE_TEXT_OFFSET_Y: f64 = 3.0;

const SHADOW_OFFSET: f64 = 2.0;
const HOVER_SHADOW: Color = Color::rgba(0, 0, 0, 0.3);
const HOVER_SHADOW_BLUR: f64 = 8.0;
const SELECTED_SHADOW_BLUR: f64 = 12.0;

// ─── Visual state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Normal,
    Hovered,
    Selected,
}

impl VisualState {
    /// Selection wins over hover.
    pub fn for_step(id: &str, hovered: Option<&str>, selected: Option<&str>) -> Self {
        if selected == Some(id) {
            VisualState::Selected
        } else if hovered == Some(id) {
            VisualState::Hovered
        } else {
            VisualState::Normal
        }
    }
}

/// Resolved colors and widths for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
    /// End nodes only: width of the inner ring.
    pub inner_line_width: f64,
    pub shadow: Option<Shadow>,
}

struct Palette {
    selected_fill: Color,
    hovered_fill: Color,
    selected_stroke: Color,
    hovered_stroke: Color,
    glow: Color,
}

fn palette(kind: StepKind) -> Palette {
    match kind {
        StepKind::Start | StepKind::Process => Palette {
            selected_fill: Color::rgb(0xdb, 0xea, 0xfe),
            hovered_fill: Color::rgb(0xf0, 0xf9, 0xff),
            selected_stroke: Color::rgb(0x25, 0x63, 0xeb),
            hovered_stroke: Color::rgb(0x3b, 0x82, 0xf6),
            glow: Color::rgba(59, 130, 246, 0.5),
        },
        StepKind::Decision => Palette {
            selected_fill: Color::rgb(0xfd, 0xe6, 0x8a),
            hovered_fill: Color::rgb(0xfe, 0xf3, 0xc7),
            selected_stroke: Color::rgb(0xd9, 0x77, 0x06),
            hovered_stroke: Color::rgb(0xf5, 0x9e, 0x0b),
            glow: Color::rgba(245, 158, 11, 0.5),
        },
        StepKind::End => Palette {
            selected_fill: Color::rgb(0xfe, 0xca, 0xca),
            hovered_fill: Color::rgb(0xfe, 0xf2, 0xf2),
            selected_stroke: Color::rgb(0xdc, 0x26, 0x26),
            hovered_stroke: Color::rgb(0xef, 0x44, 0x44),
            glow: Color::rgba(239, 68, 68, 0.5),
        },
    }
}

/// Style for a `kind` node in `state`.
pub fn node_style(kind: StepKind, state: VisualState) -> NodeStyle {
    let p = palette(kind);
    let shadow = |color: Color, blur: f64| Shadow {
        color,
        blur,
        offset_x: SHADOW_OFFSET,
        offset_y: SHADOW_OFFSET,
    };
    let (base_width, base_inner) = if kind == StepKind::End {
        (3.0, 2.0)
    } else {
        (2.0, 2.0)
    };

    match state {
        VisualState::Normal => NodeStyle {
            fill: Color::WHITE,
            stroke: Color::INK,
            line_width: base_width,
            inner_line_width: base_inner,
            shadow: None,
        },
        VisualState::Hovered => NodeStyle {
            fill: p.hovered_fill,
            stroke: p.hovered_stroke,
            line_width: base_width,
            inner_line_width: base_inner,
            shadow: Some(shadow(HOVER_SHADOW, HOVER_SHADOW_BLUR)),
        },
        VisualState::Selected => NodeStyle {
            fill: p.selected_fill,
            stroke: p.selected_stroke,
            line_width: base_width + 1.0,
            inner_line_width: base_inner + 1.0,
            shadow: Some(shadow(p.glow, SELECTED_SHADOW_BLUR)),
        },
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// The outline of a `kind` node drawn in `rect`.
pub fn node_outline(kind: StepKind, rect: &Rect) -> PathShape {
    let c = rect.center();
    match kind {
        StepKind::Start | StepKind::End => PathShape::Ellipse {
            center: c,
            rx: rect.width / 2.0,
            ry: rect.height / 2.0,
        },
        StepKind::Process => PathShape::RoundedRect {
            rect: *rect,
            radius: PROCESS_CORNER_RADIUS,
        },
        StepKind::Decision => PathShape::Polygon {
            points: vec![
                Point::new(c.x, rect.y),
                Point::new(rect.right(), c.y),
                Point::new(c.x, rect.bottom()),
                Point::new(rect.x, c.y),
            ],
        },
    }
}

/// Draw one step: its outline in the style for `state`, then its labels.
pub fn draw_node(surface: &mut dyn Surface, step: &Step, rect: &Rect, state: VisualState) {
    let style = node_style(step.kind, state);
    let paint = Paint::fill(style.fill)
        .with_stroke(style.stroke, style.line_width)
        .with_shadow(style.shadow);
    surface.draw_path(&node_outline(step.kind, rect), &paint);

    if step.kind == StepKind::End {
        let inner = rect.inset(END_RING_INSET);
        if inner.width > 0.0 && inner.height > 0.0 {
            surface.draw_path(
                &node_outline(StepKind::End, &inner),
                &Paint::stroke(style.stroke, style.inner_line_width),
            );
        }
    }

    let c = rect.center();
    surface.draw_text(&TextRun {
        text: step.description.clone(),
        position: c.offset(0.0, LABEL_OFFSET_Y),
        font: Font::new(LABEL_FONT_SIZE, true),
        color: Color::INK,
    });
    if let Some(caption) = step.function_caption() {
        surface.draw_text(&TextRun {
            text: caption,
            position: c.offset(0.0, CAPTION_OFFSET_Y),
            font: Font::new(CAPTION_FONT_SIZE, false),
            color: Color::MUTED,
        });
    }
}

// ─── Connections ─────────────────────────────────────────────────────────────

/// Draw an arrow along `segment` with an optional label badge at its midpoint.
pub fn draw_connection(
    surface: &mut dyn Surface,
    segment: &Segment,
    label: Option<&str>,
    head_size: f64,
) {
    let ink = Paint::stroke(Color::INK, CONNECTION_WIDTH);
    surface.draw_path(
        &PathShape::Polyline {
            points: vec![segment.start, segment.end],
        },
        &ink,
    );
    let head = arrow_head(segment, head_size);
    surface.draw_path(
        &PathShape::Polyline {
            points: vec![head.left, head.tip, head.right],
        },
        &ink,
    );

    let Some(label) = label else { return };
    let mid = segment.midpoint();
    let badge = Rect::new(
        mid.x - BADGE_WIDTH / 2.0,
        mid.y - BADGE_HEIGHT / 2.0,
        BADGE_WIDTH,
        BADGE_HEIGHT,
    );
    surface.draw_path(
        &PathShape::Rect { rect: badge },
        &Paint::fill(Color::WHITE).with_stroke(Color::INK, 1.0),
    );
    surface.draw_text(&TextRun {
        text: label.to_string(),
        position: mid.offset(0.0, BADGE_TEXT_OFFSET_Y),
        font: Font::new(BADGE_FONT_SIZE, true),
        color: Color::INK,
    });
}

// ─── Scene ───────────────────────────────────────────────────────────────────

/// Everything needed to draw one frame.
pub struct Scene<'a> {
    pub steps: &'a [Step],
    pub layout: &'a Layout,
    pub hovered: Option<&'a str>,
    pub selected: Option<&'a str>,
    pub arrow_head_size: f64,
}

impl<'a> Scene<'a> {
    pub fn new(steps: &'a [Step], layout: &'a Layout) -> Self {
        Self {
            steps,
            layout,
            hovered: None,
            selected: None,
            arrow_head_size: 10.0,
        }
    }

    fn segment_for(&self, connection: &Connection) -> Option<Segment> {
        if !self.layout.resolves(connection) {
            return None;
        }
        Some(connector_between(
            &self.layout.positions,
            &connection.from,
            &connection.to,
        ))
    }
}

/// Draw all resolvable connections, then every step in list order.
///
/// The caller sets up the viewport transform beforehand.
pub fn draw_scene(surface: &mut dyn Surface, scene: &Scene<'_>) {
    for connection in &scene.layout.connections {
        let Some(segment) = scene.segment_for(connection) else {
            continue;
        };
        draw_connection(
            surface,
            &segment,
            connection.label.as_deref(),
            scene.arrow_head_size,
        );
    }

    for step in scene.steps {
        let Some(rect) = scene.layout.position(&step.id) else {
            continue;
        };
        let state = VisualState::for_step(&step.id, scene.hovered, scene.selected);
        draw_node(surface, step, rect, state);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
