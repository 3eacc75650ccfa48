//! Pointer handling: hit-testing, hover tracking and drag-to-pan.
//!
//! The controller is a two-state machine. In `Idle`, a primary press on a
//! step reports a click and a press on empty canvas starts panning; moves
//! update the hover. In `Panning`, moves shift the viewport by the screen
//! delta and a release or leave returns to `Idle`.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::layout::Layout;
use crate::model::Step;
use crate::viewport::Viewport;

// ─── Events ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    /// Any other button (back, forward, ...), by its DOM number.
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    /// The pointer left the canvas.
    Leave,
}

/// A pointer event in canvas-relative screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn leave() -> Self {
        Self::new(PointerEventKind::Leave, 0.0, 0.0)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging the canvas; `last` is the previous screen position.
    Panning { last: Point },
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    None,
    StepClicked(String),
    PanStarted,
    Panned { dx: f64, dy: f64 },
    PanEnded,
    HoverChanged(Option<String>),
}

/// Cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    Pointer,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Pointer => "pointer",
        }
    }
}

// ─── Hit-testing ─────────────────────────────────────────────────────────────

/// First step in list order whose shape contains the logical `point`.
pub fn hit_test<'a>(steps: &'a [Step], layout: &Layout, point: Point) -> Option<&'a Step> {
    steps.iter().find(|step| {
        layout
            .position(&step.id)
            .is_some_and(|rect| geometry::hit_test(step.kind, rect, point))
    })
}

// ─── Controller ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: DragState,
    hovered: Option<String>,
    inside: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.drag, DragState::Panning { .. })
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn cursor(&self) -> Cursor {
        match (self.drag, &self.hovered) {
            (DragState::Panning { .. }, _) => Cursor::Grabbing,
            (DragState::Idle, Some(_)) => Cursor::Pointer,
            (DragState::Idle, None) if self.inside => Cursor::Grab,
            (DragState::Idle, None) => Cursor::Default,
        }
    }

    /// Drop hover and any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one pointer event through the state machine.
    ///
    /// Only panning mutates `viewport`; clicks are reported, not acted on.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        steps: &[Step],
        layout: &Layout,
        viewport: &mut Viewport,
    ) -> PointerOutcome {
        let screen = event.position();
        let outcome = match (self.drag, event.kind) {
            (DragState::Idle, PointerEventKind::Down(PointerButton::Primary)) => {
                self.inside = true;
                let logical = viewport.screen_to_logical(screen);
                match hit_test(steps, layout, logical) {
                    Some(step) => {
                        tracing::debug!(step = %step.id, x = logical.x, y = logical.y, "step hit");
                        PointerOutcome::StepClicked(step.id.clone())
                    }
                    None => {
                        self.drag = DragState::Panning { last: screen };
                        PointerOutcome::PanStarted
                    }
                }
            }
            (DragState::Idle, PointerEventKind::Move) => {
                self.inside = true;
                let logical = viewport.screen_to_logical(screen);
                let hit = hit_test(steps, layout, logical).map(|s| s.id.clone());
                if hit != self.hovered {
                    self.hovered = hit.clone();
                    PointerOutcome::HoverChanged(hit)
                } else {
                    PointerOutcome::None
                }
            }
            (DragState::Panning { last }, PointerEventKind::Move) => {
                let dx = screen.x - last.x;
                let dy = screen.y - last.y;
                viewport.pan_by(dx, dy);
                self.drag = DragState::Panning { last: screen };
                PointerOutcome::Panned { dx, dy }
            }
            (DragState::Panning { .. }, PointerEventKind::Up(_)) => {
                self.drag = DragState::Idle;
                PointerOutcome::PanEnded
            }
            (drag, PointerEventKind::Leave) => {
                self.inside = false;
                self.drag = DragState::Idle;
                if matches!(drag, DragState::Panning { .. }) {
                    self.hovered = None;
                    PointerOutcome::PanEnded
                } else if self.hovered.take().is_some() {
                    PointerOutcome::HoverChanged(None)
                } else {
                    PointerOutcome::None
                }
            }
            _ => PointerOutcome::None,
        };
        tracing::trace!(kind = ?event.kind, x = event.x, y = event.y, ?outcome, "pointer event");
        outcome
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
