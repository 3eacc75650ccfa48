//! ProcessCanvas — one interactive flowchart view.
//!
//! Owns the step snapshot, its layout, the viewport, pointer state and the
//! selection timer. The host forwards input and clock ticks and asks for a
//! frame whenever something changed.

use web_time::Instant;

use crate::config::CanvasConfig;
use crate::error::Result;
use crate::interaction::{Cursor, InteractionController, PointerEvent, PointerOutcome};
use crate::layout::graph::Diagnostics;
use crate::layout::{FlowGraph, Layout, compute_layout_with};
use crate::model::{Step, StepKind};
use crate::renderers::{
    CharSet, DisplayList, DrawCommand, Scene, Surface, SvgSurface, TextCanvas, draw_scene,
};
use crate::selection::Selection;
use crate::viewport::Viewport;

/// Called with the id of a clicked step.
pub type StepClickHandler = Box<dyn FnMut(&str)>;

pub struct ProcessCanvas {
    config: CanvasConfig,
    steps: Vec<Step>,
    layout: Layout,
    viewport: Viewport,
    interaction: InteractionController,
    selection: Selection,
    on_step_click: Option<StepClickHandler>,
}

impl Default for ProcessCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl std::fmt::Debug for ProcessCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessCanvas")
            .field("steps", &self.steps.len())
            .field("viewport", &self.viewport)
            .field("selected", &self.selection.selected())
            .field("hovered", &self.interaction.hovered())
            .finish()
    }
}

impl ProcessCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let selection = Selection::new(config.selection_timeout());
        Self {
            config,
            steps: Vec::new(),
            layout: Layout::default(),
            viewport: Viewport::default(),
            interaction: InteractionController::new(),
            selection,
            on_step_click: None,
        }
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.set_steps(steps);
        self
    }

    pub fn set_on_step_click(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_step_click = Some(Box::new(handler));
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    pub fn cursor(&self) -> Cursor {
        self.interaction.cursor()
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    // ── Inputs ───────────────────────────────────────────────────────────────

    /// Replace the step snapshot and lay it out again.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.steps = steps;
        self.relayout();
        for conn in self.layout.dangling() {
            tracing::warn!(from = %conn.from, to = %conn.to, "connection references unknown step");
        }
    }

    /// Change the canvas size and lay out again. A non-positive or
    /// non-finite size is rejected and leaves the canvas unchanged.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let resized = self.config.clone().with_size(width, height);
        resized.validate()?;
        self.config = resized;
        self.relayout();
        Ok(())
    }

    fn relayout(&mut self) {
        self.layout = compute_layout_with(
            &self.steps,
            self.config.width,
            self.config.height,
            &self.config.layout,
        );
    }

    /// Route a pointer event. A click selects the step and invokes the click
    /// handler before returning.
    pub fn pointer_event(&mut self, event: &PointerEvent, now: Instant) -> PointerOutcome {
        let outcome = self
            .interaction
            .handle(event, &self.steps, &self.layout, &mut self.viewport);
        if let PointerOutcome::StepClicked(id) = &outcome {
            self.selection.select(id.clone(), now);
            if let Some(handler) = self.on_step_click.as_mut() {
                handler(id);
            }
        }
        outcome
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.config.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.config.zoom);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Fit every node into the canvas. Returns false when there is nothing to fit.
    pub fn fit_to_content(&mut self) -> bool {
        self.viewport.fit_to_content(
            self.layout.bounds(),
            self.config.width,
            self.config.height,
            &self.config.zoom,
        )
    }

    /// Advance the selection timer. Returns the id whose highlight expired.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        self.selection.tick(now)
    }

    /// Highlight `id` as if it had been clicked, without calling the handler.
    pub fn select(&mut self, id: impl Into<String>, now: Instant) {
        self.selection.select(id, now);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Cancel the pending expiry, drop pointer state and release the handler.
    pub fn teardown(&mut self) {
        self.selection.cancel();
        self.interaction.reset();
        self.on_step_click = None;
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Draw one frame onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.begin_frame(self.config.width, self.config.height);
        surface.save();
        self.viewport.apply(surface);
        let scene = Scene {
            steps: &self.steps,
            layout: &self.layout,
            hovered: self.interaction.hovered(),
            selected: self.selection.selected(),
            arrow_head_size: self.config.arrow_head_size,
        };
        draw_scene(surface, &scene);
        surface.restore();
        surface.end_frame();
    }

    pub fn render_svg(&self) -> String {
        let mut svg = SvgSurface::new();
        self.render(&mut svg);
        svg.to_svg()
    }

    pub fn render_text(&self, charset: CharSet) -> String {
        let mut canvas = TextCanvas::new(charset);
        self.render(&mut canvas);
        canvas.render_to_string()
    }

    pub fn render_commands(&self) -> Vec<DrawCommand> {
        let mut list = DisplayList::new();
        self.render(&mut list);
        list.into_commands()
    }

    /// Structural report: dangling references, steps unreachable from any
    /// Start step, cycles.
    pub fn diagnostics(&self) -> Diagnostics {
        let roots: Vec<&str> = self
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Start)
            .map(|s| s.id.as_str())
            .collect();
        FlowGraph::from_layout(&self.layout).diagnostics(&roots)
    }
}

impl Drop for ProcessCanvas {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
