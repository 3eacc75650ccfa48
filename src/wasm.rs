//! WASM bindings for process-canvas.
//!
//! Exposes a `ProcessCanvas` class and a `computeLayout` function to
//! JavaScript via wasm-bindgen. The host forwards DOM pointer events in
//! canvas-relative pixels, calls `tick` from `requestAnimationFrame`, and
//! repaints from `renderSvg` or `renderCommands`.

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::CanvasConfig;
use crate::interaction::{PointerButton, PointerEvent, PointerEventKind, PointerOutcome};
use crate::parsers::parse_steps;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// DOM `MouseEvent.button` numbering. Only 0 is the primary button.
fn button_from_dom(button: u16) -> PointerButton {
    match button {
        0 => PointerButton::Primary,
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        other => PointerButton::Other(other),
    }
}

#[wasm_bindgen(js_name = "ProcessCanvas")]
pub struct WasmProcessCanvas {
    inner: crate::view::ProcessCanvas,
}

#[wasm_bindgen(js_class = "ProcessCanvas")]
impl WasmProcessCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<WasmProcessCanvas, JsError> {
        let config = CanvasConfig::default().with_size(width, height);
        config.validate().map_err(js_err)?;
        Ok(Self {
            inner: crate::view::ProcessCanvas::new(config),
        })
    }

    /// Build from a full canvas configuration JSON object.
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config_json: &str) -> Result<WasmProcessCanvas, JsError> {
        let config = CanvasConfig::from_json(config_json).map_err(js_err)?;
        Ok(Self {
            inner: crate::view::ProcessCanvas::new(config),
        })
    }

    #[wasm_bindgen(js_name = "setSteps")]
    pub fn set_steps(&mut self, json: &str) -> Result<(), JsError> {
        let steps = parse_steps(json).map_err(js_err)?;
        self.inner.set_steps(steps);
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsError> {
        self.inner.resize(width, height).map_err(js_err)
    }

    /// Returns the clicked step id, if the press landed on a step.
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: u16) -> Option<String> {
        let event = PointerEvent::new(PointerEventKind::Down(button_from_dom(button)), x, y);
        match self.inner.pointer_event(&event, Instant::now()) {
            PointerOutcome::StepClicked(id) => Some(id),
            _ => None,
        }
    }

    /// Returns true when the frame needs repainting.
    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let outcome = self
            .inner
            .pointer_event(&PointerEvent::moved(x, y), Instant::now());
        !matches!(outcome, PointerOutcome::None)
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self, x: f64, y: f64, button: u16) {
        let event = PointerEvent::new(PointerEventKind::Up(button_from_dom(button)), x, y);
        self.inner.pointer_event(&event, Instant::now());
    }

    #[wasm_bindgen(js_name = "pointerLeave")]
    pub fn pointer_leave(&mut self) {
        self.inner
            .pointer_event(&PointerEvent::leave(), Instant::now());
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    #[wasm_bindgen(js_name = "resetView")]
    pub fn reset_view(&mut self) {
        self.inner.reset_view();
    }

    #[wasm_bindgen(js_name = "fitToContent")]
    pub fn fit_to_content(&mut self) -> bool {
        self.inner.fit_to_content()
    }

    /// Advance the selection timer. Returns the id whose highlight expired.
    pub fn tick(&mut self) -> Option<String> {
        self.inner.tick(Instant::now())
    }

    #[wasm_bindgen(js_name = "selectedId")]
    pub fn selected_id(&self) -> Option<String> {
        self.inner.selected_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = "hoveredId")]
    pub fn hovered_id(&self) -> Option<String> {
        self.inner.hovered_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = "zoomPercent")]
    pub fn zoom_percent(&self) -> u32 {
        self.inner.zoom_percent()
    }

    /// CSS `cursor` value for the canvas element.
    pub fn cursor(&self) -> String {
        self.inner.cursor().as_css().to_string()
    }

    #[wasm_bindgen(js_name = "renderSvg")]
    pub fn render_svg(&self) -> String {
        self.inner.render_svg()
    }

    /// The frame as a JSON array of draw commands for a 2D context.
    #[wasm_bindgen(js_name = "renderCommands")]
    pub fn render_commands(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.inner.render_commands()).map_err(js_err)
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }
}

/// Lay out a step list and return the positions and connections as JSON.
#[wasm_bindgen(js_name = "computeLayout")]
pub fn compute_layout(json: &str, width: f64, height: f64) -> Result<String, JsError> {
    let steps = parse_steps(json).map_err(js_err)?;
    let layout = crate::layout::compute_layout(&steps, width, height);
    serde_json::to_string(&layout).map_err(js_err)
}

/// Render a step list to SVG with default settings.
#[wasm_bindgen(js_name = "renderSvg")]
pub fn render_svg(json: &str, width: f64, height: f64) -> Result<String, JsError> {
    let config = CanvasConfig::default().with_size(width, height);
    crate::render_svg(json, &config).map_err(js_err)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
