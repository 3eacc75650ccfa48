//! process-canvas — grid layout and interactive rendering for process
//! flowcharts.
//!
//! A step list (Start/Process/Decision/End nodes with labeled transitions)
//! is laid out on a near-square grid, drawn through a canvas-like
//! [`Surface`](renderers::Surface), and made interactive by
//! [`ProcessCanvas`]: pan, zoom, fit-to-content, hover, and
//! click-to-highlight with a timed expiry.
//!
//! Public API: `compute_layout()`, `ProcessCanvas`, `render_svg()`,
//! `render_text()`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod parsers;
pub mod renderers;
pub mod selection;
pub mod view;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{CanvasConfig, LayoutParams, ZoomConfig};
pub use error::{Error, Result};
pub use interaction::{Cursor, PointerButton, PointerEvent, PointerEventKind, PointerOutcome};
pub use layout::{FlowGraph, Grid, Layout, Position, compute_layout, compute_layout_with};
pub use model::{Connection, Step, StepKind};
pub use parsers::parse_steps;
pub use renderers::CharSet;
pub use view::ProcessCanvas;
pub use viewport::Viewport;

/// Parse a JSON step list and render it to an SVG document.
pub fn render_svg(src: &str, config: &CanvasConfig) -> Result<String> {
    let canvas = canvas_for(src, config)?;
    Ok(canvas.render_svg())
}

/// Parse a JSON step list and render it as character art.
pub fn render_text(src: &str, config: &CanvasConfig, charset: CharSet) -> Result<String> {
    let canvas = canvas_for(src, config)?;
    Ok(canvas.render_text(charset))
}

fn canvas_for(src: &str, config: &CanvasConfig) -> Result<ProcessCanvas> {
    config.validate()?;
    let steps = parse_steps(src)?;
    Ok(ProcessCanvas::new(config.clone()).with_steps(steps))
}
