//! Configuration for layout, viewport and interaction.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─── LayoutParams ────────────────────────────────────────────────────────────

/// Node size and spacing used by the grid layout, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutParams {
    pub node_width: f64,
    pub node_height: f64,
    /// Lower bound for the distance between column origins.
    pub min_horizontal_spacing: f64,
    /// Lower bound for the distance between row origins.
    pub min_vertical_spacing: f64,
    /// Subtracted from the canvas size before dividing it among columns/rows.
    pub padding: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_width: 140.0,
            node_height: 80.0,
            min_horizontal_spacing: 180.0,
            min_vertical_spacing: 100.0,
            padding: 100.0,
        }
    }
}

// ─── ZoomConfig ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Factor applied by one zoom-in step (divided by for zoom-out).
    pub step: f64,
    /// Fit-to-content never magnifies beyond this.
    pub fit_max: f64,
    /// Screen padding kept on every side by fit-to-content.
    pub fit_padding: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.3,
            max: 3.0,
            step: 1.2,
            fit_max: 2.0,
            fit_padding: 50.0,
        }
    }
}

impl ZoomConfig {
    /// Clamp `zoom` into `[min, max]`. Never panics: with inverted bounds
    /// `max` wins, and a NaN bound is ignored.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }
}

// ─── CanvasConfig ────────────────────────────────────────────────────────────

/// Configuration for one interactive canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Canvas width in screen pixels.
    pub width: f64,
    /// Canvas height in screen pixels.
    pub height: f64,
    pub layout: LayoutParams,
    pub zoom: ZoomConfig,
    /// How long a clicked step stays highlighted.
    pub selection_timeout_ms: u64,
    pub arrow_head_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            layout: LayoutParams::default(),
            zoom: ZoomConfig::default(),
            selection_timeout_ms: 2000,
            arrow_head_size: 10.0,
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Parse a JSON config and validate it.
    pub fn from_json(src: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn selection_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.selection_timeout_ms)
    }

    /// Reject values the layout and viewport math cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("layout.nodeWidth", self.layout.node_width),
            ("layout.nodeHeight", self.layout.node_height),
            ("zoom.min", self.zoom.min),
            ("zoom.step", self.zoom.step),
            ("zoom.fitMax", self.zoom.fit_max),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("layout.minHorizontalSpacing", self.layout.min_horizontal_spacing),
            ("layout.minVerticalSpacing", self.layout.min_vertical_spacing),
            ("layout.padding", self.layout.padding),
            ("zoom.fitPadding", self.zoom.fit_padding),
            ("arrowHeadSize", self.arrow_head_size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !self.zoom.max.is_finite() || self.zoom.max < self.zoom.min {
            return Err(Error::invalid_config(format!(
                "zoom.max ({}) must not be below zoom.min ({})",
                self.zoom.max, self.zoom.min
            )));
        }
        if self.zoom.step <= 1.0 {
            return Err(Error::invalid_config(format!(
                "zoom.step must be greater than 1, got {}",
                self.zoom.step
            )));
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
