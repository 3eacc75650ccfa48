//! Viewport — zoom and pan between logical layout space and screen pixels.
//!
//! `screen = logical * zoom + pan`. Zoom stays within the configured bounds;
//! pan is unbounded.

use serde::{Deserialize, Serialize};

use crate::config::ZoomConfig;
use crate::geometry::{Point, Rect};
use crate::renderers::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_in(&mut self, bounds: &ZoomConfig) {
        self.zoom = bounds.clamp(self.zoom * bounds.step);
    }

    pub fn zoom_out(&mut self, bounds: &ZoomConfig) {
        self.zoom = bounds.clamp(self.zoom / bounds.step);
    }

    /// Zoom 1, no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Scale and center `content` on a `canvas_width`×`canvas_height` canvas.
    ///
    /// Keeps `fit_padding` free on each side and never magnifies beyond
    /// `fit_max`. Returns false and leaves the viewport alone when there is
    /// no content.
    pub fn fit_to_content(
        &mut self,
        content: Option<Rect>,
        canvas_width: f64,
        canvas_height: f64,
        zoom: &ZoomConfig,
    ) -> bool {
        let Some(content) = content else {
            return false;
        };
        let avail_w = canvas_width - 2.0 * zoom.fit_padding;
        let avail_h = canvas_height - 2.0 * zoom.fit_padding;

        let mut scale = zoom.fit_max;
        if content.width > 0.0 {
            scale = scale.min(avail_w / content.width);
        }
        if content.height > 0.0 {
            scale = scale.min(avail_h / content.height);
        }
        self.zoom = zoom.clamp(scale);

        let c = content.center();
        self.pan_x = canvas_width / 2.0 - c.x * self.zoom;
        self.pan_y = canvas_height / 2.0 - c.y * self.zoom;

        tracing::debug!(
            zoom = self.zoom,
            pan_x = self.pan_x,
            pan_y = self.pan_y,
            "fit viewport to content"
        );
        true
    }

    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.zoom + self.pan_x,
            logical.y * self.zoom + self.pan_y,
        )
    }

    /// Zoom as a whole percentage, e.g. `120` for 1.2×.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Apply the render transform: translate by the pan, then scale by the zoom.
    pub fn apply(&self, surface: &mut dyn Surface) {
        surface.translate(self.pan_x, self.pan_y);
        surface.scale(self.zoom);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::{DisplayList, DrawCommand};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zoom_in_out_clamped() {
        let z = ZoomConfig::default();
        let mut v = Viewport::new();
        v.zoom_in(&z);
        assert!((v.zoom - 1.2).abs() < EPS);
        for _ in 0..20 {
            v.zoom_in(&z);
        }
        assert_eq!(v.zoom, 3.0);
        for _ in 0..40 {
            v.zoom_out(&z);
        }
        assert_eq!(v.zoom, 0.3);
    }

    #[test]
    fn test_reset() {
        let mut v = Viewport {
            zoom: 2.0,
            pan_x: 5.0,
            pan_y: -3.0,
        };
        v.reset();
        assert_eq!(v, Viewport::default());
    }

    #[test]
    fn test_screen_logical_round_trip() {
        let v = Viewport {
            zoom: 1.5,
            pan_x: 40.0,
            pan_y: -20.0,
        };
        let p = Point::new(123.0, 456.0);
        let back = v.screen_to_logical(v.logical_to_screen(p));
        assert!((back.x - p.x).abs() < EPS && (back.y - p.y).abs() < EPS);
        assert_eq!(v.screen_to_logical(Point::new(40.0, -20.0)), Point::ORIGIN);
    }

    #[test]
    fn test_fit_to_content_centers() {
        let mut v = Viewport::new();
        let content = Rect::new(100.0, 100.0, 400.0, 200.0);
        assert!(v.fit_to_content(Some(content), 800.0, 600.0, &ZoomConfig::default()));
        // avail 700x500: min(700/400, 500/200, 2.0) = 1.75
        assert!((v.zoom - 1.75).abs() < EPS);
        let center = v.screen_to_logical(Point::new(400.0, 300.0));
        assert!((center.x - 300.0).abs() < EPS);
        assert!((center.y - 200.0).abs() < EPS);
    }

    #[test]
    fn test_fit_caps_magnification() {
        let mut v = Viewport::new();
        v.fit_to_content(
            Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            800.0,
            600.0,
            &ZoomConfig::default(),
        );
        assert_eq!(v.zoom, 2.0);
    }

    #[test]
    fn test_fit_clamps_to_min_zoom() {
        let mut v = Viewport::new();
        v.fit_to_content(
            Some(Rect::new(0.0, 0.0, 100_000.0, 100.0)),
            800.0,
            600.0,
            &ZoomConfig::default(),
        );
        assert_eq!(v.zoom, 0.3);
    }

    #[test]
    fn test_fit_without_content_is_noop() {
        let mut v = Viewport {
            zoom: 1.2,
            pan_x: 3.0,
            pan_y: 4.0,
        };
        let before = v;
        assert!(!v.fit_to_content(None, 800.0, 600.0, &ZoomConfig::default()));
        assert_eq!(v, before);
    }

    #[test]
    fn test_zoom_percent() {
        let mut v = Viewport::new();
        assert_eq!(v.zoom_percent(), 100);
        v.zoom_in(&ZoomConfig::default());
        assert_eq!(v.zoom_percent(), 120);
    }

    #[test]
    fn test_apply_translates_then_scales() {
        let v = Viewport {
            zoom: 2.0,
            pan_x: 10.0,
            pan_y: 20.0,
        };
        let mut list = DisplayList::new();
        v.apply(&mut list);
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Translate { dx: 10.0, dy: 20.0 },
                DrawCommand::Scale { factor: 2.0 },
            ]
        );
    }
}
