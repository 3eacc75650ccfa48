//! PNG output: rasterize a rendered SVG document with resvg.

use crate::error::{Error, Result};

fn raster_error(message: impl Into<String>) -> Error {
    Error::Raster {
        message: message.into(),
    }
}

/// Rasterize `svg` at `scale` device pixels per logical pixel.
pub fn render_pixmap(svg: &str, scale: f32) -> Result<tiny_skia::Pixmap> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(raster_error(format!("scale must be positive, got {scale}")));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| raster_error(format!("failed to parse SVG: {e}")))?;

    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px)
        .ok_or_else(|| raster_error(format!("cannot allocate {width_px}x{height_px} pixmap")))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Rasterize `svg` and encode it as PNG bytes.
pub fn render_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let pixmap = render_pixmap(svg, scale)?;
    tracing::debug!(
        width = pixmap.width(),
        height = pixmap.height(),
        scale,
        "rasterized svg"
    );
    pixmap
        .encode_png()
        .map_err(|e| raster_error(format!("failed to encode PNG: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect width="20" height="10" fill="white"/></svg>"#;

    #[test]
    fn test_pixmap_scaled_by_device_ratio() {
        let pixmap = render_pixmap(TINY, 2.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (40, 20));
    }

    #[test]
    fn test_png_signature() {
        let png = render_png(TINY, 1.0).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(matches!(render_png(TINY, 0.0), Err(Error::Raster { .. })));
    }

    #[test]
    fn test_rejects_malformed_svg() {
        assert!(render_png("<svg", 1.0).is_err());
    }
}
