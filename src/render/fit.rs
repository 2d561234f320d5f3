//! Zoom and fit-to-canvas geometry for static images

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::state::data::CanvasSize;

/// Upper bound on the RGBA memory a single render may allocate (1 GiB)
pub const MAX_RENDER_BYTES: u64 = 1 << 30;

/// How a static image is fitted into the canvas.
///
/// On an 800x600 canvas `Contain` draws a 100x100 image at 600x600, while
/// `Shrink` leaves it at 100x100 so zoom stays meaningful for small images.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale down to fit, never beyond the zoomed size
    #[default]
    Shrink,
    /// Scale up or down until the constraining axis fills the canvas
    Contain,
}

/// Final size and top-left position of an image on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

/// Pixel size of an image after applying the zoom factor.
/// Truncates like a plain integer cast and never returns a zero dimension.
pub fn zoomed_size(width: u32, height: u32, zoom: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 * zoom) as u32).max(1);
    (scale(width), scale(height))
}

/// Refuse a render of `count` bitmaps of `width` x `height` RGBA pixels
/// when it would exceed [`MAX_RENDER_BYTES`]
pub fn check_render_size(width: u64, height: u64, count: u64) -> Result<(), ViewerError> {
    let bytes = width.saturating_mul(height).saturating_mul(4).saturating_mul(count);
    if bytes > MAX_RENDER_BYTES {
        return Err(ViewerError::BitmapTooLarge { width, height });
    }
    Ok(())
}

/// Fit an already-zoomed image into the canvas, preserving its aspect ratio,
/// and center it.
///
/// A canvas that is wider than the image ratio constrains the height,
/// otherwise the width. The other axis follows the ratio, truncated.
pub fn fit_to_canvas(zoomed: (u32, u32), canvas: CanvasSize, mode: FitMode) -> Placement {
    let (zw, zh) = (zoomed.0.max(1) as u64, zoomed.1.max(1) as u64);
    let (cw, ch) = (canvas.width.max(1) as u64, canvas.height.max(1) as u64);

    // canvas_w / canvas_h > zoomed_w / zoomed_h, cross-multiplied to stay exact
    let canvas_is_wider = cw * zh > zw * ch;

    let (width, height) = if canvas_is_wider {
        let height = match mode {
            FitMode::Shrink => ch.min(zh),
            FitMode::Contain => ch,
        };
        (height * zw / zh, height)
    } else {
        let width = match mode {
            FitMode::Shrink => cw.min(zw),
            FitMode::Contain => cw,
        };
        (width, width * zh / zw)
    };

    let (width, height) = (width.max(1), height.max(1));
    Placement {
        width: width as u32,
        height: height as u32,
        x: ((cw as i64 - width as i64) / 2) as i32,
        y: ((ch as i64 - height as i64) / 2) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize { width: 800, height: 600 };

    #[test]
    fn test_matching_ratio_fills_canvas() {
        let placed = fit_to_canvas(zoomed_size(400, 300, 1.0), CANVAS, FitMode::Contain);
        assert_eq!(placed, Placement { width: 800, height: 600, x: 0, y: 0 });
    }

    #[test]
    fn test_square_image_fits_height_and_centers() {
        let placed = fit_to_canvas(zoomed_size(100, 100, 1.0), CANVAS, FitMode::Contain);
        assert_eq!(placed, Placement { width: 600, height: 600, x: 100, y: 0 });
    }

    #[test]
    fn test_shrink_never_enlarges_small_images() {
        let placed = fit_to_canvas(zoomed_size(100, 100, 1.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 100, height: 100, x: 350, y: 250 });

        let placed = fit_to_canvas(zoomed_size(400, 300, 1.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 400, height: 300, x: 200, y: 150 });
    }

    #[test]
    fn test_shrink_applies_zoom_up_to_canvas_bounds() {
        let placed = fit_to_canvas(zoomed_size(400, 300, 2.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 800, height: 600, x: 0, y: 0 });

        let placed = fit_to_canvas(zoomed_size(400, 300, 4.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 800, height: 600, x: 0, y: 0 });
    }

    #[test]
    fn test_tall_image_in_wide_canvas() {
        let placed = fit_to_canvas(zoomed_size(1000, 2000, 1.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 300, height: 600, x: 250, y: 0 });
    }

    #[test]
    fn test_wide_image_fits_width() {
        let placed = fit_to_canvas(zoomed_size(1600, 400, 1.0), CANVAS, FitMode::Shrink);
        assert_eq!(placed, Placement { width: 800, height: 200, x: 0, y: 200 });
    }

    #[test]
    fn test_render_size_limit() {
        assert!(check_render_size(4096, 4096, 10).is_ok());
        assert!(matches!(
            check_render_size(16_384, 16_384, 2),
            Err(ViewerError::BitmapTooLarge { width: 16_384, height: 16_384 })
        ));
        assert!(check_render_size(u64::from(u32::MAX), u64::from(u32::MAX), 1).is_err());
    }

    #[test]
    fn test_tiny_zoom_keeps_one_pixel() {
        assert_eq!(zoomed_size(10, 10, 0.001), (1, 1));
        let placed = fit_to_canvas((1, 1), CanvasSize::new(0, 0), FitMode::Shrink);
        assert_eq!((placed.width, placed.height), (1, 1));
    }
}
