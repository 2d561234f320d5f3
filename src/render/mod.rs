/// Document rendering
///
/// This module decides how a file is rasterized for the canvas:
/// - Static images, zoomed and fitted to the canvas (fit.rs, decode.rs)
/// - Animated GIFs as a cycling frame sequence (animation.rs)
/// - PDFs as a vertical stack of pages (pdf.rs)
pub mod animation;
pub mod decode;
pub mod fit;
pub mod pdf;

use std::path::Path;
use std::time::Duration;

pub use animation::{AnimationDriver, FrameSequence};
pub use fit::FitMode;
pub use pdf::{PageRasterizer, PageStack};

use crate::error::ViewerError;
use crate::state::data::{Bitmap, CanvasSize, Extent, RenderedFrame};
use decode::DecodedImage;

/// How a document ends up on the canvas
#[derive(Debug)]
pub enum RenderPlan {
    /// One bitmap, zoomed then fitted and centered in the canvas
    StaticImage { frame: RenderedFrame, extent: Extent },
    /// Zoomed frames at the origin, cycled by the animation driver
    AnimatedSequence(FrameSequence),
    /// One bitmap per PDF page, stacked vertically
    PageStack(PageStack),
}

pub struct Renderer {
    rasterizer: Box<dyn PageRasterizer>,
    fit_mode: FitMode,
    frame_delay: Duration,
}

impl Renderer {
    pub fn new(rasterizer: Box<dyn PageRasterizer>, fit_mode: FitMode, frame_delay: Duration) -> Self {
        Self {
            rasterizer,
            fit_mode,
            frame_delay,
        }
    }

    /// Rasterize the document at `path` for the given zoom and canvas size
    pub fn render(&self, path: &Path, zoom: f64, canvas: CanvasSize) -> Result<RenderPlan, ViewerError> {
        if is_pdf(path) {
            let stack = pdf::stack_pages(self.rasterizer.as_ref(), path, zoom)?;
            return Ok(RenderPlan::PageStack(stack));
        }

        match decode::decode(path)? {
            DecodedImage::Animated(frames) => {
                let zoomed_sizes = frames.iter().map(|frame| {
                    let (width, height) = fit::zoomed_size(frame.width(), frame.height(), zoom);
                    (u64::from(width), u64::from(height))
                });
                if let Some((width, height)) = zoomed_sizes.max_by_key(|&(w, h)| w.saturating_mul(h)) {
                    fit::check_render_size(width, height, frames.len() as u64)?;
                }

                let frames = frames
                    .iter()
                    .map(|frame| {
                        let (width, height) = fit::zoomed_size(frame.width(), frame.height(), zoom);
                        RenderedFrame::at_origin(Bitmap::from_rgba(decode::resize(frame, width, height)))
                    })
                    .collect();

                Ok(RenderPlan::AnimatedSequence(FrameSequence {
                    frames,
                    delay: self.frame_delay,
                }))
            }
            DecodedImage::Still(image) => {
                let image = image.to_rgba8();
                let zoomed = fit::zoomed_size(image.width(), image.height(), zoom);
                let placed = fit::fit_to_canvas(zoomed, canvas, self.fit_mode);

                let bitmap = Bitmap::from_rgba(decode::resize(&image, placed.width, placed.height));
                Ok(RenderPlan::StaticImage {
                    frame: RenderedFrame {
                        bitmap,
                        x: placed.x,
                        y: placed.y,
                    },
                    extent: Extent {
                        width: canvas.width,
                        height: canvas.height,
                    },
                })
            }
        }
    }
}

/// Documents with a `.pdf` extension, in any case, are rendered as PDFs
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pdf::tests::StubRasterizer;
    use crate::test_utils::{write_gif, write_png};

    const CANVAS: CanvasSize = CanvasSize { width: 800, height: 600 };

    fn renderer(fit_mode: FitMode) -> Renderer {
        Renderer::new(
            Box::new(StubRasterizer::with_pages(&[(300, 200), (300, 200), (300, 200)])),
            fit_mode,
            Duration::from_millis(100),
        )
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        assert!(is_pdf(Path::new("a/b/report.pdf")));
        assert!(is_pdf(Path::new("REPORT.PDF")));
        assert!(is_pdf(Path::new("mixed.Pdf")));
        assert!(!is_pdf(Path::new("pdf")));
        assert!(!is_pdf(Path::new("image.png")));
    }

    #[test]
    fn test_pdf_dispatches_to_page_stack() {
        let plan = renderer(FitMode::Shrink)
            .render(Path::new("scan.PDF"), 1.0, CANVAS)
            .unwrap();

        match plan {
            RenderPlan::PageStack(stack) => {
                assert_eq!(stack.extent.height, 600);
                let offsets: Vec<i32> = stack.pages.iter().map(|p| p.y).collect();
                assert_eq!(offsets, [0, 200, 400]);
            }
            other => panic!("expected page stack, got {other:?}"),
        }
    }

    #[test]
    fn test_static_image_is_fitted_and_centered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.png");
        write_png(&path, 100, 100);

        match renderer(FitMode::Contain).render(&path, 1.0, CANVAS).unwrap() {
            RenderPlan::StaticImage { frame, extent } => {
                assert_eq!((frame.bitmap.width, frame.bitmap.height), (600, 600));
                assert_eq!((frame.x, frame.y), (100, 0));
                assert_eq!(extent, Extent { width: 800, height: 600 });
            }
            other => panic!("expected static image, got {other:?}"),
        }

        match renderer(FitMode::Shrink).render(&path, 1.0, CANVAS).unwrap() {
            RenderPlan::StaticImage { frame, .. } => {
                assert_eq!((frame.bitmap.width, frame.bitmap.height), (100, 100));
                assert_eq!((frame.x, frame.y), (350, 250));
            }
            other => panic!("expected static image, got {other:?}"),
        }
    }

    #[test]
    fn test_animated_gif_frames_are_zoomed_without_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spin.gif");
        write_gif(&path, 3, 20, 10);

        match renderer(FitMode::Contain).render(&path, 1.5, CANVAS).unwrap() {
            RenderPlan::AnimatedSequence(sequence) => {
                assert_eq!(sequence.frames.len(), 3);
                assert_eq!(sequence.delay, Duration::from_millis(100));
                for frame in &sequence.frames {
                    assert_eq!((frame.bitmap.width, frame.bitmap.height), (30, 15));
                    assert_eq!((frame.x, frame.y), (0, 0));
                }
            }
            other => panic!("expected animation, got {other:?}"),
        }
    }

    #[test]
    fn test_animation_too_large_for_memory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.gif");
        write_gif(&path, 2, 10, 10);

        let result = renderer(FitMode::Shrink).render(&path, 1.25_f64.powi(95), CANVAS);
        assert!(matches!(result, Err(ViewerError::BitmapTooLarge { .. })));
    }

    #[test]
    fn test_corrupt_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = renderer(FitMode::Shrink).render(&path, 1.0, CANVAS);
        assert!(matches!(result, Err(ViewerError::UnsupportedOrCorruptImage(_))));
    }
}
