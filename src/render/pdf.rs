//! PDF page rasterization and vertical page stacking
//!
//! Pages are rendered one after another and handed to the caller as they
//! complete, so a document that fails halfway still shows its first pages.

use ::image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

use super::fit;
use crate::error::ViewerError;
use crate::state::data::{Bitmap, Extent, RenderedFrame};

/// Anything that can turn a PDF file into page bitmaps
pub trait PageRasterizer {
    /// Render every page at `zoom` magnification (1.0 = one pixel per point),
    /// passing each page to `on_page` in order.
    ///
    /// A page whose bitmap would not pass [`fit::check_render_size`] stops
    /// the render with `BitmapTooLarge` before anything is allocated.
    fn rasterize(
        &self,
        path: &Path,
        zoom: f64,
        on_page: &mut dyn FnMut(RgbaImage),
    ) -> Result<(), ViewerError>;
}

/// Rasterizer backed by the Pdfium shared library.
///
/// The library is bound once; if that fails every PDF reports the
/// binding error instead.
pub struct PdfiumRasterizer {
    pdfium: Result<Pdfium, String>,
}

impl PdfiumRasterizer {
    pub fn new(library: Option<&Path>) -> Self {
        let bindings = match library {
            Some(path) => Pdfium::bind_to_library(path),
            None => Pdfium::bind_to_system_library(),
        };

        let pdfium = match bindings {
            Ok(bindings) => {
                tracing::info!("📄 Pdfium bound");
                Ok(Pdfium::new(bindings))
            }
            Err(e) => {
                let source = library
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("system library"));
                tracing::warn!("⚠️  Could not bind Pdfium ({}): {}", source.display(), e);
                Err(format!("Pdfium library unavailable: {e}"))
            }
        };

        Self { pdfium }
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(
        &self,
        path: &Path,
        zoom: f64,
        on_page: &mut dyn FnMut(RgbaImage),
    ) -> Result<(), ViewerError> {
        let pdfium = self
            .pdfium
            .as_ref()
            .map_err(|e| ViewerError::DocumentLoad(e.clone()))?;

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ViewerError::DocumentLoad(e.to_string()))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(zoom as f32);

        for (index, page) in document.pages().iter().enumerate() {
            let width = (f64::from(page.width().value) * zoom) as u64;
            let height = (f64::from(page.height().value) * zoom) as u64;
            fit::check_render_size(width, height, 1)?;

            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| ViewerError::DocumentLoad(format!("page {}: {}", index + 1, e)))?;

            let width = bitmap.width().max(0) as u32;
            let height = bitmap.height().max(0) as u32;
            let page_image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
                .ok_or_else(|| {
                    ViewerError::DocumentLoad("invalid RGBA pixel buffer from pdfium".to_string())
                })?;

            on_page(page_image);
        }

        Ok(())
    }
}

/// Pages stacked top to bottom at x = 0 with no gap
#[derive(Debug)]
pub struct PageStack {
    pub pages: Vec<RenderedFrame>,
    /// Width of the last page by the summed page heights
    pub extent: Extent,
    /// Set when rendering stopped after some pages were already placed
    pub interrupted: Option<ViewerError>,
}

impl PageStack {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            extent: Extent::default(),
            interrupted: None,
        }
    }

    /// Place a page directly below the previous one
    pub fn push(&mut self, bitmap: Bitmap) {
        let y = self.extent.height as i32;
        self.extent.width = bitmap.width;
        self.extent.height += bitmap.height;
        self.pages.push(RenderedFrame { bitmap, x: 0, y });
    }
}

/// Rasterize a PDF into a page stack.
///
/// Fails outright if no page could be rendered; a failure after the first
/// page keeps the pages so far and records the error in `interrupted`.
pub fn stack_pages(
    rasterizer: &dyn PageRasterizer,
    path: &Path,
    zoom: f64,
) -> Result<PageStack, ViewerError> {
    let mut stack = PageStack::new();
    let result = rasterizer.rasterize(path, zoom, &mut |page| {
        stack.push(Bitmap::from_rgba(page));
    });

    match result {
        Err(e) if stack.pages.is_empty() => Err(e),
        Err(e) => {
            tracing::warn!(
                "PDF {} stopped after {} pages: {}",
                path.display(),
                stack.pages.len(),
                e
            );
            stack.interrupted = Some(e);
            Ok(stack)
        }
        Ok(()) if stack.pages.is_empty() => Err(ViewerError::DocumentLoad(format!(
            "{} has no pages",
            path.display()
        ))),
        Ok(()) => {
            tracing::debug!(
                "📄 {} pages, extent {}x{}",
                stack.pages.len(),
                stack.extent.width,
                stack.extent.height
            );
            Ok(stack)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Produces blank pages of fixed sizes, optionally failing after some of them
    pub(crate) struct StubRasterizer {
        pub pages: Vec<(u32, u32)>,
        pub fail_after: Option<usize>,
    }

    impl StubRasterizer {
        pub fn with_pages(pages: &[(u32, u32)]) -> Self {
            Self {
                pages: pages.to_vec(),
                fail_after: None,
            }
        }
    }

    impl PageRasterizer for StubRasterizer {
        fn rasterize(
            &self,
            _path: &Path,
            zoom: f64,
            on_page: &mut dyn FnMut(RgbaImage),
        ) -> Result<(), ViewerError> {
            for (index, &(width, height)) in self.pages.iter().enumerate() {
                if self.fail_after == Some(index) {
                    return Err(ViewerError::DocumentLoad(format!("page {} is broken", index + 1)));
                }
                let width = (width as f64 * zoom) as u32;
                let height = (height as f64 * zoom) as u32;
                fit::check_render_size(width.into(), height.into(), 1)?;
                on_page(RgbaImage::new(width, height));
            }
            Ok(())
        }
    }

    fn offsets(stack: &PageStack) -> Vec<i32> {
        stack.pages.iter().map(|page| page.y).collect()
    }

    #[test]
    fn test_three_pages_stack_vertically() {
        let rasterizer = StubRasterizer::with_pages(&[(300, 200), (300, 200), (300, 200)]);
        let stack = stack_pages(&rasterizer, Path::new("doc.pdf"), 1.0).unwrap();

        assert_eq!(offsets(&stack), [0, 200, 400]);
        assert!(stack.pages.iter().all(|page| page.x == 0));
        assert_eq!(stack.extent, Extent { width: 300, height: 600 });
        assert!(stack.interrupted.is_none());
    }

    #[test]
    fn test_extent_uses_last_page_width() {
        let rasterizer = StubRasterizer::with_pages(&[(500, 100), (250, 50)]);
        let stack = stack_pages(&rasterizer, Path::new("doc.pdf"), 2.0).unwrap();

        assert_eq!(offsets(&stack), [0, 200]);
        assert_eq!(stack.extent, Extent { width: 500, height: 300 });
    }

    #[test]
    fn test_failure_mid_document_keeps_earlier_pages() {
        let rasterizer = StubRasterizer {
            pages: vec![(100, 100), (100, 100), (100, 100)],
            fail_after: Some(2),
        };
        let stack = stack_pages(&rasterizer, Path::new("doc.pdf"), 1.0).unwrap();

        assert_eq!(stack.pages.len(), 2);
        assert_eq!(stack.extent.height, 200);
        assert!(matches!(stack.interrupted, Some(ViewerError::DocumentLoad(_))));
    }

    #[test]
    fn test_failure_before_first_page_is_an_error() {
        let rasterizer = StubRasterizer {
            pages: vec![(100, 100)],
            fail_after: Some(0),
        };
        let result = stack_pages(&rasterizer, Path::new("doc.pdf"), 1.0);
        assert!(matches!(result, Err(ViewerError::DocumentLoad(_))));
    }

    #[test]
    fn test_oversized_first_page_is_refused() {
        let rasterizer = StubRasterizer::with_pages(&[(612, 792)]);
        let result = stack_pages(&rasterizer, Path::new("doc.pdf"), 1.25_f64.powi(95));
        assert!(matches!(result, Err(ViewerError::BitmapTooLarge { .. })));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let rasterizer = StubRasterizer::with_pages(&[]);
        let result = stack_pages(&rasterizer, Path::new("empty.pdf"), 1.0);
        assert!(matches!(result, Err(ViewerError::DocumentLoad(_))));
    }
}
