//! The viewer shell
//!
//! Owns the library, the selection and zoom state, and whatever is currently
//! on the canvas. Every user action goes through here; the UI layer only
//! turns the returned errors into dialogs.

use std::path::Path;
use std::time::Duration;

use super::data::{CanvasSize, Extent, RenderedFrame};
use super::library::Library;
use crate::error::ViewerError;
use crate::render::{AnimationDriver, RenderPlan, Renderer};

/// Selection, zoom and animation state
#[derive(Debug)]
pub struct ViewerState {
    /// Index into the library, `None` when nothing is selected
    pub current_index: Option<usize>,
    /// Multiplicative zoom applied at render time
    pub zoom_level: f64,
    pub animation: AnimationDriver,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current_index: None,
            zoom_level: 1.0,
            animation: AnimationDriver::new(),
        }
    }
}

/// What the canvas currently shows.
/// Dropping a variant releases its bitmaps.
#[derive(Debug, Default)]
enum Display {
    #[default]
    Cleared,
    Still {
        frame: RenderedFrame,
        extent: Extent,
    },
    Pages {
        pages: Vec<RenderedFrame>,
        extent: Extent,
    },
    /// Frames are owned by the animation driver
    Animated,
}

pub struct Viewer {
    library: Library,
    state: ViewerState,
    renderer: Renderer,
    canvas: CanvasSize,
    display: Display,
}

impl Viewer {
    pub fn new(renderer: Renderer, canvas: CanvasSize) -> Self {
        Self {
            library: Library::new(),
            state: ViewerState::default(),
            renderer,
            canvas,
            display: Display::Cleared,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn zoom_level(&self) -> f64 {
        self.state.zoom_level
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    pub fn is_animating(&self) -> bool {
        self.state.animation.is_scheduled()
    }

    /// Interval of the running animation, if any
    pub fn animation_delay(&self) -> Option<Duration> {
        self.state.animation.delay()
    }

    /// True when the library has no entries
    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// Add files picked by the user and show the first new one.
    ///
    /// If every path was already in the library, the first picked path's
    /// existing entry is shown instead.
    pub fn add_files<I, S>(&mut self, paths: I) -> Result<(), ViewerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        let Some(first_picked) = paths.first().cloned() else {
            return Ok(());
        };

        let before = self.library.len();
        let target = self
            .library
            .add_all(paths)
            .or_else(|| self.library.position(&first_picked));
        tracing::info!("➕ Added {} files", self.library.len() - before);

        match target {
            Some(index) => self.select(index),
            None => Ok(()),
        }
    }

    /// Show the entry at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Result<(), ViewerError> {
        if index >= self.library.len() {
            return Ok(());
        }
        self.state.current_index = Some(index);
        self.render_current()
    }

    /// Move the selection by `delta`, staying inside the list.
    /// With no selection the current position counts as -1.
    pub fn navigate(&mut self, delta: i64) -> Result<(), ViewerError> {
        let current = self.state.current_index.map_or(-1, |i| i as i64);
        let target = current + delta;
        if target < 0 || target >= self.library.len() as i64 {
            return Ok(());
        }
        self.select(target as usize)
    }

    /// Multiply the zoom level and redraw the current document.
    ///
    /// A zoom that would need an oversized bitmap is undone and the
    /// document is drawn again at the previous level.
    pub fn zoom(&mut self, factor: f64) -> Result<(), ViewerError> {
        let previous = self.state.zoom_level;
        self.state.zoom_level *= factor;
        tracing::debug!("🔍 Zoom level {:.3}", self.state.zoom_level);
        if self.state.current_index.is_none() {
            return Ok(());
        }

        match self.render_current() {
            Err(e @ ViewerError::BitmapTooLarge { .. }) => {
                self.state.zoom_level = previous;
                if let Err(redraw) = self.render_current() {
                    tracing::warn!("Redraw at zoom {:.3} failed: {}", previous, redraw);
                }
                Err(e)
            }
            result => result,
        }
    }

    /// Remove the selected entry and show its neighbour, if any
    pub fn remove_selected(&mut self) -> Result<(), ViewerError> {
        let index = self.state.current_index.ok_or(ViewerError::EmptySelection)?;

        self.state.animation.cancel();
        self.library.remove(&[index]);

        if self.library.is_empty() {
            self.state.current_index = None;
            self.display = Display::Cleared;
            return Ok(());
        }

        self.select(index.min(self.library.len() - 1))
    }

    /// Replace the whole library with the one stored at `path`.
    /// The selection and canvas are cleared; on failure nothing changes.
    pub fn load_library(&mut self, path: &Path) -> Result<(), ViewerError> {
        self.library.load_from(path)?;
        self.state.animation.cancel();
        self.state.current_index = None;
        self.display = Display::Cleared;
        Ok(())
    }

    pub fn save_library(&self, path: &Path) -> Result<(), ViewerError> {
        self.library.save_to(path)
    }

    /// Track the canvas size. A running animation is not interrupted.
    pub fn resize_canvas(&mut self, canvas: CanvasSize) -> Result<(), ViewerError> {
        if canvas == self.canvas {
            return Ok(());
        }
        self.canvas = canvas;
        if self.state.current_index.is_some() && !self.state.animation.is_scheduled() {
            self.render_current()?;
        }
        Ok(())
    }

    /// Advance the animation by one frame
    pub fn tick(&mut self) -> bool {
        let advanced = self.state.animation.tick();
        if advanced {
            tracing::trace!("frame {:?}", self.state.animation.frame_index());
        }
        advanced
    }

    pub fn shutdown(&mut self) {
        self.state.animation.cancel();
        self.display = Display::Cleared;
        tracing::info!("👋 Viewer shut down");
    }

    /// Bitmaps to draw, in paint order
    pub fn visible_frames(&self) -> Vec<&RenderedFrame> {
        match &self.display {
            Display::Cleared => Vec::new(),
            Display::Still { frame, .. } => vec![frame],
            Display::Pages { pages, .. } => pages.iter().collect(),
            Display::Animated => self.state.animation.current_frame().into_iter().collect(),
        }
    }

    /// Scrollable size of the canvas content
    pub fn scroll_extent(&self) -> Extent {
        match &self.display {
            Display::Cleared => Extent::default(),
            Display::Still { extent, .. } | Display::Pages { extent, .. } => *extent,
            Display::Animated => self.state.animation.extent().unwrap_or_default(),
        }
    }

    /// Cancel any animation, clear the canvas and draw the selected document
    fn render_current(&mut self) -> Result<(), ViewerError> {
        self.state.animation.cancel();
        self.display = Display::Cleared;

        let Some(index) = self.state.current_index else {
            return Ok(());
        };
        let Some(path) = self.library.get(index) else {
            return Ok(());
        };

        tracing::debug!("🖼️  Rendering {} at zoom {:.3}", path, self.state.zoom_level);
        let plan = self
            .renderer
            .render(Path::new(path), self.state.zoom_level, self.canvas)?;

        match plan {
            RenderPlan::StaticImage { frame, extent } => {
                self.display = Display::Still { frame, extent };
            }
            RenderPlan::AnimatedSequence(sequence) => {
                self.state.animation.start(sequence);
                self.display = Display::Animated;
            }
            RenderPlan::PageStack(mut stack) => {
                let interrupted = stack.interrupted.take();
                self.display = Display::Pages {
                    pages: stack.pages,
                    extent: stack.extent,
                };
                if let Some(e) = interrupted {
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
