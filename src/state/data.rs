//! Shared data structures for the viewer
//!
//! These structs represent the bitmaps that flow from the renderer
//! to the canvas, and the geometry they are laid out in.

use iced::widget::image::Handle;
use image::RgbaImage;

/// Size of the visible canvas area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Scroll extent of the canvas content in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

/// A decoded RGBA bitmap ready for display
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Handle uploaded by iced on first draw
    pub handle: Handle,
}

impl Bitmap {
    pub fn from_rgba(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            handle: Handle::from_rgba(width, height, image.into_raw()),
        }
    }
}

/// A bitmap placed on the canvas at its top-left corner
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub bitmap: Bitmap,
    pub x: i32,
    pub y: i32,
}

impl RenderedFrame {
    pub fn at_origin(bitmap: Bitmap) -> Self {
        Self { bitmap, x: 0, y: 0 }
    }
}
