//! Still and animated image decoding
//!
//! GIF, APNG and WebP files with more than one frame are decoded as
//! animations; every other image goes through the regular `image` decoder
//! and yields a single bitmap.

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ViewerError;

/// A decoded image before any zoom or placement is applied
pub enum DecodedImage {
    Still(DynamicImage),
    /// Fully composited frames, in display order
    Animated(Vec<RgbaImage>),
}

/// Decode an image file, detecting multi-frame GIF, APNG and WebP
pub fn decode(path: &Path) -> Result<DecodedImage, ViewerError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;

    if let Some(frames) = decode_frames(path, reader.format())? {
        if frames.len() > 1 {
            tracing::debug!("🎞️  {} frames in {}", frames.len(), path.display());
            return Ok(DecodedImage::Animated(frames));
        }
        if let Some(frame) = frames.into_iter().next() {
            return Ok(DecodedImage::Still(DynamicImage::ImageRgba8(frame)));
        }
    }

    Ok(DecodedImage::Still(reader.decode()?))
}

/// Frames of a format that can animate, or `None` when the file is a plain still
fn decode_frames(path: &Path, format: Option<ImageFormat>) -> Result<Option<Vec<RgbaImage>>, ViewerError> {
    let open = || -> Result<BufReader<File>, ViewerError> { Ok(BufReader::new(File::open(path)?)) };

    let frames = match format {
        Some(ImageFormat::Gif) => GifDecoder::new(open()?)?.into_frames().collect_frames()?,
        Some(ImageFormat::Png) => {
            let decoder = PngDecoder::new(open()?)?;
            if !decoder.is_apng()? {
                return Ok(None);
            }
            decoder.apng()?.into_frames().collect_frames()?
        }
        Some(ImageFormat::WebP) => {
            let decoder = WebPDecoder::new(open()?)?;
            if !decoder.has_animation() {
                return Ok(None);
            }
            decoder.into_frames().collect_frames()?
        }
        _ => return Ok(None),
    };

    Ok(Some(frames.into_iter().map(|frame| frame.into_buffer()).collect()))
}

/// High quality resample to an exact size
pub fn resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Lanczos3)
}
