//! Test helpers: float assertions and on-disk image fixtures.

pub use approx::assert_relative_eq;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::fs::File;
use std::path::Path;

/// Write a GIF whose frames each have a distinct solid color
pub fn write_gif(path: &Path, frames: usize, width: u32, height: u32) {
    let file = File::create(path).expect("create gif fixture");
    let mut encoder = GifEncoder::new(file);
    let frames = (0..frames).map(|i| {
        let shade = (i * 80 % 256) as u8;
        let buffer = RgbaImage::from_pixel(width, height, Rgba([shade, 0, 255 - shade, 255]));
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1))
    });
    encoder.encode_frames(frames).expect("encode gif fixture");
}

/// Write a solid gray PNG
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]))
        .save(path)
        .expect("write png fixture");
}

/// Write an animated PNG whose frames each have a distinct solid color
pub fn write_apng(path: &Path, frames: u32, width: u32, height: u32) {
    let file = std::io::BufWriter::new(File::create(path).expect("create apng fixture"));
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_animated(frames, 0).expect("mark png as animated");

    let mut writer = encoder.write_header().expect("write apng header");
    for i in 0..frames {
        let shade = (i * 80 % 256) as u8;
        let buffer = RgbaImage::from_pixel(width, height, Rgba([shade, 255 - shade, 0, 255]));
        writer.write_image_data(buffer.as_raw()).expect("write apng frame");
    }
    writer.finish().expect("finish apng fixture");
}
