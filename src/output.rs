use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::rendering::Frame;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn frame_to_image(frame: &Frame) -> RgbaImage {
    RgbaImage::from_fn(frame.width, frame.height, |x, y| {
        image::Rgba(frame.pixel(x, y).map(quantize))
    })
}

pub fn write_png(frame: &Frame, path: &Path) -> Result<(), OutputError> {
    frame_to_image(frame).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Binary P6; alpha is dropped.
pub fn write_ppm(frame: &Frame, out: &mut impl Write) -> Result<(), OutputError> {
    out.write_all(b"P6\n")?;
    out.write_all(format!("{} {}\n", frame.width, frame.height).as_bytes())?;
    out.write_all(b"255\n")?;
    let bytes: Vec<u8> = frame
        .pixels
        .iter()
        .flat_map(|p| [quantize(p[0]), quantize(p[1]), quantize(p[2])])
        .collect();
    out.write_all(&bytes)?;
    Ok(())
}

/// Picks the format from the extension: `.ppm` or anything `image` can save
/// as PNG.
pub fn write_frame(frame: &Frame, path: &Path) -> Result<(), OutputError> {
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        let mut out = BufWriter::new(File::create(path)?);
        write_ppm(frame, &mut out)?;
        out.flush()?;
        Ok(())
    } else {
        write_png(frame, path)
    }
}
