use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use thiserror::Error;

/// Longest side kept for the OCR engine. Full FBDS map sheets are larger
/// than this; the legend text stays legible after downscaling.
pub const MAX_SIDE: u32 = 3500;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Decode a JPEG / PNG map scan and return PNG bytes ready for OCR.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(normalize(img))
}

fn normalize(img: DynamicImage) -> DynamicImage {
    let img = if img.width() > MAX_SIDE || img.height() > MAX_SIDE {
        img.resize(MAX_SIDE, MAX_SIDE, image::imageops::FilterType::Triangle)
    } else {
        img
    };

    stretch_contrast(img.to_luma8())
}

/// Linear stretch of the gray levels to the full 0..=255 range.
fn stretch_contrast(gray: GrayImage) -> DynamicImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if hi <= lo {
        return DynamicImage::ImageLuma8(gray);
    }

    let range = u32::from(hi - lo);
    let out: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([(u32::from(p - lo) * 255 / range) as u8])
    });
    DynamicImage::ImageLuma8(out)
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
