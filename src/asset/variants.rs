//! Derived image files: the WebP alternate and the inline preview.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, imageops};

/// Lossless WebP bytes for `img`.
///
/// The encoder only takes 8-bit RGB(A), so other layouts are converted first.
pub fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let rgba = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img.clone(),
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };
    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::WebP)?;
    Ok(bytes)
}

/// Preview height for `width`, keeping the aspect ratio. Never zero.
pub fn preview_height(dimensions: (u32, u32), width: u32) -> u32 {
    let (w, h) = dimensions;
    if w == 0 {
        return 1;
    }
    let height = (u64::from(h) * u64::from(width) + u64::from(w) / 2) / u64::from(w);
    height.clamp(1, u64::from(u32::MAX)) as u32
}

/// Tiny blurred PNG as a `data:` URI.
pub fn encode_preview(img: &DynamicImage, width: u32, blur: f32) -> Result<String, ImageError> {
    let width = width.min(img.width()).max(1);
    let height = preview_height(img.dimensions(), width);

    let small = img.thumbnail_exact(width, height).to_rgba8();
    let blurred = if blur > 0.0 {
        imageops::blur(&small, blur)
    } else {
        small
    };

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(blurred).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
