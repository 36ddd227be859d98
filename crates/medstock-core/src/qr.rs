// QR code rendering to PNG bytes

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Pixel size of a single QR module.
const MODULE_PIXELS: u32 = 10;

/// Errors produced while turning label text into an image.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Encodes `text` as a QR code and returns the PNG file contents.
pub fn encode_png(text: &str) -> Result<Vec<u8>, LabelError> {
    let code = QrCode::new(text.as_bytes())?;
    let buffer = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(buffer).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
