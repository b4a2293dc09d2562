//! Image attachments
//!
//! Any format the `image` crate decodes is shrunk to fit a 1024×1024 box,
//! flattened to RGB, re-encoded as JPEG and base64-encoded for the wire.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;

/// Longest allowed edge, in pixels
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// Media type of every encoded attachment
pub const IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Errors while preparing an attachment
#[derive(Error, Debug)]
pub enum ImageEncodeError {
    #[error("Error encoding image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error encoding image: {0}")]
    Image(#[from] image::ImageError),
}

/// A JPEG attachment ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64 (standard alphabet) JPEG bytes
    pub data: String,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Load, shrink and encode the image at `path`
pub fn encode_image(path: impl AsRef<Path>) -> Result<EncodedImage, ImageEncodeError> {
    let decoded = ImageReader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?;
    encode_dynamic(decoded)
}

fn encode_dynamic(img: DynamicImage) -> Result<EncodedImage, ImageEncodeError> {
    let img = if img.width() > MAX_IMAGE_DIMENSION || img.height() > MAX_IMAGE_DIMENSION {
        // resize keeps the aspect ratio, fitting inside the box
        img.resize(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut bytes: Vec<u8> = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

    Ok(EncodedImage {
        data: STANDARD.encode(&bytes),
        media_type: IMAGE_MEDIA_TYPE,
        width: rgb.width(),
        height: rgb.height(),
    })
}
