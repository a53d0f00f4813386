//! Coin-photo loading and validation.
//!
//! Reads an image file, enforces the size cap, sniffs the real format
//! (the extension is not trusted), and produces the base64 payload the
//! Gemini request embeds as an inline part.

use base64::Engine;
use std::path::Path;
use thiserror::Error;

/// 5 MB cap, matching what the analysis endpoint accepts inline.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// One inline image payload, ready for the request body.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: &'static str,
    /// Base64-encoded image bytes.
    pub data: String,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("image {path} is {size} bytes — the limit is 5MB")]
    TooLarge { path: String, size: usize },
    #[error("image {path} is not a supported format (JPEG, PNG, GIF, WebP)")]
    UnsupportedFormat { path: String },
}

/// Load and validate a coin photo from disk.
pub fn load_image_part(path: &Path) -> Result<ImagePart, ImageError> {
    let display = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
        path: display.clone(),
        source,
    })?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge { path: display, size: bytes.len() });
    }

    let mime_type = match image::guess_format(&bytes) {
        Ok(image::ImageFormat::Jpeg) => "image/jpeg",
        Ok(image::ImageFormat::Png) => "image/png",
        Ok(image::ImageFormat::Gif) => "image/gif",
        Ok(image::ImageFormat::WebP) => "image/webp",
        _ => return Err(ImageError::UnsupportedFormat { path: display }),
    };

    let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
    log::info!("[IMAGE] Loaded {} ({} bytes, {})", path.display(), bytes.len(), mime_type);

    Ok(ImagePart { mime_type, data })
}
