//! Error types for photo_theme

use thiserror::Error;

use std::path::PathBuf;

/// Result type alias for image decoding
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure to turn an [`ImageRef`](crate::pixels::ImageRef) into pixels.
///
/// Palette extraction and theme synthesis never fail; this is the only error a caller of
/// [`analyze_image`](crate::analyze_image) has to handle.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The image file could not be opened or read
    #[error("failed to read image {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data is not an image the decoder understands
    #[error("failed to decode image: {0}")]
    Format(#[from] image::ImageError),
}

impl DecodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
