//! Image decoding.
//!
//! Turns an [`ImageRef`] into a small RGBA [`PixelBuffer`]. Images are shrunk so that the longest
//! side is at most [`MAX_DIMENSION`] pixels, which bounds the cost of palette extraction no matter
//! how large the source photo is.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use log::{debug, trace};

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, Result};

/// Longest side of a decoded [`PixelBuffer`], in pixels.
pub const MAX_DIMENSION: u32 = 150;

/// Where an image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageRef {
    /// An image file on disk.
    Path(PathBuf),
    /// Encoded image data, e.g. an uploaded file. The format is guessed from the content.
    Bytes(Vec<u8>),
}

/// Decoded, downscaled RGBA pixels, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageRef {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<Vec<u8>> for ImageRef {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. Returns `None` if `data` is not exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Rasterize a decoded image, shrinking it to fit in [`MAX_DIMENSION`]. Never upscales.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let (target_width, target_height) = fit_within(width, height, MAX_DIMENSION);
        let rgba = if (target_width, target_height) == (width, height) {
            image.to_rgba8()
        } else {
            trace!("resizing {width}x{height} to {target_width}x{target_height}");
            image
                .resize_exact(target_width, target_height, FilterType::Triangle)
                .to_rgba8()
        };
        Self {
            width: rgba.width(),
            height: rgba.height(),
            data: rgba.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Scale `(width, height)` by `min(max / width, max / height, 1)`, truncating to whole pixels.
///
/// A non-empty side never shrinks below one pixel.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let ratio = (f64::from(max) / f64::from(width))
        .min(f64::from(max) / f64::from(height))
        .min(1.0);
    let scale = |side: u32| ((f64::from(side) * ratio) as u32).max(1);
    (scale(width), scale(height))
}

/// Load and rasterize an image.
pub fn decode(source: &ImageRef) -> Result<PixelBuffer> {
    let decoded = match source {
        ImageRef::Path(path) => ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|e| DecodeError::io(path, e))?
            .decode()?,
        ImageRef::Bytes(bytes) => image::load_from_memory(bytes)?,
    };
    debug!("decoded {source}: {}x{}", decoded.width(), decoded.height());
    Ok(PixelBuffer::from_image(&decoded))
}

#[cfg(test)]
pub(crate) mod test {
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use std::io::Cursor;
    use std::path::PathBuf;

    use super::{DecodeError, ImageRef, PixelBuffer, decode, fit_within};

    /// Encode a solid-color image as PNG.
    pub(crate) fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("Failed to encode test image");
        buf
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(600, 300, 150), (150, 75));
        assert_eq!(fit_within(300, 600, 150), (75, 150));
        assert_eq!(fit_within(40, 20, 150), (40, 20));
        assert_eq!(fit_within(150, 150, 150), (150, 150));
        assert_eq!(fit_within(1000, 3, 150), (150, 1));
        assert_eq!(fit_within(0, 10, 150), (0, 10));
    }

    #[test]
    fn test_decode_downscales() {
        let buffer = decode(&ImageRef::Bytes(solid_png(600, 300, [10, 20, 30, 255]))).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (150, 75));
        assert_eq!(buffer.as_bytes().len(), 150 * 75 * 4);
        assert_eq!(&buffer.as_bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_never_upscales() {
        let buffer = decode(&ImageRef::Bytes(solid_png(40, 20, [0, 0, 0, 255]))).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (40, 20));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(&ImageRef::Bytes(b"definitely not an image".to_vec())).unwrap_err();
        assert!(matches!(err, DecodeError::Format(_)));
    }

    #[test]
    fn test_decode_missing_file() {
        let path = PathBuf::from("/nonexistent/photo-theme/missing.png");
        let err = decode(&ImageRef::Path(path.clone())).unwrap_err();
        match err {
            DecodeError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_pixel_buffer_length_check() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_some());
        assert!(PixelBuffer::new(2, 2, vec![0; 15]).is_none());
        assert!(PixelBuffer::new(0, 0, Vec::new()).unwrap().is_empty());
    }
}
