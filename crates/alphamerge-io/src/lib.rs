//! # alphamerge-io
//!
//! Image I/O for alphamerge.
//!
//! Decodes the raster formats a user is likely to pick as a color source or
//! an alpha mask, and writes the composited result as PNG:
//!
//! - **PNG** - Lossless with alpha support (read and write)
//! - **JPEG** - Lossy photographic images (read)
//! - **TIFF** - Scans and archival images (read)
//! - **GIF** - First frame of indexed images (read)
//! - **BMP** - Windows bitmaps (read)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alphamerge_io::{read, write_png};
//!
//! // Read any supported format (auto-detected)
//! let image = read("input.jpg")?;
//!
//! // Atomically replace the output file
//! write_png("output.png", &image)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths | Notes |
//! |--------|------|-------|------------|-------|
//! | PNG | Yes | Yes | 1-16 | Palette and tRNS expanded |
//! | JPEG | Yes | No | 8 | CMYK approximated to RGB |
//! | TIFF | Yes | No | 8, 16, 32f | Gray, RGB, RGBA |
//! | GIF | Yes | No | 8 | First frame |
//! | BMP | Yes | No | 1-32 | |
//!
//! # Feature Flags
//!
//! - `jpeg` - JPEG support (default)
//! - `tiff` - TIFF support (default)
//! - `gif` - GIF support via the `image` crate (default)
//! - `bmp` - BMP support via the `image` crate (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod output;

pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "tiff")]
pub mod tiff;

#[cfg(any(feature = "gif", feature = "bmp"))]
pub mod bitmap;

pub use detect::{Format, SUPPORTED_EXTENSIONS, has_supported_extension};
pub use error::{IoError, IoResult};
pub use output::write_atomic;

use std::path::Path;
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by file extension.
///
/// # Example
///
/// ```rust,ignore
/// use alphamerge_io::read;
///
/// let image = read("mask.bmp")?;
/// println!("Size: {}x{}", image.width, image.height);
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted or decodes to an empty raster
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "decoding image");

    let image = match format {
        Format::Png => png::read(path)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::read(path)?,

        #[cfg(feature = "gif")]
        Format::Gif => bitmap::read(path, Format::Gif)?,

        #[cfg(feature = "bmp")]
        Format::Bmp => bitmap::read(path, Format::Bmp)?,

        _ => {
            return Err(IoError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            ));
        }
    };

    if image.is_empty() {
        return Err(IoError::InvalidFile(format!(
            "{} has zero size ({}x{})",
            path.display(),
            image.width,
            image.height
        )));
    }

    Ok(image)
}

/// Encodes an image as PNG and atomically writes it to `path`.
///
/// The file at `path` is either fully replaced or left untouched.
pub fn write_png<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let bytes = png::encode(image)?;
    write_atomic(path, &bytes)
}

/// Image data container for I/O operations.
///
/// This is a format-agnostic container that holds pixel data
/// along with metadata. Samples are interleaved, rows top to bottom.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of channels (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA).
    pub channels: u32,
    /// Raw pixel data.
    pub data: PixelData,
    /// Optional metadata.
    pub metadata: Metadata,
}

/// Raw pixel data storage.
#[derive(Debug, Clone)]
pub enum PixelData {
    /// 8-bit unsigned data.
    U8(Vec<u8>),
    /// 16-bit unsigned data.
    U16(Vec<u16>),
    /// 32-bit float data.
    F32(Vec<f32>),
}

/// Image metadata.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Format the image was decoded from, if it came from a file.
    pub source_format: Option<Format>,
}

impl ImageData {
    /// Creates ImageData from u8 pixel data.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U8(data),
            metadata: Metadata::default(),
        }
    }

    /// Creates ImageData from u16 pixel data.
    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U16(data),
            metadata: Metadata::default(),
        }
    }

    /// Creates ImageData from f32 pixel data.
    pub fn from_f32(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::F32(data),
            metadata: Metadata::default(),
        }
    }

    /// Records the format the image was decoded from.
    pub(crate) fn with_source(mut self, format: Format) -> Self {
        self.metadata.source_format = Some(format);
        self
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples (pixels * channels).
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Converts pixel data to u8 (for compositing/saving).
    pub fn to_u8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
            PixelData::F32(data) => data
                .iter()
                .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect(),
        }
    }
}
