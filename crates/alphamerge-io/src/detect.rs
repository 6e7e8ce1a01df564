//! Format detection utilities.
//!
//! Detects input formats from magic bytes, falling back to file extensions.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// File extensions accepted as inputs, matching the formats [`Format`] decodes.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

/// Image formats known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// TIFF format.
    Tiff,
    /// GIF format (first frame only).
    Gif,
    /// Windows bitmap.
    Bmp,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes + extension).
    ///
    /// Magic bytes win; the extension is only consulted when the header
    /// is not recognized. Fails if the file cannot be opened.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        let format = Self::from_magic_bytes(path)?;
        if format != Format::Unknown {
            return Ok(format);
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            Some("tif") | Some("tiff") => Format::Tiff,
            Some("gif") => Format::Gif,
            Some("bmp") => Format::Bmp,
            _ => Format::Unknown,
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];

        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // BMP: "BM"
        if bytes.len() >= 2 && bytes[0..2] == [b'B', b'M'] {
            return Format::Bmp;
        }

        if bytes.len() < 4 {
            return Format::Unknown;
        }

        // PNG: 0x89 0x50 0x4E 0x47 0x0D 0x0A 0x1A 0x0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // JPEG: 0xFF 0xD8 0xFF
        if bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        // TIFF little-endian (II) or big-endian (MM)
        if bytes[0..4] == [0x49, 0x49, 0x2A, 0x00] || bytes[0..4] == [0x4D, 0x4D, 0x00, 0x2A] {
            return Format::Tiff;
        }

        // GIF: "GIF87a" / "GIF89a"
        if bytes.len() >= 6 && (&bytes[0..6] == b"GIF87a" || &bytes[0..6] == b"GIF89a") {
            return Format::Gif;
        }

        Format::Unknown
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Tiff => "tif",
            Format::Gif => "gif",
            Format::Bmp => "bmp",
            Format::Unknown => "",
        }
    }
}

/// Returns true if the path has one of the [`SUPPORTED_EXTENSIONS`].
///
/// Used by front ends to filter candidate files; decoding itself trusts
/// magic bytes over extensions.
pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
