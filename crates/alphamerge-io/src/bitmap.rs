//! GIF and BMP support.
//!
//! Both formats are decoded through the `image` crate, built with only its
//! `gif` and `bmp` codecs. Animated GIFs yield their first frame.

use crate::{Format, ImageData, IoError, IoResult};
use std::path::Path;

/// Reads a GIF or BMP file.
///
/// `format` selects the decoder; it is normally the result of
/// [`Format::detect`].
pub fn read<P: AsRef<Path>>(path: P, format: Format) -> IoResult<ImageData> {
    let image_format = match format {
        #[cfg(feature = "gif")]
        Format::Gif => image::ImageFormat::Gif,
        #[cfg(feature = "bmp")]
        Format::Bmp => image::ImageFormat::Bmp,
        other => {
            return Err(IoError::UnsupportedFormat(other.extension().to_string()));
        }
    };

    let mut reader = image::ImageReader::open(path.as_ref())?;
    reader.set_format(image_format);
    let decoded = reader
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let color = decoded.color();

    let (channels, data) = match (color.channel_count(), color.has_alpha()) {
        (1, _) => (1, decoded.into_luma8().into_raw()),
        (2, _) => (2, decoded.into_luma_alpha8().into_raw()),
        (_, false) => (3, decoded.into_rgb8().into_raw()),
        (_, true) => (4, decoded.into_rgba8().into_raw()),
    };

    Ok(ImageData::from_u8(width, height, channels, data).with_source(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x1 24-bit BMP: left pixel red, right pixel blue.
    #[cfg(feature = "bmp")]
    fn tiny_bmp() -> Vec<u8> {
        let mut bytes = Vec::new();
        // BITMAPFILEHEADER
        bytes.extend_from_slice(b"BM");
        bytes.extend_from_slice(&62u32.to_le_bytes()); // file size
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&54u32.to_le_bytes()); // pixel offset
        // BITMAPINFOHEADER
        bytes.extend_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&24u16.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes()); // image size
        bytes.extend_from_slice(&2835i32.to_le_bytes());
        bytes.extend_from_slice(&2835i32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        // Row: BGR BGR + 2 bytes padding
        bytes.extend_from_slice(&[0, 0, 255, 255, 0, 0, 0, 0]);
        bytes
    }

    #[test]
    #[cfg(feature = "bmp")]
    fn test_read_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.bmp");
        std::fs::write(&path, tiny_bmp()).unwrap();

        let image = read(&path, Format::Bmp).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.channels, 3);
        assert_eq!(image.to_u8(), vec![255, 0, 0, 0, 0, 255]);
        assert_eq!(image.metadata.source_format, Some(Format::Bmp));
    }

    #[test]
    fn test_rejects_other_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        std::fs::write(&path, b"irrelevant").unwrap();

        assert!(matches!(read(&path, Format::Png), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    #[cfg(feature = "gif")]
    fn test_corrupt_gif_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.gif");
        std::fs::write(&path, b"GIF89a\x00").unwrap();

        assert!(matches!(read(&path, Format::Gif), Err(IoError::DecodeError(_))));
    }
}
