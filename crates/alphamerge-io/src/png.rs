//! PNG format support.
//!
//! Reads PNG files of any color type and writes 8-bit PNGs. PNG is the
//! output format because it is lossless and carries an alpha channel.
//!
//! # Features
//!
//! - 1/2/4/8/16-bit input, palette and tRNS expanded on read
//! - Gray, gray+alpha, RGB and RGBA
//! - Deterministic in-memory encoding (same pixels, same bytes)
//!
//! # Example
//!
//! ```rust,ignore
//! use alphamerge_io::png;
//!
//! let image = png::read("input.png")?;
//! let bytes = png::encode(&image)?;
//! ```

use crate::{Format, ImageData, IoError, IoResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a PNG file from the given path.
///
/// Single-channel sources stay single-channel; 16-bit samples are kept
/// as [`crate::PixelData::U16`].
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        // EXPAND turns palettes into RGB(A)
        png::ColorType::Indexed => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, info.bit_depth
            )));
        }
    };

    let image = match info.bit_depth {
        png::BitDepth::Eight => ImageData::from_u8(info.width, info.height, channels, bytes.to_vec()),
        png::BitDepth::Sixteen => {
            ImageData::from_u16(info.width, info.height, channels, bytes_to_u16(bytes))
        }
        bit_depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, bit_depth
            )));
        }
    };

    Ok(image.with_source(Format::Png))
}

/// Encodes an image as an 8-bit PNG in memory.
///
/// Nothing touches the filesystem here, so a failed encode never leaves
/// a partial file behind.
pub fn encode(image: &ImageData) -> IoResult<Vec<u8>> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let u8_data = image.to_u8();
    if u8_data.len() != image.sample_count() {
        return Err(IoError::EncodeError(format!(
            "expected {} samples for {}x{}x{}, got {}",
            image.sample_count(),
            image.width,
            image.height,
            image.channels,
            u8_data.len()
        )));
    }

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&u8_data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(out)
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelData;

    fn write_raw(path: &Path, w: u32, h: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), w, h);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_roundtrip_rgba() {
        let width = 16;
        let height = 16;
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 16) as u8);
                data.push((y * 16) as u8);
                data.push(64);
                data.push((x * y) as u8);
            }
        }

        let image = ImageData::from_u8(width, height, 4, data.clone());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        std::fs::write(&path, encode(&image).unwrap()).unwrap();

        let loaded = read(&path).expect("Failed to read PNG");
        assert_eq!(loaded.width, width);
        assert_eq!(loaded.height, height);
        assert_eq!(loaded.channels, 4);
        assert_eq!(loaded.to_u8(), data);
    }

    #[test]
    fn test_grayscale_stays_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        write_raw(&path, 3, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[0, 128, 255]);

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.to_u8(), vec![0, 128, 255]);
    }

    #[test]
    fn test_sixteen_bit_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray16.png");
        write_raw(&path, 2, 1, png::ColorType::Grayscale, png::BitDepth::Sixteen, &[0x12, 0x34, 0xFF, 0x00]);

        let loaded = read(&path).unwrap();
        match &loaded.data {
            PixelData::U16(v) => assert_eq!(v, &vec![0x1234, 0xFF00]),
            other => panic!("expected U16 data, got {:?}", other),
        }
        assert_eq!(loaded.to_u8(), vec![0x12, 0xFF]);
    }

    #[test]
    fn test_low_bit_gray_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray1.png");
        // 8 pixels, 1 bit each: 1010_1010
        write_raw(&path, 8, 1, png::ColorType::Grayscale, png::BitDepth::One, &[0b1010_1010]);

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.to_u8(), vec![255, 0, 255, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let image = ImageData::from_u8(8, 8, 4, (0..256).map(|v| v as u8).collect());
        assert_eq!(encode(&image).unwrap(), encode(&image).unwrap());
    }

    #[test]
    fn test_encode_rejects_bad_channel_count() {
        let image = ImageData::from_u8(1, 1, 5, vec![0; 5]);
        assert!(matches!(encode(&image), Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let image = ImageData::from_u8(4, 4, 4, vec![0; 10]);
        assert!(matches!(encode(&image), Err(IoError::EncodeError(_))));
    }
}
