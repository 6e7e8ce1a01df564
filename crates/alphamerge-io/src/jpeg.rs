//! JPEG format support.
//!
//! Read-only: JPEG cannot carry alpha, so it is only ever an input here,
//! either as the color source or as a mask.
//!
//! # Example
//!
//! ```rust,ignore
//! use alphamerge_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! ```

use crate::{Format, ImageData, IoError, IoResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a JPEG file from the given path.
///
/// Grayscale JPEGs come back single-channel. CMYK is converted to RGB
/// with the usual naive formula.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    read_from(BufReader::new(file))
}

/// Reads a JPEG stream from any reader.
pub fn read_from<R: std::io::Read>(reader: R) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (3, pixels),
        jpeg_decoder::PixelFormat::L8 => (1, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            // Keep the high byte
            let gray: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (1, gray)
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;

                    let r = ((1.0 - c) * (1.0 - k) * 255.0).round() as u8;
                    let g = ((1.0 - m) * (1.0 - k) * 255.0).round() as u8;
                    let b = ((1.0 - y) * (1.0 - k) * 255.0).round() as u8;

                    [r, g, b]
                })
                .collect();
            (3, rgb)
        }
    };

    Ok(ImageData::from_u8(width, height, channels, data).with_source(Format::Jpeg))
}
