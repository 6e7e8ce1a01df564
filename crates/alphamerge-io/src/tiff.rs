//! TIFF format support.
//!
//! Reads the first image of 8-bit, 16-bit and 32-bit float TIFF files,
//! common for scans and mattes exported from paint packages.
//!
//! # Example
//!
//! ```rust,ignore
//! use alphamerge_io::tiff;
//!
//! let image = tiff::read("matte.tiff")?;
//! println!("Size: {}x{}", image.width, image.height);
//! ```

use crate::{Format, ImageData, IoError, IoResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a TIFF file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    use tiff::ColorType;
    use tiff::decoder::{Decoder, DecodingResult};

    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut decoder = Decoder::new(reader)
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        ct => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "unsupported TIFF color type: {:?}",
                ct
            )));
        }
    };

    let result = decoder
        .read_image()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let image = match result {
        DecodingResult::U8(buf) => ImageData::from_u8(width, height, channels, buf),
        DecodingResult::U16(buf) => ImageData::from_u16(width, height, channels, buf),
        DecodingResult::F32(buf) => ImageData::from_f32(width, height, channels, buf),
        _ => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "unsupported TIFF sample type for {:?}",
                color_type
            )));
        }
    };

    Ok(image.with_source(Format::Tiff))
}
