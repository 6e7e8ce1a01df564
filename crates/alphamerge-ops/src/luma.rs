//! Luminance reduction.
//!
//! Masks are reduced to one 8-bit intensity plane with the ITU-R BT.601
//! weights (`0.299 R + 0.587 G + 0.114 B`), evaluated in 16.16 fixed point
//! with rounding so gray inputs map back to themselves exactly.

use crate::{OpsError, OpsResult};
use alphamerge_io::ImageData;

// 0.299, 0.587, 0.114 scaled by 65536; they sum to 65536.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;

/// BT.601 luminance of one 8-bit RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + 0x8000) >> 16) as u8
}

/// Reduces an image to a single 8-bit intensity plane.
///
/// Gray and gray+alpha sources use their gray plane as-is; RGB and RGBA
/// sources go through [`luma`]. Any alpha in the source is ignored.
pub fn to_luma8(image: &ImageData) -> OpsResult<Vec<u8>> {
    let samples = image.to_u8();
    let channels = image.channels as usize;
    if samples.len() != image.sample_count() {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            image.sample_count(),
            samples.len()
        )));
    }

    match channels {
        1 => Ok(samples),
        2 => Ok(samples.chunks_exact(2).map(|ga| ga[0]).collect()),
        3 | 4 => Ok(samples
            .chunks_exact(channels)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect()),
        n => Err(OpsError::InvalidParameter(format!(
            "cannot derive luminance from {} channels",
            n
        ))),
    }
}
