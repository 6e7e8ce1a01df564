//! Resampling for mask planes.
//!
//! A mask whose size differs from the color image is stretched to the exact
//! target size with a separable two-pass filter. Nothing is cropped or
//! padded; aspect ratio is not preserved.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic
//! - [`Filter::Lanczos3`] - High-quality sinc-based (default)
//!
//! # Example
//!
//! ```rust
//! use alphamerge_ops::resize::{resize_plane_u8, Filter};
//!
//! let mask = vec![128u8; 100 * 100];
//! let big = resize_plane_u8(&mask, 100, 100, 200, 200, Filter::Lanczos3).unwrap();
//! assert_eq!(big.len(), 200 * 200);
//! assert!(big.iter().all(|&v| v == 128));
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, area-aware when downscaling).
    #[default]
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Canonical lowercase name, accepted back by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" => Ok(Filter::Bicubic),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown filter '{}' (expected nearest, bilinear, bicubic or lanczos3)",
                other
            ))),
        }
    }
}

/// Half-open box so a sample exactly halfway between two sources still
/// picks one of them.
#[inline]
fn nearest_weight(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali with B=1/3, C=1/3.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Resizes a single f32 plane.
///
/// # Arguments
///
/// * `src` - Source samples, `src_w * src_h` long
/// * `src_w`, `src_h` - Source size
/// * `dst_w`, `dst_h` - Destination size
/// * `filter` - Resampling filter
///
/// Values are not clamped; Lanczos and bicubic may overshoot.
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "source is {}x{}",
            src_w, src_h
        )));
    }
    let expected = src_w * src_h;
    if src.len() != expected {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, dst_w, filter);
    let result = resize_vertical(&temp, dst_w, src_h, dst_h, filter);

    Ok(result)
}

/// Resizes a single 8-bit plane, rounding and clamping back to `0..=255`.
pub fn resize_plane_u8(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<u8>> {
    if (src_w, src_h) == (dst_w, dst_h) {
        if src.len() != src_w * src_h {
            return Err(OpsError::SizeMismatch(format!(
                "expected {} samples, got {}",
                src_w * src_h,
                src.len()
            )));
        }
        return Ok(src.to_vec());
    }

    trace!(src_w, src_h, dst_w, dst_h, %filter, "resampling plane");
    let plane: Vec<f32> = src.iter().map(|&v| v as f32).collect();
    let resized = resize_f32(&plane, src_w, src_h, dst_w, dst_h, filter)?;

    Ok(resized
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect())
}

/// Inclusive source range and filter center for one destination sample.
fn taps(dst: usize, scale: f32, src_len: usize, filter: Filter) -> (usize, usize, f32) {
    let support = filter.support() * scale.max(1.0);
    let center = (dst as f32 + 0.5) * scale - 0.5;
    let first = ((center - support).floor() as isize).max(0) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);
    (first, last, center)
}

fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h];
    let scale = src_w as f32 / dst_w as f32;

    for x in 0..dst_w {
        let (left, right, center) = taps(x, scale, src_w, filter);
        let weights: Vec<f32> = (left..=right)
            .map(|sx| filter.weight((sx as f32 - center) / scale.max(1.0)))
            .collect();
        let weight_sum: f32 = weights.iter().sum();
        if weight_sum <= 0.0 {
            continue;
        }

        for y in 0..src_h {
            let row = &src[y * src_w..(y + 1) * src_w];
            let sum: f32 = (left..=right).zip(&weights).map(|(sx, w)| row[sx] * w).sum();
            dst[y * dst_w + x] = sum / weight_sum;
        }
    }

    dst
}

fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src_w * dst_h];
    let scale = src_h as f32 / dst_h as f32;

    for y in 0..dst_h {
        let (top, bottom, center) = taps(y, scale, src_h, filter);
        let weights: Vec<f32> = (top..=bottom)
            .map(|sy| filter.weight((sy as f32 - center) / scale.max(1.0)))
            .collect();
        let weight_sum: f32 = weights.iter().sum();
        if weight_sum <= 0.0 {
            continue;
        }

        for x in 0..src_w {
            let sum: f32 = (top..=bottom)
                .zip(&weights)
                .map(|(sy, w)| src[sy * src_w + x] * w)
                .sum();
            dst[y * src_w + x] = sum / weight_sum;
        }
    }

    dst
}
