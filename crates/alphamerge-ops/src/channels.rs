//! Channel layout conversion and alpha substitution.

use crate::{OpsError, OpsResult};
use alphamerge_io::ImageData;

/// Expands an image to interleaved 8-bit RGBA.
///
/// Gray is replicated into R, G and B. Sources without alpha get an
/// opaque (255) alpha plane; existing alpha is carried through.
pub fn to_rgba8(image: &ImageData) -> OpsResult<Vec<u8>> {
    let samples = image.to_u8();
    if samples.len() != image.sample_count() {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            image.sample_count(),
            samples.len()
        )));
    }

    let rgba = match image.channels {
        1 => samples.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        2 => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        3 => samples
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        4 => samples,
        n => {
            return Err(OpsError::InvalidParameter(format!(
                "cannot expand {} channels to RGBA",
                n
            )));
        }
    };

    Ok(rgba)
}

/// Overwrites the alpha plane of interleaved RGBA data in place.
///
/// `alpha` must hold exactly one sample per RGBA pixel. R, G and B are
/// left untouched.
pub fn substitute_alpha(rgba: &mut [u8], alpha: &[u8]) -> OpsResult<()> {
    if rgba.len() % 4 != 0 || rgba.len() / 4 != alpha.len() {
        return Err(OpsError::SizeMismatch(format!(
            "{} RGBA samples vs {} alpha samples",
            rgba.len(),
            alpha.len()
        )));
    }

    for (px, &a) in rgba.chunks_exact_mut(4).zip(alpha) {
        px[3] = a;
    }

    Ok(())
}
