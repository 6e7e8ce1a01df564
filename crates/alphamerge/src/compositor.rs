//! The alpha compositor.
//!
//! Takes R, G, B from a color image and alpha from the luminance of a mask
//! image, stretching the mask to the color image's size when they differ.

use crate::error::{CompositorError, Result};
use alphamerge_io::ImageData;
use alphamerge_ops::{Filter, channels, luma, resize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name written when only an output directory is given.
pub const DEFAULT_OUTPUT_NAME: &str = "image_avec_canal_alpha.png";

/// Returns `dir/`[`DEFAULT_OUTPUT_NAME`].
pub fn default_output_path<P: AsRef<Path>>(dir: P) -> PathBuf {
    dir.as_ref().join(DEFAULT_OUTPUT_NAME)
}

/// Options for [`AlphaCompositor`].
///
/// # Example
///
/// ```rust
/// use alphamerge::{AlphaCompositor, ComposeOptions, Filter};
///
/// let compositor = AlphaCompositor::with_options(ComposeOptions {
///     filter: Filter::Bilinear,
/// });
/// assert_eq!(compositor.options().filter, Filter::Bilinear);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Filter used when the mask must be resampled. Default: Lanczos3.
    pub filter: Filter,
}

/// Merges a color image with a luminance mask into an RGBA PNG.
///
/// Holds only options, so one instance can serve concurrent calls on
/// different paths.
#[derive(Debug, Clone, Default)]
pub struct AlphaCompositor {
    options: ComposeOptions,
}

impl AlphaCompositor {
    /// Creates a compositor with default options.
    pub fn new() -> Self {
        Self::with_options(ComposeOptions::default())
    }

    /// Creates a compositor with the given options.
    pub fn with_options(options: ComposeOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Composites `color_path` and `mask_path` and writes the PNG to
    /// `output_path`, replacing any existing file.
    ///
    /// Nothing is written unless both inputs decode. The output is staged
    /// in the destination directory and renamed into place, so a failed
    /// write leaves the previous file (if any) intact.
    pub fn compose<C, M, O>(&self, color_path: C, mask_path: M, output_path: O) -> Result<()>
    where
        C: AsRef<Path>,
        M: AsRef<Path>,
        O: AsRef<Path>,
    {
        let output_path = output_path.as_ref();
        let composite = self.composite(color_path, mask_path)?;

        alphamerge_io::write_png(output_path, &composite)
            .map_err(|e| CompositorError::write(output_path, e))?;

        info!(
            output = %output_path.display(),
            width = composite.width,
            height = composite.height,
            "wrote composite"
        );
        Ok(())
    }

    /// Builds the composite in memory without writing anything.
    ///
    /// The result is 8-bit RGBA with the color image's dimensions.
    pub fn composite<C, M>(&self, color_path: C, mask_path: M) -> Result<ImageData>
    where
        C: AsRef<Path>,
        M: AsRef<Path>,
    {
        let color_path = color_path.as_ref();
        let mask_path = mask_path.as_ref();

        let color =
            alphamerge_io::read(color_path).map_err(|e| CompositorError::decode(color_path, e))?;
        let mut rgba =
            channels::to_rgba8(&color).map_err(|e| CompositorError::decode(color_path, e))?;
        let (width, height) = color.dimensions();
        debug!(path = %color_path.display(), width, height, channels = color.channels, "loaded color image");

        let mask =
            alphamerge_io::read(mask_path).map_err(|e| CompositorError::decode(mask_path, e))?;
        let mut alpha = luma::to_luma8(&mask).map_err(|e| CompositorError::decode(mask_path, e))?;
        debug!(path = %mask_path.display(), width = mask.width, height = mask.height, channels = mask.channels, "loaded mask");

        if mask.dimensions() != (width, height) {
            debug!(
                from = ?mask.dimensions(),
                to = ?(width, height),
                filter = %self.options.filter,
                "resampling mask"
            );
            alpha = resize::resize_plane_u8(
                &alpha,
                mask.width as usize,
                mask.height as usize,
                width as usize,
                height as usize,
                self.options.filter,
            )
            .map_err(|e| CompositorError::decode(mask_path, e))?;
        }

        channels::substitute_alpha(&mut rgba, &alpha)
            .map_err(|e| CompositorError::decode(mask_path, e))?;

        Ok(ImageData::from_u8(width, height, 4, rgba))
    }
}

/// Composites with default options. See [`AlphaCompositor::compose`].
///
/// # Example
///
/// ```rust,ignore
/// alphamerge::compose("photo.jpg", "matte.png", "out/cutout.png")?;
/// ```
pub fn compose<C, M, O>(color_path: C, mask_path: M, output_path: O) -> Result<()>
where
    C: AsRef<Path>,
    M: AsRef<Path>,
    O: AsRef<Path>,
{
    AlphaCompositor::new().compose(color_path, mask_path, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save(path: &Path, w: u32, h: u32, channels: u32, data: Vec<u8>) {
        alphamerge_io::write_png(path, &ImageData::from_u8(w, h, channels, data)).unwrap();
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("/tmp/out"),
            Path::new("/tmp/out/image_avec_canal_alpha.png")
        );
    }

    #[test]
    fn test_same_size_replaces_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("mask.png");
        save(&color, 2, 1, 4, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        save(&mask, 2, 1, 1, vec![0, 255]);

        let out = AlphaCompositor::new().composite(&color, &mask).unwrap();
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.channels, 4);
        assert_eq!(out.to_u8(), vec![10, 20, 30, 0, 50, 60, 70, 255]);
    }

    #[test]
    fn test_rgb_mask_uses_luminance() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("mask.png");
        save(&color, 1, 1, 3, vec![1, 2, 3]);
        save(&mask, 1, 1, 3, vec![255, 0, 0]);

        let out = AlphaCompositor::new().composite(&color, &mask).unwrap();
        assert_eq!(out.to_u8(), vec![1, 2, 3, 76]);
    }

    #[test]
    fn test_mask_resampled_to_color_size() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("mask.png");
        save(&color, 6, 4, 3, vec![9; 6 * 4 * 3]);
        save(&mask, 3, 9, 1, vec![200; 3 * 9]);

        let out = AlphaCompositor::with_options(ComposeOptions { filter: Filter::Bicubic })
            .composite(&color, &mask)
            .unwrap();
        assert_eq!(out.dimensions(), (6, 4));
        assert!(out.to_u8().chunks_exact(4).all(|px| px == [9, 9, 9, 200]));
    }

    #[test]
    fn test_missing_mask_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("nope.png");
        let out = dir.path().join("out.png");
        save(&color, 1, 1, 3, vec![0, 0, 0]);

        let err = compose(&color, &mask, &out).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.path(), mask.as_path());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_output_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        save(&color, 1, 1, 3, vec![0, 0, 0]);
        let out = dir.path().join("missing").join("out.png");

        let err = compose(&color, &color, &out).unwrap_err();
        assert!(err.is_write());
        assert_eq!(err.path(), out.as_path());
    }

    #[test]
    fn test_compositor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AlphaCompositor>();
    }
}
