//! Compose command
//!
//! Resolves the output path, applies the clobber policy and hands the
//! three paths to the compositor.

use crate::{Cli, OutputArgs};
use alphamerge::{AlphaCompositor, ComposeOptions, default_output_path};
use alphamerge_io::has_supported_extension;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Runs the compositor and returns the path that was written.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    let filter = cli.filter;
    let output = resolve_output(&cli.output)?;

    for input in [&cli.color, &cli.mask] {
        if !has_supported_extension(input) {
            warn!("{} has an unusual extension; trying to decode anyway", input.display());
        }
    }
    if !output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
    {
        warn!("{} will contain PNG data regardless of its extension", output.display());
    }

    check_clobber(&output, cli.no_clobber)?;

    debug!(
        color = %cli.color.display(),
        mask = %cli.mask.display(),
        output = %output.display(),
        %filter,
        "composing"
    );

    AlphaCompositor::with_options(ComposeOptions { filter })
        .compose(&cli.color, &cli.mask, &output)
        .context("Failed to build the alpha composite")?;

    Ok(output)
}

/// Picks the explicit output file, or the default name inside `--out-dir`.
pub fn resolve_output(args: &OutputArgs) -> Result<PathBuf> {
    match (&args.output, &args.out_dir) {
        (Some(file), None) => Ok(file.clone()),
        (None, Some(dir)) => Ok(default_output_path(dir)),
        _ => bail!("Specify exactly one of --output or --out-dir"),
    }
}

/// Refuses to replace an existing file when `no_clobber` is set.
fn check_clobber(output: &Path, no_clobber: bool) -> Result<()> {
    if no_clobber && output.exists() {
        bail!("{} already exists (remove --no-clobber to replace it)", output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(color: PathBuf, mask: PathBuf, output: PathBuf, no_clobber: bool) -> Cli {
        Cli {
            color,
            mask,
            output: OutputArgs { output: Some(output), out_dir: None },
            filter: alphamerge::Filter::Lanczos3,
            no_clobber,
            verbose: 0,
        }
    }

    fn write_gray_png(path: &Path, w: u32, h: u32, value: u8) {
        let image = alphamerge_io::ImageData::from_u8(w, h, 1, vec![value; (w * h) as usize]);
        alphamerge_io::write_png(path, &image).unwrap();
    }

    #[test]
    fn test_resolve_output_file() {
        let args = OutputArgs { output: Some("a/b.png".into()), out_dir: None };
        assert_eq!(resolve_output(&args).unwrap(), PathBuf::from("a/b.png"));
    }

    #[test]
    fn test_resolve_output_dir_uses_default_name() {
        let args = OutputArgs { output: None, out_dir: Some("out".into()) };
        assert_eq!(
            resolve_output(&args).unwrap(),
            Path::new("out").join("image_avec_canal_alpha.png")
        );
    }

    #[test]
    fn test_resolve_output_neither() {
        let args = OutputArgs { output: None, out_dir: None };
        assert!(resolve_output(&args).is_err());
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("mask.png");
        let out = dir.path().join("out.png");
        write_gray_png(&color, 4, 4, 10);
        write_gray_png(&mask, 2, 2, 99);

        let written = run(&cli(color, mask, out.clone(), false)).unwrap();
        assert_eq!(written, out);

        let result = alphamerge_io::read(&out).unwrap();
        assert_eq!(result.dimensions(), (4, 4));
        assert_eq!(result.channels, 4);
    }

    #[test]
    fn test_no_clobber_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let out = dir.path().join("out.png");
        write_gray_png(&color, 1, 1, 10);
        std::fs::write(&out, b"precious").unwrap();

        assert!(run(&cli(color.clone(), color, out.clone(), true)).is_err());
        assert_eq!(std::fs::read(&out).unwrap(), b"precious");
    }

    #[test]
    fn test_run_uses_selected_filter() {
        let dir = tempfile::tempdir().unwrap();
        let color = dir.path().join("color.png");
        let mask = dir.path().join("mask.png");
        let out = dir.path().join("out.png");
        write_gray_png(&color, 3, 3, 10);
        write_gray_png(&mask, 2, 2, 200);

        let mut args = cli(color, mask, out.clone(), false);
        args.filter = alphamerge::Filter::Nearest;
        run(&args).unwrap();

        let rgba = alphamerge_io::read(&out).unwrap().to_u8();
        assert!(rgba.chunks_exact(4).all(|px| px[3] == 200));
    }
}
