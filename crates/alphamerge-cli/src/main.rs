//! alphamerge - put a grayscale image into another image's alpha channel

use alphamerge::Filter;
use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

mod compose;
mod logging;

#[derive(Parser)]
#[command(name = "alphamerge")]
#[command(author, version, about = "Use a grayscale image as the alpha channel of a color image")]
#[command(long_about = "
Takes R, G and B from the color image and alpha from the luminance of the
mask image, then writes an RGBA PNG. A mask of a different size is stretched
to the color image's size.

Inputs: PNG, JPEG, GIF, BMP, TIFF.

Examples:
  alphamerge photo.jpg matte.png -o cutout.png
  alphamerge photo.jpg matte.png -d out/          # out/image_avec_canal_alpha.png
  alphamerge photo.jpg small_matte.bmp -o cutout.png -f bilinear
  alphamerge -vv photo.jpg matte.png -o cutout.png --no-clobber
")]
struct Cli {
    /// Color image (R, G, B source)
    color: PathBuf,

    /// Grayscale image (alpha source)
    mask: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Resampling filter for the mask: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long, default_value = "lanczos3")]
    filter: Filter,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    no_clobber: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Where the result goes: an explicit file, or a directory that gets the
/// default file name.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct OutputArgs {
    /// Output PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output directory (writes image_avec_canal_alpha.png)
    #[arg(short = 'd', long = "out-dir")]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let written = compose::run(&cli)?;
    println!("Saved to {}", written.display());

    Ok(())
}
