//! # alphamerge
//!
//! Builds an RGBA image from two sources: the color channels of one image
//! and the luminance of another, used as alpha.
//!
//! The whole public surface is one operation, [`compose`], plus
//! [`AlphaCompositor`] for callers that want a non-default resampling
//! filter. It is synchronous and has no shared state; GUI callers should
//! run it off their event thread.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alphamerge::{compose, default_output_path};
//!
//! compose("color.jpg", "mask.png", default_output_path("out"))?;
//! ```
//!
//! # Guarantees
//!
//! - The output always has the color image's dimensions. A mask of another
//!   size is stretched (never cropped or padded).
//! - The color image's original alpha is discarded.
//! - The output is written atomically: it is either the complete new PNG
//!   or whatever was there before.

#![warn(missing_docs)]

mod compositor;
mod error;

pub use alphamerge_ops::Filter;
pub use compositor::{
    AlphaCompositor, ComposeOptions, DEFAULT_OUTPUT_NAME, compose, default_output_path,
};
pub use error::{CompositorError, DecodeCause, Result};
