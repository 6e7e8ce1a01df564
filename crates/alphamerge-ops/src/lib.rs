//! # alphamerge-ops
//!
//! Pixel operations behind alpha compositing.
//!
//! - [`luma`] - Reduce a mask image to one BT.601 intensity plane
//! - [`resize`] - Separable resampling with Lanczos3 and friends
//! - [`channels`] - RGBA expansion and alpha-plane substitution
//!
//! # Example
//!
//! ```rust,ignore
//! use alphamerge_ops::{channels, luma, resize::{self, Filter}};
//!
//! let mut rgba = channels::to_rgba8(&color)?;
//! let alpha = luma::to_luma8(&mask)?;
//! let alpha = resize::resize_plane_u8(&alpha, mw, mh, cw, ch, Filter::Lanczos3)?;
//! channels::substitute_alpha(&mut rgba, &alpha)?;
//! ```

#![warn(missing_docs)]

mod error;

pub mod channels;
pub mod luma;
pub mod resize;

pub use error::{OpsError, OpsResult};
pub use resize::Filter;
