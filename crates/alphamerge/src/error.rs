//! Errors reported by the compositor.
//!
//! Exactly two kinds cross the `compose` boundary: the inputs could not be
//! turned into pixels, or the result could not be persisted. Both carry the
//! offending path and the underlying cause.

use alphamerge_io::IoError;
use alphamerge_ops::OpsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single [`crate::compose`] call.
#[derive(Debug, Error)]
pub enum CompositorError {
    /// An input is missing, unreadable, or not a decodable image.
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        /// Input that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: DecodeCause,
    },

    /// The output could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// Requested output path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: IoError,
    },
}

/// What went wrong while turning an input file into pixels.
#[derive(Debug, Error)]
pub enum DecodeCause {
    /// Reading or parsing the file failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The decoded pixels could not be converted.
    #[error(transparent)]
    Pixels(#[from] OpsError),
}

impl CompositorError {
    pub(crate) fn decode(path: &Path, source: impl Into<DecodeCause>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: &Path, source: IoError) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Decode { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// True for input-side failures.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// True for output-side failures.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// Result type for compositor calls.
pub type Result<T> = std::result::Result<T, CompositorError>;
