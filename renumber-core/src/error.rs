//! Error types for `renumber-core`.
//!
//! Engine operations return [`RenumberResult<T>`]. The operations layer
//! wraps these in `anyhow` with context for the CLI.

use std::path::PathBuf;

use crate::range::Range;

/// Problems with requested positions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RangeError {
    /// The literal is not of the form `<int>-<int>`.
    #[error("invalid range literal: {0:?} (expected <start>-<end>)")]
    InvalidLiteral(String),

    /// The range covers no positions.
    #[error("range {0} is empty")]
    Empty(Range),

    /// The range reaches outside `0..len`.
    #[error("range {range} is out of bounds for {len} files")]
    OutOfBounds { range: Range, len: usize },

    /// A single destination position outside `0..len`.
    #[error("position {position} is out of bounds for {len} files")]
    PositionOutOfBounds { position: i64, len: usize },
}

/// Unified error type for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum RenumberError {
    /// A filename in the affected range has no leading digit run.
    #[error("not a numbered file: {name}")]
    NotNumeric { name: String },

    /// Adding the offset leaves the representable integer range.
    #[error("shifting {name} by {amount} overflows")]
    Overflow { name: String, amount: i64 },

    /// A prospective rename would land on a file that is not moving.
    #[error("collision: renaming {name} to {target} conflicts with existing {existing}")]
    Collision {
        name: String,
        target: String,
        existing: String,
    },

    #[error(transparent)]
    Range(#[from] RangeError),

    /// Insert destination inside the block being moved.
    #[error("cannot insert range {range} at position {destination}: destination is inside the range")]
    SameRange { destination: i64, range: Range },

    /// The rename primitive failed.
    #[error("failed to rename {from} to {to}: {source}")]
    Filesystem {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    /// Listing the current location failed.
    #[error("failed to list {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Changing the current location failed; the previous one is kept.
    #[error("cannot change directory to {}: {source}", path.display())]
    InvalidLocation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenumberError {
    /// True for errors raised before anything was renamed because the
    /// request itself was unacceptable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NotNumeric { .. }
                | Self::Overflow { .. }
                | Self::Range(_)
                | Self::SameRange { .. }
                | Self::InvalidLocation { .. }
        )
    }
}

/// Convenience alias used throughout `renumber-core`.
pub type RenumberResult<T> = Result<T, RenumberError>;
