//! High-level operations that correspond to CLI commands
//!
//! Each operation opens the target directory, takes its lock, runs the
//! engine and returns a structured result, leaving argument parsing and
//! output formatting to the caller.

pub mod insert;
pub mod list;
pub mod normalize;
pub mod parse;
pub mod shift;

pub use insert::insert_operation;
pub use list::list_operation;
pub use normalize::normalize_operation;
pub use parse::parse_operation;
pub use shift::shift_operation;

use crate::directory::LocalDirectory;
use crate::engine::{EngineOptions, Renamer};
use crate::error::RangeError;
use crate::lock::LockFile;
use crate::range::Range;
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which files a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Range(Range),
    Index(i64),
}

impl Selection {
    /// Resolve against a directory holding `len` entries.
    pub fn to_range(self, len: usize) -> Result<Range, RangeError> {
        match self {
            Self::All => Ok(Range::all(len)),
            Self::Range(range) => Ok(range),
            Self::Index(i) => {
                Range::single(i).ok_or(RangeError::PositionOutOfBounds { position: i, len })
            },
        }
    }
}

impl FromStr for Selection {
    type Err = RangeError;

    /// `all`, a `<start>-<end>` literal or a single position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if Range::is_literal(s) {
            return s.parse().map(Self::Range);
        }
        s.parse::<i64>()
            .map(Self::Index)
            .map_err(|_| RangeError::InvalidLiteral(s.to_string()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Range(range) => write!(f, "{range}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Lock `working_dir` (default `.`) and build a renamer over it.
///
/// The lock is released when the returned [`LockFile`] is dropped, so
/// callers keep it alive for as long as they rename.
fn open_renamer(
    working_dir: Option<&Path>,
    options: EngineOptions,
) -> Result<(LockFile, Renamer<LocalDirectory>)> {
    let current_dir = working_dir.unwrap_or_else(|| Path::new("."));
    let dir = LocalDirectory::open(current_dir)
        .with_context(|| format!("Failed to open {}", current_dir.display()))?;
    let lock = LockFile::acquire(current_dir)?;
    let renamer = Renamer::new(dir, options)?;
    Ok((lock, renamer))
}
