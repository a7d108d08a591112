#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod collision;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod filename;
pub mod lock;
pub mod operations;
pub mod ordering;
pub mod output;
pub mod plan;
pub mod preview;
pub mod range;
pub mod snapshot;

pub use collision::{check_shift, scan_shift};
pub use config::Config;
pub use directory::{Directory, LocalDirectory, MemoryDirectory};
pub use engine::{EngineOptions, GroupReport, Outcome, Renamer, Strategy};
pub use error::{RangeError, RenumberError, RenumberResult};
pub use filename::{FlagKind, ParsedFilename};
pub use lock::LockFile;
pub use operations::{
    insert_operation, list_operation, normalize_operation, parse_operation, shift_operation,
    Selection,
};
pub use output::{
    InsertResult, ListEntry, ListResult, NormalizeResult, OutputFormat, OutputFormatter,
    ParseResult, ShiftResult, VersionResult,
};
pub use plan::{RenamePlan, RenameStep};
pub use preview::{render_listing, render_renames, should_use_color};
pub use range::Range;
pub use snapshot::Snapshot;
