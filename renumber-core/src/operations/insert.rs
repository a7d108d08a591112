use super::{open_renamer, Selection};
use crate::engine::EngineOptions;
use crate::output::InsertResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Insert operation - move the selected block to `destination`
pub fn insert_operation(
    selection: Selection,
    destination: i64,
    options: EngineOptions,
    working_dir: Option<&Path>,
    use_color: bool,
) -> Result<InsertResult> {
    let (_lock, mut renamer) = open_renamer(working_dir, options)?;
    let range = selection.to_range(renamer.snapshot().len())?;

    let outcome = renamer
        .insert(range, destination)
        .with_context(|| format!("Failed to insert {selection} at position {destination}"))?;

    Ok(InsertResult {
        range,
        destination,
        outcome,
        use_color,
    })
}
