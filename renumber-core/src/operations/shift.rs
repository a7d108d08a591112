use super::{open_renamer, Selection};
use crate::engine::EngineOptions;
use crate::output::ShiftResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Shift operation - add `amount` to the number of every selected file
pub fn shift_operation(
    selection: Selection,
    amount: i64,
    options: EngineOptions,
    working_dir: Option<&Path>,
    use_color: bool,
) -> Result<ShiftResult> {
    let strategy = options.strategy;
    let (_lock, mut renamer) = open_renamer(working_dir, options)?;
    let range = selection.to_range(renamer.snapshot().len())?;

    let outcome = renamer
        .shift(range, amount)
        .with_context(|| format!("Failed to shift {selection} by {amount}"))?;

    Ok(ShiftResult {
        range,
        amount,
        strategy,
        outcome,
        use_color,
    })
}
