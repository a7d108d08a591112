use anyhow::Result;
use renumber_core::{insert_operation, EngineOptions, Selection};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_insert(
    selection: &str,
    index: i64,
    options: EngineOptions,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let selection: Selection = selection.parse()?;
    let result = insert_operation(selection, index, options, working_dir, use_color)?;

    crate::print_result(&result, output);
    Ok(())
}
