use anyhow::Result;
use renumber_core::{normalize_operation, EngineOptions};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_normalize(
    width: Option<usize>,
    options: EngineOptions,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = normalize_operation(width, options, working_dir, use_color)?;

    crate::print_result(&result, output);
    Ok(())
}
