use anyhow::Result;
use renumber_core::{parse_operation, EngineOptions};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_parse(
    options: EngineOptions,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = parse_operation(options, working_dir, use_color)?;

    crate::print_result(&result, output);
    Ok(())
}
