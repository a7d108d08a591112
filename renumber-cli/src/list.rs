use anyhow::Result;
use renumber_core::{list_operation, render_listing, EngineOptions};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_list(
    filter: Option<&str>,
    options: &EngineOptions,
    working_dir: Option<&Path>,
    table: bool,
    output: Option<OutputFormat>,
    use_color: bool,
) -> Result<()> {
    let result = list_operation(filter, options, working_dir)?;

    if table {
        println!("{}", render_listing(&result.entries, use_color));
        return Ok(());
    }

    crate::print_result(&result, output.unwrap_or(OutputFormat::Summary));
    Ok(())
}
