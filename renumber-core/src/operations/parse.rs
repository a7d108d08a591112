use super::open_renamer;
use crate::engine::EngineOptions;
use crate::output::ParseResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse operation - apply pending `+`/`-` markers as shifts
pub fn parse_operation(
    options: EngineOptions,
    working_dir: Option<&Path>,
    use_color: bool,
) -> Result<ParseResult> {
    let (_lock, mut renamer) = open_renamer(working_dir, options)?;

    let groups = renamer
        .parse_and_increment_groups()
        .context("Failed to apply flag groups")?;

    Ok(ParseResult { groups, use_color })
}
