use anyhow::{Context, Result};
use renumber_core::{shift_operation, EngineOptions, Selection};
use std::path::Path;

use crate::cli::OutputFormat;

/// Resolve `shift <target> [amount]`: one argument is an amount applied to all files.
pub fn resolve_shift_args(target: &str, amount: Option<i64>) -> Result<(Selection, i64)> {
    match amount {
        Some(amount) => Ok((target.parse::<Selection>()?, amount)),
        None => {
            let amount = target
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid shift amount: {target}"))?;
            Ok((Selection::All, amount))
        },
    }
}

pub fn handle_shift(
    target: &str,
    amount: Option<i64>,
    options: EngineOptions,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let (selection, amount) = resolve_shift_args(target, amount)?;
    let result = shift_operation(selection, amount, options, working_dir, use_color)?;

    crate::print_result(&result, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use renumber_core::Range;

    #[test]
    fn test_single_argument_shifts_everything() {
        let (selection, amount) = resolve_shift_args("-3", None).unwrap();
        assert_eq!(selection, Selection::All);
        assert_eq!(amount, -3);
    }

    #[test]
    fn test_range_with_amount() {
        let (selection, amount) = resolve_shift_args("1-4", Some(2)).unwrap();
        assert_eq!(selection, Selection::Range(Range::new(1, 4)));
        assert_eq!(amount, 2);
    }

    #[test]
    fn test_all_with_amount() {
        let (selection, _) = resolve_shift_args("all", Some(1)).unwrap();
        assert_eq!(selection, Selection::All);
    }

    #[test]
    fn test_single_non_numeric_argument_is_rejected() {
        let err = resolve_shift_args("all", None).unwrap_err();
        assert!(err.to_string().contains("Invalid shift amount: all"));
    }
}
