use super::open_renamer;
use crate::engine::EngineOptions;
use crate::output::NormalizeResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Normalize operation - pad every number to `width` digits, or to the
/// widest number present when no width is given
pub fn normalize_operation(
    width: Option<usize>,
    options: EngineOptions,
    working_dir: Option<&Path>,
    use_color: bool,
) -> Result<NormalizeResult> {
    let (_lock, mut renamer) = open_renamer(working_dir, options)?;
    let width = width.unwrap_or_else(|| renamer.longest_name_width());

    let renames = renamer
        .normalize(width)
        .with_context(|| format!("Failed to normalize names to width {width}"))?;

    Ok(NormalizeResult {
        width,
        renames,
        use_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_defaults_to_longest_width() {
        let temp = TempDir::new().unwrap();
        for name in ["7.txt", "100.txt", "notes.md"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let result =
            normalize_operation(None, EngineOptions::default(), Some(temp.path()), false).unwrap();
        assert_eq!(result.width, 3);
        assert_eq!(result.renames.len(), 1);
        assert_eq!(fs::read_to_string(temp.path().join("007.txt")).unwrap(), "7.txt");
        assert!(temp.path().join("notes.md").exists());
    }

    #[test]
    fn test_normalize_explicit_width() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("7.txt"), "").unwrap();

        normalize_operation(Some(4), EngineOptions::default(), Some(temp.path()), false).unwrap();
        assert!(temp.path().join("0007.txt").exists());
    }
}
