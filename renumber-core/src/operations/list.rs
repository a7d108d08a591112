use crate::directory::{Directory, LocalDirectory};
use crate::engine::EngineOptions;
use crate::filename::{self, FlagKind};
use crate::output::{ListEntry, ListResult};
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// List operation - returns the directory in renumbering order
///
/// Indices are positions in the full listing, so they stay valid as
/// arguments to `shift` and `insert` even when `filter` hides entries.
pub fn list_operation(
    filter: Option<&str>,
    options: &EngineOptions,
    working_dir: Option<&Path>,
) -> Result<ListResult> {
    let current_dir = working_dir.unwrap_or_else(|| Path::new("."));
    let dir = LocalDirectory::open(current_dir)
        .with_context(|| format!("Failed to open {}", current_dir.display()))?;

    let mut snapshot = Snapshot::new(options.include_hidden).keeping(&options.temp_prefix);
    snapshot.refresh(&dir)?;

    let keep: Option<HashSet<String>> = match filter {
        Some(pattern) => Some(
            snapshot
                .filter_by(pattern)
                .with_context(|| format!("Invalid filter pattern: {pattern}"))?
                .into_iter()
                .collect(),
        ),
        None => None,
    };

    let entries = snapshot
        .indexed()
        .filter(|(_, name)| keep.as_ref().map_or(true, |keep| keep.contains(*name)))
        .map(|(index, name)| {
            let parsed = filename::parse(name).ok();
            ListEntry {
                index,
                name: name.to_string(),
                value: parsed.as_ref().map(filename::ParsedFilename::signed),
                flag: parsed.as_ref().map_or(FlagKind::None, |p| p.flag),
                flag_count: parsed.as_ref().map_or(0, |p| p.flag_count),
            }
        })
        .collect();

    Ok(ListResult {
        directory: dir.current_location().display().to_string(),
        entries,
        longest_width: snapshot.longest_width(),
        filter: filter.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_with(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for name in files {
            fs::write(temp.path().join(name), name).unwrap();
        }
        temp
    }

    #[test]
    fn test_list_in_directory_order() {
        let temp = dir_with(&["10.jpg", "9.jpg", "cover.png", "9+.jpg"]);
        let result = list_operation(None, &EngineOptions::default(), Some(temp.path())).unwrap();
        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["9.jpg", "9+.jpg", "10.jpg", "cover.png"]);
        assert_eq!(result.entries[1].flag, FlagKind::Plus);
        assert_eq!(result.entries[3].value, None);
        assert_eq!(result.longest_width, 2);
    }

    #[test]
    fn test_filter_keeps_full_listing_indices() {
        let temp = dir_with(&["1.txt", "2.jpeg", "3.png"]);
        let result =
            list_operation(Some(r"\d+(\.[a-zA-Z]{3})?"), &EngineOptions::default(), Some(temp.path())).unwrap();
        let listed: Vec<(usize, &str)> = result
            .entries
            .iter()
            .map(|e| (e.index, e.name.as_str()))
            .collect();
        assert_eq!(listed, [(0, "1.txt"), (2, "3.png")]);
    }

    #[test]
    fn test_invalid_filter_fails() {
        let temp = dir_with(&["1.txt"]);
        assert!(list_operation(Some("("), &EngineOptions::default(), Some(temp.path())).is_err());
    }

    #[test]
    fn test_hidden_entries() {
        let temp = dir_with(&[".hidden", "1.txt"]);
        assert_eq!(list_operation(None, &EngineOptions::default(), Some(temp.path())).unwrap().entries.len(), 1);
        let options = EngineOptions {
            include_hidden: true,
            ..EngineOptions::default()
        };
        assert_eq!(list_operation(None, &options, Some(temp.path())).unwrap().entries.len(), 2);
    }

    #[test]
    fn test_parked_files_stay_visible() {
        let temp = dir_with(&[".DS_Store", ".renumber-tmp-1-1.txt", "0.txt"]);
        let result = list_operation(None, &EngineOptions::default(), Some(temp.path())).unwrap();
        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["0.txt", ".renumber-tmp-1-1.txt"]);
    }
}
