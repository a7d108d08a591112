//! Access to the directory being renumbered.
//!
//! The engine never touches the process working directory. Everything
//! goes through a [`Directory`], so tests and embedders can swap the real
//! filesystem for a [`MemoryDirectory`].

use crate::error::{RenumberError, RenumberResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Listing and renaming primitives the engine needs.
pub trait Directory {
    /// Names (not paths) of every entry at the current location.
    fn list_entries(&self) -> RenumberResult<Vec<String>>;

    /// Rename `old` to `new` inside the current location.
    ///
    /// Must fail rather than replace an existing `new`.
    fn rename_entry(&mut self, old: &str, new: &str) -> RenumberResult<()>;

    fn current_location(&self) -> &Path;

    /// Move to another location. On failure the current one is kept.
    fn set_current_location(&mut self, path: &Path) -> RenumberResult<()>;
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    root: PathBuf,
}

impl LocalDirectory {
    pub fn open(path: impl AsRef<Path>) -> RenumberResult<Self> {
        let root = checked_dir(path.as_ref())?;
        Ok(Self { root })
    }
}

fn checked_dir(path: &Path) -> RenumberResult<PathBuf> {
    let invalid = |source| RenumberError::InvalidLocation {
        path: path.to_path_buf(),
        source,
    };
    let root = path.canonicalize().map_err(invalid)?;
    if !root.is_dir() {
        return Err(invalid(io::Error::other("not a directory")));
    }
    Ok(root)
}

impl Directory for LocalDirectory {
    fn list_entries(&self) -> RenumberResult<Vec<String>> {
        let listing_error = |source| RenumberError::Listing {
            path: self.root.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(listing_error)? {
            let entry = entry.map_err(listing_error)?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!("Skipping entry with non UTF-8 name: {}", raw.to_string_lossy());
                },
            }
        }
        Ok(names)
    }

    fn rename_entry(&mut self, old: &str, new: &str) -> RenumberResult<()> {
        let fs_error = |source| RenumberError::Filesystem {
            from: old.to_string(),
            to: new.to_string(),
            source,
        };
        let target = self.root.join(new);
        // std::fs::rename silently replaces an existing file on Unix
        if target.symlink_metadata().is_ok() {
            return Err(fs_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "target already exists",
            )));
        }
        fs::rename(self.root.join(old), target).map_err(fs_error)
    }

    fn current_location(&self) -> &Path {
        &self.root
    }

    fn set_current_location(&mut self, path: &Path) -> RenumberResult<()> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        self.root = checked_dir(&path)?;
        Ok(())
    }
}

/// An in-memory directory tree: location -> (name -> contents).
///
/// Renames move contents between names, so tests can tell which original
/// file ended up where.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    location: PathBuf,
    dirs: BTreeMap<PathBuf, BTreeMap<String, String>>,
    failing: BTreeSet<String>,
    renames: usize,
}

impl MemoryDirectory {
    /// A single directory at `/` whose files contain their own names.
    pub fn with_files<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| (name.clone(), name))
            .collect();
        let location = PathBuf::from("/");
        let mut dirs = BTreeMap::new();
        dirs.insert(location.clone(), files);
        Self {
            location,
            dirs,
            ..Self::default()
        }
    }

    /// Add another directory that `set_current_location` can move to.
    #[must_use]
    pub fn with_dir<I, S>(mut self, path: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| (name.clone(), name))
            .collect();
        self.dirs.insert(path.into(), files);
        self
    }

    /// Make every rename of `name` fail with a permission error.
    pub fn fail_renames_of(&mut self, name: impl Into<String>) {
        self.failing.insert(name.into());
    }

    /// Contents of `name` at the current location.
    pub fn contents(&self, name: &str) -> Option<&str> {
        self.files()?.get(name).map(String::as_str)
    }

    /// Names at the current location in byte order.
    pub fn names(&self) -> Vec<String> {
        self.files()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of successful renames so far.
    pub const fn rename_count(&self) -> usize {
        self.renames
    }

    fn files(&self) -> Option<&BTreeMap<String, String>> {
        self.dirs.get(&self.location)
    }
}

impl Directory for MemoryDirectory {
    fn list_entries(&self) -> RenumberResult<Vec<String>> {
        Ok(self.names())
    }

    fn rename_entry(&mut self, old: &str, new: &str) -> RenumberResult<()> {
        let fs_error = |kind, msg| RenumberError::Filesystem {
            from: old.to_string(),
            to: new.to_string(),
            source: io::Error::new(kind, msg),
        };
        if self.failing.contains(old) {
            return Err(fs_error(io::ErrorKind::PermissionDenied, "rename refused"));
        }
        let files = self.dirs.entry(self.location.clone()).or_default();
        if files.contains_key(new) {
            return Err(fs_error(io::ErrorKind::AlreadyExists, "target already exists"));
        }
        let contents = files
            .remove(old)
            .ok_or_else(|| fs_error(io::ErrorKind::NotFound, "no such file"))?;
        files.insert(new.to_string(), contents);
        self.renames += 1;
        Ok(())
    }

    fn current_location(&self) -> &Path {
        &self.location
    }

    fn set_current_location(&mut self, path: &Path) -> RenumberResult<()> {
        if !self.dirs.contains_key(path) {
            return Err(RenumberError::InvalidLocation {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            });
        }
        self.location = path.to_path_buf();
        Ok(())
    }
}
