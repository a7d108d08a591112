use crate::directory::Directory;
use crate::error::RenumberResult;
use crate::filename;
use crate::ordering;
use crate::range::Range;
use regex::Regex;

/// Ordered view of a directory: position `i` is the `i`-th entry in
/// directory order.
///
/// A snapshot is rebuilt from scratch on every refresh and never patched,
/// so positions always reflect what is on disk.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    names: Vec<String>,
    longest_width: usize,
    include_hidden: bool,
    keep_prefix: Option<String>,
}

impl Snapshot {
    pub fn new(include_hidden: bool) -> Self {
        Self {
            include_hidden,
            ..Self::default()
        }
    }

    /// Keep hidden names starting with `prefix` even when hidden entries
    /// are skipped. Files parked mid-rename carry such names.
    pub fn keeping(mut self, prefix: &str) -> Self {
        self.keep_prefix = Some(prefix.to_string()).filter(|p| !p.is_empty());
        self
    }

    /// Build a snapshot from names directly, sorting them as a refresh would.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut snapshot = Self::new(true);
        snapshot.replace(names.into_iter().map(Into::into).collect());
        snapshot
    }

    /// Re-list `dir` and replace the current contents.
    pub fn refresh<D: Directory + ?Sized>(&mut self, dir: &D) -> RenumberResult<&[String]> {
        let names = dir.list_entries()?;
        self.replace(names);
        tracing::debug!(
            "Refreshed {}: {} entries, width {}",
            dir.current_location().display(),
            self.names.len(),
            self.longest_width
        );
        Ok(&self.names)
    }

    fn replace(&mut self, mut names: Vec<String>) {
        if !self.include_hidden {
            let keep = self.keep_prefix.as_deref();
            names.retain(|name| !name.starts_with('.') || keep.is_some_and(|p| name.starts_with(p)));
        }
        ordering::sort_names(&mut names);
        self.longest_width = names
            .iter()
            .filter_map(|name| filename::digit_width(name))
            .max()
            .unwrap_or(0);
        self.names = names;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entry at position `i`.
    pub fn get(&self, i: i64) -> Option<&str> {
        usize::try_from(i)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// The range covering every entry.
    pub fn bounds(&self) -> Range {
        Range::all(self.names.len())
    }

    /// Entries with their positions.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }

    /// Names covered by `range`, in traversal order.
    pub fn names_in(&self, range: Range) -> Vec<&str> {
        range.iter().filter_map(|i| self.get(i)).collect()
    }

    /// Names that match `pattern` in full.
    pub fn filter_by(&self, pattern: &str) -> Result<Vec<String>, regex::Error> {
        let re = anchored(pattern)?;
        Ok(self
            .names
            .iter()
            .filter(|name| re.is_match(name))
            .cloned()
            .collect())
    }

    /// Widest digit run among numbered entries.
    pub fn longest_width(&self) -> usize {
        self.longest_width
    }
}

/// Compile `pattern` so it only matches whole names.
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}
