//! Directory ordering.
//!
//! Numbered names come first, ordered by signed value, then by increasing
//! `+` count, then by decreasing `-` count, then by suffix. Files carrying
//! pending-shift markers therefore sit next to their base file, in the
//! order of their intended final position. Everything else follows in
//! plain string order.

use crate::filename::{self, ParsedFilename};
use std::cmp::{Ordering, Reverse};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Numbered {
        value: i64,
        plus: usize,
        minus: Reverse<usize>,
        suffix: String,
        raw: String,
    },
    Other(String),
}

fn sort_key(name: &str) -> SortKey {
    match filename::parse(name) {
        Ok(parsed) => numbered_key(&parsed, name),
        Err(_) => SortKey::Other(name.to_string()),
    }
}

fn numbered_key(parsed: &ParsedFilename, name: &str) -> SortKey {
    SortKey::Numbered {
        value: parsed.signed(),
        plus: parsed.plus_count(),
        minus: Reverse(parsed.minus_count()),
        suffix: parsed.suffix.clone(),
        raw: name.to_string(),
    }
}

/// Compare two directory entries.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sort `names` in directory order and drop duplicates.
pub fn sort_names(names: &mut Vec<String>) {
    names.sort_by_cached_key(|name| sort_key(name));
    names.dedup();
}
