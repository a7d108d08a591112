use crate::error::RangeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A half-open interval `[start, end)` over directory positions.
///
/// When `start > end` the range runs backward and covers `(end, start]`,
/// visited from `start` down to `end + 1`. Direction never changes which
/// positions are covered, only the order they are visited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    start: i64,
    end: i64,
}

fn literal_regex() -> &'static Regex {
    static LITERAL: OnceLock<Regex> = OnceLock::new();
    LITERAL.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").expect("valid range regex"))
}

impl Range {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// The single position `i`, or `None` when `i + 1` is not representable.
    pub const fn single(i: i64) -> Option<Self> {
        match i.checked_add(1) {
            Some(end) => Some(Self::new(i, end)),
            None => None,
        }
    }

    /// Every position of a directory holding `len` entries.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn all(len: usize) -> Self {
        Self::new(0, len as i64)
    }

    /// Whether `s` is a `<int>-<int>` literal.
    pub fn is_literal(s: &str) -> bool {
        literal_regex().is_match(s.trim())
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn end(&self) -> i64 {
        self.end
    }

    pub const fn is_forward(&self) -> bool {
        self.start <= self.end
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of positions covered.
    pub const fn span(&self) -> i64 {
        (self.end - self.start).abs()
    }

    /// Lowest covered position (meaningless for an empty range).
    pub const fn low(&self) -> i64 {
        if self.is_forward() {
            self.start
        } else {
            self.end + 1
        }
    }

    /// Highest covered position (meaningless for an empty range).
    pub const fn high(&self) -> i64 {
        if self.is_forward() {
            self.end - 1
        } else {
            self.start
        }
    }

    /// Last position visited when iterating.
    pub const fn last(&self) -> i64 {
        self.prev(self.end)
    }

    pub const fn contains(&self, n: i64) -> bool {
        if self.is_forward() {
            self.start <= n && n < self.end
        } else {
            self.end < n && n <= self.start
        }
    }

    /// Every position `other` visits lies inside `self`.
    pub const fn contains_range(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains(other.start) && self.contains(other.last()))
    }

    /// One step toward `end`.
    pub const fn next(&self, n: i64) -> i64 {
        if self.is_forward() {
            n + 1
        } else {
            n - 1
        }
    }

    /// One step toward `start`.
    pub const fn prev(&self, n: i64) -> i64 {
        if self.is_forward() {
            n - 1
        } else {
            n + 1
        }
    }

    /// The same positions visited in the opposite order.
    pub const fn reverse(&self) -> Self {
        Self::new(self.prev(self.end), self.prev(self.start))
    }

    /// This range oriented forward (`true`) or backward (`false`).
    pub const fn oriented(&self, forward: bool) -> Self {
        if self.is_forward() == forward || self.is_empty() {
            *self
        } else {
            self.reverse()
        }
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            next: self.start,
        }
    }

    /// Check that every covered position is a valid index for `len` entries.
    pub fn validate(&self, len: usize) -> Result<(), RangeError> {
        if self.is_empty() {
            return Err(RangeError::Empty(*self));
        }
        if Self::all(len).contains_range(self) {
            Ok(())
        } else {
            Err(RangeError::OutOfBounds { range: *self, len })
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeError::InvalidLiteral(s.to_string());
        let caps = literal_regex().captures(s.trim()).ok_or_else(invalid)?;
        let start = caps[1].parse::<i64>().map_err(|_| invalid())?;
        let end = caps[2].parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(start, end))
    }
}

impl IntoIterator for Range {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Positions of a [`Range`] in traversal order.
#[derive(Debug, Clone)]
pub struct RangeIter {
    range: Range,
    next: i64,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.next == self.range.end {
            return None;
        }
        let current = self.next;
        self.next = self.range.next(current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from((self.range.end - self.next).abs()).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeIter {}
