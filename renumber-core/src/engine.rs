//! The rename engine.
//!
//! A [`Renamer`] owns a [`Directory`] and the [`Snapshot`] of it. Every
//! operation validates against the snapshot, renames through the
//! directory and finishes with a fresh snapshot, so positions always
//! describe what is on disk.

use crate::collision;
use crate::directory::Directory;
use crate::error::{RangeError, RenumberError, RenumberResult};
use crate::filename::{self, FlagKind};
use crate::plan::{Move, RenamePlan, RenameStep};
use crate::range::Range;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a shift deals with a file it cannot renumber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Rename one file at a time and stop at the first file that is not
    /// numbered. Renames already done stay done.
    #[default]
    BestEffort,
    /// Work out every new name first and refuse the whole batch if any
    /// file cannot be renumbered.
    PlanThenCommit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub strategy: Strategy,
    /// Pad every name to the longest width after a shift or insert.
    pub normalize: bool,
    /// Prefix for names files are parked under while a cycle is broken.
    pub temp_prefix: String,
    pub include_hidden: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            normalize: true,
            temp_prefix: ".renumber-tmp".to_string(),
            include_hidden: false,
        }
    }
}

/// Renames performed by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub renames: Vec<RenameStep>,
    /// Renames done by the normalization pass that followed.
    pub normalized: Vec<RenameStep>,
}

impl Outcome {
    pub fn total(&self) -> usize {
        self.renames.len() + self.normalized.len()
    }
}

/// One flag group applied by [`Renamer::parse_and_increment_groups`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub start: usize,
    pub end: usize,
    pub value: i64,
    pub flag: FlagKind,
    pub flag_count: usize,
    /// Offset applied to the shifted span.
    pub amount: i64,
    pub shifted: Outcome,
    pub stripped: Vec<RenameStep>,
}

pub struct Renamer<D: Directory> {
    dir: D,
    snapshot: Snapshot,
    options: EngineOptions,
}

impl<D: Directory> Renamer<D> {
    pub fn new(dir: D, options: EngineOptions) -> RenumberResult<Self> {
        let mut renamer = Self {
            snapshot: Snapshot::new(options.include_hidden).keeping(&options.temp_prefix),
            dir,
            options,
        };
        renamer.refresh()?;
        Ok(renamer)
    }

    pub fn directory(&self) -> &D {
        &self.dir
    }

    pub fn into_directory(self) -> D {
        self.dir
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Re-list the directory.
    pub fn refresh(&mut self) -> RenumberResult<&[String]> {
        self.snapshot.refresh(&self.dir)
    }

    pub fn longest_name_width(&self) -> usize {
        self.snapshot.longest_width()
    }

    pub fn is_valid_range_literal(s: &str) -> bool {
        Range::is_literal(s)
    }

    /// Switch to another directory and list it. On failure the current
    /// directory and snapshot are kept.
    pub fn change_directory(&mut self, path: &Path) -> RenumberResult<&[String]> {
        self.dir.set_current_location(path)?;
        tracing::info!("Changed directory to {}", self.dir.current_location().display());
        self.refresh()
    }

    /// Whether shifting `range` by `amount` is safe right now.
    pub fn check_shift(&self, range: Range, amount: i64) -> bool {
        collision::check_shift(&self.snapshot, range, amount)
    }

    /// Add `amount` to the number of every file in `range`.
    ///
    /// Collisions with files outside the range are refused before anything
    /// is renamed. A file that is not numbered is refused up front under
    /// [`Strategy::PlanThenCommit`]; under [`Strategy::BestEffort`] the
    /// shift runs up to that file and stops there with
    /// [`RenumberError::NotNumeric`].
    pub fn shift(&mut self, range: Range, amount: i64) -> RenumberResult<Outcome> {
        range.validate(self.snapshot.len())?;
        if amount == 0 {
            return Ok(Outcome::default());
        }

        match collision::scan_shift(&self.snapshot, range, amount) {
            Some(e @ RenumberError::Collision { .. }) => return Err(e),
            Some(e) if self.options.strategy == Strategy::PlanThenCommit => return Err(e),
            _ => {},
        }

        let renames = match self.options.strategy {
            Strategy::BestEffort => self.shift_one_by_one(range, amount)?,
            Strategy::PlanThenCommit => {
                let moves = self.shift_moves(range, amount)?;
                self.commit(moves)?
            },
        };
        tracing::info!("Shifted {} files in {} by {}", renames.len(), range, amount);

        let normalized = self.auto_normalize()?;
        Ok(Outcome {
            renames,
            normalized,
        })
    }

    fn shift_one_by_one(&mut self, range: Range, amount: i64) -> RenumberResult<Vec<RenameStep>> {
        let order: Vec<String> = self
            .snapshot
            .names_in(collision::traversal(range, amount))
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut done = Vec::with_capacity(order.len());
        for name in order {
            let renamed = filename::apply_offset(&name, amount).and_then(|to| {
                self.dir.rename_entry(&name, &to)?;
                Ok(to)
            });
            match renamed {
                Ok(to) => {
                    tracing::debug!("Renamed {} -> {}", name, to);
                    done.push(RenameStep::new(name, to));
                },
                Err(e) => {
                    tracing::warn!("Shift stopped at {} after {} renames: {}", name, done.len(), e);
                    self.refresh()?;
                    return Err(e);
                },
            }
        }
        self.refresh()?;
        Ok(done)
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn shift_moves(&self, range: Range, amount: i64) -> RenumberResult<Vec<Move>> {
        collision::traversal(range, amount)
            .iter()
            .filter_map(|i| self.snapshot.get(i).map(|name| (i as usize, name)))
            .map(|(i, name)| filename::apply_offset(name, amount).map(|to| Move::new(name, to, i)))
            .collect()
    }

    /// Move the files in `range` so the block ends up at `destination`,
    /// sliding the files in between over to close the gap.
    ///
    /// The names themselves stay put: each file takes over the number of
    /// the position it lands on, keeping its own flags and suffix.
    pub fn insert(&mut self, range: Range, destination: i64) -> RenumberResult<Outcome> {
        let len = self.snapshot.len();
        range.validate(len)?;
        if !Range::all(len).contains(destination) {
            return Err(RangeError::PositionOutOfBounds {
                position: destination,
                len,
            }
            .into());
        }
        if range.contains(destination) {
            return Err(RenumberError::SameRange { destination, range });
        }

        let names = self.snapshot.names();
        let moves: Vec<Move> = insertion_order(range, destination, len)
            .into_iter()
            .enumerate()
            .map(|(slot, from)| {
                let file = &names[from];
                Move::new(file.as_str(), filename::renumber_as(file, &names[slot]), from)
            })
            .collect();

        let renames = self.commit(moves)?;
        tracing::info!("Inserted {} at {} with {} renames", range, destination, renames.len());

        let normalized = self.auto_normalize()?;
        Ok(Outcome {
            renames,
            normalized,
        })
    }

    /// Zero-pad every numbered name to `width` digits.
    pub fn normalize(&mut self, width: usize) -> RenumberResult<Vec<RenameStep>> {
        let moves: Vec<Move> = self
            .snapshot
            .indexed()
            .filter_map(|(i, name)| {
                let padded = filename::normalize(name, width);
                (padded != name).then(|| Move::new(name, padded, i))
            })
            .collect();
        if moves.is_empty() {
            return Ok(Vec::new());
        }
        let renames = self.commit(moves)?;
        tracing::info!("Normalized {} names to width {}", renames.len(), width);
        Ok(renames)
    }

    /// [`Self::normalize`] to the widest number currently present.
    pub fn normalize_all(&mut self) -> RenumberResult<Vec<RenameStep>> {
        self.normalize(self.snapshot.longest_width())
    }

    fn auto_normalize(&mut self) -> RenumberResult<Vec<RenameStep>> {
        if self.options.normalize {
            self.normalize_all()
        } else {
            Ok(Vec::new())
        }
    }

    /// Apply pending `+`/`-` markers.
    ///
    /// Each run of adjacent files with the same number and the same flag
    /// run is a group. A `+` group of `n` markers shifts itself and every
    /// numbered file after it up by `n`; a `-` group shifts itself and
    /// every file before it down by `n`. The markers are then removed.
    #[allow(clippy::cast_possible_wrap)]
    pub fn parse_and_increment_groups(&mut self) -> RenumberResult<Vec<GroupReport>> {
        let mut reports = Vec::new();
        let mut from = 0;
        while let Some(group) = self.next_group(from) {
            let count = group.flag_count as i64;
            let (span, amount) = match group.flag {
                FlagKind::Minus => (Range::new(0, group.end), -count),
                _ => (Range::new(group.start, self.numbered_len()), count),
            };
            tracing::debug!("Group {}..{} shifts {} by {}", group.start, group.end, span, amount);

            let shifted = self.shift(span, amount)?;
            let stripped = self.strip_flags_in(Range::new(group.start, group.end))?;

            reports.push(GroupReport {
                start: position(group.start),
                end: position(group.end),
                value: group.value,
                flag: group.flag,
                flag_count: group.flag_count,
                amount,
                shifted,
                stripped,
            });
            from = group.end;
        }
        tracing::info!("Applied {} flag groups", reports.len());
        Ok(reports)
    }

    fn strip_flags_in(&mut self, range: Range) -> RenumberResult<Vec<RenameStep>> {
        let moves: Vec<Move> = range
            .iter()
            .filter_map(|i| {
                let name = self.snapshot.get(i)?;
                let bare = filename::strip_flags(name)?;
                Some(Move::new(name, bare, position(i)))
            })
            .collect();
        self.commit(moves)
    }

    /// Number of leading entries that are numbered.
    #[allow(clippy::cast_possible_wrap)]
    fn numbered_len(&self) -> i64 {
        self.snapshot
            .names()
            .iter()
            .take_while(|name| filename::parse(name).is_ok())
            .count() as i64
    }

    /// The first flag group starting at or after position `from`.
    #[allow(clippy::cast_possible_wrap)]
    fn next_group(&self, from: i64) -> Option<FlagGroup> {
        let names = self.snapshot.names();
        let mut start = position(from);
        while start < names.len() {
            let Ok(head) = filename::parse(&names[start]) else {
                return None;
            };
            if head.flag == FlagKind::None {
                start += 1;
                continue;
            }
            let same = |name: &str| {
                filename::parse(name).is_ok_and(|p| {
                    p.signed() == head.signed() && p.flag == head.flag && p.flag_count == head.flag_count
                })
            };
            let len = names[start..].iter().take_while(|name| same(name.as_str())).count();
            return Some(FlagGroup {
                start: start as i64,
                end: (start + len) as i64,
                value: head.signed(),
                flag: head.flag,
                flag_count: head.flag_count,
            });
        }
        None
    }

    /// Plan and run a batch of moves, then re-list.
    fn commit(&mut self, moves: Vec<Move>) -> RenumberResult<Vec<RenameStep>> {
        let existing = self.dir.list_entries()?;
        let plan = RenamePlan::build(moves, &existing, &self.options.temp_prefix)?;
        if plan.temporaries() > 0 {
            tracing::debug!("Breaking cycles with {} temporary names", plan.temporaries());
        }
        let result = plan.execute(&mut self.dir);
        let refreshed = self.snapshot.refresh(&self.dir).map(|_| ());
        let steps = result?;
        refreshed?;
        Ok(steps)
    }
}

struct FlagGroup {
    start: i64,
    end: i64,
    value: i64,
    flag: FlagKind,
    flag_count: usize,
}

fn position(i: i64) -> usize {
    usize::try_from(i).unwrap_or(0)
}

/// Original position of the file that lands on each slot when the block
/// `range` is moved to end at (moving right) or start at (moving left)
/// `destination`.
fn insertion_order(range: Range, destination: i64, len: usize) -> Vec<usize> {
    let (low, high, dest) = (position(range.low()), position(range.high()), position(destination));
    if dest > high {
        (0..low)
            .chain(high + 1..=dest)
            .chain(low..=high)
            .chain(dest + 1..len)
            .collect()
    } else {
        (0..dest)
            .chain(low..=high)
            .chain(dest..low)
            .chain(high + 1..len)
            .collect()
    }
}
