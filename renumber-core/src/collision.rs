//! Pre-flight check for shifts.
//!
//! Runs before anything is renamed and never touches the directory.

use crate::error::RenumberError;
use crate::filename::{self, NameKey};
use crate::range::Range;
use crate::snapshot::Snapshot;
use std::collections::HashMap;

/// The order a shift visits `range` in: away from the destination, so a
/// file is only ever renamed onto a slot that has already been vacated.
pub fn traversal(range: Range, amount: i64) -> Range {
    range.oriented(amount < 0)
}

/// Positions a shift of `range` by `amount` could collide with.
///
/// Files are in directory order, so a positive shift can only reach the
/// files after the range and a negative shift the files before it.
#[allow(clippy::cast_possible_wrap)]
pub fn boundary_region(range: Range, amount: i64, len: usize) -> Range {
    let len = len as i64;
    match amount.signum() {
        1 => Range::new(range.high() + 1, len.max(range.high() + 1)),
        -1 => Range::new(0, range.low()),
        _ => Range::new(0, 0),
    }
}

/// First problem a shift would hit, in traversal order.
///
/// `None` means every file in the range can be renamed without landing on
/// a name held by a file outside the range, and no two files in the range
/// end up with the same name.
pub fn scan_shift(snapshot: &Snapshot, range: Range, amount: i64) -> Option<RenumberError> {
    if amount == 0 || range.is_empty() {
        return None;
    }

    let region = boundary_region(range, amount, snapshot.len());
    let occupied: HashMap<NameKey, &str> = snapshot
        .names_in(region)
        .into_iter()
        .filter_map(|name| filename::parse(name).ok().map(|p| (p.key(), name)))
        .collect();

    let width = snapshot.longest_width();
    let mut landed: HashMap<NameKey, &str> = HashMap::new();
    for name in snapshot.names_in(traversal(range, amount)) {
        let parsed = match filename::parse(name) {
            Ok(parsed) => parsed,
            Err(e) => return Some(e),
        };
        let Some(shifted) = parsed.offset(amount) else {
            return Some(RenumberError::Overflow {
                name: name.to_string(),
                amount,
            });
        };
        let key = shifted.key();
        if let Some(existing) = occupied.get(&key).or_else(|| landed.get(&key)) {
            return Some(RenumberError::Collision {
                name: name.to_string(),
                target: shifted.render(width),
                existing: (*existing).to_string(),
            });
        }
        landed.insert(key, name);
    }
    None
}

/// Whether shifting `range` by `amount` is safe.
///
/// Fails on any collision with a file outside the range and on any file in
/// the range that is not numbered.
pub fn check_shift(snapshot: &Snapshot, range: Range, amount: i64) -> bool {
    scan_shift(snapshot, range, amount).is_none()
}
