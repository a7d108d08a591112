//! Ordering a batch of renames so no step lands on an occupied name.
//!
//! A batch is a set of `from -> to` moves computed up front from positions.
//! Moves whose target is still held by another pending move wait for it.
//! When only cycles are left, one member of the cycle is parked under a
//! temporary name and finished once its target has been vacated.

use crate::directory::Directory;
use crate::error::{RenumberError, RenumberResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One requested move. `tag` identifies the file (usually its position)
/// and is embedded in temporary names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: String,
    pub to: String,
    pub tag: usize,
}

impl Move {
    pub fn new(from: impl Into<String>, to: impl Into<String>, tag: usize) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            tag,
        }
    }
}

/// A single rename as issued to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameStep {
    pub from: String,
    pub to: String,
}

impl RenameStep {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    steps: Vec<RenameStep>,
    temporaries: usize,
}

impl RenamePlan {
    /// Order `moves` so every step's target is free when it runs.
    ///
    /// `existing` lists every name currently in the directory, hidden ones
    /// included. A move onto a name held by a file that is not moving is
    /// rejected before anything is planned.
    pub fn build(moves: Vec<Move>, existing: &[String], temp_prefix: &str) -> RenumberResult<Self> {
        let mut pending: Vec<Move> = moves.into_iter().filter(|m| m.from != m.to).collect();
        let mut sources: HashSet<String> = pending.iter().map(|m| m.from.clone()).collect();
        let mut taken: HashSet<String> = existing.iter().cloned().collect();

        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for m in &pending {
            // Held by a file that stays put, or already claimed by another move
            let holder = if taken.contains(&m.to) && !sources.contains(&m.to) {
                Some(m.to.as_str())
            } else {
                claimed.insert(m.to.as_str(), m.from.as_str())
            };
            if let Some(existing) = holder {
                return Err(RenumberError::Collision {
                    name: m.from.clone(),
                    target: m.to.clone(),
                    existing: existing.to_string(),
                });
            }
        }
        taken.extend(pending.iter().map(|m| m.to.clone()));

        let mut plan = Self::default();
        while !pending.is_empty() {
            let before = pending.len();
            let mut i = 0;
            while i < pending.len() {
                if sources.contains(&pending[i].to) {
                    i += 1;
                    continue;
                }
                let m = pending.remove(i);
                sources.remove(&m.from);
                plan.steps.push(RenameStep::new(m.from, m.to));
            }

            if pending.len() == before {
                // Only cycles left: park the first file under a fresh name
                let m = pending.remove(0);
                let temp = unique_temp_name(temp_prefix, &m, &taken);
                taken.insert(temp.clone());
                sources.remove(&m.from);
                plan.steps.push(RenameStep::new(m.from, temp.clone()));
                plan.temporaries += 1;
                pending.push(Move::new(temp, m.to, m.tag));
            }
        }
        Ok(plan)
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of files that pass through a temporary name.
    pub fn temporaries(&self) -> usize {
        self.temporaries
    }

    /// Issue every step in order.
    ///
    /// Stops at the first failure without undoing earlier steps; files
    /// parked under temporary names at that point stay there.
    pub fn execute<D: Directory + ?Sized>(&self, dir: &mut D) -> RenumberResult<Vec<RenameStep>> {
        let mut done = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if let Err(e) = dir.rename_entry(&step.from, &step.to) {
                tracing::warn!(
                    "Rename plan stopped after {} of {} steps: {}",
                    done.len(),
                    self.steps.len(),
                    e
                );
                return Err(e);
            }
            tracing::debug!("Renamed {} -> {}", step.from, step.to);
            done.push(step.clone());
        }
        Ok(done)
    }
}

fn unique_temp_name(prefix: &str, m: &Move, taken: &HashSet<String>) -> String {
    let base = format!("{prefix}-{}-{}", m.tag, m.from);
    if !taken.contains(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{base}~{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(base)
}
