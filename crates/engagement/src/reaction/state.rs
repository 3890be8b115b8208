use std::collections::HashMap;

use ovation_shared::{ReactionCount, ReactionKind, ReactionSnapshot};

/// How many entries the reaction summary strip shows.
pub const TOP_REACTIONS: usize = 3;

/// Engine-side reaction state for one subject. `version` is a monotonic
/// stamp bumped by every mutation; in-flight gateway calls compare it
/// against the value their own optimistic apply produced to detect that
/// they have been superseded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReactionState {
    pub counts: HashMap<ReactionKind, u64>,
    pub current: Option<ReactionKind>,
    pub top: Vec<ReactionCount>,
    pub total: u64,
    pub version: u64,
}

impl ReactionState {
    pub fn as_snapshot(&self) -> ReactionSnapshot {
        ReactionSnapshot {
            counts: self.counts.clone(),
            current: self.current,
            top: self.top.clone(),
            total: self.total,
        }
    }

    /// Change to the total caused by moving between reactions, computed
    /// from the pre-mutation current reaction.
    pub(crate) fn delta(previous: Option<ReactionKind>, next: Option<ReactionKind>) -> i64 {
        match (previous, next) {
            (None, Some(_)) => 1,
            (Some(_), None) => -1,
            _ => 0,
        }
    }

    /// Optimistic local apply. Counts and total never go below zero.
    pub(crate) fn apply_local(&mut self, next: Option<ReactionKind>) {
        let previous = self.current;

        if let Some(kind) = previous {
            let count = self.counts.entry(kind).or_insert(0);
            *count = count.saturating_sub(1);
        }
        if let Some(kind) = next {
            *self.counts.entry(kind).or_insert(0) += 1;
        }

        self.current = next;
        self.total = match Self::delta(previous, next) {
            1 => self.total.saturating_add(1),
            -1 => self.total.saturating_sub(1),
            _ => self.total,
        };
        self.recompute_top();
        self.version += 1;
    }

    /// Replace every derived field wholesale. Used for mount-time seeding,
    /// server reconciliation and rollback alike; the caller decides which
    /// snapshot is the truth.
    pub(crate) fn restore(&mut self, snapshot: &ReactionSnapshot) {
        self.counts = snapshot.counts.clone();
        self.current = snapshot.current;
        self.top = snapshot.top.clone();
        self.total = snapshot.total;
        self.version += 1;
    }

    /// Top reactions: count descending, ties broken by the declaration
    /// order of [`ReactionKind`], zero counts excluded.
    pub(crate) fn recompute_top(&mut self) {
        let mut entries: Vec<ReactionCount> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(kind, count)| ReactionCount {
                kind: *kind,
                count: *count,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.kind.priority().cmp(&b.kind.priority()))
        });
        entries.truncate(TOP_REACTIONS);
        self.top = entries;
    }
}
