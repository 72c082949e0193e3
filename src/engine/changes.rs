//! Path-scoped change notifications.
//!
//! Every mutation records one `Change` naming the shallowest node whose
//! subtree it touched. The wizard shell drains the log after each input
//! event and re-renders only the views whose root path is an ancestor of a
//! changed path, instead of reacting to a blanket "document changed" signal.

use crate::fieldpath::FieldPath;

/// What kind of mutation produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A scalar value was written; the path is the scalar leaf.
    ValueSet,
    /// An element was appended; the path is the collection.
    ElementAppended,
    /// An element was removed; the path is the collection, since every
    /// trailing sibling shifted down one index.
    ElementRemoved,
}

/// One recorded mutation, scoped to the shallowest changed ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: FieldPath,
    pub kind: ChangeKind,
}

/// Accumulates changes between input events.
///
/// Mutations are applied strictly in the order the user issues them, and the
/// log preserves that order.
#[derive(Debug, Default)]
pub struct ChangeLog {
    pending: Vec<Change>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one change.
    pub fn record(&mut self, path: FieldPath, kind: ChangeKind) {
        self.pending.push(Change { path, kind });
    }

    /// Returns true if no changes are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes all pending changes, oldest first.
    pub fn drain(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.pending)
    }

    /// Returns true if any pending change falls inside the given subtree.
    pub fn touches(&self, subtree: &FieldPath) -> bool {
        self.pending
            .iter()
            .any(|change| change.path.starts_with(subtree) || subtree.starts_with(&change.path))
    }
}
