//! # Selection State
//!
//! Which table the operator is working on, and a table waiting to be
//! dropped on the map.
//!
//! ```text
//! begin_table_placement(7, sides) ──► pending = Some(7, sides)
//!                                            │
//! select_table_at(x, y) ─────────────────────┤
//!                                            ▼
//!              pending? ── yes ──► place 7 at (x, y), selected = 7, pending = None
//!                 │
//!                 no ──► hit-test ── hit ──► selected = hit
//!                                    miss ─► selection unchanged
//! ```

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tableside_core::{Sides, TableNumber};

/// A table announced by the placement dialog but not yet on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingPlacement {
    pub number: TableNumber,
    pub sides: Sides,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected: Option<TableNumber>,
    pub pending: Option<PendingPlacement>,
}

#[derive(Debug, Default)]
pub struct SelectionState {
    inner: Mutex<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with write access to the selection.
    pub fn with_selection_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Selection) -> R,
    {
        let mut selection = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut selection)
    }

    pub fn snapshot(&self) -> Selection {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn selected(&self) -> Option<TableNumber> {
        self.snapshot().selected
    }

    pub fn select(&self, table: TableNumber) {
        self.with_selection_mut(|s| s.selected = Some(table));
    }

    pub fn arm_placement(&self, pending: PendingPlacement) {
        self.with_selection_mut(|s| s.pending = Some(pending));
    }

    /// Removes and returns the pending placement, if any.
    pub fn take_pending(&self) -> Option<PendingPlacement> {
        self.with_selection_mut(|s| s.pending.take())
    }
}
