//! # Ledger State
//!
//! One [`TableLedger`] per table, each behind its own lock.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutex<BTreeMap<TableNumber, Arc<Mutex<TableLedger>>>>                  │
//! │        │                              │                                 │
//! │        │ held only to look up         │ held for the whole mutation     │
//! │        │ or insert a table            │ of ONE table                    │
//! │        ▼                              ▼                                 │
//! │  table 1 ─► Arc<Mutex<TableLedger>>   add_order on table 1 never        │
//! │  table 2 ─► Arc<Mutex<TableLedger>>   waits for settlement on table 2   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledgers are created only through [`LedgerState::get_or_create`]. Reads
//! never create one.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tableside_core::{TableLedger, TableNumber};

#[derive(Debug, Default)]
pub struct LedgerState {
    tables: Mutex<BTreeMap<TableNumber, Arc<Mutex<TableLedger>>>>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table's ledger, creating an empty one on first use.
    pub fn get_or_create(&self, table: TableNumber) -> Arc<Mutex<TableLedger>> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            tables
                .entry(table)
                .or_insert_with(|| Arc::new(Mutex::new(TableLedger::new(table)))),
        )
    }

    /// Returns the table's ledger if one exists.
    pub fn get(&self, table: TableNumber) -> Option<Arc<Mutex<TableLedger>>> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables.get(&table).map(Arc::clone)
    }

    /// Ensures every listed table has a ledger.
    pub fn ensure_all(&self, numbers: impl IntoIterator<Item = TableNumber>) {
        for table in numbers {
            self.get_or_create(table);
        }
    }

    pub fn contains(&self, table: TableNumber) -> bool {
        self.get(table).is_some()
    }

    /// Executes a function with read access to an existing ledger.
    pub fn with_ledger<F, R>(&self, table: TableNumber, f: F) -> Option<R>
    where
        F: FnOnce(&TableLedger) -> R,
    {
        let ledger = self.get(table)?;
        let guard = ledger.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&guard))
    }

    /// Executes a function with write access to an existing ledger.
    ///
    /// The table's lock is held for the whole call, so concurrent callers
    /// on the same table are serialised and no order is lost.
    pub fn with_ledger_mut<F, R>(&self, table: TableNumber, f: F) -> Option<R>
    where
        F: FnOnce(&mut TableLedger) -> R,
    {
        let ledger = self.get(table)?;
        let mut guard = ledger.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut guard))
    }
}
