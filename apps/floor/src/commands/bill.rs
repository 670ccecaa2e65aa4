//! # Bill Commands
//!
//! Whole-table bill summaries for the selected table.

use tracing::debug;

use super::selected_table;
use crate::error::ApiError;
use crate::state::{ConfigState, LedgerState, SelectionState};
use tableside_core::bill::{shared_bill_text, split_bill_text};

/// One line per guest plus the table total.
pub fn split_bill(
    selection: &SelectionState,
    ledgers: &LedgerState,
    config: &ConfigState,
) -> Result<String, ApiError> {
    debug!("split_bill command");
    let table = selected_table(selection)?;
    ledgers
        .with_ledger(table, |ledger| split_bill_text(ledger, &config.currency_symbol))
        .ok_or_else(|| ApiError::not_found("Table", table))
}

/// The table total as one line.
pub fn shared_bill(
    selection: &SelectionState,
    ledgers: &LedgerState,
    config: &ConfigState,
) -> Result<String, ApiError> {
    debug!("shared_bill command");
    let table = selected_table(selection)?;
    ledgers
        .with_ledger(table, |ledger| shared_bill_text(ledger, &config.currency_symbol))
        .ok_or_else(|| ApiError::not_found("Table", table))
}
