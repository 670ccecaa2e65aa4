//! Bill summaries for the whole table.

use crate::ledger::TableLedger;

/// Per-guest totals followed by the table total.
///
/// Every known guest is listed, including those with nothing left to pay.
/// The closing total is the exact table total rounded once, so it can
/// differ from the sum of the lines above it.
pub fn split_bill_text(ledger: &TableLedger, currency: &str) -> String {
    let mut lines = vec!["Split bill:".to_string()];
    for (guest, total) in ledger.totals_by_guest() {
        lines.push(format!("- {}: {} {}", guest, total, currency));
    }
    lines.push(format!(
        "Total: {} {}",
        ledger.total().round_to_cents(),
        currency
    ));
    lines.join("\n")
}

/// One line with the table total.
pub fn shared_bill_text(ledger: &TableLedger, currency: &str) -> String {
    format!(
        "Shared bill for the whole table: {} {}",
        ledger.total().round_to_cents(),
        currency
    )
}
