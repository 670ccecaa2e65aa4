//! # Order Commands
//!
//! Guests and orders of the selected table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_guest("K1") ──► ledger.add_guest          (repeat is a no-op)      │
//! │                                                                         │
//! │  add_order(guest?, name, qty text, price text)                          │
//! │     │ no table selected? ──► PRECONDITION_FAILED                        │
//! │     │ parse qty / price   ──► VALIDATION_ERROR                          │
//! │     │ table has no guests ──► PRECONDITION_FAILED                       │
//! │     ▼                                                                   │
//! │  ledger.add_order(item)   guest defaults to the first seated guest      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::selected_table;
use crate::error::ApiError;
use crate::state::{LedgerState, SelectionState};
use tableside_core::validation::{parse_price, parse_quantity};
use tableside_core::{
    CoreError, GuestId, Money, OrderItem, OrderRow, PreciseMoney, TableLedger, TableNumber,
};

/// A guest and what they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GuestSummary {
    pub guest: GuestId,
    pub total: Money,
}

/// Order grid of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TableOrders {
    pub table: TableNumber,
    pub guests: Vec<GuestSummary>,
    /// Guest by guest, items in the order they were taken
    pub rows: Vec<OrderRow>,
    /// Exact table total
    pub total: PreciseMoney,
    /// `total` rounded for display
    pub total_display: Money,
}

impl From<&TableLedger> for TableOrders {
    fn from(ledger: &TableLedger) -> Self {
        let total = ledger.total();
        TableOrders {
            table: ledger.table(),
            guests: ledger
                .totals_by_guest()
                .into_iter()
                .map(|(guest, total)| GuestSummary { guest, total })
                .collect(),
            rows: ledger.rows(),
            total,
            total_display: total.round_to_cents(),
        }
    }
}

/// Seats a guest at the selected table.
pub fn add_guest(
    selection: &SelectionState,
    ledgers: &LedgerState,
    guest_id: &str,
) -> Result<TableOrders, ApiError> {
    debug!(guest_id, "add_guest command");

    let table = selected_table(selection)?;
    let guest = GuestId::new(guest_id)?;

    let (added, orders) = ledgers
        .with_ledger_mut(table, |ledger| {
            let added = ledger.add_guest(guest.clone());
            (added, TableOrders::from(&*ledger))
        })
        .ok_or_else(|| ApiError::not_found("Table", table))?;

    if added {
        info!(table = %table, guest = %guest, "Guest seated");
    } else {
        debug!(table = %table, guest = %guest, "Guest already seated");
    }
    Ok(orders)
}

/// Takes an order at the selected table.
///
/// `guest` defaults to the first seated guest. Quantity and price arrive as
/// the text the operator typed.
pub fn add_order(
    selection: &SelectionState,
    ledgers: &LedgerState,
    guest: Option<&str>,
    name: &str,
    quantity: &str,
    price: &str,
) -> Result<TableOrders, ApiError> {
    debug!(?guest, name, quantity, price, "add_order command");

    let table = selected_table(selection)?;
    let guest = guest.map(GuestId::new).transpose()?;
    let quantity = parse_quantity(quantity)?;
    let unit_price = parse_price(price)?;

    let orders = ledgers
        .with_ledger_mut(table, |ledger| -> Result<TableOrders, ApiError> {
            let empty = CoreError::EmptyTable { table: table.get() };
            if !ledger.has_guests() {
                return Err(empty.into());
            }
            let guest = match guest {
                Some(guest) => guest,
                None => ledger.guests().next().cloned().ok_or(empty)?,
            };

            let item = OrderItem::new(guest, name, quantity, unit_price)?;
            info!(
                table = %table,
                guest = %item.guest,
                item = %item.name,
                quantity,
                "Order added"
            );
            ledger.add_order(item);
            Ok(TableOrders::from(&*ledger))
        })
        .ok_or_else(|| ApiError::not_found("Table", table))??;

    Ok(orders)
}

/// Order grid of the selected table.
pub fn table_orders(selection: &SelectionState, ledgers: &LedgerState) -> Result<TableOrders, ApiError> {
    debug!("table_orders command");

    let table = selected_table(selection)?;
    ledgers
        .with_ledger(table, |ledger| TableOrders::from(ledger))
        .ok_or_else(|| ApiError::not_found("Table", table))
}
