//! # Floor Commands Module
//!
//! One function per UI action. The presentation layer calls these and gets
//! back serialisable DTOs or an [`ApiError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, shared helpers)
//! ├── layout.rs   ◄─── Table placement, map clicks, layout save/load
//! ├── order.rs    ◄─── Guests and orders of the selected table
//! ├── payment.rs  ◄─── Settlement dialog: guest, method, cash, card
//! └── bill.rs     ◄─── Split and shared bill text
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │  ──────────────────                                                     │
//! │  "Add order" dialog returns ("K1", "Coffee", "2", "1.50")               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::order::add_order(                                            │
//! │      &selection,        ◄── only the state this command needs           │
//! │      &ledgers,                                                          │
//! │      Some("K1"), "Coffee", "2", "1.50")                                 │
//! │         │                                                               │
//! │         │ raw text is parsed here, once                                 │
//! │         ▼                                                               │
//! │  tableside-core ─► Result<TableOrders, ApiError>                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every ledger, payment and bill command works on the selected table.

pub mod bill;
pub mod layout;
pub mod order;
pub mod payment;

use tableside_core::TableNumber;

use crate::error::ApiError;
use crate::state::SelectionState;

/// The table the operator selected on the map.
pub(crate) fn selected_table(selection: &SelectionState) -> Result<TableNumber, ApiError> {
    selection.selected().ok_or_else(ApiError::no_table_selected)
}
