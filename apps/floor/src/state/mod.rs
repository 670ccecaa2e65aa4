//! # State Module
//!
//! Application state for the floor service, split by concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ LayoutState  │ │ LedgerState  │ │SelectionState│ │ PaymentState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Layout +     │ │ per-table    │ │ selected,    │ │ open         │   │
//! │  │ file path    │ │ Arc<Mutex<   │ │ pending      │ │ Settlement   │   │
//! │  │              │ │  TableLedger>│ │ placement    │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ┌──────────────┐                                                      │
//! │  │ ConfigState  │  geometry, placement scheme, currency (read-only)    │
//! │  └──────────────┘                                                      │
//! │                                                                         │
//! │  LOCK ORDER: payment → ledger. Every other command holds one lock at   │
//! │  a time.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod layout;
mod ledger;
mod payment;
mod selection;

pub use config::ConfigState;
pub use layout::{FloorLayout, LayoutState};
pub use ledger::LedgerState;
pub use payment::PaymentState;
pub use selection::{PendingPlacement, Selection, SelectionState};
