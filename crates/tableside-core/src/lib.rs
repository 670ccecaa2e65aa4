//! # tableside-core: Pure Business Logic for Tableside
//!
//! Table geometry, the floor layout, per-guest order ledgers and payment
//! settlement. Nothing in this crate touches the filesystem or the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tableside Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (floor map, dialogs)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Floor Commands (apps/floor)                  │   │
//! │  │    place_table, select_table_at, add_order, tender_cash, ...   │   │
//! │  └─────────────┬───────────────────────────────┬───────────────────┘   │
//! │                │                               │                        │
//! │  ┌─────────────▼───────────────────┐  ┌────────▼────────────────────┐  │
//! │  │   ★ tableside-core (THIS) ★     │  │   tableside-store           │  │
//! │  │                                 │  │   layout file, config       │  │
//! │  │  geometry  layout   ledger      │  └─────────────────────────────┘  │
//! │  │  settlement  receipt  bill      │                                   │
//! │  │  money  validation  types       │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • PURE FUNCTIONS        │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Footprints, bounds, clockwise seat positions, hit-testing
//! - [`layout`] - Placed tables and their JSON document form
//! - [`ledger`] - Guests, order items and totals per table
//! - [`settlement`] - Cash/card payment state machine
//! - [`receipt`] - Receipt snapshots and tender lines
//! - [`bill`] - Split and shared bill text
//! - [`money`] - Integer money types (no floating point)
//! - [`validation`] - The text → typed value boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tableside_core::{GuestId, OrderItem, Settlement, TableLedger, TableNumber, PaymentMethod};
//! use tableside_core::validation::parse_price;
//!
//! let k1 = GuestId::new("K1").unwrap();
//! let mut ledger = TableLedger::new(TableNumber::new(1).unwrap());
//! ledger.add_order(OrderItem::new(k1.clone(), "Coffee", 2, parse_price("1.50").unwrap()).unwrap());
//! ledger.add_order(OrderItem::new(k1.clone(), "Cake", 1, parse_price("3.00").unwrap()).unwrap());
//!
//! let mut settlement = Settlement::begin(&ledger).unwrap();
//! settlement.select_guest(&ledger, &k1).unwrap();
//! settlement.choose_method(PaymentMethod::Cash).unwrap();
//! let settled = settlement.tender_cash(&mut ledger, "10.00").unwrap();
//!
//! assert!(settled.render("€").ends_with("Change: 4.00 €"));
//! assert!(ledger.guest_total(&k1).is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod ledger;
pub mod money;
pub mod receipt;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, LayoutError, ValidationError};
pub use geometry::{Bounds, Footprint, Geometry, Seat};
pub use layout::{Layout, LayoutDocument, Placement, PlacementScheme, SidedPlacement};
pub use ledger::{OrderItem, OrderRow, TableLedger};
pub use money::{Money, PreciseMoney};
pub use receipt::{GuestReceipt, ReceiptLine, Tender};
pub use settlement::{Settled, Settlement, SettlementState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity on a single order line
///
/// ## Business Reason
/// Catches typos such as 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum seats along one side of a table.
pub const MAX_SEATS_PER_SIDE: u32 = 50;

/// Maximum length of a guest id, in characters.
pub const MAX_GUEST_ID_LEN: usize = 50;

/// Maximum length of an item name, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Largest unit price or cash amount accepted, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000;
