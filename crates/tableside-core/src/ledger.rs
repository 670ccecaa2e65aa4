//! # Order Ledger
//!
//! Per-table record of guests and what each of them ordered.
//!
//! ## Ledger Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TableLedger (table 4)                                                  │
//! │                                                                         │
//! │  guests, in the order they were first seen                              │
//! │  ├── K1 ─► [ 2× Coffee @ 1.5000 ] [ 1× Cake @ 3.0000 ]                  │
//! │  ├── K2 ─► [ ]                     ← seated, nothing ordered yet        │
//! │  └── K3 ─► [ ]                     ← paid: items cleared, guest kept    │
//! │                                                                         │
//! │  total()          exact sum of every line total (PreciseMoney)          │
//! │  guest_total(K1)  exact sum of K1's lines, rounded to cents (Money)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Guest totals are rounded one guest at a time, so the rounded totals of a
//! table need not add up to `total()` rounded. Tests below pin the exact
//! behaviour.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, PreciseMoney};
use crate::types::{GuestId, TableNumber};
use crate::validation::{validate_item_name, validate_quantity, ValidationResult};

// =============================================================================
// Order Item
// =============================================================================

/// One line on a guest's bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub guest: GuestId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: PreciseMoney,
}

impl OrderItem {
    /// Builds a validated order line.
    ///
    /// The name is trimmed; quantity must be in range and the unit price
    /// must not be negative. A zero price is accepted (complimentary items).
    pub fn new(
        guest: GuestId,
        name: &str,
        quantity: i64,
        unit_price: PreciseMoney,
    ) -> ValidationResult<Self> {
        let name = validate_item_name(name)?;
        validate_quantity(quantity)?;

        if unit_price.is_negative() {
            return Err(ValidationError::Negative {
                field: "unit price".to_string(),
            });
        }

        Ok(OrderItem {
            guest,
            name,
            quantity,
            unit_price,
        })
    }

    /// `quantity × unit_price`, unrounded.
    #[inline]
    pub fn line_total(&self) -> PreciseMoney {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A guest's place in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GuestEntry {
    id: GuestId,
    items: Vec<OrderItem>,
}

impl GuestEntry {
    fn exact_total(&self) -> PreciseMoney {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// Flattened order line for the order grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRow {
    pub guest: GuestId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: PreciseMoney,
    pub line_total: PreciseMoney,
}

// =============================================================================
// Table Ledger
// =============================================================================

/// Guests and orders of one table for the current session.
///
/// ## Invariants
/// - Every item is stored under the guest it names
/// - Guests keep first-seen order; items keep insertion order per guest
/// - Paying clears a guest's items but never removes the guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLedger {
    table: TableNumber,
    guests: Vec<GuestEntry>,
}

impl TableLedger {
    pub fn new(table: TableNumber) -> Self {
        TableLedger {
            table,
            guests: Vec::new(),
        }
    }

    #[inline]
    pub fn table(&self) -> TableNumber {
        self.table
    }

    fn entry(&self, guest: &GuestId) -> Option<&GuestEntry> {
        self.guests.iter().find(|entry| &entry.id == guest)
    }

    fn entry_or_create(&mut self, guest: &GuestId) -> &mut GuestEntry {
        let index = match self.guests.iter().position(|entry| &entry.id == guest) {
            Some(index) => index,
            None => {
                self.guests.push(GuestEntry {
                    id: guest.clone(),
                    items: Vec::new(),
                });
                self.guests.len() - 1
            }
        };
        &mut self.guests[index]
    }

    /// Seats a guest. Returns `false` if the guest was already known.
    pub fn add_guest(&mut self, guest: GuestId) -> bool {
        if self.has_guest(&guest) {
            return false;
        }
        self.guests.push(GuestEntry {
            id: guest,
            items: Vec::new(),
        });
        true
    }

    /// Appends an item to its guest's list, seating the guest if needed.
    pub fn add_order(&mut self, item: OrderItem) {
        let guest = item.guest.clone();
        self.entry_or_create(&guest).items.push(item);
    }

    pub fn has_guest(&self, guest: &GuestId) -> bool {
        self.entry(guest).is_some()
    }

    pub fn has_guests(&self) -> bool {
        !self.guests.is_empty()
    }

    /// Known guests in first-seen order.
    pub fn guests(&self) -> impl Iterator<Item = &GuestId> {
        self.guests.iter().map(|entry| &entry.id)
    }

    /// A guest's items in order; empty for unknown or paid guests.
    pub fn items_for(&self, guest: &GuestId) -> &[OrderItem] {
        self.entry(guest)
            .map(|entry| entry.items.as_slice())
            .unwrap_or(&[])
    }

    /// Exact sum of all line totals at the table.
    pub fn total(&self) -> PreciseMoney {
        self.guests.iter().map(GuestEntry::exact_total).sum()
    }

    /// A guest's total rounded half to even. Zero for unknown guests.
    pub fn guest_total(&self, guest: &GuestId) -> Money {
        self.entry(guest)
            .map(|entry| entry.exact_total().round_to_cents())
            .unwrap_or_default()
    }

    /// Rounded total of every known guest, zero balances included.
    pub fn totals_by_guest(&self) -> Vec<(GuestId, Money)> {
        self.guests
            .iter()
            .map(|entry| (entry.id.clone(), entry.exact_total().round_to_cents()))
            .collect()
    }

    /// Guests whose rounded total is above zero, in first-seen order.
    pub fn payable_guests(&self) -> Vec<GuestId> {
        self.guests
            .iter()
            .filter(|entry| entry.exact_total().round_to_cents().is_positive())
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// Clears a guest's items. The guest stays seated; unknown guests are ignored.
    pub fn mark_guest_paid(&mut self, guest: &GuestId) {
        if let Some(entry) = self.guests.iter_mut().find(|entry| &entry.id == guest) {
            entry.items.clear();
        }
    }

    /// All order lines, guest by guest.
    pub fn rows(&self) -> Vec<OrderRow> {
        self.guests
            .iter()
            .flat_map(|entry| entry.items.iter())
            .map(|item| OrderRow {
                guest: item.guest.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(id: &str) -> GuestId {
        GuestId::new(id).unwrap()
    }

    fn ledger() -> TableLedger {
        TableLedger::new(TableNumber::new(1).unwrap())
    }

    fn item(guest_id: &str, name: &str, qty: i64, units: i64) -> OrderItem {
        OrderItem::new(guest(guest_id), name, qty, PreciseMoney::from_units(units)).unwrap()
    }

    #[test]
    fn test_add_guest_is_idempotent() {
        let mut ledger = ledger();
        assert!(ledger.add_guest(guest("K1")));
        assert!(!ledger.add_guest(guest("K1")));
        assert_eq!(ledger.guests().count(), 1);
    }

    #[test]
    fn test_add_order_seats_unknown_guest() {
        let mut ledger = ledger();
        ledger.add_order(item("K2", "Tea", 1, 20_000));

        assert!(ledger.has_guest(&guest("K2")));
        assert_eq!(ledger.items_for(&guest("K2")).len(), 1);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut ledger = ledger();
        ledger.add_order(item("K1", "Soup", 1, 45_000));
        ledger.add_order(item("K2", "Water", 1, 10_000));
        ledger.add_order(item("K1", "Bread", 2, 5_000));

        let names: Vec<_> = ledger
            .items_for(&guest("K1"))
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Soup", "Bread"]);

        let rows: Vec<_> = ledger.rows().into_iter().map(|r| r.name).collect();
        assert_eq!(rows, vec!["Soup", "Bread", "Water"]);
    }

    #[test]
    fn test_coffee_and_cake_total() {
        let mut ledger = ledger();
        ledger.add_order(item("K1", "Coffee", 2, 15_000));
        ledger.add_order(item("K1", "Cake", 1, 30_000));

        assert_eq!(ledger.guest_total(&guest("K1")), Money::from_cents(600));
        assert_eq!(ledger.total(), PreciseMoney::from_units(60_000));
    }

    #[test]
    fn test_guest_total_rounds_half_to_even() {
        let mut ledger = ledger();
        ledger.add_order(item("A", "x", 1, 50)); // 0.0050
        ledger.add_order(item("B", "x", 1, 150)); // 0.0150
        ledger.add_order(item("C", "x", 1, 250)); // 0.0250
        ledger.add_order(item("D", "x", 1, 251)); // 0.0251

        assert_eq!(ledger.guest_total(&guest("A")), Money::from_cents(0));
        assert_eq!(ledger.guest_total(&guest("B")), Money::from_cents(2));
        assert_eq!(ledger.guest_total(&guest("C")), Money::from_cents(2));
        assert_eq!(ledger.guest_total(&guest("D")), Money::from_cents(3));
    }

    #[test]
    fn test_per_guest_rounding_differs_from_total() {
        let mut ledger = ledger();
        for id in ["K1", "K2", "K3"] {
            ledger.add_order(item(id, "Mint", 1, 50)); // 0.0050 each
        }

        let rounded_sum: Money = ledger.totals_by_guest().into_iter().map(|(_, t)| t).sum();
        assert_eq!(rounded_sum, Money::zero());
        assert_eq!(ledger.total(), PreciseMoney::from_units(150));
        assert_eq!(ledger.total().round_to_cents(), Money::from_cents(2));
    }

    #[test]
    fn test_total_is_sum_of_unrounded_guest_sums() {
        let mut ledger = ledger();
        ledger.add_order(item("K1", "Wine", 3, 33_333)); // 9.9999
        ledger.add_order(item("K2", "Wine", 1, 33_333)); // 3.3333

        assert_eq!(ledger.total(), PreciseMoney::from_units(133_332));
        assert_eq!(ledger.guest_total(&guest("K1")), Money::from_cents(1000));
        assert_eq!(ledger.guest_total(&guest("K2")), Money::from_cents(333));
    }

    #[test]
    fn test_mark_guest_paid_keeps_guest() {
        let mut ledger = ledger();
        ledger.add_order(item("K1", "Coffee", 2, 15_000));
        ledger.add_order(item("K2", "Cake", 1, 30_000));

        ledger.mark_guest_paid(&guest("K1"));

        assert!(ledger.has_guest(&guest("K1")));
        assert_eq!(ledger.guest_total(&guest("K1")), Money::zero());
        assert_eq!(ledger.guest_total(&guest("K2")), Money::from_cents(300));
        assert_eq!(ledger.payable_guests(), vec![guest("K2")]);

        // Unknown guest is a no-op
        ledger.mark_guest_paid(&guest("K9"));
        assert_eq!(ledger.guests().count(), 2);
    }

    #[test]
    fn test_reorder_after_payment() {
        let mut ledger = ledger();
        ledger.add_order(item("K1", "Coffee", 1, 15_000));
        ledger.mark_guest_paid(&guest("K1"));
        ledger.add_order(item("K1", "Coffee", 1, 15_000));

        assert_eq!(ledger.guest_total(&guest("K1")), Money::from_cents(150));
    }

    #[test]
    fn test_payable_guests_excludes_zero_balances() {
        let mut ledger = ledger();
        ledger.add_guest(guest("K1"));
        ledger.add_order(item("K2", "Water", 1, 0));
        ledger.add_order(item("K3", "Tea", 1, 20_000));

        assert_eq!(ledger.payable_guests(), vec![guest("K3")]);
    }

    #[test]
    fn test_order_item_validation() {
        let price = PreciseMoney::from_units(10_000);
        assert!(OrderItem::new(guest("K1"), "  ", 1, price).is_err());
        assert!(OrderItem::new(guest("K1"), "Tea", 0, price).is_err());
        assert!(matches!(
            OrderItem::new(guest("K1"), "Tea", 1, PreciseMoney::from_units(-1)),
            Err(ValidationError::Negative { .. })
        ));
        assert_eq!(
            OrderItem::new(guest("K1"), " Tea ", 1, price).unwrap().name,
            "Tea"
        );
    }
}
