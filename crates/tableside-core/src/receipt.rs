//! # Receipts
//!
//! A receipt is a frozen copy of one guest's bill. It is taken before the
//! ledger is cleared, so it stays printable after settlement.
//!
//! ```text
//! RECEIPT / Table 1
//! Guest: K1
//! -------------------------
//! 2x Coffee         3.00 €
//! 1x Cake           3.00 €
//! -------------------------
//! Total: 6.00 €
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ledger::TableLedger;
use crate::money::{Money, PreciseMoney};
use crate::types::{GuestId, TableNumber};

const SEPARATOR: &str = "-------------------------";

/// One itemised receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: PreciseMoney,
    pub line_total: PreciseMoney,
}

/// Snapshot of a guest's bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuestReceipt {
    pub table: TableNumber,
    pub guest: GuestId,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl GuestReceipt {
    /// Copies the guest's current items and rounded total out of the ledger.
    pub fn snapshot(ledger: &TableLedger, guest: &GuestId) -> Self {
        let lines = ledger
            .items_for(guest)
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();

        GuestReceipt {
            table: ledger.table(),
            guest: guest.clone(),
            lines,
            total: ledger.guest_total(guest),
        }
    }

    /// Fixed-layout receipt text. Line totals are shown rounded to cents.
    pub fn render(&self, currency: &str) -> String {
        let mut out = Vec::with_capacity(self.lines.len() + 5);
        out.push(format!("RECEIPT / Table {}", self.table));
        out.push(format!("Guest: {}", self.guest));
        out.push(SEPARATOR.to_string());
        for line in &self.lines {
            out.push(format!(
                "{}x {:<12} {:>6} {}",
                line.quantity,
                line.name,
                line.line_total.round_to_cents(),
                currency
            ));
        }
        out.push(SEPARATOR.to_string());
        out.push(format!("Total: {} {}", self.total, currency));
        out.join("\n")
    }
}

/// How a settled guest paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "method", rename_all = "snake_case")]
#[ts(export)]
pub enum Tender {
    Cash { received: Money, change: Money },
    Card,
}

impl Tender {
    /// Tender lines printed under the receipt.
    pub fn render(&self, currency: &str) -> String {
        match self {
            Tender::Cash { received, change } => format!(
                "Payment: cash\nReceived: {} {}\nChange: {} {}",
                received, currency, change, currency
            ),
            Tender::Card => "Payment: card\nStatus: Paid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::OrderItem;

    fn coffee_and_cake() -> (TableLedger, GuestId) {
        let k1 = GuestId::new("K1").unwrap();
        let mut ledger = TableLedger::new(TableNumber::new(1).unwrap());
        ledger.add_order(
            OrderItem::new(k1.clone(), "Coffee", 2, PreciseMoney::from_units(15_000)).unwrap(),
        );
        ledger.add_order(
            OrderItem::new(k1.clone(), "Cake", 1, PreciseMoney::from_units(30_000)).unwrap(),
        );
        (ledger, k1)
    }

    #[test]
    fn test_render_layout() {
        let (ledger, k1) = coffee_and_cake();
        let receipt = GuestReceipt::snapshot(&ledger, &k1);

        let expected = "RECEIPT / Table 1\n\
                        Guest: K1\n\
                        -------------------------\n\
                        2x Coffee         3.00 €\n\
                        1x Cake           3.00 €\n\
                        -------------------------\n\
                        Total: 6.00 €";
        assert_eq!(receipt.render("€"), expected);
    }

    #[test]
    fn test_snapshot_survives_clearing() {
        let (mut ledger, k1) = coffee_and_cake();
        let receipt = GuestReceipt::snapshot(&ledger, &k1);
        ledger.mark_guest_paid(&k1);

        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.total, Money::from_cents(600));
        assert!(GuestReceipt::snapshot(&ledger, &k1).lines.is_empty());
    }

    #[test]
    fn test_tender_render() {
        let cash = Tender::Cash {
            received: Money::from_cents(1000),
            change: Money::from_cents(400),
        };
        assert_eq!(
            cash.render("€"),
            "Payment: cash\nReceived: 10.00 €\nChange: 4.00 €"
        );
        assert_eq!(Tender::Card.render("€"), "Payment: card\nStatus: Paid");
    }
}
