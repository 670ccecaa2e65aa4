//! # Payment Settlement
//!
//! One payment attempt for one guest at one table.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   begin(ledger)                                                         │
//! │        │  no payable guests → NoPayableGuests                           │
//! │        ▼                                                                │
//! │   SelectingGuest ──select_guest──► GuestSelected                        │
//! │                                         │                               │
//! │                          choose_method  │  (guest and method can be     │
//! │                     ┌───────────────────┴──────┐   changed until        │
//! │                     ▼                          ▼   settled)             │
//! │           AwaitingCashAmount        AwaitingCardConfirmation            │
//! │              │        ▲                        │                        │
//! │   tender_cash│        │ bad input /            │ confirm_card           │
//! │              │        │ insufficient cash      │                        │
//! │              ▼        │ (state unchanged)      ▼                        │
//! │           Settled { guest, method }  ◄─────────┘                        │
//! │                                                                         │
//! │   On settling: receipt snapshot FIRST, then mark_guest_paid.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The settlement does not own the ledger. Every step that reads or clears
//! a bill borrows it, and a ledger for another table is refused.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ledger::TableLedger;
use crate::money::Money;
use crate::receipt::{GuestReceipt, Tender};
use crate::types::{GuestId, PaymentMethod, TableNumber};
use crate::validation::parse_cash_amount;

/// Where a settlement currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SettlementState {
    SelectingGuest,
    GuestSelected { guest: GuestId },
    AwaitingCashAmount { guest: GuestId },
    AwaitingCardConfirmation { guest: GuestId },
    Settled { guest: GuestId, method: PaymentMethod },
}

impl SettlementState {
    pub fn name(&self) -> &'static str {
        match self {
            SettlementState::SelectingGuest => "selecting guest",
            SettlementState::GuestSelected { .. } => "guest selected",
            SettlementState::AwaitingCashAmount { .. } => "awaiting cash amount",
            SettlementState::AwaitingCardConfirmation { .. } => "awaiting card confirmation",
            SettlementState::Settled { .. } => "settled",
        }
    }

    /// The guest being paid for, once one is chosen.
    pub fn guest(&self) -> Option<&GuestId> {
        match self {
            SettlementState::SelectingGuest => None,
            SettlementState::GuestSelected { guest }
            | SettlementState::AwaitingCashAmount { guest }
            | SettlementState::AwaitingCardConfirmation { guest }
            | SettlementState::Settled { guest, .. } => Some(guest),
        }
    }
}

/// Result of a completed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settled {
    pub receipt: GuestReceipt,
    pub tender: Tender,
}

impl Settled {
    /// Receipt followed by the tender lines.
    pub fn render(&self, currency: &str) -> String {
        format!(
            "{}\n\n{}",
            self.receipt.render(currency),
            self.tender.render(currency)
        )
    }
}

/// A payment attempt at one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    table: TableNumber,
    payable: Vec<GuestId>,
    state: SettlementState,
}

impl Settlement {
    /// Opens a settlement for every guest that currently owes something.
    pub fn begin(ledger: &TableLedger) -> CoreResult<Self> {
        let payable = ledger.payable_guests();
        if payable.is_empty() {
            return Err(CoreError::NoPayableGuests {
                table: ledger.table().get(),
            });
        }

        Ok(Settlement {
            table: ledger.table(),
            payable,
            state: SettlementState::SelectingGuest,
        })
    }

    #[inline]
    pub fn table(&self) -> TableNumber {
        self.table
    }

    /// Guests that owed something when the settlement was opened.
    pub fn payable_guests(&self) -> &[GuestId] {
        &self.payable
    }

    #[inline]
    pub fn state(&self) -> &SettlementState {
        &self.state
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, SettlementState::Settled { .. })
    }

    fn check_table(&self, ledger: &TableLedger) -> CoreResult<()> {
        if ledger.table() != self.table {
            return Err(CoreError::WrongTable {
                expected: self.table.get(),
                actual: ledger.table().get(),
            });
        }
        Ok(())
    }

    fn check_open(&self, expected: &'static str) -> CoreResult<()> {
        if self.is_settled() {
            return Err(CoreError::InvalidSettlementState {
                expected,
                actual: self.state.name(),
            });
        }
        Ok(())
    }

    /// Balance the guest owes right now; zero balances are refused.
    fn amount_due(&self, ledger: &TableLedger, guest: &GuestId) -> CoreResult<Money> {
        if !ledger.has_guest(guest) {
            return Err(CoreError::UnknownGuest {
                table: self.table.get(),
                guest: guest.to_string(),
            });
        }
        let due = ledger.guest_total(guest);
        if !due.is_positive() {
            return Err(CoreError::GuestNotPayable {
                guest: guest.to_string(),
            });
        }
        Ok(due)
    }

    /// Picks the guest to pay for. Any previously chosen method is dropped.
    pub fn select_guest(&mut self, ledger: &TableLedger, guest: &GuestId) -> CoreResult<()> {
        self.check_table(ledger)?;
        self.check_open("an open settlement")?;
        self.amount_due(ledger, guest)?;

        self.state = SettlementState::GuestSelected {
            guest: guest.clone(),
        };
        Ok(())
    }

    /// Chooses cash or card for the selected guest.
    pub fn choose_method(&mut self, method: PaymentMethod) -> CoreResult<()> {
        self.check_open("a selected guest")?;
        let guest = self
            .state
            .guest()
            .cloned()
            .ok_or(CoreError::InvalidSettlementState {
                expected: "a selected guest",
                actual: self.state.name(),
            })?;

        self.state = match method {
            PaymentMethod::Cash => SettlementState::AwaitingCashAmount { guest },
            PaymentMethod::Card => SettlementState::AwaitingCardConfirmation { guest },
        };
        Ok(())
    }

    /// Receipt of the selected guest as it stands now, for display before paying.
    pub fn preview(&self, ledger: &TableLedger) -> CoreResult<GuestReceipt> {
        self.check_table(ledger)?;
        let guest = self.state.guest().ok_or(CoreError::InvalidSettlementState {
            expected: "a selected guest",
            actual: self.state.name(),
        })?;
        Ok(GuestReceipt::snapshot(ledger, guest))
    }

    /// Settles the selected guest in cash.
    ///
    /// `received` is the raw amount typed by the cashier. Unparseable or
    /// insufficient amounts leave the ledger and the settlement untouched so
    /// the cashier can try again.
    pub fn tender_cash(&mut self, ledger: &mut TableLedger, received: &str) -> CoreResult<Settled> {
        self.check_table(ledger)?;
        let guest = match &self.state {
            SettlementState::AwaitingCashAmount { guest } => guest.clone(),
            other => {
                return Err(CoreError::InvalidSettlementState {
                    expected: "awaiting cash amount",
                    actual: other.name(),
                })
            }
        };

        let received = parse_cash_amount(received)?;
        let due = self.amount_due(ledger, &guest)?;
        if received < due {
            return Err(CoreError::InsufficientCash {
                due,
                tendered: received,
            });
        }

        let receipt = GuestReceipt::snapshot(ledger, &guest);
        ledger.mark_guest_paid(&guest);
        self.state = SettlementState::Settled {
            guest,
            method: PaymentMethod::Cash,
        };

        Ok(Settled {
            receipt,
            tender: Tender::Cash {
                received,
                change: received - due,
            },
        })
    }

    /// Records the terminal's confirmation and settles the selected guest by card.
    pub fn confirm_card(&mut self, ledger: &mut TableLedger) -> CoreResult<Settled> {
        self.check_table(ledger)?;
        let guest = match &self.state {
            SettlementState::AwaitingCardConfirmation { guest } => guest.clone(),
            other => {
                return Err(CoreError::InvalidSettlementState {
                    expected: "awaiting card confirmation",
                    actual: other.name(),
                })
            }
        };

        self.amount_due(ledger, &guest)?;

        let receipt = GuestReceipt::snapshot(ledger, &guest);
        ledger.mark_guest_paid(&guest);
        self.state = SettlementState::Settled {
            guest,
            method: PaymentMethod::Card,
        };

        Ok(Settled {
            receipt,
            tender: Tender::Card,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::OrderItem;
    use crate::money::PreciseMoney;

    fn guest(id: &str) -> GuestId {
        GuestId::new(id).unwrap()
    }

    fn table_with_k1() -> TableLedger {
        let mut ledger = TableLedger::new(TableNumber::new(1).unwrap());
        ledger.add_order(
            OrderItem::new(guest("K1"), "Coffee", 2, PreciseMoney::from_units(15_000)).unwrap(),
        );
        ledger.add_order(
            OrderItem::new(guest("K1"), "Cake", 1, PreciseMoney::from_units(30_000)).unwrap(),
        );
        ledger.add_guest(guest("K2"));
        ledger
    }

    fn cash_settlement(ledger: &TableLedger) -> Settlement {
        let mut settlement = Settlement::begin(ledger).unwrap();
        settlement.select_guest(ledger, &guest("K1")).unwrap();
        settlement.choose_method(PaymentMethod::Cash).unwrap();
        settlement
    }

    #[test]
    fn test_begin_requires_payable_guest() {
        let mut ledger = TableLedger::new(TableNumber::new(3).unwrap());
        ledger.add_guest(guest("K1"));
        assert!(matches!(
            Settlement::begin(&ledger),
            Err(CoreError::NoPayableGuests { table: 3 })
        ));

        let ledger = table_with_k1();
        let settlement = Settlement::begin(&ledger).unwrap();
        assert_eq!(settlement.payable_guests(), &[guest("K1")]);
        assert_eq!(settlement.state(), &SettlementState::SelectingGuest);
    }

    #[test]
    fn test_select_guest_rejections() {
        let ledger = table_with_k1();
        let mut settlement = Settlement::begin(&ledger).unwrap();

        assert!(matches!(
            settlement.select_guest(&ledger, &guest("K2")),
            Err(CoreError::GuestNotPayable { .. })
        ));
        assert!(matches!(
            settlement.select_guest(&ledger, &guest("K7")),
            Err(CoreError::UnknownGuest { .. })
        ));
        assert_eq!(settlement.state(), &SettlementState::SelectingGuest);
    }

    #[test]
    fn test_choose_method_needs_guest() {
        let ledger = table_with_k1();
        let mut settlement = Settlement::begin(&ledger).unwrap();
        assert!(matches!(
            settlement.choose_method(PaymentMethod::Card),
            Err(CoreError::InvalidSettlementState { .. })
        ));
    }

    #[test]
    fn test_cash_with_change() {
        let mut ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);

        let settled = settlement.tender_cash(&mut ledger, "10.00").unwrap();

        assert_eq!(
            settled.tender,
            Tender::Cash {
                received: Money::from_cents(1000),
                change: Money::from_cents(400),
            }
        );
        assert_eq!(settled.receipt.total, Money::from_cents(600));
        assert_eq!(settled.receipt.lines.len(), 2);
        assert_eq!(ledger.guest_total(&guest("K1")), Money::zero());
        assert!(settlement.is_settled());
    }

    #[test]
    fn test_cash_exact_amount_gives_zero_change() {
        let mut ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);

        let settled = settlement.tender_cash(&mut ledger, "6").unwrap();
        assert_eq!(
            settled.tender,
            Tender::Cash {
                received: Money::from_cents(600),
                change: Money::zero(),
            }
        );
        assert!(ledger.items_for(&guest("K1")).is_empty());
    }

    #[test]
    fn test_insufficient_cash_changes_nothing() {
        let mut ledger = table_with_k1();
        let before = ledger.clone();
        let mut settlement = cash_settlement(&ledger);
        let state_before = settlement.state().clone();

        assert!(matches!(
            settlement.tender_cash(&mut ledger, "5.99"),
            Err(CoreError::InsufficientCash { .. })
        ));
        assert_eq!(ledger, before);
        assert_eq!(settlement.state(), &state_before);

        // Retry succeeds
        assert!(settlement.tender_cash(&mut ledger, "6.00").is_ok());
    }

    #[test]
    fn test_invalid_cash_input_changes_nothing() {
        let mut ledger = table_with_k1();
        let before = ledger.clone();
        let mut settlement = cash_settlement(&ledger);

        for input in ["", "ten", "-1", "6.005"] {
            assert!(matches!(
                settlement.tender_cash(&mut ledger, input),
                Err(CoreError::Validation(_))
            ));
        }
        assert_eq!(ledger, before);
        assert!(!settlement.is_settled());
    }

    #[test]
    fn test_card_needs_confirmation() {
        let mut ledger = table_with_k1();
        let mut settlement = Settlement::begin(&ledger).unwrap();
        settlement.select_guest(&ledger, &guest("K1")).unwrap();
        settlement.choose_method(PaymentMethod::Card).unwrap();

        assert_eq!(ledger.guest_total(&guest("K1")), Money::from_cents(600));
        assert!(matches!(
            settlement.tender_cash(&mut ledger, "10"),
            Err(CoreError::InvalidSettlementState { .. })
        ));

        let settled = settlement.confirm_card(&mut ledger).unwrap();
        assert_eq!(settled.tender, Tender::Card);
        assert_eq!(settled.receipt.total, Money::from_cents(600));
        assert_eq!(ledger.guest_total(&guest("K1")), Money::zero());
    }

    #[test]
    fn test_settled_is_final() {
        let mut ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);
        settlement.tender_cash(&mut ledger, "10").unwrap();

        assert!(settlement.choose_method(PaymentMethod::Cash).is_err());
        assert!(settlement.select_guest(&ledger, &guest("K1")).is_err());
        assert!(settlement.tender_cash(&mut ledger, "10").is_err());
    }

    #[test]
    fn test_wrong_table_is_refused() {
        let ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);
        let mut other = TableLedger::new(TableNumber::new(2).unwrap());

        assert!(matches!(
            settlement.tender_cash(&mut other, "10"),
            Err(CoreError::WrongTable { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_switching_method_and_preview() {
        let ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);
        settlement.choose_method(PaymentMethod::Card).unwrap();
        assert!(matches!(
            settlement.state(),
            SettlementState::AwaitingCardConfirmation { .. }
        ));

        let preview = settlement.preview(&ledger).unwrap();
        assert_eq!(preview.total, Money::from_cents(600));
    }

    #[test]
    fn test_settled_render() {
        let mut ledger = table_with_k1();
        let mut settlement = cash_settlement(&ledger);
        let settled = settlement.tender_cash(&mut ledger, "10").unwrap();

        let text = settled.render("€");
        assert!(text.starts_with("RECEIPT / Table 1\nGuest: K1\n"));
        assert!(text.ends_with("Total: 6.00 €\n\nPayment: cash\nReceived: 10.00 €\nChange: 4.00 €"));
    }
}
