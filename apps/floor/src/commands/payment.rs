//! # Payment Commands
//!
//! Drives the settlement dialog for the selected table.
//!
//! ## Dialog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin_payment ──► first payable guest, cash preselected               │
//! │       │                                                                 │
//! │       ├── select_payment_guest("K2")   keeps the chosen method         │
//! │       ├── choose_payment_method("card")                                │
//! │       │                                                                 │
//! │       ├── cash: tender_cash("10.00") ──► SettlementRecord, dialog closed│
//! │       │         bad or short amount ──► error, dialog stays open       │
//! │       │                                                                 │
//! │       ├── card: confirm_card_payment ──► SettlementRecord, dialog closed│
//! │       │                                                                 │
//! │       └── cancel_payment ──► dialog closed, ledger untouched           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are taken payment first, then the table's ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use super::selected_table;
use crate::error::ApiError;
use crate::state::{ConfigState, LedgerState, PaymentState, SelectionState};
use tableside_core::{
    CoreError, GuestId, GuestReceipt, Money, PaymentMethod, Settled, Settlement, SettlementState,
    TableLedger, TableNumber, Tender,
};

// =============================================================================
// Response Types
// =============================================================================

/// What the payment dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentView {
    pub table: TableNumber,
    pub payable_guests: Vec<GuestId>,
    pub state: SettlementState,
    pub amount_due: Money,
    /// Receipt of the selected guest as it stands now
    pub preview: String,
}

/// A completed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SettlementRecord {
    #[ts(type = "string")]
    pub id: Uuid,
    #[ts(type = "string")]
    pub settled_at: DateTime<Utc>,
    pub table: TableNumber,
    pub guest: GuestId,
    pub receipt: GuestReceipt,
    pub tender: Tender,
    /// Receipt followed by the tender lines
    pub text: String,
}

impl SettlementRecord {
    fn new(settled: Settled, config: &ConfigState) -> Self {
        let text = settled.render(&config.currency_symbol);
        SettlementRecord {
            id: Uuid::new_v4(),
            settled_at: Utc::now(),
            table: settled.receipt.table,
            guest: settled.receipt.guest.clone(),
            receipt: settled.receipt,
            tender: settled.tender,
            text,
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Opens the payment dialog for the selected table.
///
/// Replaces any dialog still open. Fails when nobody at the table owes
/// anything.
pub fn begin_payment(
    selection: &SelectionState,
    ledgers: &LedgerState,
    payment: &PaymentState,
    config: &ConfigState,
) -> Result<PaymentView, ApiError> {
    debug!("begin_payment command");
    let table = selected_table(selection)?;

    payment.with_payment_mut(|slot| {
        let opened = ledgers
            .with_ledger(table, |ledger| -> Result<_, ApiError> {
                let mut settlement = Settlement::begin(ledger)?;
                let first = settlement
                    .payable_guests()
                    .first()
                    .cloned()
                    .ok_or(CoreError::NoPayableGuests { table: table.get() })?;
                settlement.select_guest(ledger, &first)?;
                settlement.choose_method(PaymentMethod::Cash)?;
                let view = view_of(&settlement, ledger, config)?;
                Ok((settlement, view))
            })
            .ok_or_else(|| ApiError::not_found("Table", table))??;

        let (settlement, view) = opened;
        if slot.replace(settlement).is_some() {
            debug!("Previous payment dialog discarded");
        }
        info!(table = %table, payable = view.payable_guests.len(), "Payment started");
        Ok(view)
    })
}

/// Switches the dialog to another payable guest.
pub fn select_payment_guest(
    ledgers: &LedgerState,
    payment: &PaymentState,
    config: &ConfigState,
    guest: &str,
) -> Result<PaymentView, ApiError> {
    debug!(guest, "select_payment_guest command");
    let guest = GuestId::new(guest)?;

    with_open_settlement(ledgers, payment, |settlement, ledger| {
        let method = chosen_method(settlement.state());
        settlement.select_guest(ledger, &guest)?;
        if let Some(method) = method {
            settlement.choose_method(method)?;
        }
        view_of(settlement, ledger, config)
    })
}

/// Picks cash or card for the selected guest.
pub fn choose_payment_method(
    ledgers: &LedgerState,
    payment: &PaymentState,
    config: &ConfigState,
    method: &str,
) -> Result<PaymentView, ApiError> {
    debug!(method, "choose_payment_method command");
    let method: PaymentMethod = method.parse()?;

    with_open_settlement(ledgers, payment, |settlement, ledger| {
        settlement.choose_method(method)?;
        view_of(settlement, ledger, config)
    })
}

/// Settles the selected guest with the cash amount typed by the cashier.
///
/// Unreadable or short amounts leave the guest's items and the dialog as
/// they were.
pub fn tender_cash(
    ledgers: &LedgerState,
    payment: &PaymentState,
    config: &ConfigState,
    received: &str,
) -> Result<SettlementRecord, ApiError> {
    debug!(received, "tender_cash command");

    let result = with_open_settlement(ledgers, payment, |settlement, ledger| {
        Ok(settlement.tender_cash(ledger, received)?)
    });

    match result {
        Ok(settled) => {
            let record = SettlementRecord::new(settled, config);
            info!(
                id = %record.id,
                table = %record.table,
                guest = %record.guest,
                total = %record.receipt.total,
                "Guest settled in cash"
            );
            Ok(record)
        }
        Err(e) => {
            warn!(error = %e, "Cash tender rejected");
            Err(e)
        }
    }
}

/// Records the card terminal's confirmation for the selected guest.
pub fn confirm_card_payment(
    ledgers: &LedgerState,
    payment: &PaymentState,
    config: &ConfigState,
) -> Result<SettlementRecord, ApiError> {
    debug!("confirm_card_payment command");

    let settled = with_open_settlement(ledgers, payment, |settlement, ledger| {
        Ok(settlement.confirm_card(ledger)?)
    })?;

    let record = SettlementRecord::new(settled, config);
    info!(
        id = %record.id,
        table = %record.table,
        guest = %record.guest,
        total = %record.receipt.total,
        "Guest settled by card"
    );
    Ok(record)
}

/// Closes the dialog without settling. Returns whether one was open.
pub fn cancel_payment(payment: &PaymentState) -> bool {
    debug!("cancel_payment command");
    let was_open = payment.close();
    if was_open {
        info!("Payment cancelled");
    }
    was_open
}

// =============================================================================
// Helpers
// =============================================================================

fn no_payment_open() -> ApiError {
    ApiError::precondition("No payment in progress")
}

/// Runs `f` on the open settlement and its table's ledger.
///
/// The dialog closes once the settlement reaches `Settled`.
fn with_open_settlement<F, R>(ledgers: &LedgerState, payment: &PaymentState, f: F) -> Result<R, ApiError>
where
    F: FnOnce(&mut Settlement, &mut TableLedger) -> Result<R, ApiError>,
{
    payment.with_payment_mut(|slot| {
        let settlement = slot.as_mut().ok_or_else(no_payment_open)?;
        let table = settlement.table();

        let result = ledgers
            .with_ledger_mut(table, |ledger| f(settlement, ledger))
            .unwrap_or_else(|| Err(ApiError::not_found("Table", table)));

        if slot.as_ref().is_some_and(Settlement::is_settled) {
            *slot = None;
        }
        result
    })
}

fn chosen_method(state: &SettlementState) -> Option<PaymentMethod> {
    match state {
        SettlementState::AwaitingCashAmount { .. } => Some(PaymentMethod::Cash),
        SettlementState::AwaitingCardConfirmation { .. } => Some(PaymentMethod::Card),
        _ => None,
    }
}

fn view_of(settlement: &Settlement, ledger: &TableLedger, config: &ConfigState) -> Result<PaymentView, ApiError> {
    let receipt = settlement.preview(ledger)?;
    Ok(PaymentView {
        table: settlement.table(),
        payable_guests: settlement.payable_guests().to_vec(),
        state: settlement.state().clone(),
        amount_due: receipt.total,
        preview: receipt.render(&config.currency_symbol),
    })
}
