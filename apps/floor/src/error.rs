//! # API Error Type
//!
//! Unified error type for floor commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tableside                              │
//! │                                                                         │
//! │  Presentation                Rust Backend                               │
//! │  ────────────                ────────────                               │
//! │                                                                         │
//! │  tender_cash("5.00")                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ───── ValidationError ──────────────┐               │  │
//! │  │         │                                       │               │  │
//! │  │         ▼                                       ▼               │  │
//! │  │  Rule broken? ─── CoreError::InsufficientCash ─ ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "PAYMENT_ERROR",                                            │
//! │    "message": "Cash amount 5.00 is less than the amount due 6.00" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is reported before any state changes, so the dialog that
//! triggered it can stay open and retry.

use serde::Serialize;
use tableside_core::{CoreError, ValidationError};
use tableside_store::StoreError;
use thiserror::Error;
use ts_rs::TS;

/// API error returned from floor commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PRECONDITION_FAILED",
///   "message": "No table selected"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error, TS)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Input could not be parsed or is out of range
    ValidationError,

    /// The action is not possible right now (no table selected, no guests)
    PreconditionFailed,

    /// Settlement rejected the payment
    PaymentError,

    /// Layout or config file could not be written
    StorageError,

    /// Referenced table does not exist
    NotFound,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PreconditionFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The action needs a selected table.
    pub fn no_table_selected() -> Self {
        ApiError::precondition("No table selected. Select a table on the map first.")
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            e @ CoreError::InsufficientCash { .. } => {
                ApiError::new(ErrorCode::PaymentError, e.to_string())
            }
            e @ (CoreError::EmptyTable { .. }
            | CoreError::NoPayableGuests { .. }
            | CoreError::GuestNotPayable { .. }
            | CoreError::UnknownGuest { .. }
            | CoreError::InvalidSettlementState { .. }) => ApiError::precondition(e.to_string()),
            e @ CoreError::WrongTable { .. } => {
                tracing::error!("Settlement used with another table's ledger: {}", e);
                ApiError::internal("Payment is attached to a different table")
            }
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::InvalidConfig(_) => ApiError::validation(err.to_string()),
            _ => {
                tracing::error!("Storage operation failed: {}", err);
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}
