//! # Error Types
//!
//! Domain-specific error types for tableside-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tableside-core errors (this file)                                     │
//! │  ├── ValidationError  - Bad user input (name, quantity, price, cash)   │
//! │  ├── CoreError        - Preconditions and settlement rules             │
//! │  └── LayoutError      - Layout document could not be decoded           │
//! │                                                                         │
//! │  tableside-store errors (separate crate)                               │
//! │  └── StoreError       - File and config failures                       │
//! │                                                                         │
//! │  Floor app errors                                                      │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is user-correctable: returning one never leaves a
//! ledger or layout half-modified.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations on the ledger and during settlement.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The table has no guests yet, so nothing can be ordered against it.
    #[error("Table {table} has no guests")]
    EmptyTable { table: u32 },

    /// Every guest at the table has a zero balance.
    #[error("Table {table} has no guests with an outstanding balance")]
    NoPayableGuests { table: u32 },

    /// The guest has never been seated at this table.
    #[error("Guest {guest} is not known at table {table}")]
    UnknownGuest { table: u32, guest: String },

    /// The guest has nothing left to pay.
    #[error("Guest {guest} has no outstanding balance")]
    GuestNotPayable { guest: String },

    /// Cash handed over does not cover the guest's bill.
    ///
    /// ## User Workflow
    /// ```text
    /// Guest total: 6.00
    ///      │
    ///      ▼
    /// Cash entered: 5.00
    ///      │
    ///      ▼
    /// InsufficientCash { due: 6.00, tendered: 5.00 }
    ///      │
    ///      ▼
    /// Dialog stays open, ledger untouched, cashier re-enters amount
    /// ```
    #[error("Cash amount {tendered} is less than the amount due {due}")]
    InsufficientCash { due: Money, tendered: Money },

    /// Settlement step invoked out of order.
    #[error("Settlement is {actual}, expected {expected}")]
    InvalidSettlementState {
        expected: &'static str,
        actual: &'static str,
    },

    /// A settlement was driven with the ledger of a different table.
    #[error("Settlement belongs to table {expected}, got ledger of table {actual}")]
    WrongTable { expected: u32, actual: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the parse boundary in [`crate::validation`] before any
/// ledger or layout is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Text could not be read as a number at all.
    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Parsed, but not in an accepted shape (e.g. too many decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Layout Error
// =============================================================================

/// Failure to decode a layout document.
///
/// Always recoverable: the store substitutes an empty layout and surfaces
/// the message as a warning.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON syntax error, or an unknown/missing field.
    #[error("Malformed layout document: {0}")]
    Malformed(String),

    /// A key under `tables` is not a positive integer.
    #[error("Invalid table number '{key}'")]
    InvalidTableNumber { key: String },

    /// A side-based table with zero seats on every side.
    #[error("Table {table} has no seats")]
    NoSeats { table: u32 },

    /// Two keys name the same table, such as `"1"` and `"01"`.
    #[error("Table {table} is listed more than once")]
    DuplicateTable { table: u32 },
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Malformed(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
