//! # Domain Types
//!
//! Small value types shared by geometry, layout and ledger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  TableNumber    │   │     Point       │   │     Sides       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u32, ≥ 1       │   │  x, y (i32)     │   │  up, right,     │       │
//! │  │  layout key     │   │  map pixels     │   │  down, left     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    GuestId      │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  "K1", "K2" ... │   │  Cash           │                             │
//! │  │  per table      │   │  Card           │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::{MAX_GUEST_ID_LEN, MAX_SEATS_PER_SIDE};

// =============================================================================
// Table Number
// =============================================================================

/// Positive integer identifying a table on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TableNumber(u32);

impl TableNumber {
    /// Creates a table number, rejecting zero.
    pub fn new(number: u32) -> ValidationResult<Self> {
        if number == 0 {
            return Err(ValidationError::MustBePositive {
                field: "table number".to_string(),
            });
        }
        Ok(TableNumber(number))
    }

    /// Built-in table numbers only; callers outside the crate go through `new`.
    pub(crate) const fn new_unchecked(number: u32) -> Self {
        TableNumber(number)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Guest Id
// =============================================================================

/// Caller-supplied guest identifier, unique within one table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct GuestId(String);

impl GuestId {
    /// Trims and validates a guest id.
    ///
    /// ## Example
    /// ```rust
    /// use tableside_core::GuestId;
    ///
    /// assert_eq!(GuestId::new(" K1 ").unwrap().as_str(), "K1");
    /// assert!(GuestId::new("   ").is_err());
    /// ```
    pub fn new(id: &str) -> ValidationResult<Self> {
        let id = id.trim();

        if id.is_empty() {
            return Err(ValidationError::Required {
                field: "guest id".to_string(),
            });
        }

        if id.chars().count() > MAX_GUEST_ID_LEN {
            return Err(ValidationError::TooLong {
                field: "guest id".to_string(),
                max: MAX_GUEST_ID_LEN,
            });
        }

        Ok(GuestId(id.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

// =============================================================================
// Point
// =============================================================================

/// A position on the floor map, in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

// =============================================================================
// Sides
// =============================================================================

/// How many guests sit along each edge of a rectangular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct Sides {
    pub up: u32,
    pub right: u32,
    pub down: u32,
    pub left: u32,
}

impl Sides {
    #[inline]
    pub const fn new(up: u32, right: u32, down: u32, left: u32) -> Self {
        Sides {
            up,
            right,
            down,
            left,
        }
    }

    /// Total seats around the table.
    #[inline]
    pub const fn total(&self) -> u32 {
        self.up
            .saturating_add(self.right)
            .saturating_add(self.down)
            .saturating_add(self.left)
    }

    /// Checks that at least one seat exists and no side is overcrowded.
    pub fn validate(&self) -> ValidationResult<()> {
        for (field, count) in [
            ("seats up", self.up),
            ("seats right", self.right),
            ("seats down", self.down),
            ("seats left", self.left),
        ] {
            if count > MAX_SEATS_PER_SIDE {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: 0,
                    max: MAX_SEATS_PER_SIDE as i64,
                });
            }
        }

        if self.total() == 0 {
            return Err(ValidationError::MustBePositive {
                field: "seat count".to_string(),
            });
        }

        Ok(())
    }
}

/// Edge of a rectangular table a seat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Side {
    Up,
    Right,
    Down,
    Left,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash; change is computed.
    Cash,
    /// Card on an external terminal, confirmed manually.
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            other => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("unknown method '{}', expected cash or card", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
