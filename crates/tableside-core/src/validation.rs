//! # Validation Module
//!
//! The single parse boundary between the presentation layer and the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (dialogs, text entries)                         │
//! │  └── Raw strings: "2", "1.50", "10", "K1"                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → typed value (i64, PreciseMoney, Money, TableNumber)        │
//! │  └── Business ranges (quantity 1..=999, price ≥ 0, ...)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger / Settlement                                          │
//! │  └── Only ever sees typed, validated values                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decimal input is parsed exactly from its digits; no value passes through
//! floating point.
//!
//! ## Usage
//! ```rust
//! use tableside_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity("2").unwrap(), 2);
//! assert_eq!(parse_price("1.50").unwrap().units(), 15_000);
//! assert!(parse_price("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, PreciseMoney};
use crate::types::TableNumber;
use crate::{MAX_AMOUNT, MAX_ITEM_NAME_LEN, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Decimal places accepted for unit prices.
pub const PRICE_DECIMALS: u32 = 4;

/// Decimal places accepted for cash handed over.
pub const CASH_DECIMALS: u32 = 2;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ordered item's name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Parses a quantity typed by the waiter.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order dialog: Quantity field                                           │
/// │                                                                         │
/// │  "2"    → Ok(2)                                                         │
/// │  "two"  → NotANumber                                                    │
/// │  "0"    → MustBePositive                                                │
/// │  "1000" → OutOfRange (1..=999)                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    let qty = text.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field: "quantity".to_string(),
        value: text.to_string(),
    })?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses a non-negative unit price with up to four decimals.
///
/// ## Example
/// ```rust
/// use tableside_core::validation::parse_price;
///
/// assert_eq!(parse_price("3").unwrap().units(), 30_000);
/// assert_eq!(parse_price("0.125").unwrap().units(), 1_250);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("1.23456").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<PreciseMoney> {
    let units = parse_scaled("unit price", input, PRICE_DECIMALS)?;
    check_amount_limit("unit price", units, PreciseMoney::SCALE)?;
    Ok(PreciseMoney::from_units(units))
}

/// Parses the cash amount a guest hands over.
///
/// ## Rules
/// - Must be a plain non-negative decimal
/// - At most two decimals (no sub-cent cash)
pub fn parse_cash_amount(input: &str) -> ValidationResult<Money> {
    let cents = parse_scaled("cash amount", input, CASH_DECIMALS)?;
    check_amount_limit("cash amount", cents, 100)?;
    Ok(Money::from_cents(cents))
}

/// Validates a table number entered as an integer.
pub fn validate_table_number(number: i64) -> ValidationResult<TableNumber> {
    if number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "table number".to_string(),
        });
    }

    let number = u32::try_from(number).map_err(|_| ValidationError::OutOfRange {
        field: "table number".to_string(),
        min: 1,
        max: u32::MAX as i64,
    })?;

    TableNumber::new(number)
}

/// Parses a table number from text, e.g. a layout document key.
pub fn parse_table_number(input: &str) -> ValidationResult<TableNumber> {
    let text = input.trim();
    let number = text.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field: "table number".to_string(),
        value: text.to_string(),
    })?;
    validate_table_number(number)
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses `[+]digits[.digits]` into an integer scaled by `10^decimals`.
///
/// A leading `-` is reported as [`ValidationError::Negative`] when the rest
/// is a valid number, so the user sees why "-5" was refused. `-0` is zero.
fn parse_scaled(field: &str, input: &str, decimals: u32) -> ValidationResult<i64> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if let Some(rest) = text.strip_prefix('-') {
        let magnitude = parse_unsigned(field, text, rest, decimals)?;
        if magnitude == 0 {
            return Ok(0);
        }
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let unsigned = text.strip_prefix('+').unwrap_or(text);
    parse_unsigned(field, text, unsigned, decimals)
}

fn parse_unsigned(field: &str, original: &str, digits: &str, decimals: u32) -> ValidationResult<i64> {
    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
        value: original.to_string(),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(not_a_number());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(not_a_number());
    }

    if frac.len() > decimals as usize {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("at most {} decimal places allowed", decimals),
        });
    }

    let too_large = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_AMOUNT,
    };

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| too_large())?
    };
    let frac_value = if frac.is_empty() {
        0
    } else {
        // Right-pad so "5" in "1.5" means 5000 ten-thousandths, not 5.
        let padding = 10_i64.pow(decimals - frac.len() as u32);
        frac.parse::<i64>().map_err(|_| not_a_number())? * padding
    };

    whole_value
        .checked_mul(10_i64.pow(decimals))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(too_large)
}

fn check_amount_limit(field: &str, scaled: i64, scale: i64) -> ValidationResult<()> {
    if scaled > MAX_AMOUNT * scale {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
