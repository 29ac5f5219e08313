//! Money utilities using rust_decimal for precision
//!
//! Amounts travel as `Decimal` through the service layer and are stored as
//! integer cents, so no value is ever rounded by a float conversion.

use rust_decimal::prelude::*;
use shared::{AppError, ErrorCode};

/// Monetary values carry 2 decimal places, midpoint rounded away from zero
const DECIMAL_PLACES: u32 = 2;

/// Maximum accepted amount (1,000,000,000.00)
pub const MAX_VALOR: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Round to 2 decimal places (10.005 -> 10.01)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an amount to integer cents, rounding first
pub fn to_cents(value: Decimal) -> Option<i64> {
    (round_money(value) * Decimal::ONE_HUNDRED).to_i64()
}

/// Convert stored cents back to an amount with scale 2
#[inline]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Validate an expense amount and return it rounded to cents
pub fn validate_valor(value: Decimal) -> Result<Decimal, AppError> {
    let rounded = round_money(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("valor must be non-negative, got {value}"),
        )
        .with_detail("field", "valor"));
    }
    if rounded > MAX_VALOR {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("valor exceeds maximum allowed ({MAX_VALOR}), got {value}"),
        )
        .with_detail("field", "valor"));
    }
    Ok(rounded.abs())
}
