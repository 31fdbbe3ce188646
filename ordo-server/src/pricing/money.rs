//! Money conversion and rounding helpers
//!
//! Monetary values are stored and serialized as `f64` but every
//! calculation goes through `Decimal`, rounded to 2 decimal places with
//! midpoint-away-from-zero (half-up for the non-negative amounts handled
//! here, so 50.005 rounds to 50.01).

use rust_decimal::prelude::*;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input cannot come from parsed form text, but JSON payloads
/// may carry arbitrary floats; it degrades to zero rather than poisoning
/// a total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round a Decimal to 2 places, half-up
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value)
        .to_f64()
        // Decimal rounded to 2dp is always within f64 range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Parse an amount typed into a form field.
///
/// Accepts both "," and "." as the decimal separator ("150,50" and
/// "150.50" both parse to 150.50). Empty, malformed or negative input
/// yields 0 so the form stays usable while the operator is typing; this
/// function never fails.
pub fn parse_amount(input: &str) -> f64 {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}
