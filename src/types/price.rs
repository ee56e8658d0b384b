//! Fixed-point helpers for prices and quantities.
//!
//! The book itself only compares and subtracts `u64` values. Instruments
//! that trade in decimals pick a scale of 10^8 and convert at the edge
//! with these helpers, so no floating point ever reaches the matching loop.
//!
//! ```
//! use double_auction::types::price::{from_fixed, to_fixed};
//!
//! let price = to_fixed("100.25").unwrap();
//! assert_eq!(price, 10_025_000_000);
//! assert_eq!(from_fixed(price), "100.25000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point values: 10^8
pub const SCALE: u64 = 100_000_000;

/// Parse a decimal string into a scaled `u64`.
///
/// Returns `None` for unparsable, negative or out-of-range input.
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Scale a `Decimal` into fixed-point, rounding to the nearest unit.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a fixed-point value back into a `Decimal`
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a fixed-point value with all 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render a fixed-point value without trailing zeros
///
/// ```
/// use double_auction::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}
