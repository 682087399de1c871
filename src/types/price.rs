//! Fixed-point price and quantity utilities.
//!
//! ## Overview
//!
//! The matching core only consumes pre-scaled integers: every price and
//! quantity entering [`Orderbook::add_order`](crate::Orderbook::add_order)
//! is a u64 scaled by 10^8. These helpers live at the boundary where
//! user-facing decimal values are folded into that integer domain (and
//! back). Matching decisions themselves never touch a fraction.
//!
//! ## Why Fixed-Point?
//!
//! Floating-point arithmetic can produce different results on different
//! hardware, breaking determinism. Fixed-point ensures identical results
//! everywhere.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_fixed, from_fixed};
//!
//! // Convert 2.30000000 to fixed-point
//! let price = to_fixed("2.3").unwrap();
//! assert_eq!(price, 230_000_000);
//!
//! // Convert back to string
//! assert_eq!(from_fixed(price), "2.30000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

/// Maximum value that can be safely represented
///
/// u64::MAX / SCALE ≈ 184,467,440,737 (184 billion)
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If parsing fails or the value is negative/out of range
///
/// # Example
///
/// ```
/// use matchbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If the value is negative or out of range
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(1), "0.00000001");
/// ```
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a human-readable string (trimmed trailing zeros)
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_constant() {
        assert_eq!(SCALE, 100_000_000);
    }

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1.0"), Some(100_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn test_to_fixed_edge_cases() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("0.0"), Some(0));

        // Negative values should return None
        assert_eq!(to_fixed("-1.0"), None);

        // Invalid strings should return None
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(50_000_000), "0.50000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.0", "0.5", "50000.12345678", "0.00000001", "123456.78901234"];

        for s in values {
            let fixed = to_fixed(s).unwrap();
            let back = from_fixed(fixed);
            // Parse both to compare (handles trailing zeros)
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "Roundtrip failed for {}", s);
        }
    }
}
