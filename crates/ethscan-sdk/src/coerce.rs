//! Wire string coercion
//!
//! The API encodes every scalar as a JSON string. Two policies apply:
//!
//! - **strict**: monetary amounts the caller acts on (balances, supplies, rewards).
//!   A malformed value fails the whole call with [`ScanError::FieldParse`].
//! - **lenient**: descriptive fields (timestamps, counts, positions, per-record
//!   amounts in listings). A malformed value becomes zero / `false`.
//!
//! Most endpoints use base-10 numerals. The event-log family uses base-16; the
//! `*_hex` helpers exist for those fields only.

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use std::str::FromStr;

use crate::ScanError;

/// Parse a base-10 numeral, failing with the offending string
pub fn parse_biguint_strict(field: &'static str, value: &str) -> Result<BigUint, ScanError> {
    decimal_biguint(value).ok_or_else(|| ScanError::FieldParse {
        field,
        value: value.to_string(),
    })
}

/// Parse a base-10 numeral, zero on failure
pub fn parse_biguint_lenient(value: &str) -> BigUint {
    decimal_biguint(value).unwrap_or_else(|| {
        fallback(value);
        BigUint::default()
    })
}

/// Parse a base-10 `u64`, zero on failure
pub fn parse_u64_lenient(value: &str) -> u64 {
    let parsed = if is_numeral(value, 10) {
        value.parse().ok()
    } else {
        None
    };
    parsed.unwrap_or_else(|| {
        fallback(value);
        0
    })
}

/// Parse a base-16 `u64` with optional `0x` prefix, zero on failure
pub fn parse_u64_hex(value: &str) -> u64 {
    let digits = strip_hex_prefix(value);
    let parsed = if is_numeral(digits, 16) {
        u64::from_str_radix(digits, 16).ok()
    } else {
        None
    };
    parsed.unwrap_or_else(|| {
        fallback(value);
        0
    })
}

/// Parse a base-16 numeral of any width with optional `0x` prefix, zero on failure
pub fn parse_biguint_hex(value: &str) -> BigUint {
    let digits = strip_hex_prefix(value);
    let parsed = if is_numeral(digits, 16) {
        BigUint::parse_bytes(digits.as_bytes(), 16)
    } else {
        None
    };
    parsed.unwrap_or_else(|| {
        fallback(value);
        BigUint::default()
    })
}

/// Parse a decimal fraction such as `"197.48"`, zero on failure
pub fn parse_decimal_lenient(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap_or_else(|_| {
        fallback(value);
        BigDecimal::default()
    })
}

/// Parse a boolean flag; anything unrecognised is `false`
pub fn parse_bool_lenient(value: &str) -> bool {
    match value.trim() {
        "1" => true,
        v if v.eq_ignore_ascii_case("true") => true,
        _ => false,
    }
}

// The std and num-bigint parsers accept a leading `+` (and `_` for num-bigint);
// the wire format allows digits only.
fn is_numeral(value: &str, radix: u32) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_digit(radix))
}

fn decimal_biguint(value: &str) -> Option<BigUint> {
    if !is_numeral(value, 10) {
        return None;
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
}

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

fn fallback(value: &str) {
    tracing::trace!(value, "unparsable wire value, using zero");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strict_accepts_large_numeral() {
        let bal = parse_biguint_strict("balance", "669816163518885498951364").unwrap();
        assert_eq!(bal.to_string(), "669816163518885498951364");
    }

    #[test]
    fn test_strict_rejects_garbage() {
        for bad in ["", "12a", "-1", "+5", "1_000", " 1", "0x10"] {
            match parse_biguint_strict("balance", bad) {
                Err(ScanError::FieldParse { field, value }) => {
                    assert_eq!(field, "balance");
                    assert_eq!(value, bad);
                }
                other => panic!("expected FieldParse for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_lenient_falls_back_to_zero() {
        assert_eq!(parse_u64_lenient("1472533979"), 1_472_533_979);
        assert_eq!(parse_u64_lenient(""), 0);
        assert_eq!(parse_u64_lenient("abc"), 0);
        assert_eq!(parse_biguint_lenient("oops"), BigUint::default());
    }

    #[test]
    fn test_hex_with_and_without_prefix() {
        assert_eq!(parse_u64_hex("0x5c958"), 379_224);
        assert_eq!(parse_u64_hex("5c958"), 379_224);
        assert_eq!(parse_u64_hex("0x0010"), 16);
        assert_eq!(parse_u64_hex("0010"), 16);
        assert_eq!(parse_u64_hex("0x"), 0);
        assert_eq!(parse_u64_hex(""), 0);
    }

    #[test]
    fn test_lenient_rejects_signs() {
        assert_eq!(parse_u64_lenient("+5"), 0);
        assert_eq!(parse_u64_lenient(" 5"), 0);
        assert_eq!(parse_u64_hex("+ff"), 0);
        assert_eq!(parse_u64_hex("0x+ff"), 0);
        assert_eq!(parse_biguint_hex("0x+ff"), BigUint::default());
        assert_eq!(parse_biguint_lenient("+5"), BigUint::default());
    }

    #[test]
    fn test_hex_biguint() {
        assert_eq!(parse_biguint_hex("0xba43b7400"), BigUint::from(50_000_000_000u64));
        assert_eq!(parse_biguint_hex("0xzz"), BigUint::default());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(
            parse_decimal_lenient("0.03118"),
            BigDecimal::from_str("0.03118").unwrap()
        );
        assert_eq!(parse_decimal_lenient("n/a"), BigDecimal::default());
    }

    #[test]
    fn test_bool() {
        assert!(parse_bool_lenient("1"));
        assert!(parse_bool_lenient("true"));
        assert!(parse_bool_lenient("TRUE"));
        assert!(!parse_bool_lenient("0"));
        assert!(!parse_bool_lenient("false"));
        assert!(!parse_bool_lenient(""));
        assert!(!parse_bool_lenient("yes"));
    }

    proptest! {
        #[test]
        fn prop_strict_matches_numeral(digits in "[0-9]{1,60}") {
            let parsed = parse_biguint_strict("balance", &digits).unwrap();
            let expected = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap();
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn prop_strict_rejects_non_numerals(s in "[0-9]{0,10}[a-zA-Z .,-][0-9a-z]{0,10}") {
            prop_assert!(parse_biguint_strict("balance", &s).is_err());
        }

        #[test]
        fn prop_hex_ignores_leading_zeros(n in any::<u64>(), zeros in 0usize..8) {
            let text = format!("0x{}{:x}", "0".repeat(zeros), n);
            prop_assert_eq!(parse_u64_hex(&text), n);
            prop_assert_eq!(parse_u64_hex(&text[2..]), n);
        }
    }
}
