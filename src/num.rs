//! 256-bit integer helpers shared by the fingerprint and the order wire
//! format.
//!
//! The marketplace sends integer fields (`tokenId`, `value`, `salt`) as
//! decimal strings, occasionally as `0x` hex strings or bare JSON numbers.
//! Outgoing values are always decimal strings.

use alloy_primitives::U256;

/// Parses a decimal or `0x`-prefixed hex integer. Surrounding whitespace is
/// ignored; empty digit strings are rejected.
pub fn parse_u256(s: &str) -> Option<U256> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() {
        return None;
    }
    U256::from_str_radix(digits, radix).ok()
}

/// Serde adapter: decimal string out, decimal/hex string or number in.
///
/// JSON numbers are exact only up to 64 bits; larger ones parse as floats
/// and are rejected, so wider values must arrive as strings.
pub mod decimal {
    use std::fmt;

    use alloy_primitives::U256;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a decimal/hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::custom(format!("negative integer {}", v)))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<U256, E> {
            Err(E::custom(format!(
                "number {} is not an exact 64-bit integer; send it as a decimal string",
                v
            )))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            super::parse_u256(v).ok_or_else(|| E::custom(format!("invalid integer string '{}'", v)))
        }
    }
}
