//! Generic value conversion.
//!
//! Loosely-typed request values arrive either as integers or as text. Text is
//! interpreted as, in order:
//!
//! - `0x`-prefixed hexadecimal (`"0x2"`),
//! - a unit amount (`"1 ether"`, `"1.5gwei"`, `"10 wei"`),
//! - plain decimal (`"21000"`).

use std::fmt;

use alloy_primitives::U256;
use alloy_primitives::utils::{ParseUnits, Unit};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// An integer, or text that should convert to one.
///
/// JSON integers of any width deserialize into [`Numeric::Integer`]; floats
/// and negative numbers are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeric {
    /// Already an integer; no conversion needed.
    Integer(U256),
    /// Textual representation (hex, decimal or unit amount).
    Text(String),
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self::Integer(U256::from(value))
    }
}

impl From<U256> for Numeric {
    fn from(value: U256) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Wire form of [`Numeric`]. [`serde_json::Number`] keeps every digit of a
/// wide integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Text(text) => Ok(Self::Text(text)),
            NumberOrText::Number(number) => U256::from_str_radix(&number.to_string(), 10)
                .map(Self::Integer)
                .map_err(|_| D::Error::custom(format!("'{number}' is not a non-negative integer"))),
        }
    }
}

/// Target types reachable from a [`Numeric`].
pub trait FromNumeric: Sized {
    /// Converts `value` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the value cannot be represented.
    fn from_numeric(value: &Numeric) -> Result<Self>;
}

impl FromNumeric for U256 {
    fn from_numeric(value: &Numeric) -> Result<Self> {
        match value {
            Numeric::Integer(value) => Ok(*value),
            Numeric::Text(text) => parse_integer(text),
        }
    }
}

impl FromNumeric for u64 {
    fn from_numeric(value: &Numeric) -> Result<Self> {
        U256::from_numeric(value)?
            .try_into()
            .map_err(|_| Error::conversion(format!("'{value}' does not fit in 64 bits")))
    }
}

/// Converts `value` into `T`.
///
/// # Errors
///
/// Returns [`Error::Conversion`] if the value cannot be interpreted as `T`.
pub fn convert<T: FromNumeric>(value: &Numeric) -> Result<T> {
    T::from_numeric(value)
}

/// Parses a hexadecimal integer, with or without the `0x` prefix.
///
/// # Errors
///
/// Returns [`Error::Conversion`] for empty or non-hex input.
pub fn parse_hex_u64(text: &str) -> Result<u64> {
    let digits = strip_hex_prefix(text.trim()).unwrap_or_else(|| text.trim());
    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::conversion(format!("'{text}' is not a hex integer: {e}")))
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_integer(text: &str) -> Result<U256> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::conversion("empty string is not an integer"));
    }
    if let Some(digits) = strip_hex_prefix(text) {
        return U256::from_str_radix(digits, 16)
            .map_err(|e| Error::conversion(format!("'{text}' is not a hex integer: {e}")));
    }
    if let Some(split) = text.find(|c: char| c.is_ascii_alphabetic()) {
        let (amount, unit) = text.split_at(split);
        return parse_amount(amount.trim(), unit.trim());
    }
    U256::from_str_radix(text, 10)
        .map_err(|e| Error::conversion(format!("'{text}' is not an integer: {e}")))
}

fn parse_amount(amount: &str, unit: &str) -> Result<U256> {
    let unit: Unit = unit
        .to_ascii_lowercase()
        .parse()
        .map_err(|e| Error::conversion(format!("unknown unit '{unit}': {e}")))?;
    let parsed = ParseUnits::parse_units(amount, unit)
        .map_err(|e| Error::conversion(format!("invalid amount '{amount}': {e}")))?;
    if parsed.is_negative() {
        return Err(Error::conversion(format!("negative amount '{amount}'")));
    }
    Ok(parsed.get_absolute())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::integer(Numeric::from(7u64), 7)]
    #[case::hex("0x0".into(), 0)]
    #[case::hex_upper("0X2".into(), 2)]
    #[case::decimal("21000".into(), 21_000)]
    #[case::gwei("1 gwei".into(), 1_000_000_000)]
    #[case::gwei_no_space("2gwei".into(), 2_000_000_000)]
    #[case::fractional_gwei("1.5 gwei".into(), 1_500_000_000)]
    #[case::wei("10 wei".into(), 10)]
    fn test_convert_u64(#[case] value: Numeric, #[case] expected: u64) {
        assert_eq!(convert::<u64>(&value).unwrap(), expected);
    }

    #[test]
    fn test_convert_ether_to_u256() {
        let value = convert::<U256>(&"1 ether".into()).unwrap();
        assert_eq!(value, U256::from(10u64).pow(U256::from(18u64)));
    }

    #[rstest]
    #[case::not_a_number("abc")]
    #[case::bad_hex("0xzz")]
    #[case::unknown_unit("5 bananas")]
    #[case::negative("-1 ether")]
    #[case::empty("")]
    fn test_convert_rejects(#[case] text: &str) {
        let err = convert::<U256>(&text.into()).unwrap_err();
        assert!(matches!(err, Error::Conversion(_)), "{err}");
    }

    #[test]
    fn test_wide_json_integer_is_kept() {
        let value: Numeric = serde_json::from_str("100000000000000000000").unwrap();
        let hundred_ether = U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(value, Numeric::Integer(hundred_ether));
        assert_eq!(convert::<U256>(&value).unwrap(), hundred_ether);
        assert!(matches!(convert::<u64>(&value), Err(Error::Conversion(_))));
    }

    #[rstest]
    #[case::negative("-1")]
    #[case::fractional("1.5")]
    #[case::exponent("1e3")]
    fn test_json_number_must_be_unsigned_integer(#[case] raw: &str) {
        assert!(serde_json::from_str::<Numeric>(raw).is_err());
    }

    #[test]
    fn test_text_and_toml_integers() {
        let value: Numeric = serde_json::from_str(r#""0x10""#).unwrap();
        assert_eq!(value, Numeric::from("0x10"));

        let table: toml::Table = toml::from_str("n = 2").unwrap();
        let value: Numeric = table["n"].clone().try_into().unwrap();
        assert_eq!(value, Numeric::from(2u64));
    }

    #[test]
    fn test_convert_u64_overflow() {
        assert!(convert::<u64>(&"1 ether".into()).is_ok());
        let err = convert::<u64>(&"100 ether".into()).unwrap_err();
        assert!(matches!(err, Error::Conversion(_)));
    }

    #[rstest]
    #[case::prefixed("0xe708", 59144)]
    #[case::bare("e704", 59140)]
    #[case::padded(" 0x1 ", 1)]
    fn test_parse_hex_u64(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(parse_hex_u64(text).unwrap(), expected);
    }

    #[test]
    fn test_parse_hex_u64_rejects_garbage() {
        assert!(matches!(parse_hex_u64("mainnet"), Err(Error::Conversion(_))));
        assert!(matches!(parse_hex_u64("0x"), Err(Error::Conversion(_))));
    }
}
