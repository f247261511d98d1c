//! Serde helpers for numeric fields.
//!
//! Decimal columns arrive as JSON strings ("12.50") from some deployments of
//! the backend and as numbers from others; both are accepted on read.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid number: {v}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }
}

pub fn f64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(LenientF64)
}

/// Целые количества; дробная часть недопустима
pub fn i64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = deserializer.deserialize_any(LenientF64)?;
    if value.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected an integer, got {value}")));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::f64_from_any")]
        price: f64,
        #[serde(deserialize_with = "super::i64_from_any")]
        qty: i64,
    }

    #[test]
    fn reads_numbers_and_strings() {
        let a: Row = serde_json::from_str(r#"{"price": "12.50", "qty": 3}"#).unwrap();
        assert_eq!(a.price, 12.5);
        assert_eq!(a.qty, 3);
        let b: Row = serde_json::from_str(r#"{"price": 9, "qty": "4"}"#).unwrap();
        assert_eq!(b.price, 9.0);
        assert_eq!(b.qty, 4);
    }

    #[test]
    fn rejects_fractional_quantity() {
        assert!(serde_json::from_str::<Row>(r#"{"price": 1, "qty": 1.5}"#).is_err());
    }
}
