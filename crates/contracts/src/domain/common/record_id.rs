use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Идентификатор записи, назначаемый пользователем.
///
/// The backend hands ids out either as JSON strings or as plain numbers, so
/// deserialization accepts both and normalises to text. On the wire it is
/// always written back as a string, exactly as the forms submit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Пустой или состоящий из пробелов id (незаполненное поле формы)
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer record id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
        Ok(RecordId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    // Missing foreign keys come back as null on some records
    fn visit_unit<E: de::Error>(self) -> Result<RecordId, E> {
        Ok(RecordId::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<RecordId, E> {
        Ok(RecordId::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RecordId, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_numeric_ids() {
        let from_str: RecordId = serde_json::from_str(r#""AR1""#).unwrap();
        let from_num: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(from_str.as_str(), "AR1");
        assert_eq!(from_num, RecordId::from("42"));
    }

    #[test]
    fn null_becomes_blank() {
        let id: RecordId = serde_json::from_str("null").unwrap();
        assert!(id.is_blank());
    }

    #[test]
    fn always_serializes_as_string() {
        let json = serde_json::to_string(&RecordId::from("7")).unwrap();
        assert_eq!(json, r#""7""#);
    }
}
