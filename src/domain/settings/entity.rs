use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SettingType {
    String,
    Number,
    Boolean,
    Json,
}

impl SettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::String => "STRING",
            SettingType::Number => "NUMBER",
            SettingType::Boolean => "BOOLEAN",
            SettingType::Json => "JSON",
        }
    }
}

impl FromStr for SettingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRING" => Ok(SettingType::String),
            "NUMBER" => Ok(SettingType::Number),
            "BOOLEAN" => Ok(SettingType::Boolean),
            "JSON" => Ok(SettingType::Json),
            other => Err(DomainError::Validation(format!(
                "unknown setting type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingKey(String);

impl SettingKey {
    pub const MAX_LEN: usize = 100;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() || value.len() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "setting key must be 1-{} characters",
                Self::MAX_LEN
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(DomainError::Validation(format!(
                "setting key '{value}' may only contain letters, digits, '.', '_' and '-'"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A setting value tagged with its declared type. Persisted as a string
/// column next to the type name.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Json(Value),
}

impl SettingValue {
    pub fn kind(&self) -> SettingType {
        match self {
            SettingValue::String(_) => SettingType::String,
            SettingValue::Number(_) => SettingType::Number,
            SettingValue::Boolean(_) => SettingType::Boolean,
            SettingValue::Json(_) => SettingType::Json,
        }
    }

    /// Checks that a JSON value supplied by a client matches the declared type.
    pub fn from_json(kind: SettingType, value: Value) -> DomainResult<Self> {
        match (kind, value) {
            (SettingType::String, Value::String(s)) => Ok(SettingValue::String(s)),
            (SettingType::Number, Value::Number(n)) => Ok(SettingValue::Number(n)),
            (SettingType::Boolean, Value::Bool(b)) => Ok(SettingValue::Boolean(b)),
            (SettingType::Json, v) => Ok(SettingValue::Json(v)),
            (kind, other) => Err(DomainError::Validation(format!(
                "value {other} does not match setting type {}",
                kind.as_str()
            ))),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::String(s) => Value::String(s.clone()),
            SettingValue::Number(n) => Value::Number(n.clone()),
            SettingValue::Boolean(b) => Value::Bool(*b),
            SettingValue::Json(v) => v.clone(),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            SettingValue::String(s) => s.clone(),
            SettingValue::Number(n) => n.to_string(),
            SettingValue::Boolean(b) => b.to_string(),
            SettingValue::Json(v) => v.to_string(),
        }
    }

    pub fn decode(kind: SettingType, raw: &str) -> DomainResult<Self> {
        let invalid = |err: &dyn fmt::Display| {
            DomainError::Validation(format!(
                "stored {} setting is malformed: {err}",
                kind.as_str()
            ))
        };
        match kind {
            SettingType::String => Ok(SettingValue::String(raw.to_string())),
            SettingType::Number => serde_json::from_str::<serde_json::Number>(raw.trim())
                .map(SettingValue::Number)
                .map_err(|e| invalid(&e)),
            SettingType::Boolean => match raw.trim() {
                "true" => Ok(SettingValue::Boolean(true)),
                "false" => Ok(SettingValue::Boolean(false)),
                other => Err(invalid(&format!("expected true or false, got '{other}'"))),
            },
            SettingType::Json => serde_json::from_str::<Value>(raw)
                .map(SettingValue::Json)
                .map_err(|e| invalid(&e)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Setting {
    pub key: SettingKey,
    pub value: SettingValue,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_round_trip_through_encoding() {
        let value = json!({"links": [{"label": "Home", "href": "/"}], "count": 3, "on": true});
        let encoded = SettingValue::from_json(SettingType::Json, value.clone())
            .unwrap()
            .encode();
        let decoded = SettingValue::decode(SettingType::Json, &encoded).unwrap();
        assert_eq!(decoded.to_json(), value);
    }

    #[test]
    fn numbers_keep_their_representation() {
        let encoded = SettingValue::from_json(SettingType::Number, json!(5))
            .unwrap()
            .encode();
        assert_eq!(encoded, "5");
        let decoded = SettingValue::decode(SettingType::Number, &encoded).unwrap();
        assert_eq!(decoded.to_json(), json!(5));
    }

    #[test]
    fn mismatched_types_are_rejected() {
        assert!(SettingValue::from_json(SettingType::Boolean, json!("yes")).is_err());
        assert!(SettingValue::from_json(SettingType::Number, json!("5")).is_err());
        assert!(SettingValue::decode(SettingType::Boolean, "maybe").is_err());
    }

    #[test]
    fn keys_are_restricted() {
        assert!(SettingKey::new("hero.video").is_ok());
        assert!(SettingKey::new("bad key").is_err());
        assert!(SettingKey::new("").is_err());
    }
}
