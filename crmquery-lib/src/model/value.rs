//! Value enum for condition operands

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::types::EntityReference;
use super::types::Money;
use super::types::OptionSetValue;

/// A single operand of a condition.
///
/// Conditions carry a list of these; most operators take one, `in`/`between`
/// take several and operators such as `null` take none.
///
/// # Example
///
/// ```
/// use crmquery_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
///
/// Serde keeps the variant name as the tag (`{"String":"00123"}`,
/// `{"Long":7}`), so an operand reads back as the same variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Monetary value.
    Money(Money),
    /// Picklist value.
    OptionSet(OptionSetValue),
    /// Lookup value.
    EntityReference(EntityReference),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text the query service expects for this operand.
    ///
    /// Booleans become `1`/`0`, picklists and money their number, lookups the
    /// referenced id. `Null` is empty.
    pub fn to_query_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Guid(g) => g.hyphenated().to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Money(m) => m.amount().to_string(),
            Value::OptionSet(o) => o.value.to_string(),
            Value::EntityReference(r) => r.id.hyphenated().to_string(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

impl From<OptionSetValue> for Value {
    fn from(v: OptionSetValue) -> Self {
        Value::OptionSet(v)
    }
}

impl From<EntityReference> for Value {
    fn from(v: EntityReference) -> Self {
        Value::EntityReference(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_query_text() {
        assert_eq!(Value::from(true).to_query_text(), "1");
        assert_eq!(Value::from(false).to_query_text(), "0");
        assert_eq!(Value::from(42i32).to_query_text(), "42");
        assert_eq!(Value::from("Acme").to_query_text(), "Acme");
        assert_eq!(Value::Null.to_query_text(), "");
        assert_eq!(Value::from(OptionSetValue::new(3)).to_query_text(), "3");
    }

    #[test]
    fn test_query_text_for_ids_and_dates() {
        let id = Uuid::nil();
        assert_eq!(
            Value::from(EntityReference::new("contact", id)).to_query_text(),
            "00000000-0000-0000-0000-000000000000"
        );

        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Value::from(at).to_query_text(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_option_converts_to_null() {
        let missing: Option<&str> = None;
        assert!(Value::from(missing).is_null());
        assert_eq!(Value::from(Some(7i64)), Value::Long(7));
    }

    #[test]
    fn test_serde_keeps_variant() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(7),
            Value::Long(7),
            Value::Float(2.5),
            Value::Decimal(Decimal::new(123, 0)),
            Value::String("00123".to_string()),
            Value::String("true".to_string()),
            Value::Guid(Uuid::nil()),
            Value::DateTime(at),
            Value::Money(Money::new(Decimal::new(1999, 2))),
            Value::OptionSet(OptionSetValue::with_label(1, "Inactive")),
            Value::EntityReference(EntityReference::new("contact", Uuid::nil())),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "{json}");
            assert_eq!(back.to_query_text(), value.to_query_text());
        }
    }

    #[test]
    fn test_serde_tags_string_operand() {
        let json = serde_json::to_value(Value::from("00123")).unwrap();
        assert_eq!(json, serde_json::json!({ "String": "00123" }));
    }
}
