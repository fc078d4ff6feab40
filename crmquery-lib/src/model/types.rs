//! CRM value types that can appear in condition values

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A monetary amount.
///
/// Currency is a separate lookup on the record, so only the amount takes part
/// in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// Creates a money amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A picklist (option set) value.
///
/// Conditions compare on the numeric option; the label is carried for display only.
///
/// # Example
///
/// ```
/// use crmquery_lib::model::types::OptionSetValue;
///
/// let active = OptionSetValue::with_label(0, "Active");
/// assert_eq!(active.value, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSetValue {
    /// Numeric option value.
    pub value: i32,
    /// Display label, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OptionSetValue {
    /// Creates an option set value without a label.
    pub fn new(value: i32) -> Self {
        Self { value, label: None }
    }

    /// Creates an option set value with a display label.
    pub fn with_label(value: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// A reference to another record, used to compare lookup attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// Logical name of the referenced entity (e.g. "contact").
    pub logical_name: String,
    /// Id of the referenced record.
    pub id: Uuid,
}

impl EntityReference {
    /// Creates a reference to a record of `logical_name`.
    pub fn new(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            logical_name: logical_name.into(),
            id,
        }
    }
}
