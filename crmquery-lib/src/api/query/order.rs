//! Ordering types.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderType {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl OrderType {
    /// Returns `true` for descending order.
    pub fn is_descending(self) -> bool {
        matches!(self, OrderType::Descending)
    }
}

/// One ordering key on the root entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExpression {
    /// The attribute to order by.
    pub attribute_name: String,
    /// The sort direction.
    pub order_type: OrderType,
}

impl OrderExpression {
    /// Creates an ordering key.
    pub fn new(attribute_name: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            order_type,
        }
    }

    /// Creates an ascending ordering key.
    pub fn asc(attribute_name: impl Into<String>) -> Self {
        Self::new(attribute_name, OrderType::Ascending)
    }

    /// Creates a descending ordering key.
    pub fn desc(attribute_name: impl Into<String>) -> Self {
        Self::new(attribute_name, OrderType::Descending)
    }
}
