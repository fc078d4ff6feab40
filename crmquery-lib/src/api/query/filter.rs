//! Filter trees and condition leaves.

use serde::Deserialize;
use serde::Serialize;

use super::ConditionOperator;
use crate::model::Value;

/// Boolean combinator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// Every condition and child filter must hold.
    #[default]
    And,
    /// Any condition or child filter may hold.
    Or,
}

impl LogicalOperator {
    /// Returns the FetchXML `type` attribute.
    pub fn as_fetchxml(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

/// A single comparison: attribute, operator and operands.
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::{ConditionExpression, ConditionOperator};
///
/// let cond = ConditionExpression::new("statecode", ConditionOperator::In, [0, 1]);
/// assert_eq!(cond.values.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionExpression {
    /// The attribute being compared.
    pub attribute_name: String,
    /// The comparison operator.
    pub operator: ConditionOperator,
    /// Operands; may be empty for operators such as `Null`.
    pub values: Vec<Value>,
}

impl ConditionExpression {
    /// Creates a condition.
    pub fn new<I, V>(
        attribute_name: impl Into<String>,
        operator: ConditionOperator,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            attribute_name: attribute_name.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a condition that takes no operands (`null`, `today`, `eq-userid`, ...).
    pub fn unary(attribute_name: impl Into<String>, operator: ConditionOperator) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            operator,
            values: Vec::new(),
        }
    }
}

/// A filter tree node: a combinator over conditions and nested filters.
///
/// Used as input to [`CrmQuery::where_filter`](super::CrmQuery::where_filter)
/// and as the owned form of any filter read back from a
/// [`QueryExpression`](super::QueryExpression).
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::{ConditionOperator, FilterExpression, LogicalOperator};
///
/// let filter = FilterExpression::condition("statecode", ConditionOperator::Equal, [0])
///     .with_filter(
///         FilterExpression::new(LogicalOperator::Or)
///             .with_condition("name", ConditionOperator::BeginsWith, ["A"])
///             .with_condition("name", ConditionOperator::BeginsWith, ["B"]),
///     );
/// assert_eq!(filter.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterExpression {
    /// How the conditions and child filters combine.
    pub filter_operator: LogicalOperator,
    /// Condition leaves, in insertion order.
    pub conditions: Vec<ConditionExpression>,
    /// Nested filters, in insertion order.
    pub filters: Vec<FilterExpression>,
}

impl FilterExpression {
    /// Creates an empty filter with the given combinator.
    pub fn new(filter_operator: LogicalOperator) -> Self {
        Self {
            filter_operator,
            conditions: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Creates an AND filter holding one condition.
    pub fn condition<I, V>(
        attribute_name: impl Into<String>,
        operator: ConditionOperator,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut filter = Self::new(LogicalOperator::And);
        filter.add_condition(ConditionExpression::new(attribute_name, operator, values));
        filter
    }

    /// Appends a condition.
    pub fn add_condition(&mut self, condition: ConditionExpression) {
        self.conditions.push(condition);
    }

    /// Appends a nested filter.
    pub fn add_filter(&mut self, filter: FilterExpression) {
        self.filters.push(filter);
    }

    /// Appends a condition, builder style.
    pub fn with_condition<I, V>(
        mut self,
        attribute_name: impl Into<String>,
        operator: ConditionOperator,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add_condition(ConditionExpression::new(attribute_name, operator, values));
        self
    }

    /// Appends a nested filter, builder style.
    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.add_filter(filter);
        self
    }

    /// Returns `true` if the filter has neither conditions nor children.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.filters.is_empty()
    }
}
