//! Condition operator vocabulary.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::QueryError;

/// Comparison operator of a [`ConditionExpression`](super::ConditionExpression).
///
/// The set mirrors the operators the CRM query service understands. Each
/// variant knows its FetchXML name, and parses back from it.
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::ConditionOperator;
///
/// assert_eq!(ConditionOperator::GreaterEqual.as_fetchxml(), "ge");
/// assert_eq!("not-null".parse::<ConditionOperator>().unwrap(), ConditionOperator::NotNull);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Null,
    NotNull,
    BeginsWith,
    DoesNotBeginWith,
    EndsWith,
    DoesNotEndWith,
    /// Substring match; sent as `like` with the operand wrapped in `%`.
    Contains,
    /// Negated substring match; sent as `not-like`.
    DoesNotContain,
    On,
    OnOrBefore,
    OnOrAfter,
    Yesterday,
    Today,
    Tomorrow,
    Last7Days,
    Next7Days,
    LastWeek,
    ThisWeek,
    NextWeek,
    LastMonth,
    ThisMonth,
    NextMonth,
    LastYear,
    ThisYear,
    NextYear,
    LastXDays,
    NextXDays,
    OlderThanXDays,
    EqualUserId,
    NotEqualUserId,
    EqualBusinessId,
    NotEqualBusinessId,
    Above,
    Under,
    ContainValues,
    DoesNotContainValues,
}

/// Operators that have their own FetchXML name, in parse order.
const PARSEABLE: &[ConditionOperator] = &[
    ConditionOperator::Equal,
    ConditionOperator::NotEqual,
    ConditionOperator::GreaterThan,
    ConditionOperator::GreaterEqual,
    ConditionOperator::LessThan,
    ConditionOperator::LessEqual,
    ConditionOperator::Like,
    ConditionOperator::NotLike,
    ConditionOperator::In,
    ConditionOperator::NotIn,
    ConditionOperator::Between,
    ConditionOperator::NotBetween,
    ConditionOperator::Null,
    ConditionOperator::NotNull,
    ConditionOperator::BeginsWith,
    ConditionOperator::DoesNotBeginWith,
    ConditionOperator::EndsWith,
    ConditionOperator::DoesNotEndWith,
    ConditionOperator::On,
    ConditionOperator::OnOrBefore,
    ConditionOperator::OnOrAfter,
    ConditionOperator::Yesterday,
    ConditionOperator::Today,
    ConditionOperator::Tomorrow,
    ConditionOperator::Last7Days,
    ConditionOperator::Next7Days,
    ConditionOperator::LastWeek,
    ConditionOperator::ThisWeek,
    ConditionOperator::NextWeek,
    ConditionOperator::LastMonth,
    ConditionOperator::ThisMonth,
    ConditionOperator::NextMonth,
    ConditionOperator::LastYear,
    ConditionOperator::ThisYear,
    ConditionOperator::NextYear,
    ConditionOperator::LastXDays,
    ConditionOperator::NextXDays,
    ConditionOperator::OlderThanXDays,
    ConditionOperator::EqualUserId,
    ConditionOperator::NotEqualUserId,
    ConditionOperator::EqualBusinessId,
    ConditionOperator::NotEqualBusinessId,
    ConditionOperator::Above,
    ConditionOperator::Under,
    ConditionOperator::ContainValues,
    ConditionOperator::DoesNotContainValues,
];

impl ConditionOperator {
    /// Returns the FetchXML `operator` attribute for this operator.
    pub fn as_fetchxml(self) -> &'static str {
        match self {
            ConditionOperator::Equal => "eq",
            ConditionOperator::NotEqual => "ne",
            ConditionOperator::GreaterThan => "gt",
            ConditionOperator::GreaterEqual => "ge",
            ConditionOperator::LessThan => "lt",
            ConditionOperator::LessEqual => "le",
            ConditionOperator::Like => "like",
            ConditionOperator::NotLike => "not-like",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "not-in",
            ConditionOperator::Between => "between",
            ConditionOperator::NotBetween => "not-between",
            ConditionOperator::Null => "null",
            ConditionOperator::NotNull => "not-null",
            ConditionOperator::BeginsWith => "begins-with",
            ConditionOperator::DoesNotBeginWith => "not-begin-with",
            ConditionOperator::EndsWith => "ends-with",
            ConditionOperator::DoesNotEndWith => "not-end-with",
            ConditionOperator::On => "on",
            ConditionOperator::OnOrBefore => "on-or-before",
            ConditionOperator::OnOrAfter => "on-or-after",
            ConditionOperator::Yesterday => "yesterday",
            ConditionOperator::Today => "today",
            ConditionOperator::Tomorrow => "tomorrow",
            ConditionOperator::Last7Days => "last-seven-days",
            ConditionOperator::Next7Days => "next-seven-days",
            ConditionOperator::LastWeek => "last-week",
            ConditionOperator::ThisWeek => "this-week",
            ConditionOperator::NextWeek => "next-week",
            ConditionOperator::LastMonth => "last-month",
            ConditionOperator::ThisMonth => "this-month",
            ConditionOperator::NextMonth => "next-month",
            ConditionOperator::LastYear => "last-year",
            ConditionOperator::ThisYear => "this-year",
            ConditionOperator::NextYear => "next-year",
            ConditionOperator::LastXDays => "last-x-days",
            ConditionOperator::NextXDays => "next-x-days",
            ConditionOperator::OlderThanXDays => "olderthan-x-days",
            ConditionOperator::EqualUserId => "eq-userid",
            ConditionOperator::NotEqualUserId => "ne-userid",
            ConditionOperator::EqualBusinessId => "eq-businessid",
            ConditionOperator::NotEqualBusinessId => "ne-businessid",
            ConditionOperator::Above => "above",
            ConditionOperator::Under => "under",
            ConditionOperator::ContainValues => "contain-values",
            ConditionOperator::DoesNotContainValues => "not-contain-values",
            // No native FetchXML name; rendered through like/not-like.
            ConditionOperator::Contains => "like",
            ConditionOperator::DoesNotContain => "not-like",
        }
    }

    /// Returns `true` for operators that wrap their operand in `%…%`.
    pub fn is_substring(self) -> bool {
        matches!(
            self,
            ConditionOperator::Contains | ConditionOperator::DoesNotContain
        )
    }
}

impl FromStr for ConditionOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PARSEABLE
            .iter()
            .copied()
            .find(|op| op.as_fetchxml().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_fetchxml())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_operator_parses_back() {
        for op in PARSEABLE {
            assert_eq!(op.as_fetchxml().parse::<ConditionOperator>(), Ok(*op));
        }
        assert_eq!("GE".parse::<ConditionOperator>(), Ok(ConditionOperator::GreaterEqual));
    }

    #[test]
    fn test_substring_operators_render_as_like() {
        assert_eq!(ConditionOperator::Contains.as_fetchxml(), "like");
        assert_eq!(ConditionOperator::DoesNotContain.as_fetchxml(), "not-like");
        assert!(ConditionOperator::Contains.is_substring());
        assert!(!ConditionOperator::Like.is_substring());
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            "sounds-like".parse::<ConditionOperator>(),
            Err(QueryError::UnknownOperator("sounds-like".to_string()))
        );
    }
}
