//! Projection (column set) type.

use serde::Deserialize;
use serde::Serialize;

/// The set of attributes a query returns.
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::ColumnSet;
///
/// let all = ColumnSet::All;
/// let count_only = ColumnSet::Empty;
/// let some = ColumnSet::from(["name", "revenue", "name"]);
/// assert_eq!(some.fields(), ["name", "revenue"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnSet {
    /// Every attribute of the entity. Costly; prefer explicit fields.
    #[default]
    All,
    /// No attributes, only record ids (count-style queries).
    Empty,
    /// Explicit attribute names, duplicates collapsed.
    Fields(Vec<String>),
}

impl ColumnSet {
    /// Creates an explicit column set, dropping duplicate names.
    ///
    /// The first occurrence of each name keeps its position.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = ColumnSet::Fields(Vec::new());
        for field in fields {
            set.add(field);
        }
        set
    }

    /// Adds an attribute.
    ///
    /// An `All` set stays `All`; an `Empty` set becomes an explicit set.
    pub fn add(&mut self, field: impl Into<String>) {
        let field = field.into();
        match self {
            ColumnSet::All => {}
            ColumnSet::Empty => *self = ColumnSet::Fields(vec![field]),
            ColumnSet::Fields(fields) => {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
    }

    /// Returns `true` if `field` would be returned by this set.
    pub fn contains(&self, field: &str) -> bool {
        match self {
            ColumnSet::All => true,
            ColumnSet::Empty => false,
            ColumnSet::Fields(fields) => fields.iter().any(|f| f == field),
        }
    }

    /// Returns the explicit attribute names (empty for `All` and `Empty`).
    pub fn fields(&self) -> &[String] {
        match self {
            ColumnSet::Fields(fields) => fields,
            ColumnSet::All | ColumnSet::Empty => &[],
        }
    }

    /// Returns `true` for the all-columns set.
    pub fn is_all(&self) -> bool {
        matches!(self, ColumnSet::All)
    }
}

impl From<Vec<String>> for ColumnSet {
    fn from(fields: Vec<String>) -> Self {
        ColumnSet::new(fields)
    }
}

impl From<&[&str]> for ColumnSet {
    fn from(fields: &[&str]) -> Self {
        ColumnSet::new(fields.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSet {
    fn from(fields: [&str; N]) -> Self {
        ColumnSet::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let set = ColumnSet::from(["name", "revenue", "name", "accountid"]);
        assert_eq!(set.fields(), ["name", "revenue", "accountid"]);
    }

    #[test]
    fn test_add_to_sentinels() {
        let mut all = ColumnSet::All;
        all.add("name");
        assert_eq!(all, ColumnSet::All);

        let mut empty = ColumnSet::Empty;
        empty.add("name");
        assert_eq!(empty, ColumnSet::Fields(vec!["name".to_string()]));
    }

    #[test]
    fn test_contains() {
        assert!(ColumnSet::All.contains("anything"));
        assert!(!ColumnSet::Empty.contains("name"));
        assert!(ColumnSet::from(["name"]).contains("name"));
    }
}
