//! Link entities (joins).

use serde::Deserialize;
use serde::Serialize;

use super::ColumnSet;
use super::FilterExpression;

/// The type of join for a link entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinOperator {
    /// Inner join (default) - only returns records where the link exists.
    #[default]
    Inner,
    /// Outer join - returns all records, with null for missing links.
    LeftOuter,
}

impl JoinOperator {
    /// Returns the FetchXML `link-type` attribute.
    pub fn as_fetchxml(self) -> &'static str {
        match self {
            JoinOperator::Inner => "inner",
            JoinOperator::LeftOuter => "outer",
        }
    }
}

/// A join from one entity's attribute to another entity's attribute.
///
/// The owned form of a link: passed to
/// [`CrmQuery::join_link`](super::CrmQuery::join_link), and produced by
/// [`QueryExpression::to_link_entity`](super::QueryExpression::to_link_entity).
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::{JoinOperator, LinkEntity};
///
/// let link = LinkEntity::inner("account", "primarycontactid", "contact", "contactid")
///     .with_alias("pc")
///     .with_columns(["fullname"]);
/// assert_eq!(link.join_operator, JoinOperator::Inner);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntity {
    /// Entity the join starts from.
    pub link_from_entity_name: String,
    /// Attribute on the from entity.
    pub link_from_attribute_name: String,
    /// Entity being joined.
    pub link_to_entity_name: String,
    /// Attribute on the joined entity.
    pub link_to_attribute_name: String,
    /// Join type.
    pub join_operator: JoinOperator,
    /// Alias for the joined entity's attributes in results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_alias: Option<String>,
    /// Attributes returned from the joined entity.
    pub columns: ColumnSet,
    /// Criteria scoped to the joined entity.
    pub link_criteria: FilterExpression,
    /// Further joins from the joined entity.
    pub link_entities: Vec<LinkEntity>,
}

impl LinkEntity {
    /// Creates an inner join. No columns of the joined entity are returned.
    pub fn inner(
        from_entity: impl Into<String>,
        from_field: impl Into<String>,
        to_entity: impl Into<String>,
        to_field: impl Into<String>,
    ) -> Self {
        Self {
            link_from_entity_name: from_entity.into(),
            link_from_attribute_name: from_field.into(),
            link_to_entity_name: to_entity.into(),
            link_to_attribute_name: to_field.into(),
            join_operator: JoinOperator::Inner,
            entity_alias: None,
            columns: ColumnSet::Empty,
            link_criteria: FilterExpression::default(),
            link_entities: Vec::new(),
        }
    }

    /// Sets the join type.
    pub fn with_join_operator(mut self, join_operator: JoinOperator) -> Self {
        self.join_operator = join_operator;
        self
    }

    /// Sets the alias of the joined entity.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.entity_alias = Some(alias.into());
        self
    }

    /// Sets the attributes returned from the joined entity.
    pub fn with_columns(mut self, columns: impl Into<ColumnSet>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Adds a filter under this link's criteria.
    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.link_criteria.add_filter(filter);
        self
    }

    /// Adds a nested link.
    pub fn with_link(mut self, link: LinkEntity) -> Self {
        self.link_entities.push(link);
        self
    }
}
