//! Chainable query builder.

use super::BuilderConfig;
use super::ColumnSet;
use super::ConditionExpression;
use super::ConditionOperator;
use super::FilterExpression;
use super::FilterId;
use super::LinkEntity;
use super::LinkId;
use super::LogicalOperator;
use super::OrderExpression;
use super::OrderType;
use super::PagingInfo;
use super::QueryExpression;
use super::UnmatchedTarget;
use crate::error::QueryError;
use crate::model::Value;

/// A small SQL-like language for building [`QueryExpression`]s.
///
/// A chain starts with [`select`](Self::select) and the result is read with
/// [`query`](Self::query) (or taken with [`into_query`](Self::into_query)).
///
/// The builder remembers the most recently joined link and the most recently
/// added filter. `where_` attaches to that link when there is one, which is
/// what lets a chain filter a self-join; `or` extends that filter.
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::{ConditionOperator, CrmQuery, OrderType};
///
/// let query = CrmQuery::select(["name", "revenue"])
///     .from("account")
///     .where_("account", "statecode", ConditionOperator::Equal, [0])
///     .or("statecode", ConditionOperator::Equal, [1])?
///     .order_by(["revenue"], OrderType::Descending)
///     .page(50, 1)
///     .into_query()?;
///
/// assert_eq!(query.entity_name(), Some("account"));
/// # Ok::<(), crmquery_lib::error::QueryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CrmQuery {
    query: QueryExpression,
    config: BuilderConfig,
    last_added_link: Option<LinkId>,
    current_filter: Option<FilterId>,
    errors: Vec<QueryError>,
}

impl CrmQuery {
    /// Starts a chain with the given projection.
    ///
    /// This is the only way to create a builder.
    pub fn select(columns: impl Into<ColumnSet>) -> Self {
        Self {
            query: QueryExpression::new(columns.into()),
            config: BuilderConfig::default(),
            last_added_link: None,
            current_filter: None,
            errors: Vec::new(),
        }
    }

    /// Starts a chain returning every column. Avoid where possible, it is slow.
    pub fn select_all() -> Self {
        Self::select(ColumnSet::All)
    }

    /// Starts a chain returning the given fields.
    pub fn select_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::select(ColumnSet::new(fields))
    }

    /// Replaces the builder configuration.
    ///
    /// Applies to calls made after it; set it right after `select`.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the entity the query returns.
    pub fn from(mut self, entity_name: impl Into<String>) -> Self {
        self.query.set_entity_name(entity_name.into());
        self
    }

    /// Joins `from_entity.from_field` to `to_entity.to_field` (inner join).
    ///
    /// Use [`where_`](Self::where_) afterwards to filter on the `to` entity.
    pub fn join(
        self,
        from_entity: impl AsRef<str>,
        from_field: impl Into<String>,
        to_entity: impl Into<String>,
        to_field: impl Into<String>,
    ) -> Self {
        let from_entity = from_entity.as_ref();
        let link = LinkEntity::inner(from_entity, from_field, to_entity, to_field);
        self.join_link(from_entity, link)
    }

    /// Attaches a prepared link under `from_entity`.
    ///
    /// The parent is the root when `from_entity` names it, otherwise the first
    /// link joining to `from_entity`. With no parent the link is not attached,
    /// but it still becomes the target of the next `where_`.
    pub fn join_link(mut self, from_entity: impl AsRef<str>, link: LinkEntity) -> Self {
        let from_entity = from_entity.as_ref();
        let to_entity = link.link_to_entity_name.clone();
        let case_insensitive = self.config.case_insensitive_names;
        let id = self.query.insert_link(link);

        if self.query.is_root_entity(from_entity, case_insensitive) {
            log::debug!("join {} -> {} attached to root", from_entity, to_entity);
            self.query.attach_root_link(id);
        } else if let Some(parent) = self.query.find_entity_link(from_entity, case_insensitive) {
            log::debug!("join {} -> {} attached under {:?}", from_entity, to_entity, parent);
            self.query.attach_child_link(parent, id);
        } else {
            self.unmatched(QueryError::unmatched_join(from_entity, to_entity));
        }

        self.last_added_link = Some(id);
        self
    }

    /// Adds the condition `field operator values` as a new AND filter.
    ///
    /// The filter goes to the most recently joined link if there is one
    /// (`entity` is then ignored), else to the root when `entity` names it,
    /// else to the first link joining to `entity`.
    pub fn where_<I, V>(
        self,
        entity: impl AsRef<str>,
        field: impl Into<String>,
        operator: ConditionOperator,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_filter(entity, FilterExpression::condition(field, operator, values))
    }

    /// Adds a prepared filter, resolving its target like [`where_`](Self::where_).
    ///
    /// The filter becomes the target of subsequent [`or`](Self::or) calls
    /// even if it could not be attached.
    pub fn where_filter(mut self, entity: impl AsRef<str>, filter: FilterExpression) -> Self {
        let entity = entity.as_ref();
        let case_insensitive = self.config.case_insensitive_names;
        let id = self.query.insert_filter(filter);
        self.current_filter = Some(id);

        let scope = if let Some(link) = self.last_added_link {
            Some(self.query.link(link).link_criteria)
        } else if self.query.is_root_entity(entity, case_insensitive) {
            Some(self.query.criteria())
        } else {
            self.query
                .find_entity_link(entity, case_insensitive)
                .map(|link| self.query.link(link).link_criteria)
        };

        match scope {
            Some(scope) => {
                log::debug!("filter {:?} attached under {:?}", id, scope);
                self.query.attach_filter(scope, id);
            }
            None => self.unmatched(QueryError::unmatched_where(entity)),
        }
        self
    }

    /// Adds a condition to the current filter and makes the filter an OR.
    ///
    /// Every condition already in the filter becomes an alternative, not
    /// just the new one.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidState`] if no `where_` has been called yet.
    pub fn or<I, V>(
        mut self,
        field: impl Into<String>,
        operator: ConditionOperator,
        values: I,
    ) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let Some(id) = self.current_filter else {
            return Err(QueryError::invalid_state(
                "Unable to add 'Or' condition: current filter expression is null",
            ));
        };

        let filter = self.query.filter_mut(id);
        filter
            .conditions
            .push(ConditionExpression::new(field, operator, values));
        filter.filter_operator = LogicalOperator::Or;
        Ok(self)
    }

    /// Orders the root entity by each non-empty field, in the given order.
    ///
    /// Accepts `&str`, `String` or `Option<&str>` items; empty and `None`
    /// entries are skipped.
    pub fn order_by<I>(mut self, fields: I, order_type: OrderType) -> Self
    where
        I: IntoIterator,
        I::Item: OrderField,
    {
        for field in fields {
            if let Some(name) = field.field_name().filter(|name| !name.is_empty()) {
                self.query.add_order(OrderExpression::new(name, order_type));
            }
        }
        self
    }

    /// Returns `page_number` (1-based) with `page_size` records per page,
    /// replacing any earlier paging.
    pub fn page(self, page_size: u32, page_number: u32) -> Self {
        self.page_info(PagingInfo::new(page_size, page_number))
    }

    /// Sets paging info directly, e.g. to pass a paging cookie.
    pub fn page_info(mut self, page_info: PagingInfo) -> Self {
        self.query.set_page_info(page_info);
        self
    }

    /// Returns only distinct records.
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.query.set_distinct(distinct);
        self
    }

    /// Sets the alias of the most recently joined link.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        if let Some(link) = self.last_added_link {
            self.query.link_mut(link).entity_alias = Some(alias.into());
        }
        self
    }

    /// Forgets the most recently joined link, so the next `where_` is
    /// placed by its entity name.
    pub fn reset_scope(mut self) -> Self {
        self.last_added_link = None;
        self
    }

    /// Returns the query built so far.
    pub fn query(&self) -> &QueryExpression {
        &self.query
    }

    /// Returns the joins and filters that were dropped under
    /// [`UnmatchedTarget::Reject`].
    pub fn errors(&self) -> &[QueryError] {
        &self.errors
    }

    /// Takes the finished query.
    ///
    /// # Errors
    ///
    /// The first recorded unmatched join or filter, under
    /// [`UnmatchedTarget::Reject`].
    pub fn into_query(mut self) -> Result<QueryExpression, QueryError> {
        if self.errors.is_empty() {
            Ok(self.query)
        } else {
            Err(self.errors.swap_remove(0))
        }
    }

    fn unmatched(&mut self, error: QueryError) {
        match self.config.unmatched_target {
            UnmatchedTarget::Ignore => log::debug!("{}", error),
            UnmatchedTarget::Warn => log::warn!("{}", error),
            UnmatchedTarget::Reject => {
                log::debug!("{}", error);
                self.errors.push(error);
            }
        }
    }
}

/// An entry of an [`order_by`](CrmQuery::order_by) field list.
pub trait OrderField {
    /// The field name, or `None` to skip the entry.
    fn field_name(&self) -> Option<&str>;
}

impl OrderField for &str {
    fn field_name(&self) -> Option<&str> {
        Some(*self)
    }
}

impl OrderField for String {
    fn field_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl OrderField for &String {
    fn field_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl OrderField for Option<&str> {
    fn field_name(&self) -> Option<&str> {
        *self
    }
}

impl OrderField for Option<String> {
    fn field_name(&self) -> Option<&str> {
        self.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::JoinOperator;

    fn account() -> CrmQuery {
        CrmQuery::select_all().from("account")
    }

    #[test]
    fn test_select_fields_projection() {
        let query = CrmQuery::select(["name", "revenue", "name"]).from("account");
        assert_eq!(query.query().column_set().fields(), ["name", "revenue"]);

        let query = CrmQuery::select_fields(vec!["name".to_string()]);
        assert!(query.query().column_set().contains("name"));
        assert!(!query.query().column_set().contains("revenue"));
    }

    #[test]
    fn test_select_all_from() {
        let query = account();
        assert_eq!(query.query().entity_name(), Some("account"));
        assert_eq!(query.query().column_set(), &ColumnSet::All);
    }

    #[test]
    fn test_select_no_columns() {
        let query = CrmQuery::select(ColumnSet::Empty).from("account");
        assert_eq!(query.query().column_set(), &ColumnSet::Empty);
    }

    #[test]
    fn test_join_attaches_under_root() {
        let builder = account().join("account", "accountid", "contact", "parentcustomerid");
        let query = builder.query();

        assert_eq!(query.link_entities().len(), 1);
        let link = query.link(query.link_entities()[0]);
        assert_eq!(link.link_from_entity_name, "account");
        assert_eq!(link.link_from_attribute_name, "accountid");
        assert_eq!(link.link_to_entity_name, "contact");
        assert_eq!(link.link_to_attribute_name, "parentcustomerid");
        assert_eq!(link.join_operator, JoinOperator::Inner);
    }

    #[test]
    fn test_second_join_nests_under_first() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .join("contact", "contactid", "opportunity", "customerid");
        let query = builder.query();

        assert_eq!(query.link_entities().len(), 1);
        let contact = query.link(query.link_entities()[0]);
        assert_eq!(contact.link_entities.len(), 1);
        assert_eq!(
            query.link(contact.link_entities[0]).link_to_entity_name,
            "opportunity"
        );
    }

    #[test]
    fn test_third_level_join_is_found() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .join("contact", "contactid", "opportunity", "customerid")
            .join("opportunity", "opportunityid", "quote", "opportunityid");
        let query = builder.query();

        let contact = query.link(query.link_entities()[0]);
        let opportunity = query.link(contact.link_entities[0]);
        assert_eq!(opportunity.link_entities.len(), 1);
        assert_eq!(
            query.link(opportunity.link_entities[0]).link_to_entity_name,
            "quote"
        );
    }

    #[test]
    fn test_unmatched_join_is_dropped_but_becomes_current() {
        let builder = account()
            .join("lead", "leadid", "contact", "originatingleadid")
            .where_("account", "statecode", ConditionOperator::Equal, [0]);
        let query = builder.query();

        assert!(query.link_entities().is_empty());
        assert!(query.filter(query.criteria()).filters.is_empty());
        assert!(builder.errors().is_empty());
    }

    #[test]
    fn test_where_on_root() {
        let builder = account().where_("account", "name", ConditionOperator::Equal, ["Acme"]);
        let query = builder.query();

        let root = query.filter(query.criteria());
        assert_eq!(root.filters.len(), 1);
        let filter = query.filter(root.filters[0]);
        assert_eq!(filter.filter_operator, LogicalOperator::And);
        assert_eq!(filter.conditions.len(), 1);
        assert_eq!(filter.conditions[0].attribute_name, "name");
        assert_eq!(filter.conditions[0].values, vec![Value::from("Acme")]);
    }

    #[test]
    fn test_where_after_join_targets_link_and_ignores_entity() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .where_("account", "lastname", ConditionOperator::Equal, ["Smith"]);
        let query = builder.query();

        assert!(query.filter(query.criteria()).filters.is_empty());
        let link = query.link(query.link_entities()[0]);
        assert_eq!(query.filter(link.link_criteria).filters.len(), 1);
    }

    #[test]
    fn test_where_after_reset_scope_finds_link_by_name() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .join("account", "accountid", "opportunity", "customerid")
            .reset_scope()
            .where_("contact", "lastname", ConditionOperator::Equal, ["Smith"])
            .where_("account", "name", ConditionOperator::Equal, ["Acme"]);
        let query = builder.query();

        let contact = query.link(query.link_entities()[0]);
        let opportunity = query.link(query.link_entities()[1]);
        assert_eq!(query.filter(contact.link_criteria).filters.len(), 1);
        assert!(query.filter(opportunity.link_criteria).filters.is_empty());
        assert_eq!(query.filter(query.criteria()).filters.len(), 1);
    }

    #[test]
    fn test_unmatched_where_is_dropped() {
        let builder = account().where_("lead", "subject", ConditionOperator::Like, ["%x%"]);
        let query = builder.query();
        assert!(query.filter(query.criteria()).filters.is_empty());
    }

    #[test]
    fn test_or_flips_current_filter() {
        let builder = account()
            .where_("account", "name", ConditionOperator::Equal, ["Acme"])
            .or("statuscode", ConditionOperator::Equal, [1])
            .unwrap();
        let query = builder.query();

        let root = query.filter(query.criteria());
        let filter = query.filter(root.filters[0]);
        assert_eq!(filter.filter_operator, LogicalOperator::Or);
        assert_eq!(filter.conditions.len(), 2);
        assert_eq!(root.filter_operator, LogicalOperator::And);
    }

    #[test]
    fn test_or_without_where_fails() {
        let err = account()
            .or("statuscode", ConditionOperator::Equal, [1])
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidState(_)));
    }

    #[test]
    fn test_or_targets_latest_where() {
        let builder = account()
            .where_("account", "name", ConditionOperator::Equal, ["Acme"])
            .where_("account", "revenue", ConditionOperator::GreaterThan, [100])
            .or("revenue", ConditionOperator::Null, Vec::<Value>::new())
            .unwrap();
        let query = builder.query();

        let root = query.filter(query.criteria());
        assert_eq!(root.filters.len(), 2);
        assert_eq!(query.filter(root.filters[0]).filter_operator, LogicalOperator::And);
        assert_eq!(query.filter(root.filters[0]).conditions.len(), 1);
        assert_eq!(query.filter(root.filters[1]).filter_operator, LogicalOperator::Or);
        assert_eq!(query.filter(root.filters[1]).conditions.len(), 2);
    }

    #[test]
    fn test_order_by_skips_empty_entries() {
        let builder = account().order_by(
            [Some("name"), Some(""), None, Some("revenue")],
            OrderType::Descending,
        );
        assert_eq!(
            builder.query().orders(),
            [OrderExpression::desc("name"), OrderExpression::desc("revenue")]
        );
    }

    #[test]
    fn test_order_by_is_root_only_and_appends() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .order_by(["name"], OrderType::Ascending)
            .order_by(vec!["createdon".to_string()], OrderType::Descending);
        assert_eq!(
            builder.query().orders(),
            [OrderExpression::asc("name"), OrderExpression::desc("createdon")]
        );
    }

    #[test]
    fn test_page_overwrites() {
        let builder = account().page(50, 3);
        assert_eq!(builder.query().page_info(), Some(&PagingInfo::new(50, 3)));

        let builder = builder.page(10, 1);
        assert_eq!(builder.query().page_info(), Some(&PagingInfo::new(10, 1)));
    }

    #[test]
    fn test_reading_query_does_not_mutate() {
        let builder = account()
            .join("account", "accountid", "contact", "parentcustomerid")
            .where_("contact", "lastname", ConditionOperator::Equal, ["Smith"])
            .page(10, 1);
        let first = builder.query().clone();
        let second = builder.query().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_alias_applies_to_last_link() {
        let builder = account()
            .alias("ignored")
            .join("account", "primarycontactid", "contact", "contactid")
            .alias("pc");
        let query = builder.query();
        assert_eq!(
            query.link(query.link_entities()[0]).entity_alias.as_deref(),
            Some("pc")
        );
    }

    #[test]
    fn test_reject_policy_records_errors() {
        let builder = account()
            .with_config(BuilderConfig::strict())
            .join("lead", "leadid", "contact", "originatingleadid")
            .reset_scope()
            .where_("quote", "name", ConditionOperator::Equal, ["Q"]);

        assert_eq!(
            builder.errors(),
            [
                QueryError::unmatched_join("lead", "contact"),
                QueryError::unmatched_where("quote"),
            ]
        );
        assert_eq!(
            builder.into_query().unwrap_err(),
            QueryError::unmatched_join("lead", "contact")
        );
    }

    #[test]
    fn test_case_insensitive_config() {
        let builder = CrmQuery::select_all()
            .with_config(BuilderConfig::default().with_case_insensitive_names(true))
            .from("Account")
            .join("account", "accountid", "Contact", "parentcustomerid")
            .join("CONTACT", "contactid", "opportunity", "customerid");
        let query = builder.query();

        assert_eq!(query.link_entities().len(), 1);
        assert_eq!(query.link(query.link_entities()[0]).link_entities.len(), 1);
    }
}
