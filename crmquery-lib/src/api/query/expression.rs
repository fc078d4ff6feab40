//! The query expression tree.
//!
//! Filters and links live in two arenas owned by the [`QueryExpression`] and
//! refer to each other by [`FilterId`] / [`LinkId`]. Nodes are never removed,
//! so an id stays valid for the life of the query that minted it.

use serde::Deserialize;
use serde::Serialize;

use super::ColumnSet;
use super::ConditionExpression;
use super::FilterExpression;
use super::JoinOperator;
use super::LinkEntity;
use super::LogicalOperator;
use super::OrderExpression;
use super::PagingInfo;

/// Index of a filter node within its [`QueryExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterId(usize);

/// Index of a link node within its [`QueryExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(usize);

/// A filter stored in the query arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterNode {
    /// How the conditions and child filters combine.
    pub filter_operator: LogicalOperator,
    /// Condition leaves, in insertion order.
    pub conditions: Vec<ConditionExpression>,
    /// Child filters, in insertion order.
    pub filters: Vec<FilterId>,
}

/// A link entity stored in the query arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkNode {
    /// Entity on the parent side of the join.
    pub link_from_entity_name: String,
    /// Attribute on the parent side of the join.
    pub link_from_attribute_name: String,
    /// Entity being joined.
    pub link_to_entity_name: String,
    /// Attribute on the joined entity.
    pub link_to_attribute_name: String,
    /// Inner or left outer.
    pub join_operator: JoinOperator,
    /// Alias the joined entity's columns are returned under.
    pub entity_alias: Option<String>,
    /// Columns returned from the joined entity.
    pub columns: ColumnSet,
    /// The link's single top-level criteria filter.
    pub link_criteria: FilterId,
    /// Child links, in insertion order.
    pub link_entities: Vec<LinkId>,
}

/// A query against one root entity.
///
/// Produced by [`CrmQuery`](super::CrmQuery). Read the tree from the root
/// through [`criteria`](Self::criteria) and [`link_entities`](Self::link_entities),
/// resolving ids with [`filter`](Self::filter) and [`link`](Self::link).
///
/// Ids passed to the accessors must come from this query; see the
/// `# Panics` sections on [`filter`](Self::filter) and [`link`](Self::link).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryExpression {
    entity_name: Option<String>,
    column_set: ColumnSet,
    distinct: bool,
    criteria: FilterId,
    link_entities: Vec<LinkId>,
    orders: Vec<OrderExpression>,
    page_info: Option<PagingInfo>,
    filters: Vec<FilterNode>,
    links: Vec<LinkNode>,
}

impl QueryExpression {
    /// Creates a query with the given projection, no entity name and empty criteria.
    pub fn new(column_set: ColumnSet) -> Self {
        Self {
            entity_name: None,
            column_set,
            distinct: false,
            criteria: FilterId(0),
            link_entities: Vec::new(),
            orders: Vec::new(),
            page_info: None,
            filters: vec![FilterNode {
                filter_operator: LogicalOperator::And,
                conditions: Vec::new(),
                filters: Vec::new(),
            }],
            links: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the root entity name, if set.
    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    /// Returns the projection.
    pub fn column_set(&self) -> &ColumnSet {
        &self.column_set
    }

    /// Returns `true` if only distinct records are requested.
    pub fn distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the root criteria filter.
    pub fn criteria(&self) -> FilterId {
        self.criteria
    }

    /// Returns the links attached directly under the root.
    pub fn link_entities(&self) -> &[LinkId] {
        &self.link_entities
    }

    /// Returns the ordering keys.
    pub fn orders(&self) -> &[OrderExpression] {
        &self.orders
    }

    /// Returns the paging info, if set.
    pub fn page_info(&self) -> Option<&PagingInfo> {
        self.page_info.as_ref()
    }

    /// Returns a filter node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this query (or a clone of it).
    pub fn filter(&self, id: FilterId) -> &FilterNode {
        &self.filters[id.0]
    }

    /// Returns a link node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this query (or a clone of it).
    pub fn link(&self, id: LinkId) -> &LinkNode {
        &self.links[id.0]
    }

    /// Returns `true` if `id` is reachable from the root.
    ///
    /// Links created by a join whose parent could not be found are kept in
    /// the arena but are not attached.
    pub fn is_attached(&self, id: LinkId) -> bool {
        self.link_entities.contains(&id)
            || self
                .links
                .iter()
                .enumerate()
                .any(|(i, node)| node.link_entities.contains(&id) && self.is_attached(LinkId(i)))
    }

    /// Materialises a filter and its descendants as an owned tree.
    pub fn to_filter_expression(&self, id: FilterId) -> FilterExpression {
        let node = self.filter(id);
        FilterExpression {
            filter_operator: node.filter_operator,
            conditions: node.conditions.clone(),
            filters: node
                .filters
                .iter()
                .map(|child| self.to_filter_expression(*child))
                .collect(),
        }
    }

    /// Materialises a link and its descendants as an owned tree.
    pub fn to_link_entity(&self, id: LinkId) -> LinkEntity {
        let node = self.link(id);
        LinkEntity {
            link_from_entity_name: node.link_from_entity_name.clone(),
            link_from_attribute_name: node.link_from_attribute_name.clone(),
            link_to_entity_name: node.link_to_entity_name.clone(),
            link_to_attribute_name: node.link_to_attribute_name.clone(),
            join_operator: node.join_operator,
            entity_alias: node.entity_alias.clone(),
            columns: node.columns.clone(),
            link_criteria: self.to_filter_expression(node.link_criteria),
            link_entities: node
                .link_entities
                .iter()
                .map(|child| self.to_link_entity(*child))
                .collect(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns `true` if `name` is the root entity.
    pub fn is_root_entity(&self, name: &str, case_insensitive: bool) -> bool {
        self.entity_name
            .as_deref()
            .is_some_and(|root| names_match(root, name, case_insensitive))
    }

    /// Finds the first attached link whose to-entity is `entity_name`.
    ///
    /// Each level is scanned in insertion order before any of its children
    /// are searched.
    pub fn find_entity_link(&self, entity_name: &str, case_insensitive: bool) -> Option<LinkId> {
        self.find_in(&self.link_entities, entity_name, case_insensitive)
    }

    fn find_in(&self, ids: &[LinkId], entity_name: &str, case_insensitive: bool) -> Option<LinkId> {
        let hit = ids.iter().copied().find(|id| {
            names_match(&self.link(*id).link_to_entity_name, entity_name, case_insensitive)
        });
        if hit.is_some() {
            return hit;
        }
        ids.iter().find_map(|id| {
            log::trace!("descending into link {:?} looking for '{}'", id, entity_name);
            self.find_in(&self.link(*id).link_entities, entity_name, case_insensitive)
        })
    }

    // =========================================================================
    // Mutation (builder only)
    // =========================================================================

    pub(crate) fn set_entity_name(&mut self, name: String) {
        self.entity_name = Some(name);
    }

    pub(crate) fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    pub(crate) fn add_order(&mut self, order: OrderExpression) {
        self.orders.push(order);
    }

    pub(crate) fn set_page_info(&mut self, page_info: PagingInfo) {
        self.page_info = Some(page_info);
    }

    /// Panics on a foreign id, like [`filter`](Self::filter).
    pub(crate) fn filter_mut(&mut self, id: FilterId) -> &mut FilterNode {
        &mut self.filters[id.0]
    }

    /// Panics on a foreign id, like [`link`](Self::link).
    pub(crate) fn link_mut(&mut self, id: LinkId) -> &mut LinkNode {
        &mut self.links[id.0]
    }

    /// Stores an owned filter tree in the arena without attaching it.
    pub(crate) fn insert_filter(&mut self, filter: FilterExpression) -> FilterId {
        let children = filter
            .filters
            .into_iter()
            .map(|child| self.insert_filter(child))
            .collect();
        self.filters.push(FilterNode {
            filter_operator: filter.filter_operator,
            conditions: filter.conditions,
            filters: children,
        });
        FilterId(self.filters.len() - 1)
    }

    /// Stores an owned link tree in the arena without attaching it.
    pub(crate) fn insert_link(&mut self, link: LinkEntity) -> LinkId {
        let link_criteria = self.insert_filter(link.link_criteria);
        let children = link
            .link_entities
            .into_iter()
            .map(|child| self.insert_link(child))
            .collect();
        self.links.push(LinkNode {
            link_from_entity_name: link.link_from_entity_name,
            link_from_attribute_name: link.link_from_attribute_name,
            link_to_entity_name: link.link_to_entity_name,
            link_to_attribute_name: link.link_to_attribute_name,
            join_operator: link.join_operator,
            entity_alias: link.entity_alias,
            columns: link.columns,
            link_criteria,
            link_entities: children,
        });
        LinkId(self.links.len() - 1)
    }

    pub(crate) fn attach_root_link(&mut self, id: LinkId) {
        self.link_entities.push(id);
    }

    pub(crate) fn attach_child_link(&mut self, parent: LinkId, id: LinkId) {
        self.link_mut(parent).link_entities.push(id);
    }

    /// Adds `filter` as a child of the criteria node `scope`.
    pub(crate) fn attach_filter(&mut self, scope: FilterId, filter: FilterId) {
        self.filter_mut(scope).filters.push(filter);
    }
}

fn names_match(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::ConditionOperator;

    fn link(from: &str, to: &str) -> LinkEntity {
        LinkEntity::inner(from, format!("{from}id"), to, format!("{from}id"))
    }

    #[test]
    fn test_new_query_has_empty_root_criteria() {
        let query = QueryExpression::new(ColumnSet::All);
        let criteria = query.filter(query.criteria());
        assert_eq!(criteria.filter_operator, LogicalOperator::And);
        assert!(criteria.conditions.is_empty());
        assert!(criteria.filters.is_empty());
        assert_eq!(query.entity_name(), None);
    }

    #[test]
    fn test_insert_link_round_trips() {
        let tree = link("account", "contact")
            .with_alias("c")
            .with_filter(FilterExpression::condition("statecode", ConditionOperator::Equal, [0]))
            .with_link(link("contact", "opportunity"));

        let mut query = QueryExpression::new(ColumnSet::All);
        let id = query.insert_link(tree.clone());
        assert_eq!(query.to_link_entity(id), tree);
    }

    #[test]
    fn test_find_prefers_shallow_siblings() {
        let mut query = QueryExpression::new(ColumnSet::All);
        query.set_entity_name("account".to_string());

        // account -> contact -> lead, then account -> lead
        let contact = query.insert_link(link("account", "contact"));
        query.attach_root_link(contact);
        let deep_lead = query.insert_link(link("contact", "lead"));
        query.attach_child_link(contact, deep_lead);
        let shallow_lead = query.insert_link(link("account", "lead"));
        query.attach_root_link(shallow_lead);

        assert_eq!(query.find_entity_link("lead", false), Some(shallow_lead));
        assert_eq!(query.find_entity_link("contact", false), Some(contact));
        assert_eq!(query.find_entity_link("quote", false), None);
    }

    #[test]
    fn test_find_descends_in_insertion_order() {
        let mut query = QueryExpression::new(ColumnSet::All);
        let contact = query.insert_link(link("account", "contact"));
        query.attach_root_link(contact);
        let systemuser = query.insert_link(link("account", "systemuser"));
        query.attach_root_link(systemuser);
        let under_contact = query.insert_link(link("contact", "task"));
        query.attach_child_link(contact, under_contact);
        let under_user = query.insert_link(link("systemuser", "task"));
        query.attach_child_link(systemuser, under_user);

        assert_eq!(query.find_entity_link("task", false), Some(under_contact));
    }

    #[test]
    #[should_panic]
    fn test_foreign_filter_id_panics() {
        let mut other = QueryExpression::new(ColumnSet::All);
        let foreign = other.insert_filter(FilterExpression::default());
        QueryExpression::new(ColumnSet::All).filter(foreign);
    }

    #[test]
    #[should_panic]
    fn test_foreign_link_id_panics() {
        let mut other = QueryExpression::new(ColumnSet::All);
        let foreign = other.insert_link(link("account", "contact"));
        QueryExpression::new(ColumnSet::All).link(foreign);
    }

    #[test]
    fn test_find_ignores_detached_links() {
        let mut query = QueryExpression::new(ColumnSet::All);
        let orphan = query.insert_link(link("lead", "contact"));
        assert_eq!(query.find_entity_link("contact", false), None);
        assert!(!query.is_attached(orphan));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut query = QueryExpression::new(ColumnSet::All);
        query.set_entity_name("Account".to_string());
        let contact = query.insert_link(link("Account", "Contact"));
        query.attach_root_link(contact);

        assert!(query.is_root_entity("account", true));
        assert!(!query.is_root_entity("account", false));
        assert_eq!(query.find_entity_link("contact", true), Some(contact));
        assert_eq!(query.find_entity_link("contact", false), None);
    }
}
