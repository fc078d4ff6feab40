//! Query expressions and the chainable builder that produces them.
//!
//! # Building
//!
//! - [`CrmQuery`] - `select / from / join / where_ / or / order_by / page` chain
//! - [`BuilderConfig`] - how the chain treats joins and filters it cannot place
//!
//! # The query tree
//!
//! - [`QueryExpression`] - root entity, projection, criteria, links, order, paging
//! - [`LinkEntity`] - a join, with its own criteria and nested joins
//! - [`FilterExpression`] / [`ConditionExpression`] - filter trees and their leaves
//! - [`ColumnSet`], [`OrderExpression`], [`PagingInfo`]
//!
//! # Output
//!
//! - [`fetchxml`] - renders a [`QueryExpression`] as FetchXML

mod builder;
mod columns;
mod config;
mod expression;
pub mod fetchxml;
mod filter;
mod link;
mod operator;
mod order;
mod page;

pub use builder::CrmQuery;
pub use builder::OrderField;
pub use columns::ColumnSet;
pub use config::BuilderConfig;
pub use config::UnmatchedTarget;
pub use expression::FilterId;
pub use expression::FilterNode;
pub use expression::LinkId;
pub use expression::LinkNode;
pub use expression::QueryExpression;
pub use filter::ConditionExpression;
pub use filter::FilterExpression;
pub use filter::LogicalOperator;
pub use link::JoinOperator;
pub use link::LinkEntity;
pub use operator::ConditionOperator;
pub use order::OrderExpression;
pub use order::OrderType;
pub use page::PagingInfo;
