//! CRM query builder library
//!
//! A small SQL-like language for building Dynamics 365 / Dataverse query
//! expressions, rendered as FetchXML.
//!
//! ```
//! use crmquery_lib::api::query::{ConditionOperator, CrmQuery, OrderType};
//!
//! let builder = CrmQuery::select(["name", "revenue"])
//!     .from("account")
//!     .join("account", "accountid", "contact", "parentcustomerid")
//!     .where_("contact", "lastname", ConditionOperator::Equal, ["Smith"])
//!     .order_by(["name"], OrderType::Ascending)
//!     .page(50, 1);
//!
//! let fetch = builder.query().to_fetchxml();
//! assert!(fetch.contains(r#"<link-entity name="contact""#));
//! ```

pub mod api;
pub mod error;
pub mod model;
