//! FetchXML rendering.
//!
//! FetchXML is the XML query language the Dataverse Web API accepts through
//! `?fetchXml=`. A [`QueryExpression`] renders to it unchanged, so a query
//! built with [`CrmQuery`](super::CrmQuery) can be sent by any HTTP client.
//!
//! # Example
//!
//! ```
//! use crmquery_lib::api::query::{ConditionOperator, CrmQuery};
//!
//! let fetch = CrmQuery::select(["name"])
//!     .from("account")
//!     .where_("account", "statecode", ConditionOperator::Equal, [0])
//!     .query()
//!     .to_fetchxml();
//!
//! assert!(fetch.starts_with("<fetch "));
//! assert!(fetch.contains(r#"<entity name="account">"#));
//! ```

pub(crate) mod xml;

use super::QueryExpression;

use xml::columns_to_fetchxml;
use xml::escape_xml;
use xml::filter_to_fetchxml;
use xml::link_to_fetchxml;
use xml::order_to_fetchxml;

impl QueryExpression {
    /// Renders this query as a FetchXML document.
    pub fn to_fetchxml(&self) -> String {
        let mut fetch_attrs = vec![
            r#"version="1.0""#.to_string(),
            r#"output-format="xml-platform""#.to_string(),
            r#"mapping="logical""#.to_string(),
            format!(r#"distinct="{}""#, self.distinct()),
        ];

        if let Some(page) = self.page_info() {
            fetch_attrs.push(format!(r#"count="{}""#, page.count));
            fetch_attrs.push(format!(r#"page="{}""#, page.page_number));
            if let Some(cookie) = &page.paging_cookie {
                fetch_attrs.push(format!(r#"paging-cookie="{}""#, escape_xml(cookie)));
            }
            if page.return_total_record_count {
                fetch_attrs.push(r#"returntotalrecordcount="true""#.to_string());
            }
        }

        let mut entity_content = columns_to_fetchxml(self.column_set());
        entity_content.push_str(&filter_to_fetchxml(self, self.criteria()));
        entity_content.push_str(&order_to_fetchxml(self.orders()));
        for link in self.link_entities() {
            entity_content.push_str(&link_to_fetchxml(self, *link));
        }

        format!(
            r#"<fetch {}><entity name="{}">{}</entity></fetch>"#,
            fetch_attrs.join(" "),
            escape_xml(self.entity_name().unwrap_or_default()),
            entity_content
        )
    }
}
