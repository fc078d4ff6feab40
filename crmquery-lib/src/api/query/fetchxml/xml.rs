//! FetchXML generation utilities.

use crate::api::query::ColumnSet;
use crate::api::query::ConditionExpression;
use crate::api::query::FilterId;
use crate::api::query::LinkId;
use crate::api::query::OrderExpression;
use crate::api::query::QueryExpression;

/// Escapes a string for use in XML attribute values and text.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Generates the projection elements of an entity or link-entity.
pub fn columns_to_fetchxml(columns: &ColumnSet) -> String {
    match columns {
        ColumnSet::All => "<all-attributes/>".to_string(),
        ColumnSet::Empty => String::new(),
        ColumnSet::Fields(fields) => fields
            .iter()
            .map(|f| format!(r#"<attribute name="{}"/>"#, escape_xml(f)))
            .collect::<Vec<_>>()
            .join(""),
    }
}

/// Converts a condition to a `<condition>` element.
///
/// One operand goes in the `value` attribute, several become `<value>`
/// children, none leaves both out.
pub fn condition_to_fetchxml(condition: &ConditionExpression) -> String {
    let operands: Vec<String> = condition
        .values
        .iter()
        .map(|v| {
            let text = v.to_query_text();
            if condition.operator.is_substring() {
                format!("%{}%", text)
            } else {
                text
            }
        })
        .collect();

    let head = format!(
        r#"<condition attribute="{}" operator="{}""#,
        escape_xml(&condition.attribute_name),
        condition.operator.as_fetchxml()
    );

    match operands.as_slice() {
        [] => format!("{}/>", head),
        [single] => format!(r#"{} value="{}"/>"#, head, escape_xml(single)),
        many => {
            let values: String = many
                .iter()
                .map(|v| format!("<value>{}</value>", escape_xml(v)))
                .collect();
            format!("{}>{}</condition>", head, values)
        }
    }
}

/// Converts a filter node and its children to a `<filter>` element.
///
/// Returns an empty string for a filter with nothing in it, so empty
/// criteria do not reach the service.
pub fn filter_to_fetchxml(query: &QueryExpression, id: FilterId) -> String {
    let node = query.filter(id);
    let mut content: String = node.conditions.iter().map(condition_to_fetchxml).collect();
    for child in &node.filters {
        content.push_str(&filter_to_fetchxml(query, *child));
    }

    if content.is_empty() {
        return String::new();
    }
    format!(
        r#"<filter type="{}">{}</filter>"#,
        node.filter_operator.as_fetchxml(),
        content
    )
}

/// Converts ordering keys to `<order>` elements.
pub fn order_to_fetchxml(orders: &[OrderExpression]) -> String {
    orders
        .iter()
        .map(|order| {
            format!(
                r#"<order attribute="{}" descending="{}"/>"#,
                escape_xml(&order.attribute_name),
                order.order_type.is_descending()
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Converts a link node and its descendants to a `<link-entity>` element.
///
/// FetchXML names the joined entity and states `from` as the attribute on it
/// and `to` as the attribute on the parent.
pub fn link_to_fetchxml(query: &QueryExpression, id: LinkId) -> String {
    let link = query.link(id);

    let alias_attr = link
        .entity_alias
        .as_ref()
        .map(|a| format!(r#" alias="{}""#, escape_xml(a)))
        .unwrap_or_default();

    let mut content = columns_to_fetchxml(&link.columns);
    content.push_str(&filter_to_fetchxml(query, link.link_criteria));
    for child in &link.link_entities {
        content.push_str(&link_to_fetchxml(query, *child));
    }

    format!(
        r#"<link-entity name="{}" from="{}" to="{}" link-type="{}"{}>{}</link-entity>"#,
        escape_xml(&link.link_to_entity_name),
        escape_xml(&link.link_to_attribute_name),
        escape_xml(&link.link_from_attribute_name),
        link.join_operator.as_fetchxml(),
        alias_attr,
        content
    )
}
