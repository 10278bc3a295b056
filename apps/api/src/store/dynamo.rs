//! Low-level DynamoDB item plumbing shared by the entity stores: attribute
//! accessors/builders and the generic get/put/update/query calls. The update
//! path generates aliased expression names so attribute names never collide
//! with reserved words.

use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::Utc;

use crate::store::StoreError;

pub type Item = HashMap<String, AttributeValue>;

// ── attribute builders ──────────────────────────────────────────────────────

pub fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

pub fn n(value: i64) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

pub fn string_list(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

pub fn map(item: Item) -> AttributeValue {
    AttributeValue::M(item)
}

// ── attribute accessors ─────────────────────────────────────────────────────

pub fn get_s(item: &Item, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_s().ok()).cloned()
}

pub fn get_s_or_default(item: &Item, key: &str) -> String {
    get_s(item, key).unwrap_or_default()
}

pub fn get_n_i64(item: &Item, key: &str) -> Option<i64> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|raw| raw.parse().ok())
}

pub fn get_n_u32(item: &Item, key: &str) -> Option<u32> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|raw| raw.parse().ok())
}

pub fn get_bool_or(item: &Item, key: &str, default: bool) -> bool {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .unwrap_or(default)
}

pub fn get_string_list(item: &Item, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_l().ok())
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_s().ok())
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

pub fn get_map<'a>(item: &'a Item, key: &str) -> Option<&'a Item> {
    item.get(key).and_then(|v| v.as_m().ok())
}

// ── generic calls ───────────────────────────────────────────────────────────

fn request_err(err: impl std::error::Error + Send + Sync + 'static) -> StoreError {
    StoreError::Request(DisplayErrorContext(err).to_string())
}

pub async fn get_item(
    client: &Client,
    table: &str,
    pk: &str,
    sk: &str,
) -> Result<Option<Item>, StoreError> {
    let output = client
        .get_item()
        .table_name(table)
        .key("PK", s(pk))
        .key("SK", s(sk))
        .send()
        .await
        .map_err(request_err)?;
    Ok(output.item)
}

pub async fn query_partition(
    client: &Client,
    table: &str,
    pk: &str,
) -> Result<Vec<Item>, StoreError> {
    let output = client
        .query()
        .table_name(table)
        .key_condition_expression("PK = :pk")
        .expression_attribute_values(":pk", s(pk))
        .send()
        .await
        .map_err(request_err)?;
    Ok(output.items.unwrap_or_default())
}

/// Partial update: `SET #a0 = :v0, … , updatedAt = :now`, returning the full
/// post-update item.
pub async fn update_item(
    client: &Client,
    table: &str,
    pk: &str,
    sk: &str,
    updates: Vec<(&str, AttributeValue)>,
) -> Result<Item, StoreError> {
    let (expression, names, mut values) = build_update_expression(&updates);
    values.insert(":now".to_string(), s(Utc::now().to_rfc3339()));

    let output = client
        .update_item()
        .table_name(table)
        .key("PK", s(pk))
        .key("SK", s(sk))
        .update_expression(expression)
        .set_expression_attribute_names(Some(names))
        .set_expression_attribute_values(Some(values))
        .return_values(ReturnValue::AllNew)
        .send()
        .await
        .map_err(request_err)?;
    output
        .attributes
        .ok_or_else(|| StoreError::Malformed("update returned no attributes".to_string()))
}

/// Builds the SET expression plus name/value alias maps for a partial update.
pub fn build_update_expression(
    updates: &[(&str, AttributeValue)],
) -> (String, HashMap<String, String>, HashMap<String, AttributeValue>) {
    let mut clauses = Vec::with_capacity(updates.len() + 1);
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (index, (attr, value)) in updates.iter().enumerate() {
        clauses.push(format!("#a{index} = :v{index}"));
        names.insert(format!("#a{index}"), attr.to_string());
        values.insert(format!(":v{index}"), value.clone());
    }
    clauses.push("updatedAt = :now".to_string());

    (format!("SET {}", clauses.join(", ")), names, values)
}
