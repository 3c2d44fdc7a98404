//! Checks against the `/status` collection.

use anyhow::{bail, Result};
use serde_json::{json, Value};

use super::{json_type, short_id, Outcome};
use crate::client::{ApiClient, ApiResponse};

/// Fields every status check record must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "client_name", "timestamp"];

/// How many entries the format check inspects.
const FORMAT_SAMPLE: usize = 3;

pub async fn list_status(api: &ApiClient) -> Result<Outcome> {
    let resp = api.get("/status").await?;
    if !resp.is_ok() {
        return Ok(http_failure(&resp));
    }
    Ok(classify_list(resp.json()?))
}

pub fn classify_list(data: Value) -> Outcome {
    match data.as_array() {
        Some(entries) => {
            let sample: Vec<Value> = entries.iter().take(2).cloned().collect();
            Outcome::pass(format!("Returned {} status checks", entries.len()))
                .with_data(json!({ "count": entries.len(), "sample": sample }))
        }
        None => Outcome::fail(format!("Expected list, got: {}", json_type(&data))),
    }
}

pub async fn create_status(api: &ApiClient) -> Result<Outcome> {
    let client_name = format!("Test Client {}", short_id());
    let resp = api
        .post_json("/status", &json!({ "client_name": client_name }))
        .await?;
    if !resp.is_ok() {
        return Ok(http_failure(&resp));
    }
    Ok(classify_created(&client_name, resp.json()?))
}

pub fn classify_created(sent_name: &str, data: Value) -> Outcome {
    let missing = missing_fields(&data);
    if !missing.is_empty() {
        return Outcome::fail(format!("Missing required fields: {}", missing.join(", ")));
    }
    match data.get("client_name").and_then(Value::as_str) {
        Some(name) if name == sent_name => {
            Outcome::pass("Successfully created status check").with_data(data)
        }
        _ => Outcome::fail(format!(
            "Client name mismatch: sent {}, got {}",
            sent_name, data["client_name"]
        )),
    }
}

/// Posting `{}` must be rejected by request validation.
pub async fn create_validation(api: &ApiClient) -> Result<Outcome> {
    let resp = api.post_json("/status", &json!({})).await?;
    Ok(classify_validation(resp.code()))
}

pub fn classify_validation(code: u16) -> Outcome {
    if code == 422 {
        Outcome::pass("Correctly validates missing client_name field")
    } else {
        Outcome::fail(format!(
            "Expected 422 validation error, got HTTP {}",
            code
        ))
    }
}

/// Count, create, count again: the collection must grow by exactly the
/// record just created.
pub async fn database_flow(api: &ApiClient) -> Result<Outcome> {
    let initial = api.get("/status").await?;
    if !initial.is_ok() {
        return Ok(Outcome::fail(format!(
            "Failed to get initial status: {}",
            initial.code()
        )));
    }
    let initial_count = array_of(&initial.json()?)?.len();

    let client_name = format!("DB_Flow_Test_{}", short_id());
    let created = api
        .post_json("/status", &json!({ "client_name": client_name }))
        .await?;
    if !created.is_ok() {
        return Ok(Outcome::fail(format!(
            "Failed to create entry: {}",
            created.code()
        )));
    }
    let created = created.json()?;

    let after = api.get("/status").await?;
    if !after.is_ok() {
        return Ok(Outcome::fail(format!(
            "Failed to get final status: {}",
            after.code()
        )));
    }
    let after = after.json()?;
    let entries = array_of(&after)?;

    let created_id = created.get("id");
    let found = created_id.is_some() && entries.iter().any(|entry| entry.get("id") == created_id);
    Ok(classify_flow(initial_count, entries.len(), found))
}

pub fn classify_flow(initial: usize, final_count: usize, found: bool) -> Outcome {
    if final_count == initial + 1 && found {
        Outcome::pass(format!(
            "Successfully created and retrieved entry. Count: {} -> {}",
            initial, final_count
        ))
    } else {
        Outcome::fail(format!(
            "Count mismatch or entry not found. Initial: {}, Final: {}, Entry found: {}",
            initial, final_count, found
        ))
    }
}

pub async fn response_format(api: &ApiClient) -> Result<Outcome> {
    let resp = api.get("/status").await?;
    if !resp.is_ok() {
        return Ok(Outcome::fail(format!(
            "Could not test format, API returned: {}",
            resp.code()
        )));
    }
    Ok(classify_format(&resp.json()?))
}

pub fn classify_format(data: &Value) -> Outcome {
    let issues = format_issues(data);
    if issues.is_empty() {
        Outcome::pass("All responses have correct format and required fields")
    } else {
        Outcome::fail(format!("Format issues: {}", issues.join("; ")))
    }
}

/// Shape problems in a status list; only the first few entries are inspected.
pub fn format_issues(data: &Value) -> Vec<String> {
    let Some(entries) = data.as_array() else {
        return vec!["Status list is not an array".to_string()];
    };
    entries
        .iter()
        .take(FORMAT_SAMPLE)
        .enumerate()
        .filter_map(|(i, entry)| {
            let missing = missing_fields(entry);
            (!missing.is_empty())
                .then(|| format!("Entry {} missing fields: {}", i, missing.join(", ")))
        })
        .collect()
}

/// Required fields absent from `value`; a non-object lacks all of them.
pub fn missing_fields(value: &Value) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).is_none())
        .collect()
}

fn array_of(value: &Value) -> Result<&Vec<Value>> {
    match value.as_array() {
        Some(entries) => Ok(entries),
        None => bail!("expected a JSON array, got {}", json_type(value)),
    }
}

fn http_failure(resp: &ApiResponse) -> Outcome {
    Outcome::fail(format!("HTTP {}: {}", resp.code(), resp.body))
}
