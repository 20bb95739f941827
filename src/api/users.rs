use serde_json::{json, Value};

use super::client::api_call;
use super::error::ApiError;
use crate::models::UserRecord;

/// Table endpoint on the hosted data backend.
pub const USERS_ENDPOINT: &str = "/rest/v1/users";

/// Decode one row. Ids arrive as JSON numbers or strings depending on the
/// table's column type; rows without an id are unusable and dropped.
pub fn record_from_value(value: &Value) -> Option<UserRecord> {
    let obj = value.as_object()?;
    let id = obj
        .get("id")
        .and_then(|v| v.as_i64())
        .map(|n| n.to_string())
        .or_else(|| {
            obj.get("id")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })?;
    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let email = obj
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    Some(UserRecord { id, name, email })
}

pub fn records_from_value(value: &Value) -> Vec<UserRecord> {
    value
        .as_array()
        .map(|arr| arr.iter().filter_map(record_from_value).collect())
        .unwrap_or_default()
}

/// Fetch every row of the users table, in the order the backend returns them.
pub async fn list_users(
    client: &reqwest::Client,
    api_base_url: &str,
    api_key: &str,
) -> Result<Vec<UserRecord>, ApiError> {
    let params = vec![("select".to_string(), "*".to_string())];
    let payload = api_call(
        client,
        api_base_url,
        api_key,
        "GET",
        USERS_ENDPOINT,
        None,
        Some(params),
    )
    .await?;
    Ok(records_from_value(&payload))
}

/// Insert a row; the backend assigns the id and echoes the created row(s).
pub async fn insert_user(
    client: &reqwest::Client,
    api_base_url: &str,
    api_key: &str,
    name: &str,
    email: &str,
) -> Result<Vec<UserRecord>, ApiError> {
    let body = json!({"name": name, "email": email});
    let payload = api_call(
        client,
        api_base_url,
        api_key,
        "POST",
        USERS_ENDPOINT,
        Some(body),
        None,
    )
    .await?;
    Ok(records_from_value(&payload))
}

/// Patch the row matching `id`. The returned sequence is empty when no row
/// matched.
pub async fn update_user(
    client: &reqwest::Client,
    api_base_url: &str,
    api_key: &str,
    id: &str,
    name: &str,
    email: &str,
) -> Result<Vec<UserRecord>, ApiError> {
    let params = vec![("id".to_string(), format!("eq.{}", id))];
    let body = json!({"name": name, "email": email});
    let payload = api_call(
        client,
        api_base_url,
        api_key,
        "PATCH",
        USERS_ENDPOINT,
        Some(body),
        Some(params),
    )
    .await?;
    Ok(records_from_value(&payload))
}

/// Delete the row matching `id`.
pub async fn delete_user(
    client: &reqwest::Client,
    api_base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<(), ApiError> {
    let params = vec![("id".to_string(), format!("eq.{}", id))];
    api_call(
        client,
        api_base_url,
        api_key,
        "DELETE",
        USERS_ENDPOINT,
        None,
        Some(params),
    )
    .await?;
    Ok(())
}
