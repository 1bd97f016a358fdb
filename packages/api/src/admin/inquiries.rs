//! Interest triage: list, status transitions, single and bulk deletion.
//!
//! Bulk deletion can partially succeed. The backend reports what it
//! actually removed and which ids were already gone; callers reconcile
//! their local list against that outcome, never against the request.

use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::{BulkDeleteOutcome, Inquiry, InterestStatus};

pub async fn list(
    client: &ApiClient,
    status: Option<InterestStatus>,
) -> Result<Vec<Inquiry>, ApiError> {
    let mut query = Vec::new();
    if let Some(status) = status {
        query.push(("status", status.as_str().to_string()));
    }
    let value = client.get_query("/admin/inquiries", &query).await?;
    Ok(decode_list(&value, &["inquiries", "interests"]))
}

/// Requests a status transition. The client never infers one; the updated
/// row (when echoed) is what the local cache gets patched with.
pub async fn set_status(
    client: &ApiClient,
    id: &str,
    status: InterestStatus,
) -> Result<Option<Inquiry>, ApiError> {
    let value = client
        .patch(
            &format!("/admin/inquiries/{id}"),
            &json!({ "status": status.as_str() }),
        )
        .await?;
    Ok(decode_item(value, &["inquiry", "interest"]).ok())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/admin/inquiries/{id}")).await?;
    Ok(())
}

/// Bulk delete; the outcome distinguishes deleted from already-missing.
pub async fn delete_many(
    client: &ApiClient,
    ids: &[String],
) -> Result<BulkDeleteOutcome, ApiError> {
    let value = client
        .delete_with("/admin/inquiries", &json!({ "ids": ids }))
        .await?;
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}
