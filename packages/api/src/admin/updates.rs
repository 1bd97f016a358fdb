//! Authoring side of the updates feed, plus comment moderation.

use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::{BulkDeleteOutcome, UpdateItem};

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub media: Vec<String>,
}

impl UpdateDraft {
    pub fn from_update(update: &UpdateItem) -> Self {
        Self {
            title: update.title.clone(),
            content: update.content.clone(),
            property_id: update.property_id.clone(),
            media: update.media.clone(),
        }
    }
}

pub fn validate_draft(draft: &UpdateDraft) -> Option<String> {
    if draft.title.trim().is_empty() {
        return Some("Title is required".to_string());
    }
    if draft.content.trim().is_empty() {
        return Some("Content is required".to_string());
    }
    None
}

pub async fn list(client: &ApiClient) -> Result<Vec<UpdateItem>, ApiError> {
    let value = client.get("/admin/updates").await?;
    Ok(decode_list(&value, &["updates"]))
}

pub async fn create(
    client: &ApiClient,
    draft: &UpdateDraft,
) -> Result<Option<UpdateItem>, ApiError> {
    let value = client.post("/admin/updates", draft).await?;
    Ok(decode_item(value, &["update"]).ok())
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    draft: &UpdateDraft,
) -> Result<Option<UpdateItem>, ApiError> {
    let value = client.patch(&format!("/admin/updates/{id}"), draft).await?;
    Ok(decode_item(value, &["update"]).ok())
}

/// Replaces the update's media list after background uploads complete.
pub async fn set_media(
    client: &ApiClient,
    id: &str,
    media: &[String],
) -> Result<Option<UpdateItem>, ApiError> {
    let value = client
        .patch(&format!("/admin/updates/{id}"), &json!({ "media": media }))
        .await?;
    Ok(decode_item(value, &["update"]).ok())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/admin/updates/{id}")).await?;
    Ok(())
}

/// Bulk comment moderation under one update. Same partial-success shape
/// as inquiry bulk delete; the comment counter must move by
/// `deleted_count`, not by the number of ids requested.
pub async fn delete_comments(
    client: &ApiClient,
    update_id: &str,
    ids: &[String],
) -> Result<BulkDeleteOutcome, ApiError> {
    let value = client
        .delete_with(
            &format!("/admin/updates/{update_id}/comments"),
            &json!({ "ids": ids }),
        )
        .await?;
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title_and_content() {
        let mut draft = UpdateDraft::default();
        assert_eq!(validate_draft(&draft).as_deref(), Some("Title is required"));
        draft.title = "Q3 construction update".into();
        assert_eq!(
            validate_draft(&draft).as_deref(),
            Some("Content is required")
        );
        draft.content = "Roof is on.".into();
        assert_eq!(validate_draft(&draft), None);
    }
}
