//! Updates feed: posts, likes, and the independently paginated comment
//! threads underneath them.

use serde::Deserialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list, decode_total};
use crate::error::ApiError;
use crate::models::{UpdateComment, UpdateItem};

pub async fn list(
    client: &ApiClient,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<Vec<UpdateItem>, ApiError> {
    let mut query = Vec::new();
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    let value = client.get_query("/updates", &query).await?;
    Ok(decode_list(&value, &["updates"]))
}

/// What the like endpoint confirmed. Both fields are optional because
/// older backend builds answer with a bare message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub liked: Option<bool>,
}

pub async fn toggle_like(client: &ApiClient, update_id: &str) -> Result<LikeResponse, ApiError> {
    let value = client
        .post_empty(&format!("/updates/{update_id}/like"))
        .await?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// One page of a comment thread.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub items: Vec<UpdateComment>,
    /// Server-reported thread total, when the envelope included one.
    pub total: Option<u64>,
}

pub async fn comments(
    client: &ApiClient,
    update_id: &str,
    page: u32,
    limit: u32,
) -> Result<CommentPage, ApiError> {
    let value = client
        .get_query(
            &format!("/updates/{update_id}/comments"),
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await?;
    Ok(CommentPage {
        items: decode_list(&value, &["comments"]),
        total: decode_total(&value),
    })
}

/// Posts a comment; returns it when the backend echoes the created row.
pub async fn post_comment(
    client: &ApiClient,
    update_id: &str,
    content: &str,
) -> Result<Option<UpdateComment>, ApiError> {
    let value = client
        .post(
            &format!("/updates/{update_id}/comments"),
            &json!({ "content": content }),
        )
        .await?;
    Ok(decode_item(value, &["comment"]).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn like_response_tolerates_bare_confirmations() {
        let full: LikeResponse =
            serde_json::from_value(json!({"likes_count": 4, "liked": true})).unwrap();
        assert_eq!(full.likes_count, Some(4));
        assert_eq!(full.liked, Some(true));

        let bare: LikeResponse =
            serde_json::from_value(json!({"message": "ok"})).unwrap_or_default();
        assert_eq!(bare.likes_count, None);
    }
}
