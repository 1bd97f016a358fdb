use serde::{Deserialize, Serialize};
use store::Keyed;

use super::{de_id, de_opt_id};

/// A content post on the updates feed, optionally pinned to a property.
/// `likes_count`/`comments_count` are server totals; the client adjusts
/// them only from confirmed mutation responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub property_title: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub liked_by_me: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Keyed for UpdateItem {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateComment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub update_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UpdateComment {
    pub fn author_label(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}

impl Keyed for UpdateComment {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_decodes_with_counts_defaulted() {
        let json = r#"{"id": 8, "title": "Roof complete", "property_id": 3}"#;
        let update: UpdateItem = serde_json::from_str(json).unwrap();
        assert_eq!(update.id, "8");
        assert_eq!(update.property_id.as_deref(), Some("3"));
        assert_eq!(update.likes_count, 0);
        assert!(!update.liked_by_me);
    }

    #[test]
    fn comment_author_falls_back_to_anonymous() {
        let json = r#"{"id": "c1", "content": "Great news"}"#;
        let comment: UpdateComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.author_label(), "Anonymous");
    }
}
