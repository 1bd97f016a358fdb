//! User administration: listing, profile edits, role changes, removal,
//! and triggering password resets on a member's behalf.

use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::{Role, UserProfile};

pub async fn list(client: &ApiClient, role: Option<Role>) -> Result<Vec<UserProfile>, ApiError> {
    let mut query = Vec::new();
    if let Some(role) = role {
        query.push(("role", role.as_str().to_string()));
    }
    let value = client.get_query("/admin/users", &query).await?;
    Ok(decode_list(&value, &["users"]))
}

pub async fn get(client: &ApiClient, id: &str) -> Result<UserProfile, ApiError> {
    let value = client.get(&format!("/admin/users/{id}")).await?;
    decode_item(value, &["user"])
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    edit: &UserEdit,
) -> Result<Option<UserProfile>, ApiError> {
    let value = client.patch(&format!("/admin/users/{id}"), edit).await?;
    Ok(decode_item(value, &["user"]).ok())
}

pub async fn set_role(
    client: &ApiClient,
    id: &str,
    role: Role,
) -> Result<Option<UserProfile>, ApiError> {
    let value = client
        .patch(
            &format!("/admin/users/{id}/role"),
            &json!({ "role": role.as_str() }),
        )
        .await?;
    Ok(decode_item(value, &["user"]).ok())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/admin/users/{id}")).await?;
    Ok(())
}

/// Sends the member a reset email. The backend mails the link; no secret
/// ever passes through the admin's browser.
pub async fn reset_password(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client
        .post_empty(&format!("/admin/users/{id}/reset-password"))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_edit_serializes_only_changed_fields() {
        let edit = UserEdit {
            full_name: Some("New Name".into()),
            phone: None,
        };
        let body = serde_json::to_value(&edit).unwrap();
        assert_eq!(body, json!({"full_name": "New Name"}));
    }
}
