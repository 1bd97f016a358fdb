//! Public listings plus interest submission.
//!
//! Listing pages are readable without a session. Interest comes in two
//! flavors: a guest contact form (`/contact`) and an authenticated
//! investor interest (`/user/interests`).

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::{Inquiry, Property, PropertyStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    pub status: Option<PropertyStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PropertyQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

pub async fn list(client: &ApiClient, query: &PropertyQuery) -> Result<Vec<Property>, ApiError> {
    let value = client.get_query("/properties", &query.to_pairs()).await?;
    Ok(decode_list(&value, &["properties"]))
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Property, ApiError> {
    let value = client.get(&format!("/properties/{id}")).await?;
    decode_item(value, &["property"])
}

/// Guest contact form; no session required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
}

/// First blocking problem with the contact form, if any.
pub fn validate_contact(request: &ContactRequest) -> Option<String> {
    if request.full_name.trim().is_empty() {
        return Some("Full name is required".to_string());
    }
    crate::auth::validate_email(&request.email)
        .or_else(|| crate::auth::validate_phone(&request.phone))
}

pub async fn send_contact(client: &ApiClient, request: &ContactRequest) -> Result<(), ApiError> {
    client.post("/contact", request).await?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct InterestRequest {
    pub property_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Registers an authenticated investor's interest. Returns the created
/// inquiry when the backend echoes it back, `None` when it only confirms.
pub async fn express_interest(
    client: &ApiClient,
    request: &InterestRequest,
) -> Result<Option<Inquiry>, ApiError> {
    let value = client.post("/user/interests", request).await?;
    Ok(decode_created(value))
}

/// The signed-in user's own interests, for the dashboard.
pub async fn my_interests(client: &ApiClient) -> Result<Vec<Inquiry>, ApiError> {
    let value = client.get("/user/interests").await?;
    Ok(decode_list(&value, &["interests", "inquiries"]))
}

fn decode_created(value: Value) -> Option<Inquiry> {
    decode_item(value, &["interest", "inquiry"]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_serializes_only_set_filters() {
        let all = PropertyQuery::default();
        assert!(all.to_pairs().is_empty());

        let filtered = PropertyQuery {
            status: Some(PropertyStatus::Available),
            page: Some(2),
            limit: None,
        };
        assert_eq!(
            filtered.to_pairs(),
            vec![("status", "AVAILABLE".to_string()), ("page", "2".to_string())]
        );
    }

    #[test]
    fn contact_validation_checks_fields_in_order() {
        let mut request = ContactRequest {
            full_name: "".into(),
            email: "bad".into(),
            phone: "x".into(),
            message: None,
            property_id: None,
        };
        assert_eq!(
            validate_contact(&request).as_deref(),
            Some("Full name is required")
        );

        request.full_name = "Dana Obi".into();
        assert_eq!(
            validate_contact(&request).as_deref(),
            Some("Enter a valid email address")
        );

        request.email = "dana@example.com".into();
        assert_eq!(
            validate_contact(&request).as_deref(),
            Some("Enter a valid phone number")
        );

        request.phone = "08012345678".into();
        assert_eq!(validate_contact(&request), None);
    }

    #[test]
    fn interest_body_omits_unset_fields() {
        let request = InterestRequest {
            property_id: "p1".into(),
            fractions: None,
            message: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"property_id": "p1"}));
    }
}
