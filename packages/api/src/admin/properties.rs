//! Property CRUD for the back office.
//!
//! Mutations return the server's version of the entity when it sends one,
//! so list caches can be patched in place instead of re-fetched. Media is
//! attached after the primary save by PATCHing the full reference list.

use serde::Serialize;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::{Property, PropertyStatus};

/// Create/edit form payload. Serialized as-is for both POST and PATCH;
/// the backend treats a full-object PATCH as a replace of those fields.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    pub status: PropertyStatus,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub expected_roi: f64,
    pub is_fractional: bool,
    pub total_fractions: u32,
    pub fraction_price: f64,
    pub project_value: f64,
    pub media: Vec<String>,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            description: String::new(),
            status: PropertyStatus::Available,
            bedrooms: 0,
            bathrooms: 0.0,
            area_sqft: 0.0,
            expected_roi: 0.0,
            is_fractional: true,
            total_fractions: 0,
            fraction_price: 0.0,
            project_value: 0.0,
            media: Vec::new(),
        }
    }
}

impl PropertyDraft {
    /// Pre-fills the form for editing an existing listing.
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            location: property.location.clone(),
            description: property.description.clone(),
            status: property.status,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area_sqft: property.area_sqft,
            expected_roi: property.expected_roi,
            is_fractional: property.is_fractional,
            total_fractions: property.total_fractions,
            fraction_price: property.fraction_price,
            project_value: property.project_value,
            media: property.media.clone(),
        }
    }
}

/// First blocking problem with the draft, if any. Runs before any network
/// traffic; numeric fields are parsed by the form layer before this.
pub fn validate_draft(draft: &PropertyDraft) -> Option<String> {
    if draft.title.trim().is_empty() {
        return Some("Title is required".to_string());
    }
    if draft.location.trim().is_empty() {
        return Some("Location is required".to_string());
    }
    if draft.is_fractional {
        if draft.total_fractions == 0 {
            return Some("Total fractions must be at least 1".to_string());
        }
        if draft.fraction_price <= 0.0 {
            return Some("Fraction price must be greater than zero".to_string());
        }
    }
    None
}

pub async fn list(client: &ApiClient) -> Result<Vec<Property>, ApiError> {
    let value = client.get("/admin/properties").await?;
    Ok(decode_list(&value, &["properties"]))
}

pub async fn create(
    client: &ApiClient,
    draft: &PropertyDraft,
) -> Result<Option<Property>, ApiError> {
    let value = client.post("/admin/properties", draft).await?;
    Ok(decode_item(value, &["property"]).ok())
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    draft: &PropertyDraft,
) -> Result<Option<Property>, ApiError> {
    let value = client.patch(&format!("/admin/properties/{id}"), draft).await?;
    Ok(decode_item(value, &["property"]).ok())
}

/// Replaces the property's media reference list, used after uploads land.
pub async fn set_media(
    client: &ApiClient,
    id: &str,
    media: &[String],
) -> Result<Option<Property>, ApiError> {
    let value = client
        .patch(
            &format!("/admin/properties/{id}"),
            &serde_json::json!({ "media": media }),
        )
        .await?;
    Ok(decode_item(value, &["property"]).ok())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/admin/properties/{id}")).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title_location_and_fraction_setup() {
        let mut draft = PropertyDraft::default();
        assert_eq!(validate_draft(&draft).as_deref(), Some("Title is required"));

        draft.title = "Palm Court".into();
        assert_eq!(
            validate_draft(&draft).as_deref(),
            Some("Location is required")
        );

        draft.location = "Lekki".into();
        assert_eq!(
            validate_draft(&draft).as_deref(),
            Some("Total fractions must be at least 1")
        );

        draft.total_fractions = 100;
        assert_eq!(
            validate_draft(&draft).as_deref(),
            Some("Fraction price must be greater than zero")
        );

        draft.fraction_price = 250_000.0;
        assert_eq!(validate_draft(&draft), None);
    }

    #[test]
    fn non_fractional_listing_skips_fraction_checks() {
        let draft = PropertyDraft {
            title: "Detached Duplex".into(),
            location: "Abuja".into(),
            is_fractional: false,
            ..PropertyDraft::default()
        };
        assert_eq!(validate_draft(&draft), None);
    }

    #[test]
    fn draft_round_trips_from_property() {
        let json = r#"{"id": "p1", "title": "T", "location": "L", "total_fractions": 10, "fraction_price": 5.0, "is_fractional": true, "media": ["k1"]}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        let draft = PropertyDraft::from_property(&property);
        assert_eq!(draft.title, "T");
        assert_eq!(draft.total_fractions, 10);
        assert_eq!(draft.media, vec!["k1".to_string()]);
        assert_eq!(validate_draft(&draft), None);
    }
}
