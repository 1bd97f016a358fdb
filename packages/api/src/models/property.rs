use serde::{Deserialize, Serialize};
use store::Keyed;

use super::de_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    #[default]
    Available,
    Sold,
    #[serde(other)]
    Unknown,
}

impl PropertyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::Sold => "Sold",
            PropertyStatus::Unknown => "Unknown",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "AVAILABLE",
            PropertyStatus::Sold => "SOLD",
            PropertyStatus::Unknown => "UNKNOWN",
        }
    }
}

/// A listing. Fraction accounting (`fractions_sold + fractions_available ==
/// total_fractions`) is enforced server-side; the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: PropertyStatus,
    /// Direct URLs or opaque storage keys, resolved lazily for display.
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub area_sqft: f64,
    #[serde(default)]
    pub expected_roi: f64,
    #[serde(default)]
    pub total_fractions: u32,
    #[serde(default)]
    pub fraction_price: f64,
    #[serde(default)]
    pub project_value: f64,
    #[serde(default)]
    pub fractions_sold: u32,
    #[serde(default)]
    pub fractions_available: u32,
    #[serde(default)]
    pub is_fractional: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Property {
    pub fn cover_media(&self) -> Option<&str> {
        self.media.first().map(String::as_str)
    }

    pub fn is_sold(&self) -> bool {
        self.status == PropertyStatus::Sold
    }

    /// Share of fractions already taken, in percent, for progress bars.
    pub fn sold_percentage(&self) -> f64 {
        if self.total_fractions == 0 {
            return 0.0;
        }
        f64::from(self.fractions_sold) / f64::from(self.total_fractions) * 100.0
    }
}

impl Keyed for Property {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_decodes_with_defaults() {
        let json = r#"{"id": 12, "title": "Marina Heights"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.id, "12");
        assert_eq!(property.status, PropertyStatus::Available);
        assert!(property.media.is_empty());
        assert_eq!(property.sold_percentage(), 0.0);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let json = r#"{"id": "p1", "title": "T", "status": "ARCHIVED"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.status, PropertyStatus::Unknown);
        assert!(!property.is_sold());
    }

    #[test]
    fn sold_percentage_uses_server_counts() {
        let json = r#"{"id": "p2", "title": "T", "total_fractions": 200, "fractions_sold": 50, "fractions_available": 150}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.sold_percentage(), 25.0);
    }
}
