use serde::{Deserialize, Serialize};
use store::Keyed;

use super::{de_id, de_opt_id};

/// Triage pipeline for an expressed interest. Transitions happen only
/// through admin requests; the client never advances a status on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestStatus {
    #[default]
    New,
    Pending,
    Contacted,
    Approved,
    Rejected,
    Active,
    Sold,
    Available,
    Closed,
    #[serde(other)]
    Unknown,
}

impl InterestStatus {
    /// Every status an admin can move an inquiry to, in pipeline order.
    pub const ALL: [InterestStatus; 9] = [
        InterestStatus::New,
        InterestStatus::Pending,
        InterestStatus::Contacted,
        InterestStatus::Approved,
        InterestStatus::Rejected,
        InterestStatus::Active,
        InterestStatus::Sold,
        InterestStatus::Available,
        InterestStatus::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InterestStatus::New => "New",
            InterestStatus::Pending => "Pending",
            InterestStatus::Contacted => "Contacted",
            InterestStatus::Approved => "Approved",
            InterestStatus::Rejected => "Rejected",
            InterestStatus::Active => "Active",
            InterestStatus::Sold => "Sold",
            InterestStatus::Available => "Available",
            InterestStatus::Closed => "Closed",
            InterestStatus::Unknown => "Unknown",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestStatus::New => "NEW",
            InterestStatus::Pending => "PENDING",
            InterestStatus::Contacted => "CONTACTED",
            InterestStatus::Approved => "APPROVED",
            InterestStatus::Rejected => "REJECTED",
            InterestStatus::Active => "ACTIVE",
            InterestStatus::Sold => "SOLD",
            InterestStatus::Available => "AVAILABLE",
            InterestStatus::Closed => "CLOSED",
            InterestStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn from_str_loose(value: &str) -> InterestStatus {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .unwrap_or(InterestStatus::Unknown)
    }
}

/// An expressed interest in a property, from a signed-in investor or a
/// guest contact form. Guest rows have no `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub property_title: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub fractions: Option<u32>,
    #[serde(default)]
    pub status: InterestStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Inquiry {
    pub fn is_guest(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn contact_label(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("(no contact)")
    }
}

impl Keyed for Inquiry {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_strings() {
        for status in InterestStatus::ALL {
            assert_eq!(InterestStatus::from_str_loose(status.as_str()), status);
        }
        assert_eq!(
            InterestStatus::from_str_loose("ESCALATED"),
            InterestStatus::Unknown
        );
    }

    #[test]
    fn guest_inquiry_has_no_user() {
        let json = r#"{"id": 1, "full_name": "Dana", "email": "dana@example.com", "status": "NEW"}"#;
        let inquiry: Inquiry = serde_json::from_str(json).unwrap();
        assert!(inquiry.is_guest());
        assert_eq!(inquiry.contact_label(), "Dana");
        assert_eq!(inquiry.status, InterestStatus::New);
    }

    #[test]
    fn unknown_status_does_not_drop_the_row() {
        let json = r#"{"id": 2, "status": "ESCALATED"}"#;
        let inquiry: Inquiry = serde_json::from_str(json).unwrap();
        assert_eq!(inquiry.status, InterestStatus::Unknown);
        assert_eq!(inquiry.contact_label(), "(no contact)");
    }
}
