//! Wire types for backend entities.
//!
//! Decoding is deliberately forgiving: ids arrive as strings or numbers
//! depending on the endpoint, numeric fields are sometimes omitted, and
//! status enums may grow values the client does not know yet. Unknown enum
//! values map to an `Unknown` variant instead of failing the whole record.

use serde::{Deserialize, Deserializer};

pub mod inquiry;
pub mod investment;
pub mod property;
pub mod update;
pub mod user;

pub use inquiry::{Inquiry, InterestStatus};
pub use investment::Investment;
pub use property::{Property, PropertyStatus};
pub use update::{UpdateComment, UpdateItem};
pub use user::{Role, UserProfile};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

/// Accepts `"42"` and `42` alike.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Result of a bulk delete. The backend reports what it actually removed;
/// ids that no longer existed come back in `missing_ids` and callers must
/// adjust counters by `deleted_count`, never by the requested amount.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkDeleteOutcome {
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub missing_ids: Vec<String>,
}

impl BulkDeleteOutcome {
    pub fn is_partial(&self) -> bool {
        !self.missing_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "de_id")]
        id: String,
        #[serde(default, deserialize_with = "de_opt_id")]
        parent_id: Option<String>,
    }

    #[test]
    fn ids_decode_from_strings_and_numbers() {
        let a: WithId = serde_json::from_str(r#"{"id": "abc", "parent_id": 7}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(a.parent_id.as_deref(), Some("7"));

        let b: WithId = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(b.id, "42");
        assert_eq!(b.parent_id, None);
    }

    #[test]
    fn bulk_outcome_defaults_when_fields_missing() {
        let outcome: BulkDeleteOutcome = serde_json::from_str("{}").unwrap();
        assert_eq!(outcome.deleted_count, 0);
        assert!(!outcome.is_partial());

        let partial: BulkDeleteOutcome =
            serde_json::from_str(r#"{"deleted_count": 2, "missing_ids": ["9"]}"#).unwrap();
        assert!(partial.is_partial());
    }
}
