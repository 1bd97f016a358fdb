//! Tolerant decoding of response envelopes.
//!
//! Endpoints disagree on shape: some return a bare array, others wrap it as
//! `{"data": [...]}`, `{"items": [...], "total": n}` or under an
//! entity-specific key. List decoding never fails: a malformed envelope
//! yields an empty collection plus a diagnostic, and individual rows that
//! do not decode are skipped rather than poisoning the page.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

const GENERIC_LIST_FIELDS: [&str; 3] = ["data", "items", "results"];

fn find_array<'a>(value: &'a Value, fields: &[&str]) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }
    fields
        .iter()
        .chain(GENERIC_LIST_FIELDS.iter())
        .find_map(|field| value.get(*field).and_then(Value::as_array))
}

/// Decodes a list response, looking for the array at the root and then
/// under `fields` (plus the usual envelope keys).
pub fn decode_list<T: DeserializeOwned>(value: &Value, fields: &[&str]) -> Vec<T> {
    let Some(items) = find_array(value, fields) else {
        tracing::warn!(
            tried = ?fields,
            "expected a list in the response but found none; treating as empty"
        );
        return Vec::new();
    };
    let mut decoded = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(entity) => decoded.push(entity),
            Err(err) => tracing::warn!(%err, "skipping row that failed to decode"),
        }
    }
    decoded
}

/// Decodes a single entity, at the root or under `fields`/`data`.
pub fn decode_item<T: DeserializeOwned>(value: Value, fields: &[&str]) -> Result<T, ApiError> {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(entity) => Ok(entity),
        Err(root_err) => {
            for field in fields.iter().chain(std::iter::once(&"data")) {
                if let Some(inner) = value.get(*field) {
                    if let Ok(entity) = serde_json::from_value::<T>(inner.clone()) {
                        return Ok(entity);
                    }
                }
            }
            Err(ApiError::Decode(root_err.to_string()))
        }
    }
}

/// Pulls a total row count out of a paginated envelope, if one is present.
pub fn decode_total(value: &Value) -> Option<u64> {
    ["total", "total_count", "count"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: String,
    }

    #[test]
    fn decodes_bare_and_enveloped_arrays() {
        let bare = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(decode_list::<Row>(&bare, &[]).len(), 2);

        let named = json!({"properties": [{"id": "a"}]});
        assert_eq!(decode_list::<Row>(&named, &["properties"]).len(), 1);

        let generic = json!({"data": [{"id": "a"}]});
        assert_eq!(decode_list::<Row>(&generic, &["properties"]).len(), 1);
    }

    #[test]
    fn malformed_envelope_yields_empty_not_error() {
        let not_a_list = json!({"message": "ok"});
        assert!(decode_list::<Row>(&not_a_list, &["rows"]).is_empty());
        assert!(decode_list::<Row>(&Value::Null, &[]).is_empty());
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let mixed = json!([{"id": "a"}, {"id": 17}, {"wrong": true}, {"id": "b"}]);
        let rows = decode_list::<Row>(&mixed, &[]);
        // "17" fails because Row.id is a plain String here, and the shapeless
        // row fails too; the good rows still come through.
        assert_eq!(
            rows,
            vec![Row { id: "a".into() }, Row { id: "b".into() }]
        );
    }

    #[test]
    fn item_decodes_from_root_or_envelope() {
        let root: Row = decode_item(json!({"id": "a"}), &[]).unwrap();
        assert_eq!(root.id, "a");

        let wrapped: Row = decode_item(json!({"property": {"id": "b"}}), &["property"]).unwrap();
        assert_eq!(wrapped.id, "b");

        let err = decode_item::<Row>(json!({"nope": 1}), &["property"]);
        assert!(matches!(err, Err(ApiError::Decode(_))));
    }

    #[test]
    fn total_found_under_common_keys() {
        assert_eq!(decode_total(&json!({"items": [], "total": 41})), Some(41));
        assert_eq!(decode_total(&json!({"count": 3})), Some(3));
        assert_eq!(decode_total(&json!([1, 2])), None);
    }
}
