//! Error type shared by every API call.
//!
//! Backend error bodies are not uniform: some endpoints return
//! `{"message": "..."}`, validation layers return `{"detail": "..."}` or a
//! `{"detail": [{"msg": ...}]}` array. [`error_message`] digs the most
//! specific human-readable string out of whatever came back so views can
//! render it directly.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the bearer token. The session has already been
    /// cleared by the time callers see this.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    /// Non-2xx response with an extracted message.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("Could not reach the server: {0}")]
    Network(String),

    /// The response arrived but did not have the shape we expected.
    #[error("Unexpected response from the server")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Builds the error for a non-2xx response that keeps its own message
/// (anything but a token-rejection 401).
pub(crate) fn http_error(status: u16, body: &str) -> ApiError {
    ApiError::Http {
        status,
        message: error_message(status, body),
    }
}

/// Extracts the best available message from an error body.
///
/// Precedence: `message` field, then `detail` (string or validation array),
/// then the raw body when it is short plain text, then a generic fallback.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return message.to_string();
            }
        }
        match value.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => {
                return detail.clone();
            }
            Some(Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
            _ => {}
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }
    generic_message(status)
}

fn generic_message(status: u16) -> String {
    match status {
        401 => "Invalid credentials.".to_string(),
        403 => "You do not have permission to do that.".to_string(),
        404 => "Not found.".to_string(),
        500..=599 => "Something went wrong on our side. Please try again.".to_string(),
        _ => format!("Request failed ({status})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_field() {
        let body = r#"{"message": "Email already registered", "detail": "ignored"}"#;
        assert_eq!(error_message(400, body), "Email already registered");
    }

    #[test]
    fn falls_back_to_detail_string() {
        let body = r#"{"detail": "Invalid OTP"}"#;
        assert_eq!(error_message(400, body), "Invalid OTP");
    }

    #[test]
    fn joins_validation_detail_array() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}, {"loc": ["body", "phone"], "msg": "field required"}]}"#;
        assert_eq!(
            error_message(422, body),
            "value is not a valid email address; field required"
        );
    }

    #[test]
    fn uses_short_plain_text_bodies() {
        assert_eq!(error_message(400, "token expired"), "token expired");
    }

    #[test]
    fn generic_fallback_for_html_or_empty_bodies() {
        assert_eq!(error_message(404, ""), "Not found.");
        assert_eq!(
            error_message(502, "<html><body>Bad Gateway</body></html>"),
            "Something went wrong on our side. Please try again."
        );
    }

    #[test]
    fn unauthorized_reports_status_401() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }
}
