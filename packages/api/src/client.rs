//! # HTTP client wrapper
//!
//! Every backend call goes through [`ApiClient`]. It joins paths onto the
//! configured base URL, attaches the bearer token (except on the public
//! auth endpoints), and intercepts responses: a 401 from any protected
//! endpoint clears the session before the error reaches the caller, so the
//! rest of the app only ever sees [`ApiError::Unauthorized`] with the token
//! already gone. The public auth endpoints are exempt (a failed login is a
//! 401 too, and must keep its own message). Network failures pass through
//! unchanged; no other status has a global side effect.

use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{http_error, ApiError};
use crate::session::SessionStore;

/// Auth endpoints that must never carry a bearer token, even when one is
/// held. A stale token on these would turn "sign in again" into a 401 loop.
const PUBLIC_PATHS: [&str; 6] = [
    "/auth/signup",
    "/auth/login",
    "/auth/verify-email",
    "/auth/resend-otp",
    "/auth/forgot-password",
    "/auth/reset-password",
];

pub fn is_public_path(path: &str) -> bool {
    let bare = path.split('?').next().unwrap_or(path);
    PUBLIC_PATHS.contains(&bare)
}

/// Interprets a completed (non-401) response body.
///
/// 2xx bodies parse as JSON when possible; empty bodies become `null` and
/// plain-text bodies are kept as strings rather than rejected. Everything
/// else turns into an [`ApiError::Http`] with an extracted message.
pub(crate) fn read_body(status: u16, body: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
    } else {
        Err(http_error(status, body))
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Raw client for requests that bypass the backend entirely, such as
    /// PUTs against presigned storage URLs. Those must not trigger the
    /// 401 session-clear, which belongs to backend responses only.
    pub(crate) fn raw(&self) -> &reqwest::Client {
        &self.http
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.config.url(path));
        if !is_public_path(path) {
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token);
            }
        }
        builder
    }

    /// A 401 from a protected endpoint means the token is dead: clear the
    /// session and surface [`ApiError::Unauthorized`]. A 401 from a public
    /// auth endpoint is an ordinary failure (wrong password, bad OTP) and
    /// keeps its backend message.
    async fn execute(&self, path: &str, builder: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        if status == 401 && !is_public_path(path) {
            tracing::info!("backend answered 401; clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        read_body(status, &body)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::GET, path))
            .await
    }

    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::GET, path).query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    /// POST with no body, for toggle-style endpoints.
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::POST, path))
            .await
    }

    /// POST as `application/x-www-form-urlencoded`; the token endpoint
    /// expects form fields, not JSON.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::POST, path).form(&form))
            .await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::PATCH, path).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::DELETE, path))
            .await
    }

    /// DELETE with a JSON body, used by the bulk-delete endpoints.
    pub async fn delete_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.execute(path, self.request(reqwest::Method::DELETE, path).json(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn public_paths_skip_the_token() {
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/auth/resend-otp"));
        assert!(is_public_path("/auth/login?next=/admin"));
        assert!(!is_public_path("/auth/me"));
        assert!(!is_public_path("/properties"));
        assert!(!is_public_path("/admin/users"));
    }

    #[test]
    fn success_bodies_parse_json_or_fall_back_to_text() {
        assert_eq!(read_body(200, r#"{"ok": true}"#).unwrap(), json!({"ok": true}));
        assert_eq!(read_body(204, "").unwrap(), Value::Null);
        assert_eq!(read_body(200, "created").unwrap(), Value::String("created".into()));
    }

    #[test]
    fn error_statuses_carry_extracted_messages() {
        let err = read_body(400, r#"{"detail": "Email already registered"}"#).unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // Failed logins are 401s too; on public paths they keep their message
    // instead of being folded into the session-expired error.
    #[test]
    fn public_path_401_keeps_its_message() {
        let err = read_body(401, r#"{"detail": "Incorrect email or password"}"#).unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect email or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
