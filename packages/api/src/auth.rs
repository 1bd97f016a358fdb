//! # Auth flow
//!
//! Signup, OTP email verification, login, password reset. Login is
//! form-encoded (`username`/`password`) against the token endpoint; every
//! other call is JSON. A successful login stores the token and then
//! re-derives the profile from `/auth/me`; the profile is never trusted
//! from client storage.
//!
//! The resend-OTP cooldown is persisted per email so a reload cannot be
//! used to spam the mailer.

use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::decode::decode_item;
use crate::error::ApiError;
use crate::models::UserProfile;
use crate::storage;

pub const RESEND_COOLDOWN_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub password: String,
}

/// Field-scoped validation failures, rendered inline next to their inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupErrors {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

impl SignupErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.password.is_none()
    }
}

pub fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Some("Enter a valid email address".to_string());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Some("Enter a valid email address".to_string());
    }
    None
}

pub fn validate_phone(phone: &str) -> Option<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Some("Phone number is required".to_string());
    }
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Some("Enter a valid phone number".to_string());
    }
    if !(7..=15).contains(&digits.len()) {
        return Some("Enter a valid phone number".to_string());
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

/// Validates the whole signup form. Submission is blocked until this
/// returns no errors, so invalid input never reaches the network.
pub fn validate_signup(request: &SignupRequest) -> SignupErrors {
    SignupErrors {
        email: validate_email(&request.email),
        full_name: if request.full_name.trim().is_empty() {
            Some("Full name is required".to_string())
        } else {
            None
        },
        phone: validate_phone(&request.phone),
        password: validate_password(&request.password),
    }
}

pub async fn signup(client: &ApiClient, request: &SignupRequest) -> Result<(), ApiError> {
    client.post("/auth/signup", request).await?;
    Ok(())
}

/// Exchanges credentials for a token, then loads the profile it belongs
/// to. If the profile fetch fails the half-open session is rolled back.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<UserProfile, ApiError> {
    let value = client
        .post_form("/auth/login", &[("username", email), ("password", password)])
        .await?;
    let token = value
        .get("access_token")
        .or_else(|| value.get("token"))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ApiError::Decode("login response carried no token".to_string()))?;
    client.session().set_token(token);

    match fetch_me(client).await {
        Ok(profile) => {
            client.session().set_user(profile.clone());
            Ok(profile)
        }
        Err(err) => {
            client.session().clear();
            Err(err)
        }
    }
}

/// Loads the profile for the held token.
pub async fn fetch_me(client: &ApiClient) -> Result<UserProfile, ApiError> {
    let value = client.get("/auth/me").await?;
    decode_item(value, &["user", "profile"])
}

pub async fn verify_email(client: &ApiClient, email: &str, otp: &str) -> Result<(), ApiError> {
    client
        .post("/auth/verify-email", &json!({ "email": email, "otp": otp }))
        .await?;
    Ok(())
}

pub async fn resend_otp(client: &ApiClient, email: &str) -> Result<(), ApiError> {
    client
        .post("/auth/resend-otp", &json!({ "email": email }))
        .await?;
    start_resend_cooldown(email);
    Ok(())
}

pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<(), ApiError> {
    client
        .post("/auth/forgot-password", &json!({ "email": email }))
        .await?;
    Ok(())
}

pub async fn reset_password(
    client: &ApiClient,
    email: &str,
    otp: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    client
        .post(
            "/auth/reset-password",
            &json!({ "email": email, "otp": otp, "new_password": new_password }),
        )
        .await?;
    Ok(())
}

/// Sign-out is purely client-side: the backend holds no session state
/// beyond the token itself.
pub fn logout(client: &ApiClient) {
    client.session().clear();
}

fn cooldown_key(email: &str) -> String {
    format!("otp-resend-{}", email.trim().to_lowercase())
}

pub fn start_resend_cooldown(email: &str) {
    let expires = storage::now_millis() + RESEND_COOLDOWN_SECS * 1000;
    storage::set_item(&cooldown_key(email), &expires.to_string());
}

/// Seconds until another resend is allowed for this address; 0 when free.
/// Survives reloads because the expiry lives in persistent storage.
pub fn resend_cooldown_remaining(email: &str) -> u64 {
    let Some(raw) = storage::get_item(&cooldown_key(email)) else {
        return 0;
    };
    let Ok(expires) = raw.parse::<u64>() else {
        storage::remove_item(&cooldown_key(email));
        return 0;
    };
    let now = storage::now_millis();
    if expires > now {
        (expires - now).div_ceil(1000)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SignupRequest {
        SignupRequest {
            email: "a@b.com".into(),
            full_name: "Ada Bello".into(),
            phone: "08012345678".into(),
            password: "Abcd1234!".into(),
        }
    }

    #[test]
    fn accepts_the_canonical_signup() {
        assert!(validate_signup(&valid_request()).is_empty());
    }

    #[test]
    fn rejects_each_bad_field_with_its_own_message() {
        let mut bad_email = valid_request();
        bad_email.email = "not-an-email".into();
        assert_eq!(
            validate_signup(&bad_email).email.as_deref(),
            Some("Enter a valid email address")
        );

        let mut bad_phone = valid_request();
        bad_phone.phone = "0801-234".into();
        assert_eq!(
            validate_signup(&bad_phone).phone.as_deref(),
            Some("Enter a valid phone number")
        );

        let mut short_password = valid_request();
        short_password.password = "abc123".into();
        assert_eq!(
            validate_signup(&short_password).password.as_deref(),
            Some("Password must be at least 8 characters")
        );

        let mut no_name = valid_request();
        no_name.full_name = "  ".into();
        assert_eq!(
            validate_signup(&no_name).full_name.as_deref(),
            Some("Full name is required")
        );
    }

    #[test]
    fn phone_allows_plus_prefix_and_bounds_length() {
        assert_eq!(validate_phone("+2348012345678"), None);
        assert!(validate_phone("12345").is_some());
        assert!(validate_phone("1234567890123456").is_some());
    }

    #[test]
    fn email_requires_a_dotted_domain() {
        assert_eq!(validate_email("a@b.com"), None);
        assert!(validate_email("a@b").is_some());
        assert!(validate_email("@b.com").is_some());
        assert!(validate_email("").is_some());
    }

    #[test]
    fn cooldown_counts_down_and_expires() {
        let email = "cooldown-test@example.com";
        assert_eq!(resend_cooldown_remaining(email), 0);

        start_resend_cooldown(email);
        let remaining = resend_cooldown_remaining(email);
        assert!(remaining > 0 && remaining <= RESEND_COOLDOWN_SECS);

        // Force-expire by writing a past timestamp under the same key.
        storage::set_item(&cooldown_key(email), "1000");
        assert_eq!(resend_cooldown_remaining(email), 0);
        storage::remove_item(&cooldown_key(email));
    }

    #[test]
    fn garbage_cooldown_values_are_discarded() {
        let email = "garbage-test@example.com";
        storage::set_item(&cooldown_key(email), "not-a-number");
        assert_eq!(resend_cooldown_remaining(email), 0);
        assert_eq!(storage::get_item(&cooldown_key(email)), None);
    }
}
