use serde::{Deserialize, Serialize};
use store::Keyed;

use super::de_id;

/// Backend role strings are uppercase. Anything unrecognized decodes to
/// `Unknown`, which grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Investor,
    Public,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Investor => "Investor",
            Role::Public => "Public",
            Role::Unknown => "Unknown",
        }
    }

    /// Wire value for role-change requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Investor => "INVESTOR",
            Role::Public => "PUBLIC",
            Role::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_role() -> Role {
    Role::Public
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name to greet the user with; falls back to the email local part.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

impl Keyed for UserProfile {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_do_not_fail_decoding() {
        let json = r#"{"id": 3, "email": "x@example.com", "role": "SUPERUSER"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert!(!user.is_admin());
    }

    #[test]
    fn missing_role_defaults_to_public() {
        let json = r#"{"id": "u9", "email": "y@example.com"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Public);
        assert_eq!(user.display_name(), "y");
    }
}
