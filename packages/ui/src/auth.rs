//! Authentication context and hooks for the UI.

use api::models::{Role, UserProfile};
use api::{ApiClient, ApiConfig, SessionStore};
use dioxus::prelude::*;
use store::MediaCache;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// True while a persisted token is still being re-validated; route
    /// guards must not decide anything before this settles.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The shared API client. Available anywhere under [`AuthProvider`].
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// The session-global media resolution cache.
pub fn use_media() -> MediaCache {
    use_context::<MediaCache>()
}

/// Provider component that owns the session, the API client, and the
/// media cache for the whole tree. On mount, a persisted token is
/// re-validated against `/auth/me`; until that settles `loading` is true.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_context_provider(|| {
        let config = ApiConfig::default();
        ApiClient::new(config, SessionStore::new())
    });
    use_context_provider(|| match client.config().media_base.clone() {
        Some(base) => MediaCache::with_fallback_base(base),
        None => MediaCache::new(),
    });
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::default()));

    // Re-validate the persisted token on mount. Per the session contract,
    // any failure here (401 or not) resets to a logged-out state.
    let revalidate = client.clone();
    let _ = use_resource(move || {
        let client = revalidate.clone();
        async move {
            if !client.session().has_token() {
                auth_state.set(AuthState::signed_out());
                return;
            }
            match api::auth::fetch_me(&client).await {
                Ok(profile) => {
                    client.session().set_user(profile.clone());
                    auth_state.set(AuthState::signed_in(profile));
                }
                Err(err) => {
                    tracing::info!(%err, "persisted token failed re-validation");
                    client.session().clear();
                    auth_state.set(AuthState::signed_out());
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Marks the session signed-in after a successful login call.
pub fn apply_signed_in(mut auth: Signal<AuthState>, profile: UserProfile) {
    auth.set(AuthState::signed_in(profile));
}

/// Clears the session and auth state. The caller decides where to
/// navigate afterwards.
pub fn apply_signed_out(client: &ApiClient, mut auth: Signal<AuthState>) {
    api::auth::logout(client);
    auth.set(AuthState::signed_out());
}

/// Button to log out the current user and return to the home page.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let auth_state = use_auth();
    let nav = use_navigator();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                apply_signed_out(&client, auth_state);
                nav.replace("/");
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            email: "u@example.com".into(),
            full_name: None,
            phone: None,
            role,
            is_verified: true,
            created_at: None,
        }
    }

    #[test]
    fn state_transitions_cover_the_lifecycle() {
        let initial = AuthState::default();
        assert!(initial.loading);
        assert!(!initial.is_authenticated());

        let signed_in = AuthState::signed_in(user(Role::Admin));
        assert!(signed_in.is_admin());
        assert_eq!(signed_in.role(), Some(Role::Admin));
        assert!(!signed_in.loading);

        let signed_out = AuthState::signed_out();
        assert_eq!(signed_out.role(), None);
        assert!(!signed_out.loading);
    }
}
