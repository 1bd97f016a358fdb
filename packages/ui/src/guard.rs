//! # Route guard
//!
//! Wraps protected screens. Nothing renders until the session has finished
//! loading; then an unauthenticated visitor is sent to sign-in (carrying
//! the path to return to) and a role mismatch is sent home. Roles compare
//! exactly: an admin is not implicitly an investor, and vice versa.

use api::models::Role;
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::components::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still loading; render a placeholder, never the content.
    Wait,
    /// No user; go to sign-in.
    SignIn,
    /// Signed in but the wrong role; go home.
    Home,
    /// Allowed.
    Render,
}

/// Pure gate decision. `required == None` means "any signed-in user".
pub fn gate(loading: bool, actual: Option<Role>, required: Option<Role>) -> GateDecision {
    if loading {
        return GateDecision::Wait;
    }
    let Some(actual) = actual else {
        return GateDecision::SignIn;
    };
    match required {
        None => GateDecision::Render,
        Some(required) if actual == required => GateDecision::Render,
        Some(_) => GateDecision::Home,
    }
}

/// Builds the sign-in path, with the protected location to come back to.
pub fn sign_in_path(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) if !path.is_empty() => {
            format!("/auth/login?next={}", encode_query_component(path))
        }
        _ => "/auth/login".to_string(),
    }
}

/// Percent-encodes a value for a query string. Internal route paths are
/// nearly clean already; this covers the few reserved characters.
pub fn encode_query_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Gate component. `role: None` admits any signed-in user; `return_to`
/// is where sign-in should navigate back to on success.
#[component]
pub fn RequireAuth(
    #[props(default)] role: Option<Role>,
    #[props(default)] return_to: Option<String>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth.read();

    match gate(state.loading, state.role(), role) {
        GateDecision::Wait => rsx! {
            div { class: "gate-waiting", Spinner {} }
        },
        GateDecision::SignIn => {
            nav.replace(sign_in_path(return_to.as_deref()).as_str());
            rsx! {}
        }
        GateDecision::Home => {
            nav.replace("/");
            rsx! {}
        }
        GateDecision::Render => rsx! {
            {children}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_renders_while_loading() {
        for role in [None, Some(Role::Admin)] {
            assert_eq!(gate(true, None, role), GateDecision::Wait);
            assert_eq!(gate(true, Some(Role::Admin), role), GateDecision::Wait);
        }
    }

    #[test]
    fn anonymous_visitors_go_to_sign_in() {
        assert_eq!(gate(false, None, None), GateDecision::SignIn);
        assert_eq!(gate(false, None, Some(Role::Investor)), GateDecision::SignIn);
    }

    #[test]
    fn content_renders_iff_roles_match_exactly() {
        let roles = [Role::Admin, Role::Investor, Role::Public, Role::Unknown];
        for actual in roles {
            // No requirement admits any signed-in user.
            assert_eq!(gate(false, Some(actual), None), GateDecision::Render);
            for required in roles {
                let decision = gate(false, Some(actual), Some(required));
                if actual == required {
                    assert_eq!(decision, GateDecision::Render);
                } else {
                    assert_eq!(decision, GateDecision::Home);
                }
            }
        }
    }

    #[test]
    fn admin_is_not_an_investor() {
        assert_eq!(
            gate(false, Some(Role::Admin), Some(Role::Investor)),
            GateDecision::Home
        );
    }

    #[test]
    fn sign_in_path_carries_the_return_target() {
        assert_eq!(sign_in_path(None), "/auth/login");
        assert_eq!(sign_in_path(Some("")), "/auth/login");
        assert_eq!(
            sign_in_path(Some("/admin/properties")),
            "/auth/login?next=/admin/properties"
        );
        assert_eq!(
            sign_in_path(Some("/a b?x=1")),
            "/auth/login?next=/a%20b%3Fx%3D1"
        );
    }
}
