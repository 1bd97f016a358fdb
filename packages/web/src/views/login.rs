//! Sign-in form. The `next` query parameter carries the path the route
//! guard bounced the visitor from, so a successful login lands them back
//! where they were headed.

use dioxus::prelude::*;
use ui::auth::apply_signed_in;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_auth};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn Login(next: String) -> Element {
    let client = use_api();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in: skip the form entirely.
    if !auth().loading && auth().user.is_some() {
        if next.is_empty() {
            nav.replace(Route::Home {});
        } else {
            nav.replace(next.as_str());
        }
    }

    let destination = next.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let destination = destination.clone();
        spawn(async move {
            error.set(None);

            let address = email().trim().to_string();
            let secret = password();

            if address.is_empty() {
                error.set(Some("Please enter your email".to_string()));
                return;
            }
            if secret.is_empty() {
                error.set(Some("Please enter your password".to_string()));
                return;
            }

            loading.set(true);
            match api::auth::login(&client, &address, &secret).await {
                Ok(profile) => {
                    apply_signed_in(auth, profile);
                    if destination.is_empty() {
                        nav.replace(Route::Home {});
                    } else {
                        nav.replace(destination.as_str());
                    }
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        SiteHeader {}
        main { class: "page auth-page",
            div { class: "auth-card",
                h1 { "Welcome back" }
                p { class: "auth-subtitle", "Sign in to your account" }

                form { class: "auth-form", onsubmit: handle_login,
                    if let Some(message) = error() {
                        div { class: "error-banner", "{message}" }
                    }
                    Input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    Input {
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                p { class: "auth-links",
                    Link { to: Route::ForgotPassword {}, "Forgot your password?" }
                }
                p { class: "auth-links",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Sign up" }
                }
            }
        }
        SiteFooter {}
    }
}
