//! Account creation. Every field is validated locally before the signup
//! request goes out; failures render inline next to their inputs.

use api::auth::{SignupErrors, SignupRequest};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::use_api;

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn Register() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut field_errors = use_signal(SignupErrors::default);
    let mut confirm_error = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            confirm_error.set(None);

            let request = SignupRequest {
                email: email().trim().to_string(),
                full_name: full_name().trim().to_string(),
                phone: phone().trim().to_string(),
                password: password(),
            };
            let problems = api::auth::validate_signup(&request);
            let mismatch = request.password != confirm();
            let blocked = !problems.is_empty() || mismatch;
            field_errors.set(problems);
            if mismatch {
                confirm_error.set(Some("Passwords do not match".to_string()));
            }
            if blocked {
                return;
            }

            loading.set(true);
            match api::auth::signup(&client, &request).await {
                Ok(()) => {
                    nav.push(Route::VerifyEmail {
                        email: request.email,
                    });
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let problems = field_errors.read().clone();

    rsx! {
        SiteHeader {}
        main { class: "page auth-page",
            div { class: "auth-card",
                h1 { "Create your account" }
                p { class: "auth-subtitle", "Start investing in fractions of real property." }

                form { class: "auth-form", onsubmit: handle_register,
                    if let Some(message) = error() {
                        div { class: "error-banner", "{message}" }
                    }
                    Input {
                        placeholder: "Full name",
                        value: full_name(),
                        oninput: move |evt: FormEvent| full_name.set(evt.value()),
                    }
                    {field_error(&problems.full_name)}
                    Input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    {field_error(&problems.email)}
                    Input {
                        r#type: "tel",
                        placeholder: "Phone (e.g. +2348012345678)",
                        value: phone(),
                        oninput: move |evt: FormEvent| phone.set(evt.value()),
                    }
                    {field_error(&problems.phone)}
                    Input {
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    {field_error(&problems.password)}
                    Input {
                        r#type: "password",
                        placeholder: "Confirm password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                    {field_error(&confirm_error.read())}
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p { class: "auth-links",
                    "Already have an account? "
                    Link { to: Route::Login { next: String::new() }, "Sign in" }
                }
            }
        }
        SiteFooter {}
    }
}

fn field_error(message: &Option<String>) -> Element {
    match message {
        Some(text) => rsx! {
            p { class: "field-error", "{text}" }
        },
        None => rsx! {},
    }
}
