//! Start of the password-reset flow: request a reset code by email.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_toast};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut toasts = use_toast();
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let address = email.peek().trim().to_string();
            if let Some(problem) = api::auth::validate_email(&address) {
                error.set(Some(problem));
                return;
            }
            error.set(None);
            loading.set(true);
            match api::auth::forgot_password(&client, &address).await {
                Ok(()) => {
                    toasts.success("If that address has an account, a reset code is on its way.");
                    nav.push(Route::ResetPassword { email: address });
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        SiteHeader {}
        main { class: "page auth-page",
            div { class: "auth-card",
                h1 { "Reset your password" }
                p { class: "auth-subtitle",
                    "Enter your account email and we will send you a reset code."
                }

                form { class: "auth-form", onsubmit: handle_submit,
                    if let Some(message) = error() {
                        div { class: "error-banner", "{message}" }
                    }
                    Input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Sending..." } else { "Send reset code" }
                    }
                }

                p { class: "auth-links",
                    Link { to: Route::Login { next: String::new() }, "Back to sign in" }
                }
            }
        }
        SiteFooter {}
    }
}
