//! Second half of the password-reset flow: reset code plus new password.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_toast};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn ResetPassword(email: String) -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut toasts = use_toast();
    let mut address = use_signal({
        let seed = email.clone();
        move || seed
    });
    let mut otp = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let current = address.peek().trim().to_string();
            let code = otp.peek().trim().to_string();
            let secret = password.peek().to_string();

            if let Some(problem) = api::auth::validate_email(&current) {
                error.set(Some(problem));
                return;
            }
            if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
                error.set(Some("Enter the 6-digit code".to_string()));
                return;
            }
            if let Some(problem) = api::auth::validate_password(&secret) {
                error.set(Some(problem));
                return;
            }
            if secret != *confirm.peek() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            error.set(None);
            loading.set(true);
            match api::auth::reset_password(&client, &current, &code, &secret).await {
                Ok(()) => {
                    toasts.success("Password updated. Sign in with your new password.");
                    nav.push(Route::Login { next: String::new() });
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
                h1 { "Choose a new password" }
                p { class: "auth-subtitle",
                    "Enter the reset code we emailed you along with your new password."
                }

                form { class: "auth-form", onsubmit: handle_submit,
                    if let Some(message) = error() {
                        div { class: "error-banner", "{message}" }
                    }
                    Input {
                        r#type: "email",
                        placeholder: "Email",
                        value: address(),
                        oninput: move |evt: FormEvent| address.set(evt.value()),
                    }
                    Input {
                        placeholder: "6-digit code",
                        value: otp(),
                        oninput: move |evt: FormEvent| otp.set(evt.value()),
                    }
                    Input {
                        r#type: "password",
                        placeholder: "New password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    Input {
                        r#type: "password",
                        placeholder: "Confirm new password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Updating..." } else { "Update password" }
                    }
                }
            }
        }
        SiteFooter {}
    }
}
