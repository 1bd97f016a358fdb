//! OTP email verification. The resend cooldown is read back from storage
//! every second, so it survives reloads and navigation.

use std::time::Duration;

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_api, use_toast};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn VerifyEmail(email: String) -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut toasts = use_toast();
    let mut address = use_signal({
        let seed = email.clone();
        move || seed
    });
    let mut otp = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut verifying = use_signal(|| false);
    let mut resending = use_signal(|| false);
    let mut remaining = use_signal(|| 0u64);

    // Tick the persisted cooldown down once a second.
    use_effect(move || {
        spawn(async move {
            loop {
                let current = address.peek().trim().to_string();
                remaining.set(api::auth::resend_cooldown_remaining(&current));
                ui::time::sleep(Duration::from_secs(1)).await;
            }
        });
    });

    let verify_client = client.clone();
    let handle_verify = move |evt: FormEvent| {
        evt.prevent_default();
        let client = verify_client.clone();
        spawn(async move {
            let current = address.peek().trim().to_string();
            let code = otp.peek().trim().to_string();
            if current.is_empty() {
                error.set(Some("Enter your email address".to_string()));
                return;
            }
            if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
                error.set(Some("Enter the 6-digit code".to_string()));
                return;
            }
            error.set(None);
            verifying.set(true);
            match api::auth::verify_email(&client, &current, &code).await {
                Ok(()) => {
                    toasts.success("Email verified. You can sign in now.");
                    nav.push(Route::Login { next: String::new() });
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            verifying.set(false);
        });
    };

    let handle_resend = move |_| {
        let client = client.clone();
        spawn(async move {
            let current = address.peek().trim().to_string();
            if current.is_empty() {
                error.set(Some("Enter your email address".to_string()));
                return;
            }
            resending.set(true);
            match api::auth::resend_otp(&client, &current).await {
                Ok(()) => {
                    toasts.success("A new code is on its way.");
                    remaining.set(api::auth::resend_cooldown_remaining(&current));
                }
                Err(err) => toasts.error(err.to_string()),
            }
            resending.set(false);
        });
    };

    let seconds = remaining();
    let resend_label = if seconds > 0 {
        format!("Resend code ({seconds}s)")
    } else {
        "Resend code".to_string()
    };

    rsx! {
        SiteHeader {}
        main { class: "page auth-page",
            div { class: "auth-card",
                h1 { "Check your inbox" }
                p { class: "auth-subtitle",
                    "We sent a 6-digit verification code to your email."
                }

                form { class: "auth-form", onsubmit: handle_verify,
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
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: verifying(),
                        if verifying() { "Verifying..." } else { "Verify email" }
                    }
                }

                Button {
                    variant: ButtonVariant::Ghost,
                    disabled: seconds > 0 || resending(),
                    onclick: handle_resend,
                    "{resend_label}"
                }
            }
        }
        SiteFooter {}
    }
}
