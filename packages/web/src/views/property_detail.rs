//! Property detail: media carousel, the numbers, and the two interest
//! paths (guest contact form vs. authenticated investor interest).

use std::time::Duration;

use api::models::Property;
use api::properties::{ContactRequest, InterestRequest};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label, Spinner, Textarea};
use ui::format::{money, percent};
use ui::{report_error, use_api, use_auth, use_media, use_remote, use_toast};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

const CAROUSEL_INTERVAL: Duration = Duration::from_secs(6);

#[component]
pub fn PropertyDetail(id: String) -> Element {
    let client = use_api();
    let cache = use_media();
    let fetch_id = id.clone();
    let property = use_remote(move |client| {
        let id = fetch_id.clone();
        async move { api::properties::get(&client, &id).await }
    });

    // Resolve the media list once the property arrives.
    let mut slides = use_signal(Vec::<String>::new);
    let data = property.data;
    let _ = use_resource(move || {
        let client = client.clone();
        let cache = cache.clone();
        async move {
            let references = data()
                .map(|property| property.media.clone())
                .unwrap_or_default();
            slides.set(cache.resolve_all(&references, &client).await);
        }
    });

    // Auto-advance; manual selection just changes the index.
    let mut slide_index = use_signal(|| 0usize);
    use_effect(move || {
        spawn(async move {
            loop {
                ui::time::sleep(CAROUSEL_INTERVAL).await;
                let count = slides.read().len();
                if count > 1 {
                    let next = (*slide_index.peek() + 1) % count;
                    slide_index.set(next);
                }
            }
        });
    });

    let loading = *property.loading.read();
    let error = property.error.read().clone();
    let current = property.data.read().clone();

    rsx! {
        SiteHeader {}
        main { class: "page",
            if loading {
                div { class: "loading-row", Spinner {} }
            } else if let Some(message) = error {
                div { class: "error-banner", "{message}" }
            } else if let Some(property) = current {
                PropertyBody { property, slides, slide_index }
            } else {
                p { class: "empty-note", "This listing is no longer available." }
            }
        }
        SiteFooter {}
    }
}

#[component]
fn PropertyBody(
    property: Property,
    slides: Signal<Vec<String>>,
    slide_index: Signal<usize>,
) -> Element {
    let auth = use_auth();
    let authenticated = auth.read().is_authenticated();
    let status_label = property.status.label();
    let fraction_price = money(property.fraction_price);
    let project_value = money(property.project_value);
    let roi = percent(property.expected_roi);
    let urls = slides.read().clone();
    let index = (*slide_index.read()).min(urls.len().saturating_sub(1));
    let current_slide = urls.get(index).cloned();

    rsx! {
        article { class: "detail-layout",
            section { class: "carousel",
                if let Some(url) = current_slide {
                    img { class: "carousel-slide", src: "{url}", alt: "{property.title}" }
                } else {
                    div { class: "carousel-slide media-placeholder" }
                }
                if urls.len() > 1 {
                    div { class: "carousel-dots",
                        for dot in 0..urls.len() {
                            {carousel_dot(slide_index, dot, index == dot)}
                        }
                    }
                }
            }

            section { class: "detail-summary",
                span { class: "status-chip", "{status_label}" }
                h1 { "{property.title}" }
                p { class: "card-location", "{property.location}" }
                div { class: "fact-grid",
                    Fact { label: "Bedrooms", value: property.bedrooms.to_string() }
                    Fact { label: "Bathrooms", value: property.bathrooms.to_string() }
                    Fact { label: "Area", value: format!("{} sqft", property.area_sqft) }
                    Fact { label: "Expected ROI", value: roi }
                    Fact { label: "Project value", value: project_value }
                    if property.is_fractional {
                        Fact { label: "Fraction price", value: fraction_price }
                        Fact {
                            label: "Fractions available",
                            value: format!(
                                "{} of {}",
                                property.fractions_available,
                                property.total_fractions
                            ),
                        }
                    }
                }
                p { class: "detail-description", "{property.description}" }

                if authenticated {
                    InterestForm { property: property.clone() }
                } else {
                    ContactForm { property: property.clone() }
                }
            }
        }
    }
}

fn carousel_dot(mut slide_index: Signal<usize>, dot: usize, active: bool) -> Element {
    let active_class = if active { "dot-active" } else { "" };
    rsx! {
        button {
            key: "{dot}",
            class: "carousel-dot {active_class}",
            r#type: "button",
            aria_label: "Show slide {dot}",
            onclick: move |_| slide_index.set(dot),
        }
    }
}

#[component]
fn Fact(label: String, value: String) -> Element {
    rsx! {
        div { class: "fact",
            span { class: "fact-label", "{label}" }
            span { class: "fact-value", "{value}" }
        }
    }
}

/// Authenticated investors state how many fractions they want.
#[component]
fn InterestForm(property: Property) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut fractions = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut submitted = use_signal(|| false);

    let property_id = property.id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let property_id = property_id.clone();
        spawn(async move {
            error.set(None);
            let wanted = fractions().trim().to_string();
            let parsed = if wanted.is_empty() {
                None
            } else {
                match wanted.parse::<u32>() {
                    Ok(n) if n > 0 => Some(n),
                    _ => {
                        error.set(Some("Enter a whole number of fractions".to_string()));
                        return;
                    }
                }
            };
            let note = message().trim().to_string();
            let request = InterestRequest {
                property_id,
                fractions: parsed,
                message: (!note.is_empty()).then_some(note),
            };

            submitting.set(true);
            match api::properties::express_interest(&client, &request).await {
                Ok(_) => {
                    submitted.set(true);
                    toasts.success("Interest registered. Our team will reach out.");
                }
                Err(err) => error.set(Some(report_error(err, auth))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        form { class: "interest-form", onsubmit: handle_submit,
            h2 { "Express interest" }
            if let Some(message) = error() {
                div { class: "error-banner", "{message}" }
            }
            if submitted() {
                p { class: "success-note", "Thanks! Your interest has been recorded." }
            } else {
                Label { html_for: "fractions", "Fractions (optional)" }
                Input {
                    id: "fractions",
                    r#type: "number",
                    placeholder: "e.g. 5",
                    value: fractions(),
                    oninput: move |evt: FormEvent| fractions.set(evt.value()),
                }
                Label { html_for: "message", "Message (optional)" }
                Textarea {
                    id: "message",
                    placeholder: "Anything we should know?",
                    value: message(),
                    oninput: move |evt: FormEvent| message.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Sending..." } else { "Express interest" }
                }
            }
        }
    }
}

/// Visitors leave their contact details instead.
#[component]
fn ContactForm(property: Property) -> Element {
    let client = use_api();
    let mut toasts = use_toast();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut submitted = use_signal(|| false);

    let property_id = property.id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let property_id = property_id.clone();
        spawn(async move {
            error.set(None);
            let note = message().trim().to_string();
            let request = ContactRequest {
                full_name: full_name().trim().to_string(),
                email: email().trim().to_string(),
                phone: phone().trim().to_string(),
                message: (!note.is_empty()).then_some(note),
                property_id: Some(property_id),
            };
            if let Some(problem) = api::properties::validate_contact(&request) {
                error.set(Some(problem));
                return;
            }

            submitting.set(true);
            match api::properties::send_contact(&client, &request).await {
                Ok(()) => {
                    submitted.set(true);
                    toasts.success("Thanks! We will be in touch shortly.");
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        form { class: "interest-form", onsubmit: handle_submit,
            h2 { "Interested in this property?" }
            p { class: "form-hint",
                "Leave your details and our team will call you back. "
                Link { to: Route::Login { next: String::new() }, "Sign in" }
                " to track your interests instead."
            }
            if let Some(message) = error() {
                div { class: "error-banner", "{message}" }
            }
            if submitted() {
                p { class: "success-note", "Thanks! Your request has been received." }
            } else {
                Input {
                    placeholder: "Full name",
                    value: full_name(),
                    oninput: move |evt: FormEvent| full_name.set(evt.value()),
                }
                Input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                Input {
                    r#type: "tel",
                    placeholder: "Phone",
                    value: phone(),
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
                Textarea {
                    placeholder: "Message (optional)",
                    value: message(),
                    oninput: move |evt: FormEvent| message.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Sending..." } else { "Request a callback" }
                }
            }
        }
    }
}
