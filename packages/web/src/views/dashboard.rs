//! Investor dashboard: every interest this account has expressed, with
//! its triage status.

use api::models::Inquiry;
use dioxus::prelude::*;
use ui::components::Spinner;
use ui::format::short_date;
use ui::{use_auth, use_collection, RequireAuth};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        RequireAuth { return_to: "/dashboard".to_string(), DashboardBody {} }
    }
}

#[component]
fn DashboardBody() -> Element {
    let auth = use_auth();
    let interests =
        use_collection(|client| async move { api::properties::my_interests(&client).await });

    let greeting = auth
        .read()
        .user
        .as_ref()
        .map(|user| user.display_name().to_string())
        .unwrap_or_else(|| "Investor".to_string());
    let loading = *interests.loading.read();
    let error = interests.error.read().clone();
    let rows = interests.items.read().to_vec();

    rsx! {
        SiteHeader {}
        main { class: "page",
            section { class: "page-intro",
                h1 { "Welcome, {greeting}" }
                p { "Track the properties you have expressed interest in." }
            }
            if let Some(message) = error {
                div { class: "error-banner", "{message}" }
            }
            if loading {
                div { class: "loading-row", Spinner {} }
            } else if rows.is_empty() {
                div { class: "empty-state",
                    p { "You have not expressed interest in any property yet." }
                    Link { class: "btn btn-primary", to: Route::Home {}, "Browse properties" }
                }
            } else {
                table { class: "data-table",
                    thead {
                        tr {
                            th { "Property" }
                            th { "Fractions" }
                            th { "Status" }
                            th { "Date" }
                        }
                    }
                    tbody {
                        for interest in rows {
                            {interest_row(&interest)}
                        }
                    }
                }
            }
        }
        SiteFooter {}
    }
}

fn interest_row(interest: &Inquiry) -> Element {
    let title = interest
        .property_title
        .clone()
        .unwrap_or_else(|| "(unknown property)".to_string());
    let fractions = interest
        .fractions
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = interest.status.label();
    let slug = interest.status.as_str().to_lowercase();
    let date = interest.created_at.as_deref().map(short_date).unwrap_or_default();
    rsx! {
        tr { key: "{interest.id}",
            td { "{title}" }
            td { "{fractions}" }
            td {
                span { class: "status-chip status-{slug}", "{status}" }
            }
            td { "{date}" }
        }
    }
}
