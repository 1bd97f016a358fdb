//! Public landing page: hero plus the property grid.

use api::models::{Property, PropertyStatus};
use api::properties::PropertyQuery;
use dioxus::prelude::*;
use ui::components::Spinner;
use ui::format::{money, percent};
use ui::{use_collection, MediaImage};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

#[component]
pub fn Home() -> Element {
    let mut status_filter = use_signal(|| None::<PropertyStatus>);
    let properties = use_collection(move |client| async move {
        let query = PropertyQuery {
            status: status_filter(),
            ..PropertyQuery::default()
        };
        api::properties::list(&client, &query).await
    });

    let loading = *properties.loading.read();
    let error = properties.error.read().clone();
    let listing = properties.items.read().to_vec();
    let current_filter = status_filter();

    rsx! {
        SiteHeader {}
        main { class: "page",
            section { class: "hero",
                h1 { "Own a fraction. Earn like an owner." }
                p {
                    "Buy fractions of vetted rental properties and share the income "
                    "and the upside, starting from a single fraction."
                }
                Link { class: "btn btn-primary", to: Route::Register {}, "Start investing" }
            }

            section { class: "listing-section",
                div { class: "listing-toolbar",
                    h2 { "Featured properties" }
                    div { class: "filter-group",
                        FilterChip { label: "All", active: current_filter.is_none(),
                            onclick: move |_| status_filter.set(None) }
                        FilterChip { label: "Available",
                            active: current_filter == Some(PropertyStatus::Available),
                            onclick: move |_| status_filter.set(Some(PropertyStatus::Available)) }
                        FilterChip { label: "Sold",
                            active: current_filter == Some(PropertyStatus::Sold),
                            onclick: move |_| status_filter.set(Some(PropertyStatus::Sold)) }
                    }
                }

                if let Some(message) = error {
                    div { class: "error-banner", "{message}" }
                }
                if loading {
                    div { class: "loading-row", Spinner {} }
                } else if listing.is_empty() {
                    p { class: "empty-note", "No properties match this filter yet." }
                } else {
                    div { class: "property-grid",
                        for property in listing {
                            PropertyCard { property }
                        }
                    }
                }
            }
        }
        SiteFooter {}
    }
}

#[component]
fn FilterChip(label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let active_class = if active { "chip-active" } else { "" };
    rsx! {
        button {
            class: "chip {active_class}",
            r#type: "button",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
fn PropertyCard(property: Property) -> Element {
    let cover = property.cover_media().unwrap_or_default().to_string();
    let status_label = property.status.label();
    let status_class = match property.status {
        PropertyStatus::Available => "status-available",
        PropertyStatus::Sold => "status-sold",
        PropertyStatus::Unknown => "status-unknown",
    };
    let fraction_price = money(property.fraction_price);
    let roi = percent(property.expected_roi);
    let sold_pct = property.sold_percentage();
    let progress_style = format!("width: {sold_pct:.0}%");
    let id = property.id.clone();

    rsx! {
        article { class: "property-card",
            Link { to: Route::PropertyDetail { id },
                MediaImage { reference: cover, class: "card-cover", alt: property.title.clone() }
                div { class: "card-body",
                    span { class: "status-chip {status_class}", "{status_label}" }
                    h3 { class: "card-title", "{property.title}" }
                    p { class: "card-location", "{property.location}" }
                    div { class: "card-facts",
                        span { "{property.bedrooms} bd" }
                        span { "{property.bathrooms} ba" }
                        span { "{property.area_sqft} sqft" }
                    }
                    if property.is_fractional {
                        div { class: "card-fraction-row",
                            span { class: "fraction-price", "{fraction_price} / fraction" }
                            span { class: "roi-badge", "{roi} est. ROI" }
                        }
                        div { class: "progress-track",
                            div { class: "progress-fill", style: progress_style }
                        }
                    }
                }
            }
        }
    }
}
