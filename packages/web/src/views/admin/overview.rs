//! Back-office landing page: one card per section.

use dioxus::prelude::*;

use super::AdminLayout;
use crate::Route;

#[component]
pub fn AdminHome() -> Element {
    rsx! {
        AdminLayout { title: "Back office", return_to: "/admin",
            p { class: "admin-lede",
                "Manage listings, investors, and content from one place."
            }
            div { class: "admin-cards",
                AdminCard {
                    to: Route::AdminProperties {},
                    title: "Properties",
                    blurb: "Create and edit listings, attach media, mark units sold.",
                }
                AdminCard {
                    to: Route::AdminInvestments {},
                    title: "Investments",
                    blurb: "Adjust valuations and reduce fraction holdings.",
                }
                AdminCard {
                    to: Route::AdminUsers {},
                    title: "Users",
                    blurb: "Edit profiles, change roles, trigger password resets.",
                }
                AdminCard {
                    to: Route::AdminInquiries {},
                    title: "Inquiries",
                    blurb: "Triage expressed interest and contact requests.",
                }
                AdminCard {
                    to: Route::AdminUpdates {},
                    title: "Updates",
                    blurb: "Publish progress posts and moderate comments.",
                }
            }
        }
    }
}

#[component]
fn AdminCard(to: Route, title: String, blurb: String) -> Element {
    rsx! {
        Link { class: "admin-card", to,
            h2 { "{title}" }
            p { "{blurb}" }
        }
    }
}
