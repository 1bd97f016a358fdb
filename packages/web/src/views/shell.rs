//! Site chrome shared by the public and investor pages.

use dioxus::prelude::*;
use ui::auth::LogoutButton;
use ui::use_auth;

use crate::Route;

/// Top navigation. Shows sign-in/sign-up for visitors, dashboard and
/// sign-out for members, and the back-office link for admins.
#[component]
pub fn SiteHeader() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        header { class: "site-header",
            Link { class: "brand", to: Route::Home {}, "HomeStake" }
            nav { class: "site-nav",
                Link { class: "nav-link", to: Route::Home {}, "Properties" }
                Link { class: "nav-link", to: Route::Updates {}, "Updates" }
                if state.is_authenticated() {
                    Link { class: "nav-link", to: Route::Dashboard {}, "Dashboard" }
                }
                if state.is_admin() {
                    Link { class: "nav-link", to: Route::AdminHome {}, "Back office" }
                }
            }
            div { class: "site-actions",
                if state.is_authenticated() {
                    LogoutButton { class: "btn btn-ghost" }
                } else {
                    Link { class: "btn btn-ghost", to: Route::Login { next: String::new() }, "Sign in" }
                    Link { class: "btn btn-primary", to: Route::Register {}, "Get started" }
                }
            }
        }
    }
}

#[component]
pub fn SiteFooter() -> Element {
    rsx! {
        footer { class: "site-footer",
            p { "HomeStake. Fractional real-estate investing." }
        }
    }
}
