//! Back-office screens. Everything here sits behind the admin role gate
//! and shares the sidebar layout.

use api::models::Role;
use dioxus::prelude::*;
use ui::auth::LogoutButton;
use ui::RequireAuth;

use crate::Route;

mod inquiries;
mod investments;
mod overview;
mod properties;
mod updates;
mod users;

pub use inquiries::AdminInquiries;
pub use investments::AdminInvestments;
pub use overview::AdminHome;
pub use properties::AdminProperties;
pub use updates::AdminUpdates;
pub use users::AdminUsers;

#[component]
pub fn AdminLayout(title: String, return_to: String, children: Element) -> Element {
    rsx! {
        RequireAuth { role: Role::Admin, return_to,
            div { class: "admin-layout",
                aside { class: "admin-sidebar",
                    Link { class: "admin-brand", to: Route::Home {}, "HomeStake" }
                    nav { class: "admin-nav",
                        Link { to: Route::AdminHome {}, active_class: "active", "Overview" }
                        Link { to: Route::AdminProperties {}, active_class: "active", "Properties" }
                        Link { to: Route::AdminInvestments {}, active_class: "active", "Investments" }
                        Link { to: Route::AdminUsers {}, active_class: "active", "Users" }
                        Link { to: Route::AdminInquiries {}, active_class: "active", "Inquiries" }
                        Link { to: Route::AdminUpdates {}, active_class: "active", "Updates" }
                    }
                    LogoutButton { class: "admin-logout" }
                }
                section { class: "admin-content",
                    header { class: "admin-header",
                        h1 { "{title}" }
                    }
                    {children}
                }
            }
        }
    }
}
