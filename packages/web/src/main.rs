use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::admin::{
    AdminHome, AdminInquiries, AdminInvestments, AdminProperties, AdminUpdates, AdminUsers,
};
use views::{
    Dashboard, ForgotPassword, Home, Login, PropertyDetail, Register, ResetPassword, Updates,
    VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/properties/:id")]
    PropertyDetail { id: String },
    #[route("/updates")]
    Updates {},
    #[route("/auth/login?:next")]
    Login { next: String },
    #[route("/auth/register")]
    Register {},
    #[route("/auth/verify?:email")]
    VerifyEmail { email: String },
    #[route("/auth/forgot-password")]
    ForgotPassword {},
    #[route("/auth/reset-password?:email")]
    ResetPassword { email: String },
    #[route("/dashboard")]
    Dashboard {},
    #[route("/admin")]
    AdminHome {},
    #[route("/admin/properties")]
    AdminProperties {},
    #[route("/admin/investments")]
    AdminInvestments {},
    #[route("/admin/users")]
    AdminUsers {},
    #[route("/admin/inquiries")]
    AdminInquiries {},
    #[route("/admin/updates")]
    AdminUpdates {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
