use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(default)] class: String) -> Element {
    rsx! {
        div { class: "spinner {class}", role: "status", aria_label: "Loading" }
    }
}
