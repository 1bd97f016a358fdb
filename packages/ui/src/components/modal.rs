use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};

/// Dialog shell. Clicking the backdrop or the close control calls
/// `on_close`; clicks inside the panel stay inside.
#[component]
pub fn ModalOverlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div {
                class: "modal-panel",
                onclick: move |evt| evt.stop_propagation(),
                header { class: "modal-header",
                    h3 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "\u{00d7}"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

/// Explicit confirm step in front of destructive requests. Nothing is
/// deleted until the user clicks through this.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default = true)] destructive: bool,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let confirm_variant = if destructive {
        ButtonVariant::Destructive
    } else {
        ButtonVariant::Primary
    };
    rsx! {
        ModalOverlay { title, on_close: move |_| on_cancel.call(()),
            p { class: "confirm-message", "{message}" }
            div { class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: confirm_variant,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Working..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
