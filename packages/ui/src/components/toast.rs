//! Transient notifications.
//!
//! Mutation coordinators report outcomes here: success confirmations,
//! transport errors, and the qualified-success case where a bulk delete
//! came back with missing ids (a success toast plus a warning listing
//! what was already gone).

use std::time::Duration;

use dioxus::prelude::*;

use crate::time::sleep;

const DEFAULT_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    id: u64,
    kind: ToastKind,
    message: String,
    detail: Option<String>,
}

/// Handle for pushing notifications. Copy, so handlers can capture it.
#[derive(Clone, Copy)]
pub struct Toasts {
    entries: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into(), None);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into(), None);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into(), None);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into(), None);
    }

    /// Warning with a second line, e.g. the missing ids of a partial
    /// bulk delete.
    pub fn warning_with_detail(&mut self, message: impl Into<String>, detail: impl Into<String>) {
        self.push(ToastKind::Warning, message.into(), Some(detail.into()));
    }

    fn push(&mut self, kind: ToastKind, message: String, detail: Option<String>) {
        let id = {
            let mut next = self.next_id.write();
            *next += 1;
            *next
        };
        self.entries.write().push(ToastEntry {
            id,
            kind,
            message,
            detail,
        });

        let mut entries = self.entries;
        spawn(async move {
            sleep(DEFAULT_DURATION).await;
            entries.write().retain(|entry| entry.id != id);
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.write().retain(|entry| entry.id != id);
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provides the toast context and renders the stack overlay.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let entries = use_signal(Vec::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toasts { entries, next_id });

    rsx! {
        {children}
        ToastHost {}
    }
}

#[component]
fn ToastHost() -> Element {
    let toasts = use_toast();
    let entries = toasts.entries.read().clone();

    rsx! {
        div { class: "toast-stack",
            for entry in entries {
                {toast_card(toasts, entry)}
            }
        }
    }
}

fn toast_card(mut toasts: Toasts, entry: ToastEntry) -> Element {
    let id = entry.id;
    let kind_class = entry.kind.class();
    let message = entry.message;
    let has_detail = entry.detail.is_some();
    let detail = entry.detail.unwrap_or_default();

    rsx! {
        div { key: "{id}", class: "toast {kind_class}",
            div { class: "toast-text",
                span { class: "toast-message", "{message}" }
                if has_detail {
                    span { class: "toast-detail", "{detail}" }
                }
            }
            button {
                class: "toast-close",
                r#type: "button",
                onclick: move |_| toasts.dismiss(id),
                "\u{00d7}"
            }
        }
    }
}
