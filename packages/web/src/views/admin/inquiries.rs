//! Interest triage: status-filtered listing, per-row status transitions,
//! and single or bulk deletion with multi-select.
//!
//! Bulk deletion reconciles against the server's outcome: the local list
//! loses exactly the rows the backend confirms deleted, and ids that were
//! already gone are reported in a warning instead of being silently
//! absorbed into the success message.

use api::models::{Inquiry, InterestStatus};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ConfirmDialog, Label, Select, Spinner};
use ui::format::short_date;
use ui::{report_error, use_api, use_auth, use_collection, use_toast, Collection};

use super::AdminLayout;

#[component]
pub fn AdminInquiries() -> Element {
    rsx! {
        AdminLayout { title: "Inquiries", return_to: "/admin/inquiries",
            InquiriesPanel {}
        }
    }
}

#[component]
fn InquiriesPanel() -> Element {
    let mut status_filter = use_signal(|| Option::<InterestStatus>::None);
    let inquiries = use_collection(move |client| async move {
        api::admin::inquiries::list(&client, status_filter()).await
    });
    let mut selected = use_signal(Vec::<String>::new);
    let mut deleting = use_signal(|| None::<Inquiry>);
    let mut bulk_confirm = use_signal(|| false);
    let status_busy = use_signal(|| Option::<String>::None);

    let loading = *inquiries.loading.read();
    let error = inquiries.error.read().clone();
    let rows = inquiries.items.read().to_vec();
    let selected_count = selected.read().len();
    let all_selected = !rows.is_empty() && selected_count == rows.len();
    let filter_value = status_filter().map(|status| status.as_str()).unwrap_or("");

    let all_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let toggle_all = move |evt: FormEvent| {
        if evt.checked() {
            selected.set(all_ids.clone());
        } else {
            selected.write().clear();
        }
    };

    rsx! {
        div { class: "admin-toolbar",
            Label { html_for: "status-filter", "Status" }
            Select {
                id: "status-filter",
                value: filter_value,
                onchange: move |evt: FormEvent| {
                    let value = evt.value();
                    status_filter.set(if value.is_empty() {
                        None
                    } else {
                        Some(InterestStatus::from_str_loose(&value))
                    });
                    selected.write().clear();
                },
                option { value: "", "All statuses" }
                for status in InterestStatus::ALL {
                    option { value: status.as_str(), "{status.label()}" }
                }
            }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: selected_count == 0,
                onclick: move |_| bulk_confirm.set(true),
                "Delete selected ({selected_count})"
            }
        }
        if let Some(message) = error {
            div { class: "error-banner", "{message}" }
        }
        if loading {
            div { class: "loading-row", Spinner {} }
        } else if rows.is_empty() {
            p { class: "empty-note", "No inquiries match this filter." }
        } else {
            table { class: "data-table",
                thead {
                    tr {
                        th {
                            input {
                                r#type: "checkbox",
                                checked: all_selected,
                                onchange: toggle_all,
                            }
                        }
                        th { "Contact" }
                        th { "Property" }
                        th { "Fractions" }
                        th { "Message" }
                        th { "Status" }
                        th { "Received" }
                        th { "" }
                    }
                }
                tbody {
                    for inquiry in rows {
                        {inquiry_row(&inquiry, inquiries, selected, status_busy, deleting)}
                    }
                }
            }
        }
        if let Some(inquiry) = deleting() {
            DeleteInquiryDialog {
                inquiry,
                inquiries,
                selected,
                on_close: move |_| deleting.set(None),
            }
        }
        if bulk_confirm() {
            BulkDeleteDialog {
                inquiries,
                selected,
                on_close: move |_| bulk_confirm.set(false),
            }
        }
    }
}

fn inquiry_row(
    inquiry: &Inquiry,
    inquiries: Collection<Inquiry>,
    mut selected: Signal<Vec<String>>,
    status_busy: Signal<Option<String>>,
    mut deleting: Signal<Option<Inquiry>>,
) -> Element {
    let contact = inquiry.contact_label().to_string();
    let email = inquiry.email.clone().unwrap_or_default();
    let property = inquiry
        .property_title
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let fractions = inquiry
        .fractions
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let message = inquiry.message.clone().unwrap_or_default();
    let received = inquiry
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or("-")
        .to_string();
    let checked = selected.read().contains(&inquiry.id);
    let busy = status_busy.read().as_deref() == Some(inquiry.id.as_str());
    let check_id = inquiry.id.clone();
    let delete_target = inquiry.clone();

    rsx! {
        tr { key: "{inquiry.id}",
            td {
                input {
                    r#type: "checkbox",
                    checked,
                    onchange: move |evt: FormEvent| {
                        let mut picked = selected.write();
                        if evt.checked() {
                            if !picked.contains(&check_id) {
                                picked.push(check_id.clone());
                            }
                        } else {
                            picked.retain(|id| id != &check_id);
                        }
                    },
                }
            }
            td {
                div { class: "cell-contact",
                    span { "{contact}" }
                    if !email.is_empty() && email != contact {
                        span { class: "cell-sub", "{email}" }
                    }
                }
            }
            td { "{property}" }
            td { "{fractions}" }
            td { class: "cell-message", "{message}" }
            td {
                StatusCell { inquiry: inquiry.clone(), inquiries, status_busy, busy }
            }
            td { "{received}" }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| deleting.set(Some(delete_target.clone())),
                    "Delete"
                }
            }
        }
    }
}

/// Inline triage control. The client only requests the transition; the
/// patched row comes back from the server.
#[component]
fn StatusCell(
    inquiry: Inquiry,
    inquiries: Collection<Inquiry>,
    status_busy: Signal<Option<String>>,
    busy: bool,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut inquiries = inquiries;
    let mut status_busy = status_busy;

    let id = inquiry.id.clone();
    let current = inquiry.status;
    let handle_change = move |evt: FormEvent| {
        let next = InterestStatus::from_str_loose(&evt.value());
        if next == InterestStatus::Unknown || next == current {
            return;
        }
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            status_busy.set(Some(id.clone()));
            match api::admin::inquiries::set_status(&client, &id, next).await {
                Ok(Some(updated)) => {
                    inquiries.upsert(updated);
                    toasts.success("Status updated.");
                }
                Ok(None) => {
                    inquiries.reload();
                    toasts.success("Status updated.");
                }
                Err(err) => toasts.error(report_error(err, auth)),
            }
            status_busy.set(None);
        });
    };

    rsx! {
        Select {
            class: "status-select",
            value: inquiry.status.as_str(),
            disabled: busy,
            onchange: handle_change,
            for status in InterestStatus::ALL {
                option { value: status.as_str(), "{status.label()}" }
            }
        }
    }
}

#[component]
fn DeleteInquiryDialog(
    inquiry: Inquiry,
    inquiries: Collection<Inquiry>,
    selected: Signal<Vec<String>>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut inquiries = inquiries;
    let mut selected = selected;
    let mut busy = use_signal(|| false);

    let id = inquiry.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            busy.set(true);
            match api::admin::inquiries::delete(&client, &id).await {
                Ok(()) => {
                    inquiries.remove(&id);
                    selected.write().retain(|picked| picked != &id);
                    toasts.success("Inquiry deleted.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!("Delete the inquiry from {}?", inquiry.contact_label());
    rsx! {
        ConfirmDialog {
            title: "Delete inquiry",
            message,
            confirm_label: "Delete",
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

#[component]
fn BulkDeleteDialog(
    inquiries: Collection<Inquiry>,
    selected: Signal<Vec<String>>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut inquiries = inquiries;
    let mut selected = selected;
    let mut busy = use_signal(|| false);

    let count = selected.read().len();
    let handle_confirm = move |_| {
        let client = client.clone();
        let ids = selected.peek().clone();
        spawn(async move {
            busy.set(true);
            match api::admin::inquiries::delete_many(&client, &ids).await {
                Ok(outcome) => {
                    // Only rows the server confirms deleted leave the list.
                    let confirmed: Vec<String> = ids
                        .iter()
                        .filter(|id| !outcome.missing_ids.contains(id))
                        .cloned()
                        .collect();
                    inquiries.remove_many(&confirmed);
                    selected.write().clear();
                    toasts.success(deleted_message(outcome.deleted_count));
                    if outcome.is_partial() {
                        toasts.warning_with_detail(
                            "Some inquiries were already deleted.",
                            outcome.missing_ids.join(", "),
                        );
                    }
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!("Delete {count} selected inquiries? This cannot be undone.");
    rsx! {
        ConfirmDialog {
            title: "Delete inquiries",
            message,
            confirm_label: "Delete all selected",
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

fn deleted_message(count: u64) -> String {
    if count == 1 {
        "Deleted 1 inquiry.".to_string()
    } else {
        format!("Deleted {count} inquiries.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_message_handles_singular() {
        assert_eq!(deleted_message(0), "Deleted 0 inquiries.");
        assert_eq!(deleted_message(1), "Deleted 1 inquiry.");
        assert_eq!(deleted_message(4), "Deleted 4 inquiries.");
    }
}
