//! User administration: role-filtered listing, profile edits, inline role
//! changes, password-reset emails, and account removal.

use api::admin::users::UserEdit;
use api::models::{Role, UserProfile};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ConfirmDialog, Input, Label, ModalOverlay, Select, Spinner};
use ui::format::short_date;
use ui::{report_error, use_api, use_auth, use_collection, use_toast, Collection};

use super::AdminLayout;

#[component]
pub fn AdminUsers() -> Element {
    rsx! {
        AdminLayout { title: "Users", return_to: "/admin/users",
            UsersPanel {}
        }
    }
}

#[component]
fn UsersPanel() -> Element {
    let mut role_filter = use_signal(|| Option::<Role>::None);
    let users = use_collection(move |client| async move {
        api::admin::users::list(&client, role_filter()).await
    });
    let mut editing = use_signal(|| None::<UserProfile>);
    let mut resetting = use_signal(|| None::<UserProfile>);
    let mut deleting = use_signal(|| None::<UserProfile>);
    let role_busy = use_signal(|| Option::<String>::None);

    let loading = *users.loading.read();
    let error = users.error.read().clone();
    let members = users.items.read().to_vec();
    let filter_value = role_filter().map(|role| role.as_str()).unwrap_or("");

    rsx! {
        div { class: "admin-toolbar",
            Label { html_for: "role-filter", "Role" }
            Select {
                id: "role-filter",
                value: filter_value,
                onchange: move |evt: FormEvent| role_filter.set(role_from_value(&evt.value())),
                option { value: "", "All roles" }
                option { value: "ADMIN", "Admin" }
                option { value: "INVESTOR", "Investor" }
                option { value: "PUBLIC", "Public" }
            }
        }
        if let Some(message) = error {
            div { class: "error-banner", "{message}" }
        }
        if loading {
            div { class: "loading-row", Spinner {} }
        } else if members.is_empty() {
            p { class: "empty-note", "No users match this filter." }
        } else {
            table { class: "data-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Email" }
                        th { "Phone" }
                        th { "Role" }
                        th { "Verified" }
                        th { "Joined" }
                        th { "" }
                    }
                }
                tbody {
                    for user in members {
                        {user_row(&user, users, role_busy, editing, resetting, deleting)}
                    }
                }
            }
        }
        if let Some(user) = editing() {
            EditUserDialog { user, users, on_close: move |_| editing.set(None) }
        }
        if let Some(user) = resetting() {
            ResetPasswordDialog { user, on_close: move |_| resetting.set(None) }
        }
        if let Some(user) = deleting() {
            DeleteUserDialog { user, users, on_close: move |_| deleting.set(None) }
        }
    }
}

fn role_from_value(value: &str) -> Option<Role> {
    match value {
        "ADMIN" => Some(Role::Admin),
        "INVESTOR" => Some(Role::Investor),
        "PUBLIC" => Some(Role::Public),
        _ => None,
    }
}

fn user_row(
    user: &UserProfile,
    users: Collection<UserProfile>,
    role_busy: Signal<Option<String>>,
    mut editing: Signal<Option<UserProfile>>,
    mut resetting: Signal<Option<UserProfile>>,
    mut deleting: Signal<Option<UserProfile>>,
) -> Element {
    let name = user.display_name().to_string();
    let phone = user.phone.clone().unwrap_or_else(|| "-".to_string());
    let joined = user
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or("-")
        .to_string();
    let (verified_class, verified_label) = if user.is_verified {
        ("status-chip status-verified", "Verified")
    } else {
        ("status-chip status-pending", "Pending")
    };
    let busy = role_busy.read().as_deref() == Some(user.id.as_str());
    let edit_target = user.clone();
    let reset_target = user.clone();
    let delete_target = user.clone();

    rsx! {
        tr { key: "{user.id}",
            td { "{name}" }
            td { "{user.email}" }
            td { "{phone}" }
            td {
                RoleCell { user: user.clone(), users, role_busy, busy }
            }
            td {
                span { class: "{verified_class}", "{verified_label}" }
            }
            td { "{joined}" }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| editing.set(Some(edit_target.clone())),
                    "Edit"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| resetting.set(Some(reset_target.clone())),
                    "Reset password"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| deleting.set(Some(delete_target.clone())),
                    "Delete"
                }
            }
        }
    }
}

/// Inline role control. A change fires the request immediately; the row is
/// locked until the server answers.
#[component]
fn RoleCell(
    user: UserProfile,
    users: Collection<UserProfile>,
    role_busy: Signal<Option<String>>,
    busy: bool,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut users = users;
    let mut role_busy = role_busy;

    let id = user.id.clone();
    let current = user.role;
    let handle_change = move |evt: FormEvent| {
        let Some(next) = role_from_value(&evt.value()) else {
            return;
        };
        if next == current {
            return;
        }
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            role_busy.set(Some(id.clone()));
            match api::admin::users::set_role(&client, &id, next).await {
                Ok(Some(updated)) => {
                    users.upsert(updated);
                    toasts.success("Role updated.");
                }
                Ok(None) => {
                    users.reload();
                    toasts.success("Role updated.");
                }
                Err(err) => toasts.error(report_error(err, auth)),
            }
            role_busy.set(None);
        });
    };

    rsx! {
        Select {
            class: "role-select",
            value: user.role.as_str(),
            disabled: busy,
            onchange: handle_change,
            option { value: "ADMIN", "Admin" }
            option { value: "INVESTOR", "Investor" }
            option { value: "PUBLIC", "Public" }
        }
    }
}

#[component]
fn EditUserDialog(
    user: UserProfile,
    users: Collection<UserProfile>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut users = users;

    let mut full_name = use_signal({
        let v = user.full_name.clone().unwrap_or_default();
        move || v
    });
    let mut phone = use_signal({
        let v = user.phone.clone().unwrap_or_default();
        move || v
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let id = user.id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            let edit = UserEdit {
                full_name: Some(full_name.peek().trim().to_string()),
                phone: Some(phone.peek().trim().to_string()),
            };
            error.set(None);
            busy.set(true);
            match api::admin::users::update(&client, &id, &edit).await {
                Ok(Some(updated)) => {
                    users.upsert(updated);
                    toasts.success("User updated.");
                    on_close.call(());
                }
                Ok(None) => {
                    users.reload();
                    toasts.success("User updated.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    error.set(Some(report_error(err, auth)));
                }
            }
        });
    };

    rsx! {
        ModalOverlay { title: "Edit user", on_close: move |_| on_close.call(()),
            form { class: "dialog-form", onsubmit: handle_submit,
                p { class: "dialog-context", "{user.email}" }
                Label { html_for: "full-name", "Full name" }
                Input {
                    id: "full-name",
                    value: full_name(),
                    oninput: move |evt: FormEvent| full_name.set(evt.value()),
                }
                Label { html_for: "phone", "Phone" }
                Input {
                    id: "phone",
                    value: phone(),
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "field-error", "{message}" }
                }
                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Saving..." } else { "Save changes" }
                    }
                }
            }
        }
    }
}

#[component]
fn ResetPasswordDialog(user: UserProfile, on_close: EventHandler<()>) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut busy = use_signal(|| false);

    let id = user.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            busy.set(true);
            match api::admin::users::reset_password(&client, &id).await {
                Ok(()) => {
                    toasts.success("Reset email sent.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!("Send a password reset email to {}?", user.email);
    rsx! {
        ConfirmDialog {
            title: "Reset password",
            message,
            confirm_label: "Send reset email",
            destructive: false,
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

#[component]
fn DeleteUserDialog(
    user: UserProfile,
    users: Collection<UserProfile>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut users = users;
    let mut busy = use_signal(|| false);

    let id = user.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            busy.set(true);
            match api::admin::users::delete(&client, &id).await {
                Ok(()) => {
                    users.remove(&id);
                    toasts.success("User deleted.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!(
        "Delete {}? Their account and investment records will be removed.",
        user.email
    );
    rsx! {
        ConfirmDialog {
            title: "Delete user",
            message,
            confirm_label: "Delete",
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_filter_values_map_to_roles() {
        assert_eq!(role_from_value("ADMIN"), Some(Role::Admin));
        assert_eq!(role_from_value("INVESTOR"), Some(Role::Investor));
        assert_eq!(role_from_value("PUBLIC"), Some(Role::Public));
        assert_eq!(role_from_value(""), None);
        assert_eq!(role_from_value("SUPERUSER"), None);
    }
}
