//! Updates authoring and comment moderation.
//!
//! The post editor mirrors the property form: validate, save, patch the
//! list from the echo, then upload staged media in the background. The
//! moderation dialog pages through one post's thread with multi-select
//! deletion; the post's comment counter moves by the server-reported
//! count, never by the number of ids requested.

use api::admin::updates::UpdateDraft;
use api::models::{Property, UpdateComment, UpdateItem};
use api::ApiClient;
use dioxus::prelude::*;
use ui::components::{
    Button, ButtonVariant, ConfirmDialog, Input, Label, MediaManager, ModalOverlay, Select,
    Spinner, Textarea,
};
use ui::format::short_date;
use ui::staged::{staged_from_event, upload_staged};
use ui::{
    report_error, use_api, use_auth, use_collection, use_toast, AuthState, Collection, StagedFile,
    Toasts,
};

use super::AdminLayout;

const MODERATION_PAGE_SIZE: u32 = 20;

#[component]
pub fn AdminUpdates() -> Element {
    rsx! {
        AdminLayout { title: "Updates", return_to: "/admin/updates",
            UpdatesPanel {}
        }
    }
}

#[derive(Clone, PartialEq)]
enum Editor {
    Create,
    Edit(UpdateItem),
}

#[component]
fn UpdatesPanel() -> Element {
    let posts = use_collection(|client| async move { api::admin::updates::list(&client).await });
    // Feeds the "pin to property" select in the editor.
    let properties =
        use_collection(|client| async move { api::admin::properties::list(&client).await });
    let mut editing = use_signal(|| None::<Editor>);
    let mut deleting = use_signal(|| None::<UpdateItem>);
    let mut moderating = use_signal(|| None::<UpdateItem>);

    let loading = *posts.loading.read();
    let error = posts.error.read().clone();
    let feed = posts.items.read().to_vec();

    rsx! {
        div { class: "admin-toolbar",
            Button {
                variant: ButtonVariant::Primary,
                onclick: move |_| editing.set(Some(Editor::Create)),
                "New update"
            }
        }
        if let Some(message) = error {
            div { class: "error-banner", "{message}" }
        }
        if loading {
            div { class: "loading-row", Spinner {} }
        } else if feed.is_empty() {
            p { class: "empty-note", "Nothing published yet." }
        } else {
            table { class: "data-table",
                thead {
                    tr {
                        th { "Title" }
                        th { "Property" }
                        th { "Likes" }
                        th { "Comments" }
                        th { "Posted" }
                        th { "" }
                    }
                }
                tbody {
                    for update in feed {
                        {update_row(&update, editing, deleting, moderating)}
                    }
                }
            }
        }
        if let Some(target) = editing() {
            UpdateForm {
                target,
                posts,
                properties,
                on_close: move |_| editing.set(None),
            }
        }
        if let Some(update) = deleting() {
            DeleteUpdateDialog {
                update,
                posts,
                on_close: move |_| deleting.set(None),
            }
        }
        if let Some(update) = moderating() {
            CommentModerationDialog {
                update,
                posts,
                on_close: move |_| moderating.set(None),
            }
        }
    }
}

fn update_row(
    update: &UpdateItem,
    mut editing: Signal<Option<Editor>>,
    mut deleting: Signal<Option<UpdateItem>>,
    mut moderating: Signal<Option<UpdateItem>>,
) -> Element {
    let property = update
        .property_title
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let posted = update
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or("-")
        .to_string();
    let edit_target = update.clone();
    let moderate_target = update.clone();
    let delete_target = update.clone();

    rsx! {
        tr { key: "{update.id}",
            td { "{update.title}" }
            td { "{property}" }
            td { "{update.likes_count}" }
            td { "{update.comments_count}" }
            td { "{posted}" }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| editing.set(Some(Editor::Edit(edit_target.clone()))),
                    "Edit"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| moderating.set(Some(moderate_target.clone())),
                    "Comments"
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

#[component]
fn UpdateForm(
    target: Editor,
    posts: Collection<UpdateItem>,
    properties: Collection<Property>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut posts = posts;

    let existing = match &target {
        Editor::Edit(update) => Some(update.clone()),
        Editor::Create => None,
    };
    let seed = existing
        .as_ref()
        .map(UpdateDraft::from_update)
        .unwrap_or_default();

    let mut title = use_signal({
        let v = seed.title.clone();
        move || v
    });
    let mut content = use_signal({
        let v = seed.content.clone();
        move || v
    });
    let mut property_id = use_signal({
        let v = seed.property_id.clone().unwrap_or_default();
        move || v
    });
    let kept_media = use_signal({
        let v = seed.media.clone();
        move || v
    });
    let mut staged = use_signal(Vec::<StagedFile>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_files = move |evt: FormEvent| {
        spawn(async move {
            let mut picked = staged_from_event(&evt).await;
            staged.write().append(&mut picked);
        });
    };

    let save_existing = existing.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let existing = save_existing.clone();
        spawn(async move {
            let pinned = property_id.peek().clone();
            let draft = UpdateDraft {
                title: title.peek().trim().to_string(),
                content: content.peek().trim().to_string(),
                property_id: if pinned.is_empty() { None } else { Some(pinned) },
                media: kept_media.peek().clone(),
            };
            if let Some(message) = api::admin::updates::validate_draft(&draft) {
                error.set(Some(message));
                return;
            }

            error.set(None);
            saving.set(true);
            let result = match &existing {
                Some(update) => api::admin::updates::update(&client, &update.id, &draft).await,
                None => api::admin::updates::create(&client, &draft).await,
            };
            match result {
                Ok(echoed) => {
                    let saved_id = echoed
                        .as_ref()
                        .map(|u| u.id.clone())
                        .or_else(|| existing.as_ref().map(|u| u.id.clone()));
                    match echoed {
                        Some(update) => {
                            posts.upsert(update);
                        }
                        None => posts.reload(),
                    }
                    toasts.success(if existing.is_some() {
                        "Update saved."
                    } else {
                        "Update published."
                    });

                    let files = staged.peek().clone();
                    if !files.is_empty() {
                        match saved_id {
                            Some(id) => {
                                // Outlives the closing modal on purpose.
                                spawn_forever(attach_media(
                                    client,
                                    auth,
                                    toasts,
                                    posts,
                                    id,
                                    draft.media.clone(),
                                    files,
                                ));
                            }
                            None => toasts.warning(
                                "Saved, but media could not be attached; edit the update to retry.",
                            ),
                        }
                    }
                    on_close.call(());
                }
                Err(err) => {
                    saving.set(false);
                    error.set(Some(report_error(err, auth)));
                }
            }
        });
    };

    let heading = if existing.is_some() {
        "Edit update"
    } else {
        "New update"
    };
    let listings = properties.items.read().to_vec();
    let pinned_value = property_id();

    rsx! {
        ModalOverlay { title: heading, on_close: move |_| on_close.call(()),
            form { class: "admin-form", onsubmit: handle_save,
                if let Some(message) = error() {
                    div { class: "error-banner", "{message}" }
                }

                Label { html_for: "update-title", "Title" }
                Input {
                    id: "update-title",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
                Label { html_for: "update-content", "Content" }
                Textarea {
                    id: "update-content",
                    rows: 8,
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
                Label { html_for: "update-property", "Property" }
                Select {
                    id: "update-property",
                    value: pinned_value,
                    onchange: move |evt: FormEvent| property_id.set(evt.value()),
                    option { value: "", "No property" }
                    for listing in listings {
                        option { value: "{listing.id}", "{listing.title}" }
                    }
                }

                Label { "Media" }
                MediaManager { kept: kept_media, staged, on_pick: handle_files }

                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save update" }
                    }
                }
            }
        }
    }
}

/// Background continuation of a save: upload staged files, then attach
/// whatever stored successfully to the post.
async fn attach_media(
    client: ApiClient,
    auth: Signal<AuthState>,
    mut toasts: Toasts,
    mut posts: Collection<UpdateItem>,
    id: String,
    mut media: Vec<String>,
    files: Vec<StagedFile>,
) {
    let (stored, failed) = upload_staged(&client, &files).await;
    for file in &files {
        file.revoke_preview();
    }
    if !failed.is_empty() {
        toasts.warning_with_detail("Some media could not be uploaded.", failed.join(", "));
    }
    if stored.is_empty() {
        return;
    }
    media.extend(stored);
    match api::admin::updates::set_media(&client, &id, &media).await {
        Ok(Some(update)) => {
            posts.upsert(update);
        }
        Ok(None) => posts.reload(),
        Err(err) => toasts.warning(report_error(err, auth)),
    }
}

#[component]
fn DeleteUpdateDialog(
    update: UpdateItem,
    posts: Collection<UpdateItem>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut posts = posts;
    let mut busy = use_signal(|| false);

    let id = update.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            busy.set(true);
            match api::admin::updates::delete(&client, &id).await {
                Ok(()) => {
                    posts.remove(&id);
                    toasts.success("Update deleted.");
                    on_close.call(());
                }
                Err(err) => {
                    busy.set(false);
                    toasts.error(report_error(err, auth));
                }
            }
        });
    };

    let message = format!("Delete \"{}\"? Comments go with it.", update.title);
    rsx! {
        ConfirmDialog {
            title: "Delete update",
            message,
            confirm_label: "Delete",
            busy: busy(),
            on_confirm: handle_confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

#[component]
fn CommentModerationDialog(
    update: UpdateItem,
    posts: Collection<UpdateItem>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut posts = posts;

    let mut thread = use_signal(Vec::<UpdateComment>::new);
    let mut page = use_signal(|| 1u32);
    let mut exhausted = use_signal(|| false);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut selected = use_signal(Vec::<String>::new);
    let mut confirm = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let update_id = update.id.clone();
    let fetch_client = client.clone();
    let _ = use_resource(move || {
        let client = fetch_client.clone();
        let update_id = update_id.clone();
        async move {
            let current = page();
            loading.set(true);
            match api::updates::comments(&client, &update_id, current, MODERATION_PAGE_SIZE).await {
                Ok(fetched) => {
                    exhausted.set(fetched.items.len() < MODERATION_PAGE_SIZE as usize);
                    if current == 1 {
                        thread.set(fetched.items);
                    } else {
                        thread.write().extend(fetched.items);
                    }
                    error.set(None);
                }
                Err(err) => error.set(Some(report_error(err, auth))),
            }
            loading.set(false);
        }
    });

    let moderated_id = update.id.clone();
    let handle_confirm = move |_| {
        let client = client.clone();
        let update_id = moderated_id.clone();
        let ids = selected.peek().clone();
        spawn(async move {
            busy.set(true);
            match api::admin::updates::delete_comments(&client, &update_id, &ids).await {
                Ok(outcome) => {
                    let confirmed: Vec<String> = ids
                        .iter()
                        .filter(|id| !outcome.missing_ids.contains(id))
                        .cloned()
                        .collect();
                    thread
                        .write()
                        .retain(|comment| !confirmed.contains(&comment.id));
                    selected.write().clear();

                    // Counter moves by what the server deleted, not by
                    // what was asked for.
                    let row = posts.items.peek().get(&update_id).cloned();
                    if let Some(mut row) = row {
                        row.comments_count =
                            row.comments_count.saturating_sub(outcome.deleted_count);
                        posts.upsert(row);
                    }

                    toasts.success(deleted_message(outcome.deleted_count));
                    if outcome.is_partial() {
                        toasts.warning_with_detail(
                            "Some comments were already deleted.",
                            outcome.missing_ids.join(", "),
                        );
                    }
                }
                Err(err) => toasts.error(report_error(err, auth)),
            }
            busy.set(false);
            confirm.set(false);
        });
    };

    let comments = thread.read().clone();
    let selected_count = selected.read().len();

    rsx! {
        ModalOverlay { title: "Moderate comments", on_close: move |_| on_close.call(()),
            div { class: "moderation-head",
                p { class: "dialog-context", "{update.title}" }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: selected_count == 0 || busy(),
                    onclick: move |_| confirm.set(true),
                    "Delete selected ({selected_count})"
                }
            }
            if let Some(message) = error() {
                div { class: "error-banner", "{message}" }
            }
            if comments.is_empty() && !loading() {
                p { class: "empty-note", "No comments on this update." }
            } else {
                ul { class: "moderation-list",
                    for comment in comments {
                        {moderation_row(&comment, selected)}
                    }
                }
            }
            if loading() {
                div { class: "loading-row", Spinner {} }
            } else if !exhausted() {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| {
                        let next = *page.peek() + 1;
                        page.set(next);
                    },
                    "Load more"
                }
            }
        }
        if confirm() {
            ConfirmDialog {
                title: "Delete comments",
                message: format!("Delete {selected_count} selected comments?"),
                confirm_label: "Delete",
                busy: busy(),
                on_confirm: handle_confirm,
                on_cancel: move |_| confirm.set(false),
            }
        }
    }
}

fn moderation_row(comment: &UpdateComment, mut selected: Signal<Vec<String>>) -> Element {
    let author = comment.author_label().to_string();
    let posted = comment
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or_default()
        .to_string();
    let checked = selected.read().contains(&comment.id);
    let check_id = comment.id.clone();

    rsx! {
        li { key: "{comment.id}", class: "moderation-row",
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
            div { class: "moderation-body",
                div { class: "comment-meta",
                    span { class: "comment-author", "{author}" }
                    if !posted.is_empty() {
                        span { class: "comment-date", "{posted}" }
                    }
                }
                p { class: "comment-content", "{comment.content}" }
            }
        }
    }
}

fn deleted_message(count: u64) -> String {
    if count == 1 {
        "Deleted 1 comment.".to_string()
    } else {
        format!("Deleted {count} comments.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_message_handles_singular() {
        assert_eq!(deleted_message(1), "Deleted 1 comment.");
        assert_eq!(deleted_message(3), "Deleted 3 comments.");
    }
}
