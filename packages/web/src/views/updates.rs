//! Public updates feed. Anyone can read; liking and commenting need an
//! account. Like toggles and new comments patch the cached feed row with
//! whatever the server confirmed instead of re-fetching the page.

use api::models::{UpdateComment, UpdateItem};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Spinner, Textarea};
use ui::format::short_date;
use ui::{report_error, use_api, use_auth, use_collection, use_toast, Collection, MediaImage};

use super::shell::{SiteFooter, SiteHeader};
use crate::Route;

const COMMENTS_PAGE_SIZE: u32 = 10;

#[component]
pub fn Updates() -> Element {
    let feed = use_collection(|client| async move { api::updates::list(&client, None, None).await });

    let loading = *feed.loading.read();
    let error = feed.error.read().clone();
    let posts = feed.items.read().to_vec();

    rsx! {
        SiteHeader {}
        main { class: "page",
            section { class: "page-intro",
                h1 { "Updates" }
                p { "Construction progress, valuations, and announcements from our projects." }
            }
            if let Some(message) = error {
                div { class: "error-banner", "{message}" }
            }
            if loading {
                div { class: "loading-row", Spinner {} }
            } else if posts.is_empty() {
                p { class: "empty-note", "No updates published yet." }
            } else {
                div { class: "feed",
                    for post in posts {
                        UpdateCard { key: "{post.id}", update: post, feed }
                    }
                }
            }
        }
        SiteFooter {}
    }
}

#[component]
fn UpdateCard(update: UpdateItem, feed: Collection<UpdateItem>) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut feed = feed;
    let mut liking = use_signal(|| false);
    let mut comments_open = use_signal(|| false);

    let authenticated = auth.read().is_authenticated();
    let posted = update
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or_default()
        .to_string();
    let cover = update.media.first().cloned();
    let property_tag = update.property_title.clone();
    let like_class = if update.liked_by_me {
        "like-btn like-active"
    } else {
        "like-btn"
    };

    let like_id = update.id.clone();
    let handle_like = move |_| {
        if !authenticated {
            toasts.info("Sign in to like updates.");
            return;
        }
        if *liking.peek() {
            return;
        }
        let client = client.clone();
        let id = like_id.clone();
        spawn(async move {
            liking.set(true);
            match api::updates::toggle_like(&client, &id).await {
                Ok(confirmed) => {
                    let cached = feed.items.peek().get(&id).cloned();
                    if let Some(mut row) = cached {
                        let liked_now = confirmed.liked.unwrap_or(!row.liked_by_me);
                        row.likes_count = match confirmed.likes_count {
                            Some(count) => count,
                            None if liked_now => row.likes_count + 1,
                            None => row.likes_count.saturating_sub(1),
                        };
                        row.liked_by_me = liked_now;
                        feed.upsert(row);
                    }
                }
                Err(err) => toasts.error(report_error(err, auth)),
            }
            liking.set(false);
        });
    };

    rsx! {
        article { class: "update-card",
            header { class: "update-head",
                h2 { "{update.title}" }
                if let Some(tag) = property_tag {
                    span { class: "update-tag", "{tag}" }
                }
                span { class: "update-date", "{posted}" }
            }
            if let Some(reference) = cover {
                MediaImage { class: "update-cover", reference, alt: update.title.clone() }
            }
            p { class: "update-body", "{update.content}" }
            footer { class: "update-actions",
                button { class: "{like_class}", r#type: "button", onclick: handle_like,
                    "{update.likes_count} likes"
                }
                button {
                    class: "comments-toggle",
                    r#type: "button",
                    onclick: move |_| {
                        let open = *comments_open.peek();
                        comments_open.set(!open);
                    },
                    "{update.comments_count} comments"
                }
            }
            if comments_open() {
                CommentsPanel { update_id: update.id.clone(), feed }
            }
        }
    }
}

/// One post's thread, paginated independently of the feed.
#[component]
fn CommentsPanel(update_id: String, feed: Collection<UpdateItem>) -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut toasts = use_toast();
    let mut feed = feed;
    let mut thread = use_signal(Vec::<UpdateComment>::new);
    let mut page = use_signal(|| 1u32);
    let mut refresh = use_signal(|| 0u32);
    let mut exhausted = use_signal(|| false);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut draft = use_signal(String::new);
    let mut posting = use_signal(|| false);

    let authenticated = auth.read().is_authenticated();

    let fetch_client = client.clone();
    let fetch_id = update_id.clone();
    let _ = use_resource(move || {
        let client = fetch_client.clone();
        let id = fetch_id.clone();
        async move {
            let wanted = page();
            let _tick = refresh();
            loading.set(true);
            match api::updates::comments(&client, &id, wanted, COMMENTS_PAGE_SIZE).await {
                Ok(fetched) => {
                    exhausted.set(fetched.items.len() < COMMENTS_PAGE_SIZE as usize);
                    if wanted == 1 {
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

    let post_id = update_id.clone();
    let handle_post = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let id = post_id.clone();
        spawn(async move {
            let content = draft.peek().trim().to_string();
            if content.is_empty() {
                return;
            }
            posting.set(true);
            match api::updates::post_comment(&client, &id, &content).await {
                Ok(created) => {
                    draft.set(String::new());
                    match created {
                        Some(comment) => thread.write().insert(0, comment),
                        None => {
                            // No echo; pull the thread again from the top.
                            page.set(1);
                            let next = refresh.peek().wrapping_add(1);
                            refresh.set(next);
                        }
                    }
                    let cached = feed.items.peek().get(&id).cloned();
                    if let Some(mut row) = cached {
                        row.comments_count += 1;
                        feed.upsert(row);
                    }
                }
                Err(err) => toasts.error(report_error(err, auth)),
            }
            posting.set(false);
        });
    };

    let comments = thread.read().clone();

    rsx! {
        section { class: "comments-panel",
            if let Some(message) = error() {
                div { class: "error-banner", "{message}" }
            }
            if authenticated {
                form { class: "comment-composer", onsubmit: handle_post,
                    Textarea {
                        placeholder: "Add a comment",
                        rows: 2,
                        value: draft(),
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: posting(),
                        if posting() { "Posting..." } else { "Comment" }
                    }
                }
            } else {
                p { class: "form-hint",
                    Link { to: Route::Login { next: "/updates".to_string() }, "Sign in" }
                    " to join the discussion."
                }
            }
            if comments.is_empty() && !loading() {
                p { class: "empty-note", "No comments yet." }
            }
            ul { class: "comment-list",
                for comment in comments {
                    {comment_row(&comment)}
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
                    "Load more comments"
                }
            }
        }
    }
}

fn comment_row(comment: &UpdateComment) -> Element {
    let author = comment.author_label();
    let posted = comment
        .created_at
        .as_deref()
        .map(short_date)
        .unwrap_or_default();
    rsx! {
        li { key: "{comment.id}", class: "comment-row",
            div { class: "comment-meta",
                span { class: "comment-author", "{author}" }
                span { class: "comment-date", "{posted}" }
            }
            p { class: "comment-content", "{comment.content}" }
        }
    }
}
