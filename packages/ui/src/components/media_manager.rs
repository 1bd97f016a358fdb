use dioxus::prelude::*;

use crate::staged::StagedFile;

/// Media editor for entity forms: chips for already-attached references,
/// previews for locally staged files, and the picker input. Removal is
/// immediate and local; nothing touches the network until the form saves.
#[component]
pub fn MediaManager(
    kept: Signal<Vec<String>>,
    staged: Signal<Vec<StagedFile>>,
    on_pick: EventHandler<FormEvent>,
) -> Element {
    let references = kept.read().clone();
    let previews = staged.read().clone();

    rsx! {
        div { class: "media-manager",
            for (idx, reference) in references.iter().enumerate() {
                {kept_chip(kept, idx, reference)}
            }
            for (idx, file) in previews.iter().enumerate() {
                {staged_chip(staged, idx, file)}
            }
        }
        input {
            r#type: "file",
            multiple: true,
            accept: "image/*,video/*",
            onchange: move |evt| on_pick.call(evt),
        }
    }
}

fn kept_chip(mut kept: Signal<Vec<String>>, idx: usize, reference: &str) -> Element {
    let short = reference.rsplit('/').next().unwrap_or(reference).to_string();
    rsx! {
        span { key: "{reference}", class: "media-chip",
            "{short}"
            button {
                r#type: "button",
                class: "chip-remove",
                onclick: move |_| {
                    kept.write().remove(idx);
                },
                "\u{00d7}"
            }
        }
    }
}

fn staged_chip(mut staged: Signal<Vec<StagedFile>>, idx: usize, file: &StagedFile) -> Element {
    let name = file.name.clone();
    let preview = file.preview_url.clone();
    let is_video = file.is_video();
    rsx! {
        span { key: "{name}", class: "media-chip media-chip-staged",
            if let Some(url) = preview {
                if is_video {
                    span { class: "chip-video-tag", "video" }
                } else {
                    img { class: "chip-preview", src: "{url}" }
                }
            }
            "{name}"
            button {
                r#type: "button",
                class: "chip-remove",
                onclick: move |_| {
                    let removed = staged.write().remove(idx);
                    removed.revoke_preview();
                },
                "\u{00d7}"
            }
        }
    }
}
