//! Media display backed by the shared resolution cache.

use dioxus::prelude::*;

use crate::auth::{use_api, use_media};

/// An image whose `src` is a media reference: direct URLs render
/// immediately, storage keys resolve through the presign endpoint first.
#[component]
pub fn MediaImage(
    reference: ReadOnlySignal<String>,
    #[props(default)] class: String,
    #[props(default)] alt: String,
) -> Element {
    let client = use_api();
    let cache = use_media();
    let mut src = use_signal(|| None::<String>);

    let _ = use_resource(move || {
        let client = client.clone();
        let cache = cache.clone();
        async move {
            let key = reference();
            if key.is_empty() {
                src.set(None);
                return;
            }
            match cache.resolve_one(&key, &client).await {
                Some(url) => src.set(Some(url)),
                None => {
                    tracing::debug!(reference = %key, "media reference did not resolve");
                    src.set(None);
                }
            }
        }
    });

    match src() {
        Some(url) => rsx! {
            img { class: "media-image {class}", src: "{url}", alt: "{alt}" }
        },
        None => rsx! {
            div { class: "media-image media-placeholder {class}" }
        },
    }
}
