//! Locally staged media files.
//!
//! Files picked in a form are held in memory with a revocable object-URL
//! preview until the primary save succeeds; only then are they uploaded,
//! as background work whose failure must not roll back the save.

use api::ApiClient;
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Object URL for the preview thumbnail; web only, revoked on unstage.
    pub preview_url: Option<String>,
}

impl StagedFile {
    pub fn new(name: String, bytes: Vec<u8>) -> Self {
        let content_type = guess_content_type(&name).to_string();
        let preview_url = make_preview_url(&bytes, &content_type);
        Self {
            name,
            content_type,
            bytes,
            preview_url,
        }
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }

    /// Releases the preview object URL. Call when unstaging or after the
    /// staged list is discarded.
    pub fn revoke_preview(&self) {
        if let Some(url) = &self.preview_url {
            revoke_object_url(url);
        }
    }
}

/// Content type from the file extension; storage presigning needs one
/// before the browser-provided type is available.
pub fn guess_content_type(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Reads every file attached to a form event into staged entries.
pub async fn staged_from_event(evt: &FormEvent) -> Vec<StagedFile> {
    let Some(engine) = evt.files() else {
        return Vec::new();
    };
    let mut staged = Vec::new();
    for name in engine.files() {
        match engine.read_file(&name).await {
            Some(bytes) => staged.push(StagedFile::new(name, bytes)),
            None => tracing::warn!(%name, "could not read picked file"),
        }
    }
    staged
}

/// Uploads staged files one by one. Returns the stored references and the
/// names that failed; failures are reported, never fatal.
pub async fn upload_staged(
    client: &ApiClient,
    staged: &[StagedFile],
) -> (Vec<String>, Vec<String>) {
    let mut stored = Vec::new();
    let mut failed = Vec::new();
    for file in staged {
        match api::uploads::upload_media(client, &file.name, &file.content_type, file.bytes.clone())
            .await
        {
            Ok(reference) => stored.push(reference),
            Err(err) => {
                tracing::warn!(%err, name = %file.name, "media upload failed");
                failed.push(file.name.clone());
            }
        }
    }
    (stored, failed)
}

#[cfg(target_arch = "wasm32")]
fn make_preview_url(bytes: &[u8], content_type: &str) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    let blob =
        web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn make_preview_url(_bytes: &[u8], _content_type: &str) -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

#[cfg(not(target_arch = "wasm32"))]
fn revoke_object_url(_url: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_guessed_from_extension() {
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("walkthrough.mp4"), "video/mp4");
        assert_eq!(guess_content_type("plan"), "application/octet-stream");
        assert_eq!(guess_content_type("archive.tar.gz"), "application/octet-stream");
    }

    #[test]
    fn staged_file_classifies_video() {
        let image = StagedFile::new("a.png".into(), vec![1, 2, 3]);
        assert!(!image.is_video());
        assert_eq!(image.content_type, "image/png");

        let video = StagedFile::new("b.webm".into(), vec![1]);
        assert!(video.is_video());
    }
}
