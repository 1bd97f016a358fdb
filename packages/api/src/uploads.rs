//! # Media uploads
//!
//! One presign contract for everything: ask the backend for a signed
//! upload target, then move the bytes directly to storage. Small files go
//! up in a single PUT; anything over [`CHUNK_THRESHOLD_BYTES`] is streamed
//! in `Content-Range` chunks tagged with a shared upload id, and the final
//! chunk's response names the stored object.
//!
//! These transfers talk to the storage host, not the backend, so they
//! bypass the 401 session interception on purpose: an expired storage
//! signature is an upload failure, not a sign-out.

use std::collections::HashMap;
use std::future::Future;

use serde::Deserialize;
use serde_json::{json, Value};
use store::MediaResolver;

use crate::client::ApiClient;
use crate::decode::decode_item;
use crate::error::ApiError;
use crate::storage;

/// Files at or below this size go up in one request.
pub const CHUNK_THRESHOLD_BYTES: usize = 10 * 1024 * 1024;
/// Chunk size for large transfers.
pub const CHUNK_SIZE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub file_key: String,
    /// Extra headers the signature was computed over; sent verbatim.
    #[serde(default)]
    pub upload_headers: HashMap<String, String>,
}

pub async fn presign_upload(
    client: &ApiClient,
    filename: &str,
    content_type: &str,
) -> Result<PresignedUpload, ApiError> {
    let value = client
        .post(
            "/files/presign-upload",
            &json!({ "filename": filename, "content_type": content_type }),
        )
        .await?;
    decode_item(value, &[])
}

/// Signed, short-lived download URL for a stored object key.
pub async fn presign_download(client: &ApiClient, file_key: &str) -> Result<String, ApiError> {
    let value = client
        .post("/files/presign-download", &json!({ "file_key": file_key }))
        .await?;
    ["download_url", "url"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| ApiError::Decode("presign response carried no URL".to_string()))
}

/// Splits `total` bytes into `(start, end_exclusive)` spans of at most
/// `chunk_size`. Empty input yields no spans.
pub fn chunk_spans(total: usize, chunk_size: usize) -> Vec<(usize, usize)> {
    if total == 0 || chunk_size == 0 {
        return Vec::new();
    }
    let mut spans = Vec::with_capacity(total.div_ceil(chunk_size));
    let mut start = 0;
    while start < total {
        let end = usize::min(start + chunk_size, total);
        spans.push((start, end));
        start = end;
    }
    spans
}

/// `Content-Range` header value for one span (inclusive end, per RFC 7233).
pub fn content_range(start: usize, end_exclusive: usize, total: usize) -> String {
    format!("bytes {}-{}/{}", start, end_exclusive - 1, total)
}

/// Picks the stored reference out of a storage response, falling back to
/// the presigned key when the body names nothing usable.
fn stored_reference(value: &Value, file_key: &str) -> String {
    ["url", "file_url", "location"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| file_key.to_string())
}

async fn send_to_storage(
    client: &ApiClient,
    presigned: &PresignedUpload,
    content_type: &str,
    extra: &[(&str, String)],
    bytes: Vec<u8>,
) -> Result<Value, ApiError> {
    let mut request = client
        .raw()
        .put(&presigned.upload_url)
        .header("Content-Type", content_type);
    for (name, value) in &presigned.upload_headers {
        request = request.header(name, value);
    }
    for (name, value) in extra {
        request = request.header(*name, value);
    }
    let response = request
        .body(bytes)
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    crate::client::read_body(status, &body)
}

/// Transfers bytes to an already-presigned target and returns the stored
/// reference to attach to the owning entity.
pub async fn upload_bytes(
    client: &ApiClient,
    presigned: &PresignedUpload,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let total = bytes.len();
    if total <= CHUNK_THRESHOLD_BYTES {
        let value = send_to_storage(client, presigned, content_type, &[], bytes).await?;
        return Ok(stored_reference(&value, &presigned.file_key));
    }

    let upload_id = format!("{}-{}", presigned.file_key, storage::now_millis());
    let mut last = Value::Null;
    for (start, end) in chunk_spans(total, CHUNK_SIZE_BYTES) {
        let headers = [
            ("Content-Range", content_range(start, end, total)),
            ("X-Upload-Id", upload_id.clone()),
        ];
        last = send_to_storage(
            client,
            presigned,
            content_type,
            &headers,
            bytes[start..end].to_vec(),
        )
        .await?;
    }
    Ok(stored_reference(&last, &presigned.file_key))
}

/// Presign-then-transfer in one call; returns the stored reference.
pub async fn upload_media(
    client: &ApiClient,
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let presigned = presign_upload(client, filename, content_type).await?;
    upload_bytes(client, &presigned, content_type, bytes).await
}

/// Opaque storage keys resolve through the presign-download endpoint, so
/// the media cache can hand out displayable URLs for bucket objects.
impl MediaResolver for ApiClient {
    fn resolve(&self, key: &str) -> impl Future<Output = Result<String, String>> {
        async move {
            presign_download(self, key)
                .await
                .map_err(|err| err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spans_cover_the_file_exactly_once() {
        assert_eq!(chunk_spans(0, 5), vec![]);
        assert_eq!(chunk_spans(4, 5), vec![(0, 4)]);
        assert_eq!(chunk_spans(5, 5), vec![(0, 5)]);
        assert_eq!(chunk_spans(12, 5), vec![(0, 5), (5, 10), (10, 12)]);

        let total = CHUNK_THRESHOLD_BYTES + 1;
        let spans = chunk_spans(total, CHUNK_SIZE_BYTES);
        assert_eq!(spans.first().copied(), Some((0, CHUNK_SIZE_BYTES)));
        assert_eq!(spans.last().map(|span| span.1), Some(total));
        let covered: usize = spans.iter().map(|(start, end)| end - start).sum();
        assert_eq!(covered, total);
    }

    #[test]
    fn content_range_uses_inclusive_ends() {
        assert_eq!(content_range(0, 5, 12), "bytes 0-4/12");
        assert_eq!(content_range(10, 12, 12), "bytes 10-11/12");
    }

    #[test]
    fn stored_reference_prefers_urls_then_key() {
        let with_url = json!({"url": "https://cdn.example.com/a.jpg"});
        assert_eq!(
            stored_reference(&with_url, "k1"),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(stored_reference(&Value::Null, "k1"), "k1");
        assert_eq!(stored_reference(&json!({"ok": true}), "k2"), "k2");
    }

    #[test]
    fn presigned_upload_decodes_without_headers() {
        let presigned: PresignedUpload = serde_json::from_value(json!({
            "upload_url": "https://bucket.example.com/put",
            "file_key": "uploads/a.jpg"
        }))
        .unwrap();
        assert!(presigned.upload_headers.is_empty());
    }
}
