//! # Media resolution cache: storage references to displayable URLs
//!
//! Properties and update posts carry media as either direct URLs or opaque
//! storage keys. [`MediaCache`] turns a list of those references into
//! displayable URLs:
//!
//! 1. References that already look like URLs (`http(s)://`, protocol-relative,
//!    `blob:`, `data:`, site-absolute paths) are normalized and used without
//!    any network round-trip.
//! 2. Everything else is treated as a storage key and handed to a
//!    [`MediaResolver`] (in practice the API client's presigned-download
//!    request).
//! 3. If the resolver fails, a best-effort guess is built from an optional
//!    public media base; with no base configured the reference is dropped.
//!
//! Successful resolutions are memoized in a map shared by every clone of the
//! cache, keyed by the raw reference string, and never evicted: presigned
//! download URLs are assumed to outlive a session. Two components racing on
//! the same key may both hit the resolver once before the first insert lands;
//! that small duplicate window is fine, memoization stops any further work.
//! Fallback guesses are deliberately *not* cached so a later lookup can retry
//! the resolver.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Resolves an opaque storage key to a download URL.
pub trait MediaResolver {
    fn resolve(&self, key: &str) -> impl Future<Output = Result<String, String>>;
}

/// Process-wide memoized reference → URL map.
#[derive(Clone, Default)]
pub struct MediaCache {
    resolved: Arc<Mutex<HashMap<String, String>>>,
    fallback_base: Option<String>,
}

impl MediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that joins unresolvable keys onto `base` instead of dropping
    /// them.
    pub fn with_fallback_base(base: impl Into<String>) -> Self {
        Self {
            resolved: Arc::new(Mutex::new(HashMap::new())),
            fallback_base: Some(base.into().trim_end_matches('/').to_string()),
        }
    }

    /// Normalize a reference that is already a usable URL, or `None` when it
    /// has to go through the resolver.
    pub fn direct_url(reference: &str) -> Option<String> {
        let r = reference.trim();
        if r.is_empty() {
            return None;
        }
        if r.starts_with("http://")
            || r.starts_with("https://")
            || r.starts_with("blob:")
            || r.starts_with("data:")
        {
            return Some(r.to_string());
        }
        // Protocol-relative URLs get an https scheme.
        if let Some(rest) = r.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }
        // Site-absolute paths are served as-is.
        if r.starts_with('/') {
            return Some(r.to_string());
        }
        None
    }

    /// Already-resolved value for a reference, if any.
    pub fn peek(&self, reference: &str) -> Option<String> {
        self.resolved.lock().ok()?.get(reference).cloned()
    }

    /// Resolve a single reference. `None` means the reference is unusable and
    /// should be dropped from display.
    pub async fn resolve_one<R: MediaResolver>(
        &self,
        reference: &str,
        resolver: &R,
    ) -> Option<String> {
        if let Some(hit) = self.peek(reference) {
            return Some(hit);
        }

        if let Some(url) = Self::direct_url(reference) {
            self.memoize(reference, &url);
            return Some(url);
        }

        let key = reference.trim();
        if key.is_empty() {
            return None;
        }

        match resolver.resolve(key).await {
            Ok(url) => {
                self.memoize(reference, &url);
                Some(url)
            }
            Err(_) => self.guess(key),
        }
    }

    /// Resolve a list of references, keeping input order and dropping any
    /// that fail to resolve.
    pub async fn resolve_all<R: MediaResolver>(
        &self,
        references: &[String],
        resolver: &R,
    ) -> Vec<String> {
        let mut urls = Vec::with_capacity(references.len());
        for reference in references {
            if let Some(url) = self.resolve_one(reference, resolver).await {
                urls.push(url);
            }
        }
        urls
    }

    fn memoize(&self, reference: &str, url: &str) {
        if let Ok(mut map) = self.resolved.lock() {
            map.insert(reference.to_string(), url.to_string());
        }
    }

    fn guess(&self, key: &str) -> Option<String> {
        let base = self.fallback_base.as_deref()?;
        if key.contains(char::is_whitespace) {
            return None;
        }
        Some(format!("{base}/{}", key.trim_start_matches('/')))
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.resolved.lock().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Resolver that counts calls and maps known keys to URLs.
    struct FakeResolver {
        calls: AtomicU32,
        fail: bool,
    }

    impl FakeResolver {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MediaResolver for FakeResolver {
        async fn resolve(&self, key: &str) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("presign failed".to_string())
            } else {
                Ok(format!("https://cdn.example.com/{key}?sig=abc"))
            }
        }
    }

    #[tokio::test]
    async fn full_urls_pass_through_without_resolver() {
        let cache = MediaCache::new();
        let resolver = FakeResolver::new();

        let url = cache
            .resolve_one("https://img.example.com/house.jpg", &resolver)
            .await;
        assert_eq!(url.as_deref(), Some("https://img.example.com/house.jpg"));
        assert_eq!(resolver.call_count(), 0);

        // blob/data/site-absolute also skip the network
        for direct in ["blob:abc-123", "data:image/png;base64,xyz", "/static/a.png"] {
            assert!(cache.resolve_one(direct, &resolver).await.is_some());
        }
        assert_eq!(resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn protocol_relative_urls_get_https() {
        let cache = MediaCache::new();
        let resolver = FakeResolver::new();
        let url = cache
            .resolve_one("//img.example.com/house.jpg", &resolver)
            .await;
        assert_eq!(url.as_deref(), Some("https://img.example.com/house.jpg"));
        assert_eq!(resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn storage_keys_resolve_once_then_memoize() {
        let cache = MediaCache::new();
        let resolver = FakeResolver::new();

        let first = cache.resolve_one("uploads/p1/hero.jpg", &resolver).await;
        assert_eq!(
            first.as_deref(),
            Some("https://cdn.example.com/uploads/p1/hero.jpg?sig=abc")
        );
        assert_eq!(resolver.call_count(), 1);

        // Second lookup, and a lookup through a clone, hit the shared cache.
        let again = cache.resolve_one("uploads/p1/hero.jpg", &resolver).await;
        assert_eq!(again, first);
        let via_clone = cache
            .clone()
            .resolve_one("uploads/p1/hero.jpg", &resolver)
            .await;
        assert_eq!(via_clone, first);
        assert_eq!(resolver.call_count(), 1);
    }

    #[tokio::test]
    async fn resolver_failure_falls_back_to_base_join() {
        let cache = MediaCache::with_fallback_base("https://media.homestake.test/");
        let resolver = FakeResolver::failing();

        let url = cache.resolve_one("uploads/p1/hero.jpg", &resolver).await;
        assert_eq!(
            url.as_deref(),
            Some("https://media.homestake.test/uploads/p1/hero.jpg")
        );

        // Guesses are not memoized, so the resolver is retried next time.
        cache.resolve_one("uploads/p1/hero.jpg", &resolver).await;
        assert_eq!(resolver.call_count(), 2);
        assert_eq!(cache.cached_len(), 0);
    }

    #[tokio::test]
    async fn resolver_failure_without_base_drops_item() {
        let cache = MediaCache::new();
        let resolver = FakeResolver::failing();
        assert!(cache.resolve_one("uploads/p1/hero.jpg", &resolver).await.is_none());
    }

    #[tokio::test]
    async fn resolve_all_preserves_order_and_drops_failures() {
        let cache = MediaCache::new();
        let resolver = FakeResolver::failing();

        let refs = vec![
            "https://a.example.com/1.jpg".to_string(),
            "unresolvable-key".to_string(),
            "https://a.example.com/2.jpg".to_string(),
            "   ".to_string(),
        ];
        let urls = cache.resolve_all(&refs, &resolver).await;
        assert_eq!(
            urls,
            vec![
                "https://a.example.com/1.jpg".to_string(),
                "https://a.example.com/2.jpg".to_string(),
            ]
        );
    }
}
