//! Backend endpoint configuration.
//!
//! The base URL is baked in at compile time from `HOMESTAKE_API_BASE` so a
//! deployed bundle cannot be repointed at runtime. Development builds fall
//! back to a local backend.

/// Where the backend and its media live.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend origin, no trailing slash.
    pub base_url: String,
    /// Optional public base for media keys that cannot be presigned,
    /// e.g. a CDN distribution in front of the storage bucket.
    pub media_base: Option<String>,
}

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

impl Default for ApiConfig {
    fn default() -> Self {
        let base = option_env!("HOMESTAKE_API_BASE").unwrap_or(DEFAULT_BASE_URL);
        let media = option_env!("HOMESTAKE_MEDIA_BASE").map(str::to_string);
        Self::new(base).with_media_base(media)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            media_base: None,
        }
    }

    pub fn with_media_base(mut self, media_base: Option<impl Into<String>>) -> Self {
        self.media_base = media_base.map(|m| m.into().trim_end_matches('/').to_string());
        self
    }

    /// Joins an absolute API path onto the backend origin.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_and_normalizes() {
        let config = ApiConfig::new("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.url("/properties"), "https://api.example.com/properties");
        assert_eq!(config.url("properties"), "https://api.example.com/properties");
    }

    #[test]
    fn url_passes_absolute_urls_through() {
        let config = ApiConfig::new("https://api.example.com");
        assert_eq!(
            config.url("https://bucket.example.com/k.jpg"),
            "https://bucket.example.com/k.jpg"
        );
    }
}
