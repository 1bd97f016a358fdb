//! Thin persistence seam over the platform key-value store.
//!
//! On web this is `localStorage`; everywhere else (tests, native shells) a
//! process-global map with the same semantics. Values survive page reloads
//! on web, which is what the session token and OTP resend cooldowns need.

#[cfg(target_arch = "wasm32")]
mod backend {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn get(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    pub fn set(key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            // Quota or privacy-mode failures degrade to a non-persistent session.
            let _ = storage.set_item(key, value);
        }
    }

    pub fn remove(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    pub fn now_millis() -> u64 {
        js_sys::Date::now() as u64
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};

    static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();

    fn store() -> &'static Mutex<HashMap<String, String>> {
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    pub fn get(key: &str) -> Option<String> {
        store().lock().unwrap().get(key).cloned()
    }

    pub fn set(key: &str, value: &str) {
        store().lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn remove(key: &str) {
        store().lock().unwrap().remove(key);
    }

    pub fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

pub fn get_item(key: &str) -> Option<String> {
    backend::get(key)
}

pub fn set_item(key: &str, value: &str) {
    backend::set(key, value);
}

pub fn remove_item(key: &str) {
    backend::remove(key);
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    backend::now_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        set_item("storage-test-key", "v1");
        assert_eq!(get_item("storage-test-key").as_deref(), Some("v1"));
        set_item("storage-test-key", "v2");
        assert_eq!(get_item("storage-test-key").as_deref(), Some("v2"));
        remove_item("storage-test-key");
        assert_eq!(get_item("storage-test-key"), None);
    }
}
