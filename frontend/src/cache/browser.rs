use web_sys::{window, Storage};

use super::SessionCache;

/// `window.sessionStorage`. Storage exceptions (quota, privacy mode) degrade
/// to misses and dropped writes.
pub struct BrowserSessionCache {
    storage: Storage,
}

impl BrowserSessionCache {
    pub fn new() -> Option<Self> {
        let storage = window()?.session_storage().ok()??;
        Some(Self { storage })
    }
}

impl SessionCache for BrowserSessionCache {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn put_raw(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("Failed to store session entry {key}");
        }
    }

    fn remove(&self, key: &str) {
        if self.storage.remove_item(key).is_err() {
            log::warn!("Failed to remove session entry {key}");
        }
    }
}
