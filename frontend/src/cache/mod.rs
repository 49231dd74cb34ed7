//! Session-scoped key/value cache shared by every page in the tab.
//!
//! Values are stored as JSON text. Anything that fails to parse is treated as
//! a miss so callers fall through to the network. Entries are never evicted;
//! they live until the browsing session ends and the last write wins.

mod browser;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use yew::prelude::*;

pub use browser::BrowserSessionCache;

/// Raw string store behind [`AppCache`].
pub trait SessionCache {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn put_raw(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn has(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    LastSearchQuery,
    SearchResults,
    Video(String),
    SimilarVideos(String),
    VideoData(String),
    Metadata(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::LastSearchQuery => write!(f, "lastSearchQuery"),
            CacheKey::SearchResults => write!(f, "searchResults"),
            CacheKey::Video(id) => write!(f, "video_{id}"),
            CacheKey::SimilarVideos(id) => write!(f, "similar_videos_{id}"),
            CacheKey::VideoData(id) => write!(f, "video_data_{id}"),
            CacheKey::Metadata(id) => write!(f, "metadata_{id}"),
        }
    }
}

/// In-memory store, used when session storage is unavailable and in tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, String>>,
}

impl SessionCache for MemoryCache {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// The single cache instance handed to components through context.
#[derive(Clone)]
pub struct AppCache {
    store: Rc<dyn SessionCache>,
}

impl PartialEq for AppCache {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl AppCache {
    pub fn new(store: Rc<dyn SessionCache>) -> Self {
        Self { store }
    }

    /// Backed by `window.sessionStorage`, or memory when the browser refuses it.
    pub fn browser() -> Self {
        match BrowserSessionCache::new() {
            Some(storage) => Self::new(Rc::new(storage)),
            None => {
                log::warn!("sessionStorage unavailable, caching in memory for this page only");
                Self::memory()
            }
        }
    }

    pub fn memory() -> Self {
        Self::new(Rc::new(MemoryCache::default()))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let raw = self.store.get_raw(&key.to_string())?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    pub fn put<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.put_raw(&key.to_string(), &raw),
            Err(e) => log::warn!("Could not serialize cache entry {key}: {e}"),
        }
    }

    pub fn has(&self, key: &CacheKey) -> bool {
        self.store.has(&key.to_string())
    }

    pub fn remove(&self, key: &CacheKey) {
        self.store.remove(&key.to_string());
    }

    /// Stored as plain text rather than JSON.
    pub fn last_search_query(&self) -> Option<String> {
        self.store
            .get_raw(&CacheKey::LastSearchQuery.to_string())
            .filter(|q| !q.is_empty())
    }

    pub fn set_last_search_query(&self, query: &str) {
        self.store
            .put_raw(&CacheKey::LastSearchQuery.to_string(), query);
    }
}

#[hook]
pub fn use_cache() -> AppCache {
    use_context::<AppCache>().unwrap_or_else(AppCache::browser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Clip, VideoResult};

    fn sample_video(id: &str) -> VideoResult {
        VideoResult {
            video_id: id.to_string(),
            filename: "OCT_0001.mp4".into(),
            score: None,
            thumbnail_url: "https://thumbs.example.com/oct.jpg".into(),
            video_url: "species/OCT_0001.mp4".into(),
            clips: vec![Clip {
                start: 12.0,
                end: 20.0,
                score: Some(7.0),
                confidence: "high".into(),
                thumbnail_url: String::new(),
            }],
        }
    }

    #[test]
    fn keys_render_session_storage_names() {
        assert_eq!(CacheKey::LastSearchQuery.to_string(), "lastSearchQuery");
        assert_eq!(CacheKey::SearchResults.to_string(), "searchResults");
        assert_eq!(CacheKey::Video("a1".into()).to_string(), "video_a1");
        assert_eq!(
            CacheKey::SimilarVideos("a1".into()).to_string(),
            "similar_videos_a1"
        );
        assert_eq!(CacheKey::VideoData("a1".into()).to_string(), "video_data_a1");
        assert_eq!(CacheKey::Metadata("a1".into()).to_string(), "metadata_a1");
    }

    #[test]
    fn typed_round_trip_returns_equal_value() {
        let cache = AppCache::memory();
        let key = CacheKey::Video("a1".into());
        let video = sample_video("a1");

        assert!(!cache.has(&key));
        cache.put(&key, &video);
        assert!(cache.has(&key));
        assert_eq!(cache.get::<VideoResult>(&key), Some(video));
    }

    #[test]
    fn malformed_entry_reads_as_miss() {
        let store = Rc::new(MemoryCache::default());
        store.put_raw("searchResults", "{not json");
        let cache = AppCache::new(store);

        assert!(cache.has(&CacheKey::SearchResults));
        assert_eq!(cache.get::<Vec<VideoResult>>(&CacheKey::SearchResults), None);
    }

    #[test]
    fn wrong_shape_reads_as_miss() {
        let cache = AppCache::memory();
        cache.put(&CacheKey::SearchResults, &42);
        assert_eq!(cache.get::<Vec<VideoResult>>(&CacheKey::SearchResults), None);
    }

    #[test]
    fn later_write_wins() {
        let cache = AppCache::memory();
        let key = CacheKey::SearchResults;
        cache.put(&key, &vec![sample_video("a")]);
        cache.put(&key, &vec![sample_video("b"), sample_video("c")]);

        let stored: Vec<VideoResult> = cache.get(&key).unwrap();
        let ids: Vec<_> = stored.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn last_query_is_plain_text() {
        let store = Rc::new(MemoryCache::default());
        let cache = AppCache::new(store.clone());
        cache.set_last_search_query("hibiscus flower");

        assert_eq!(
            store.get_raw("lastSearchQuery").as_deref(),
            Some("hibiscus flower")
        );
        assert_eq!(cache.last_search_query().as_deref(), Some("hibiscus flower"));
    }

    #[test]
    fn clones_share_one_store() {
        let cache = AppCache::memory();
        let other = cache.clone();
        other.set_last_search_query("monkey");
        assert_eq!(cache.last_search_query().as_deref(), Some("monkey"));
        assert!(cache == other);
        assert!(cache != AppCache::memory());
    }
}
