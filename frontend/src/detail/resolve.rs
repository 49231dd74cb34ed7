//! Works out which record the detail page shows, using only what earlier
//! pages left in the session cache.

use crate::cache::{AppCache, CacheKey};
use crate::models::{Clip, SimilarVideo, VideoResult};

pub const LIMITED_INFO_NOTICE: &str =
    "Limited video information available. Some features may not work properly.";
pub const NOT_FOUND_NOTICE: &str = "Video data not found. Please go back to search and try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVideo {
    pub video: VideoResult,
    /// Position of the video inside the cached search results.
    pub index: Option<usize>,
    pub all_videos: Vec<VideoResult>,
    pub notice: Option<String>,
    /// Similar videos cached for this id, shown without another request.
    pub similar: Vec<SimilarVideo>,
    pub last_query: Option<String>,
}

impl ResolvedVideo {
    pub fn default_clip(&self) -> Option<Clip> {
        self.video.best_clip().cloned()
    }

    pub fn previous_id(&self) -> Option<&str> {
        let index = self.index?.checked_sub(1)?;
        self.all_videos.get(index).map(|v| v.video_id.as_str())
    }

    pub fn next_id(&self) -> Option<&str> {
        let index = self.index? + 1;
        self.all_videos.get(index).map(|v| v.video_id.as_str())
    }

    /// "Video i of n", only for videos that are part of the result list.
    pub fn position_label(&self) -> Option<String> {
        self.index
            .map(|index| format!("Video {} of {}", index + 1, self.all_videos.len()))
    }
}

pub fn resolve_video(cache: &AppCache, video_id: &str) -> ResolvedVideo {
    let all_videos: Option<Vec<VideoResult>> = cache.get(&CacheKey::SearchResults);
    let similar: Vec<SimilarVideo> = cache
        .get(&CacheKey::SimilarVideos(video_id.to_string()))
        .unwrap_or_default();
    let last_query = cache.last_search_query();
    let video_key = CacheKey::Video(video_id.to_string());

    let mut notice = None;
    let (video, index, all_videos) = match all_videos {
        Some(all_videos) => {
            let index = all_videos.iter().position(|v| v.video_id == video_id);
            let video = match index {
                Some(i) => cache.get::<VideoResult>(&video_key).unwrap_or_else(|| {
                    let video = all_videos[i].clone();
                    cache.put(&video_key, &video);
                    video
                }),
                None => cache
                    .get::<VideoResult>(&video_key)
                    .or_else(|| from_similar(cache, &similar, video_id))
                    .unwrap_or_else(|| {
                        notice = Some(LIMITED_INFO_NOTICE.to_string());
                        VideoResult::placeholder(video_id)
                    }),
            };
            (video, index, all_videos)
        }
        None => {
            let video = cache.get::<VideoResult>(&video_key).unwrap_or_else(|| {
                notice = Some(NOT_FOUND_NOTICE.to_string());
                VideoResult::placeholder(video_id)
            });
            (video, None, Vec::new())
        }
    };

    if notice.is_none() {
        log::info!("Using cached video data for: {video_id}");
    } else {
        log::warn!("No cached record for video {video_id}, showing placeholder");
    }

    ResolvedVideo {
        video,
        index,
        all_videos,
        notice,
        similar,
        last_query,
    }
}

fn from_similar(cache: &AppCache, similar: &[SimilarVideo], video_id: &str) -> Option<VideoResult> {
    let video = similar
        .iter()
        .find(|v| v.video_id == video_id)?
        .to_video_result();
    cache.put(&CacheKey::Video(video_id.to_string()), &video);
    Some(video)
}

/// A similar-videos list together with the video it was fetched for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarListing {
    owner: String,
    videos: Vec<SimilarVideo>,
}

impl SimilarListing {
    pub fn new(owner: &str, videos: Vec<SimilarVideo>) -> Self {
        Self {
            owner: owner.to_string(),
            videos,
        }
    }

    /// The list, if it belongs to `video_id`; empty otherwise.
    pub fn for_video(&self, video_id: &str) -> &[SimilarVideo] {
        if self.owner == video_id {
            &self.videos
        } else {
            &[]
        }
    }
}

/// Records a similar-video click so the next detail page can resolve it.
pub fn remember_similar_selection(
    cache: &AppCache,
    current_id: &str,
    listing: &SimilarListing,
    selected: &SimilarVideo,
) {
    let similar = listing.for_video(current_id);
    if !similar.is_empty() {
        cache.put(&CacheKey::SimilarVideos(current_id.to_string()), similar);
    }

    let video = selected.to_video_result();
    cache.put(&CacheKey::Video(selected.video_id.clone()), &video);

    if let Some(mut results) = cache.get::<Vec<VideoResult>>(&CacheKey::SearchResults) {
        if !results.iter().any(|v| v.video_id == selected.video_id) {
            results.push(video);
            cache.put(&CacheKey::SearchResults, &results);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, clip_scores: &[f64]) -> VideoResult {
        VideoResult {
            video_id: id.to_string(),
            filename: format!("{id}.mp4"),
            score: None,
            thumbnail_url: String::new(),
            video_url: format!("species/{id}.mp4"),
            clips: clip_scores
                .iter()
                .enumerate()
                .map(|(i, score)| Clip {
                    start: i as f64 * 10.0,
                    end: i as f64 * 10.0 + 5.0,
                    score: Some(*score),
                    confidence: "high".into(),
                    thumbnail_url: String::new(),
                })
                .collect(),
        }
    }

    fn similar(id: &str) -> SimilarVideo {
        SimilarVideo {
            video_id: id.to_string(),
            filename: Some(format!("{id}.mp4")),
            thumbnail_url: None,
            video_url: format!("http://localhost:8000/api/video/{id}.mp4"),
            similarity_score: Some(0.5),
            similarity_percentage: None,
            embedding_type: None,
            scope: None,
            source: Some("unknown".into()),
        }
    }

    fn cache_with_results(ids: &[&str]) -> AppCache {
        let cache = AppCache::memory();
        let results: Vec<_> = ids.iter().map(|id| video(id, &[1.0, 3.0])).collect();
        cache.put(&CacheKey::SearchResults, &results);
        cache.set_last_search_query("octopus");
        cache
    }

    #[test]
    fn video_from_results_is_cached_per_id() {
        let cache = cache_with_results(&["a", "b", "c"]);
        let resolved = resolve_video(&cache, "b");

        assert_eq!(resolved.video.video_id, "b");
        assert_eq!(resolved.index, Some(1));
        assert_eq!(resolved.notice, None);
        assert_eq!(resolved.previous_id(), Some("a"));
        assert_eq!(resolved.next_id(), Some("c"));
        assert_eq!(resolved.position_label().as_deref(), Some("Video 2 of 3"));
        assert_eq!(resolved.last_query.as_deref(), Some("octopus"));
        assert!(cache.has(&CacheKey::Video("b".into())));
        assert_eq!(resolved.default_clip().map(|c| c.start), Some(10.0));
    }

    #[test]
    fn per_video_entry_wins_over_search_entry() {
        let cache = cache_with_results(&["a"]);
        let mut edited = video("a", &[]);
        edited.filename = "edited.mp4".into();
        cache.put(&CacheKey::Video("a".into()), &edited);

        assert_eq!(resolve_video(&cache, "a").video.filename, "edited.mp4");
    }

    #[test]
    fn first_and_last_have_one_neighbour() {
        let cache = cache_with_results(&["a", "b"]);
        let first = resolve_video(&cache, "a");
        assert_eq!(first.previous_id(), None);
        assert_eq!(first.next_id(), Some("b"));
        let last = resolve_video(&cache, "b");
        assert_eq!(last.next_id(), None);
    }

    #[test]
    fn unknown_id_with_results_gets_limited_placeholder() {
        let cache = cache_with_results(&["a"]);
        let resolved = resolve_video(&cache, "0123456789");

        assert_eq!(resolved.video.filename, "Video_01234567");
        assert_eq!(resolved.video.video_url, "");
        assert_eq!(resolved.index, None);
        assert_eq!(resolved.position_label(), None);
        assert_eq!(resolved.notice.as_deref(), Some(LIMITED_INFO_NOTICE));
    }

    #[test]
    fn no_results_and_no_entry_is_not_found() {
        let cache = AppCache::memory();
        let resolved = resolve_video(&cache, "zzz");
        assert_eq!(resolved.notice.as_deref(), Some(NOT_FOUND_NOTICE));
        assert!(resolved.all_videos.is_empty());
    }

    #[test]
    fn no_results_but_cached_entry_resolves() {
        let cache = AppCache::memory();
        cache.put(&CacheKey::Video("x".into()), &video("x", &[]));
        let resolved = resolve_video(&cache, "x");
        assert_eq!(resolved.notice, None);
        assert_eq!(resolved.video.video_id, "x");
    }

    #[test]
    fn similar_list_entry_is_converted() {
        let cache = cache_with_results(&["a"]);
        cache.put(&CacheKey::SimilarVideos("s".into()), &vec![similar("s"), similar("t")]);

        let resolved = resolve_video(&cache, "s");
        assert_eq!(resolved.notice, None);
        assert_eq!(resolved.video.score, Some(50.0));
        assert!(resolved.video.clips.is_empty());
        assert_eq!(resolved.similar.len(), 2);
        assert!(cache.has(&CacheKey::Video("s".into())));
    }

    #[test]
    fn similar_click_is_cached_and_appended_once() {
        let cache = cache_with_results(&["a"]);
        let list = SimilarListing::new("a", vec![similar("s"), similar("t")]);
        let picked = similar("s");

        remember_similar_selection(&cache, "a", &list, &picked);
        remember_similar_selection(&cache, "a", &list, &picked);

        let results: Vec<VideoResult> = cache.get(&CacheKey::SearchResults).unwrap();
        let ids: Vec<_> = results.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "s"]);
        assert!(cache.has(&CacheKey::SimilarVideos("a".into())));

        let resolved = resolve_video(&cache, "s");
        assert_eq!(resolved.index, Some(1));
        assert_eq!(resolved.previous_id(), Some("a"));
    }

    #[test]
    fn corrupt_results_entry_is_treated_as_absent() {
        let cache = AppCache::memory();
        cache.put(&CacheKey::SearchResults, &"not a list");
        let resolved = resolve_video(&cache, "a");
        assert_eq!(resolved.notice.as_deref(), Some(NOT_FOUND_NOTICE));
    }

    #[test]
    fn list_from_previous_video_is_not_stored_for_current() {
        let cache = cache_with_results(&["a", "b"]);
        let from_a = SimilarListing::new("a", vec![similar("s"), similar("t")]);
        assert!(from_a.for_video("b").is_empty());
        assert_eq!(from_a.for_video("a").len(), 2);

        remember_similar_selection(&cache, "b", &from_a, &similar("s"));

        assert!(!cache.has(&CacheKey::SimilarVideos("b".into())));
        assert!(cache.has(&CacheKey::Video("s".into())));
        assert!(resolve_video(&cache, "b").similar.is_empty());
    }
}
