//! Accumulates "load more" pages into one growing result list and keeps the
//! session cache in step with what is on screen.

use crate::cache::{AppCache, CacheKey};
use crate::models::{NextPageResponse, Pagination, SearchResponse, VideoResult};

/// Appends a fetched page. Query and options stay those of the first page.
pub fn append_page(current: &SearchResponse, page: NextPageResponse) -> SearchResponse {
    let mut merged = current.results.clone();
    merged.extend(page.results);
    SearchResponse {
        query: current.query.clone(),
        options: current.options.clone(),
        results: merged,
        pagination: page.pagination.unwrap_or_default(),
    }
}

/// Single-page response rebuilt from cached results.
pub fn restore_from_cache(query: &str, results: Vec<VideoResult>) -> SearchResponse {
    let pagination = Pagination::single_page(results.len());
    SearchResponse {
        query: query.to_string(),
        options: crate::config::SEARCH_OPTIONS
            .iter()
            .map(|o| o.to_string())
            .collect(),
        results,
        pagination,
    }
}

/// Cached results for `query`, unless the caller asked for a fresh search.
pub fn cached_search(cache: &AppCache, query: &str, force_reload: bool) -> Option<SearchResponse> {
    if force_reload || cache.last_search_query().as_deref() != Some(query) {
        return None;
    }
    let results: Vec<VideoResult> = cache.get(&CacheKey::SearchResults)?;
    log::info!("Using cached search results for query: {query}");
    Some(restore_from_cache(query, results))
}

/// Stores a fresh first page under the query the user typed. Empty result
/// sets are not cached.
pub fn remember_search(cache: &AppCache, query: &str, response: &SearchResponse) {
    if response.results.is_empty() {
        return;
    }
    cache.put(&CacheKey::SearchResults, &response.results);
    cache.set_last_search_query(query);
}

/// Appends a page fetched for `requested_query`, or drops it when the user has
/// since moved on to `shown_query`.
pub fn append_page_for(
    shown_query: &str,
    requested_query: &str,
    current: &SearchResponse,
    page: NextPageResponse,
) -> Option<SearchResponse> {
    if shown_query != requested_query {
        log::debug!("Dropping next page for '{requested_query}', now showing '{shown_query}'");
        return None;
    }
    Some(append_page(current, page))
}

/// Stores the accumulated list after a "load more", but only while `query` is
/// still the cached search.
pub fn remember_results(cache: &AppCache, query: &str, response: &SearchResponse) {
    if response.results.is_empty() {
        return;
    }
    if cache.last_search_query().as_deref() != Some(query) {
        log::debug!("Not caching results for '{query}', cache holds another search");
        return;
    }
    cache.put(&CacheKey::SearchResults, &response.results);
}

/// "N of M" counter shown above the grid.
pub fn display_count(response: &SearchResponse) -> String {
    format!(
        "{} of {}",
        response.results.len(),
        response.pagination.total_results
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str) -> VideoResult {
        VideoResult {
            video_id: id.to_string(),
            filename: format!("{id}.mp4"),
            score: Some(1.0),
            thumbnail_url: String::new(),
            video_url: String::new(),
            clips: Vec::new(),
        }
    }

    fn first_page() -> SearchResponse {
        SearchResponse {
            query: "octopus".into(),
            options: vec!["visual".into()],
            results: vec![video("a"), video("b")],
            pagination: Pagination {
                has_more: true,
                next_page_token: "tok-1".into(),
                prev_page_token: None,
                limit_per_page: Some(15),
                total_pages: 2,
                total_results: 4,
            },
        }
    }

    fn page(results: Vec<VideoResult>) -> NextPageResponse {
        NextPageResponse {
            results,
            pagination: None,
        }
    }

    fn ids(response: &SearchResponse) -> Vec<&str> {
        response.results.iter().map(|v| v.video_id.as_str()).collect()
    }

    #[test]
    fn next_page_is_appended_not_replaced() {
        let next = Pagination {
            has_more: false,
            next_page_token: String::new(),
            prev_page_token: Some("tok-1".into()),
            limit_per_page: Some(15),
            total_pages: 2,
            total_results: 4,
        };
        let merged = append_page(
            &first_page(),
            NextPageResponse {
                results: vec![video("c"), video("d")],
                pagination: Some(next.clone()),
            },
        );

        assert_eq!(ids(&merged), vec!["a", "b", "c", "d"]);
        assert_eq!(merged.query, "octopus");
        assert_eq!(merged.pagination, next);
        assert_eq!(display_count(&merged), "4 of 4");
    }

    #[test]
    fn missing_pagination_ends_paging() {
        let merged = append_page(&first_page(), page(vec![video("c")]));
        assert!(!merged.pagination.has_more);
        assert!(merged.pagination.next_token().is_none());
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
    }

    #[test]
    fn cache_hit_requires_same_query_and_no_reload() {
        let cache = AppCache::memory();
        remember_search(&cache, "octopus", &first_page());

        let restored = cached_search(&cache, "octopus", false).unwrap();
        assert_eq!(ids(&restored), vec!["a", "b"]);
        assert!(!restored.pagination.has_more);
        assert_eq!(restored.pagination.limit_per_page, Some(15));
        assert_eq!(restored.pagination.total_results, 2);

        assert!(cached_search(&cache, "octopus", true).is_none());
        assert!(cached_search(&cache, "monkey", false).is_none());
    }

    #[test]
    fn empty_results_are_not_cached() {
        let cache = AppCache::memory();
        let empty = SearchResponse {
            results: Vec::new(),
            ..first_page()
        };
        remember_search(&cache, "octopus", &empty);
        assert!(!cache.has(&CacheKey::SearchResults));
        assert_eq!(cache.last_search_query(), None);
    }

    #[test]
    fn accumulated_results_replace_cached_list() {
        let cache = AppCache::memory();
        remember_search(&cache, "octopus", &first_page());
        let merged = append_page(&first_page(), page(vec![video("c")]));
        remember_results(&cache, "octopus", &merged);

        let stored: Vec<VideoResult> = cache.get(&CacheKey::SearchResults).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(cache.last_search_query().as_deref(), Some("octopus"));
    }

    #[test]
    fn late_page_for_previous_query_is_dropped() {
        let cache = AppCache::memory();
        let octopus = first_page();
        remember_search(&cache, "octopus", &octopus);

        let monkey = SearchResponse {
            query: "monkey".into(),
            results: vec![video("m1")],
            ..first_page()
        };
        remember_search(&cache, "monkey", &monkey);

        let late = page(vec![video("o3")]);
        assert!(append_page_for("monkey", "octopus", &octopus, late.clone()).is_none());

        let merged = append_page(&octopus, late);
        remember_results(&cache, "octopus", &merged);

        let restored = cached_search(&cache, "monkey", false).unwrap();
        assert_eq!(ids(&restored), vec!["m1"]);
    }

    #[test]
    fn page_for_shown_query_is_appended() {
        let merged =
            append_page_for("octopus", "octopus", &first_page(), page(vec![video("c")])).unwrap();
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
    }
}
