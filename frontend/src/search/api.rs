use crate::api::{post_json, ApiError};
use crate::env_variable_utils::BACKEND_URL;
use crate::models::{NextPageRequest, NextPageResponse, SearchPayload, SearchRequest, SearchResponse};

pub async fn search_videos(query: &str) -> Result<SearchResponse, ApiError> {
    log::info!("Fetching search results for query: {query}");
    let url = format!("{}/api/search", &*BACKEND_URL);
    let payload: SearchPayload = post_json(&url, &SearchRequest::new(query), "Search").await?;
    log::info!("Search results received: {} items", payload.results.len());
    Ok(SearchResponse::from_payload(payload, query))
}

pub async fn fetch_next_page(page_token: &str) -> Result<NextPageResponse, ApiError> {
    log::info!("Fetching next page with token: {page_token}");
    let url = format!("{}/api/search/next", &*BACKEND_URL);
    let request = NextPageRequest {
        page_token: page_token.to_string(),
    };
    let page: NextPageResponse = post_json(&url, &request, "Load more").await?;
    log::info!("Next page results received: {} items", page.results.len());
    Ok(page)
}
