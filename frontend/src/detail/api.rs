use serde_json::Value;

use crate::api::{get_json, ApiError};
use crate::cache::{AppCache, CacheKey};
use crate::env_variable_utils::BACKEND_URL;
use crate::models::{SimilarVideo, SimilarVideosResponse, VideoRecord};
use crate::utils::resolve_video_url;

/// Similar videos for `video_id`, served from the session cache when present.
pub async fn load_similar_videos(
    cache: &AppCache,
    video_id: &str,
) -> Result<Vec<SimilarVideo>, ApiError> {
    let key = CacheKey::SimilarVideos(video_id.to_string());
    if let Some(cached) = cache.get::<Vec<SimilarVideo>>(&key) {
        log::info!("Using cached similar videos for: {video_id}");
        return Ok(cached);
    }

    log::info!("Fetching similar videos for video ID: {video_id}");
    let url = format!("{}/api/similar-videos/{video_id}", &*BACKEND_URL);
    let response: SimilarVideosResponse = get_json(&url, "Similar videos").await?;
    let videos = prepare_similar_videos(response, &BACKEND_URL)?;

    cache.put(&key, &videos);
    Ok(videos)
}

/// Resolves playable URLs and stamps each entry with the response source.
pub fn prepare_similar_videos(
    response: SimilarVideosResponse,
    backend_url: &str,
) -> Result<Vec<SimilarVideo>, ApiError> {
    let videos = match response.similar_videos {
        Some(videos) if response.success => videos,
        _ => {
            return Err(ApiError::Parse(
                "Invalid response format from similar videos API".to_string(),
            ))
        }
    };
    let source = response.source.unwrap_or_else(|| "unknown".to_string());

    Ok(videos
        .into_iter()
        .map(|video| SimilarVideo {
            video_url: resolve_video_url(&video.video_url, backend_url),
            source: Some(source.clone()),
            ..video
        })
        .collect())
}

/// Full metadata record. The raw body is cached as `video_data_<id>` and the
/// parsed record as `metadata_<id>`.
pub async fn load_video_record(cache: &AppCache, video_id: &str) -> Result<VideoRecord, ApiError> {
    let metadata_key = CacheKey::Metadata(video_id.to_string());
    let raw_key = CacheKey::VideoData(video_id.to_string());

    if let Some(record) = cache.get::<VideoRecord>(&metadata_key) {
        log::debug!("Using cached metadata for: {video_id}");
        return Ok(record);
    }
    if let Some(raw) = cache.get::<Value>(&raw_key) {
        if let Some(record) = parse_record(cache, video_id, raw) {
            log::info!("Using cached video data for: {video_id}");
            return Ok(record);
        }
        cache.remove(&raw_key);
    }

    let url = format!("{}/api/videos/{video_id}", &*BACKEND_URL);
    let raw: Value = get_json(&url, "Video data").await?;
    cache.put(&raw_key, &raw);
    parse_record(cache, video_id, raw)
        .ok_or_else(|| ApiError::Parse(format!("Unexpected video record for {video_id}")))
}

fn parse_record(cache: &AppCache, video_id: &str, raw: Value) -> Option<VideoRecord> {
    match serde_json::from_value::<VideoRecord>(raw) {
        Ok(record) => {
            cache.put(&CacheKey::Metadata(video_id.to_string()), &record);
            Some(record)
        }
        Err(e) => {
            log::warn!("Could not read video record {video_id}: {e}");
            None
        }
    }
}
