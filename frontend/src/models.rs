use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{PAGE_LIMIT, SEARCH_OPTIONS};

/// A scored sub-interval of a video, in seconds on the owning video's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub start: f64,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub end: f64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default = "default_confidence", deserialize_with = "lenient_confidence")]
    pub confidence: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub thumbnail_url: String,
}

impl Clip {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub video_url: String,
    #[serde(default, deserialize_with = "lenient_clips")]
    pub clips: Vec<Clip>,
}

impl VideoResult {
    /// Stand-in record for a video id that no cache knows about.
    pub fn placeholder(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            filename: format!("Video_{}", short_id(video_id)),
            score: Some(0.0),
            thumbnail_url: String::new(),
            video_url: String::new(),
            clips: Vec::new(),
        }
    }

    /// Explicit score if present, otherwise the best clip score.
    pub fn display_score(&self) -> Option<f64> {
        if self.score.is_some() {
            return self.score;
        }
        let highest = self
            .clips
            .iter()
            .map(|clip| clip.score.unwrap_or(0.0))
            .fold(f64::NEG_INFINITY, f64::max);
        (highest > 0.0).then_some(highest)
    }

    /// First clip carrying the highest score.
    pub fn best_clip(&self) -> Option<&Clip> {
        self.clips.iter().fold(None, |best: Option<&Clip>, clip| match best {
            Some(b) if clip.score.unwrap_or(0.0) <= b.score.unwrap_or(0.0) => Some(b),
            _ => Some(clip),
        })
    }

    pub fn display_name(&self) -> String {
        match self.filename.split('.').next() {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("Video {}", short_id(&self.video_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarVideo {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub video_url: String,
    #[serde(default, deserialize_with = "lenient_score", skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score", skip_serializing_if = "Option::is_none")]
    pub similarity_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SimilarVideo {
    pub fn to_video_result(&self) -> VideoResult {
        let score = match (self.similarity_score, self.similarity_percentage) {
            (Some(score), _) if score != 0.0 => score * 100.0,
            (_, Some(percentage)) if percentage != 0.0 => percentage,
            _ => 0.0,
        };
        VideoResult {
            video_id: self.video_id.clone(),
            filename: self
                .filename
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Video_{}", short_id(&self.video_id))),
            score: Some(score),
            thumbnail_url: self.thumbnail_url.clone().unwrap_or_default(),
            video_url: self.video_url.clone(),
            clips: Vec::new(),
        }
    }

    pub fn display_name(&self) -> String {
        self.filename
            .as_deref()
            .and_then(|name| name.split('.').next())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Video {}", short_id(&self.video_id)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub next_page_token: String,
    #[serde(default)]
    pub prev_page_token: Option<String>,
    #[serde(default)]
    pub limit_per_page: Option<usize>,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub total_results: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::single_page(0)
    }
}

impl Pagination {
    pub fn single_page(total_results: usize) -> Self {
        Self {
            has_more: false,
            next_page_token: String::new(),
            prev_page_token: None,
            limit_per_page: Some(PAGE_LIMIT),
            total_pages: 1,
            total_results,
        }
    }

    pub fn next_token(&self) -> Option<&str> {
        (self.has_more && !self.next_page_token.is_empty()).then_some(self.next_page_token.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub options: Vec<String>,
    pub results: Vec<VideoResult>,
    pub pagination: Pagination,
}

impl SearchResponse {
    /// Fills the gaps of a backend payload with the values the request was made with.
    pub fn from_payload(payload: SearchPayload, requested_query: &str) -> Self {
        let total = payload.results.len();
        Self {
            query: payload
                .query
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| requested_query.to_string()),
            options: payload.options.unwrap_or_else(default_options),
            results: payload.results,
            pagination: payload
                .pagination
                .unwrap_or_else(|| Pagination::single_page(total)),
        }
    }
}

/// Body of `POST /api/search` as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Vec<VideoResult>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Body of `POST /api/search/next`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NextPageResponse {
    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Vec<VideoResult>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query_text: String,
    pub options: Vec<String>,
    pub page_limit: usize,
}

impl SearchRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query_text: query.to_string(),
            options: default_options(),
            page_limit: PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NextPageRequest {
    pub page_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarVideosResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub similar_videos: Option<Vec<SimilarVideo>>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Full record from `GET /api/videos/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(default, rename = "_id", deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_metadata: SystemMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub hls: Option<HlsInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemMetadata {
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: f64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub fps: f64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub height: u32,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub size: u64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    pub analysis_action: Option<String>,
    pub analysis_environment_location: Option<String>,
    pub analysis_environment_position: Option<String>,
    pub analysis_keywords: Option<String>,
    pub analysis_narrativeflow: Option<String>,
    pub analysis_shot: Option<String>,
    pub analysis_subject_classification: Option<String>,
    pub analysis_subject_speciescategory: Option<String>,
    pub analysis_summary: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HlsInfo {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub status: String,
    #[serde(default)]
    pub thumbnail_urls: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub video_url: String,
}

/// Error body shared by the backend and the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn details_text(&self) -> Option<String> {
        match &self.details {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

pub fn short_id(video_id: &str) -> String {
    video_id.chars().take(8).collect()
}

fn default_options() -> Vec<String> {
    SEARCH_OPTIONS.iter().map(|o| o.to_string()).collect()
}

fn default_confidence() -> String {
    "medium".to_string()
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Non-negative whole number; null, text or out-of-range values read as zero.
fn lenient_integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + TryFrom<u64>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64)),
        _ => None,
    };
    Ok(value.and_then(|v| T::try_from(v).ok()).unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_confidence))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_clips<'de, D>(deserializer: D) -> Result<Vec<Clip>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<VideoResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::warn!("Skipping malformed search result: {e}");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    })
}
