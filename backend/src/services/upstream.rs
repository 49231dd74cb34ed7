use reqwest::{Client, Response};
use serde_json::Value;

/// HTTP clients bound to the video/search backend. JSON calls run under a
/// request timeout; video bodies are streamed and only bounded on connect.
pub struct Upstream {
    client: Client,
    stream_client: Client,
    base_url: String,
}

impl Upstream {
    pub fn new(client: Client, stream_client: Client, base_url: &str) -> Self {
        Self {
            client,
            stream_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json(&self, path: &str) -> reqwest::Result<Response> {
        self.client
            .get(self.url(path))
            .header("Content-Type", "application/json")
            .send()
            .await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn get_range(&self, path: &str, range: &str) -> reqwest::Result<Response> {
        self.stream_client
            .get(self.url(path))
            .header("Range", range)
            .send()
            .await
    }
}

/// Location of a video file on the backend: always under `species/`.
pub fn species_path(filename: &str) -> String {
    if filename.contains("species/") {
        filename.to_string()
    } else {
        format!("species/{filename}")
    }
}

/// Path of the backend streaming endpoint for `filename`, encoded as one segment.
pub fn video_stream_path(filename: &str) -> String {
    format!("/api/video/{}", urlencoding::encode(&species_path(filename)))
}

/// Upstream error bodies are passed on as text: JSON re-serialized, anything else verbatim.
pub fn error_details(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_prefix_is_added_once() {
        assert_eq!(species_path("A.mp4"), "species/A.mp4");
        assert_eq!(species_path("species/A.mp4"), "species/A.mp4");
        assert_eq!(species_path("old/species/A.mp4"), "old/species/A.mp4");
    }

    #[test]
    fn stream_path_is_one_encoded_segment() {
        assert_eq!(video_stream_path("Red Fox.mp4"), "/api/video/species%2FRed%20Fox.mp4");
    }

    #[test]
    fn details_keep_json_or_text() {
        assert_eq!(error_details(r#"{ "error": "nope" }"#), r#"{"error":"nope"}"#);
        assert_eq!(error_details("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_details(""), "");
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let upstream = Upstream::new(Client::new(), Client::new(), "http://localhost:5000/");
        assert_eq!(upstream.url("/api/search"), "http://localhost:5000/api/search");
        assert_eq!(upstream.url("api/search"), "http://localhost:5000/api/search");
    }
}
