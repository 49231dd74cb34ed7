use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::env_variable_utils::BACKEND_URL;

pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}

/// `MM:SS`, minutes are not wrapped into hours.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn format_clip_duration(start: f64, end: f64) -> String {
    format_timestamp(end - start)
}

/// `m:ss` as used by the technical metadata block.
pub fn format_media_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.2}"),
        None => "N/A".to_string(),
    }
}

pub fn format_confidence(confidence: Option<&str>) -> String {
    let Some(confidence) = confidence.filter(|c| !c.trim().is_empty()) else {
        return "N/A".to_string();
    };
    match confidence.trim().to_lowercase().as_str() {
        level @ ("low" | "medium" | "high") => {
            let mut chars = level.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        _ => confidence.to_string(),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

pub fn full_video_url(video_path: &str) -> String {
    resolve_video_url(video_path, &BACKEND_URL)
}

/// Turns whatever the backend stored as a video location into a playable URL.
pub fn resolve_video_url(video_path: &str, backend_url: &str) -> String {
    if video_path.is_empty() {
        return String::new();
    }
    if video_path.starts_with("http") {
        return video_path.to_string();
    }
    if video_path.starts_with("/api/video/") {
        return format!("{backend_url}{video_path}");
    }

    let filename = video_path.rsplit('/').next().unwrap_or(video_path);
    if video_path.contains("species/")
        || (!video_path.starts_with('/') && !video_path.starts_with("api/"))
    {
        return format!(
            "{backend_url}/api/video/{}",
            urlencoding::encode(filename)
        );
    }

    if video_path.starts_with('/') {
        format!("{backend_url}{video_path}")
    } else {
        format!("{backend_url}/{video_path}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NarrativePart {
    Text(String),
    Timestamp(String),
}

/// Splits narrative text around `MM:SS` and `MM:SS–MM:SS` markers.
pub fn split_narrative(text: &str) -> Vec<NarrativePart> {
    const RANGE_DASH: &str = "–";

    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !is_timestamp_at(bytes, i) {
            i += 1;
            continue;
        }
        let mut end = i + 5;
        if text[end..].starts_with(RANGE_DASH) && is_timestamp_at(bytes, end + RANGE_DASH.len()) {
            end += RANGE_DASH.len() + 5;
        }
        if i > last {
            parts.push(NarrativePart::Text(text[last..i].to_string()));
        }
        parts.push(NarrativePart::Timestamp(text[i..end].to_string()));
        last = end;
        i = end;
    }

    if last < text.len() {
        parts.push(NarrativePart::Text(text[last..].to_string()));
    }
    parts
}

fn is_timestamp_at(bytes: &[u8], i: usize) -> bool {
    bytes.len() >= i + 5
        && bytes[i].is_ascii_digit()
        && bytes[i + 1].is_ascii_digit()
        && bytes[i + 2] == b':'
        && bytes[i + 3].is_ascii_digit()
        && bytes[i + 4].is_ascii_digit()
}

/// Comma separated metadata values, blanks dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolves after `ms` milliseconds on the browser event loop.
pub async fn sleep(ms: u32) {
    TimeoutFuture::new(ms).await;
}

/// Best-effort human readable text for a rejected JS promise.
pub fn js_error_message(error: &JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{error:?}"))
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND: &str = "http://localhost:8000";

    #[test]
    fn timestamps_are_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.9), "01:15");
        assert_eq!(format_timestamp(-4.0), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
        assert_eq!(format_clip_duration(12.0, 20.0), "00:08");
        assert_eq!(format_media_duration(125.0), "2:05");
    }

    #[test]
    fn score_and_confidence_labels() {
        assert_eq!(format_score(None), "N/A");
        assert_eq!(format_score(Some(7.0)), "7.00");
        assert_eq!(format_confidence(Some("HIGH")), "High");
        assert_eq!(format_confidence(Some(" medium ")), "Medium");
        assert_eq!(format_confidence(Some("uncertain")), "uncertain");
        assert_eq!(format_confidence(None), "N/A");
    }

    #[test]
    fn iso_dates_keep_the_day() {
        assert_eq!(format_iso8601_date("2024-03-09T17:45:00Z"), "2024-03-09");
        assert_eq!(format_iso8601_date("yesterday"), "yesterday");
    }

    #[test]
    fn file_size_in_megabytes() {
        assert_eq!(format_file_size(5 * 1024 * 1024 + 100 * 1024), "5.1 MB");
    }

    #[test]
    fn video_urls_resolve_against_backend() {
        assert_eq!(resolve_video_url("", BACKEND), "");
        assert_eq!(
            resolve_video_url("https://cdn.example.com/a.mp4", BACKEND),
            "https://cdn.example.com/a.mp4"
        );
        assert_eq!(
            resolve_video_url("/api/video/a.mp4", BACKEND),
            "http://localhost:8000/api/video/a.mp4"
        );
        assert_eq!(
            resolve_video_url("species/monkey clip.mp4", BACKEND),
            "http://localhost:8000/api/video/monkey%20clip.mp4"
        );
        assert_eq!(
            resolve_video_url("CBE200624_0124.mp4", BACKEND),
            "http://localhost:8000/api/video/CBE200624_0124.mp4"
        );
        assert_eq!(
            resolve_video_url("/static/a.mp4", BACKEND),
            "http://localhost:8000/static/a.mp4"
        );
        assert_eq!(
            resolve_video_url("api/other/a.mp4", BACKEND),
            "http://localhost:8000/api/other/a.mp4"
        );
    }

    #[test]
    fn narrative_timestamps_are_highlighted() {
        let parts = split_narrative("Opens at 00:05, a monkey feeds 00:12–00:30 then leaves.");
        assert_eq!(
            parts,
            vec![
                NarrativePart::Text("Opens at ".into()),
                NarrativePart::Timestamp("00:05".into()),
                NarrativePart::Text(", a monkey feeds ".into()),
                NarrativePart::Timestamp("00:12–00:30".into()),
                NarrativePart::Text(" then leaves.".into()),
            ]
        );
    }

    #[test]
    fn narrative_without_timestamps_is_one_text_part() {
        assert_eq!(
            split_narrative("Calm reef – no markers 1:2"),
            vec![NarrativePart::Text("Calm reef – no markers 1:2".into())]
        );
        assert!(split_narrative("").is_empty());
    }

    #[test]
    fn list_values_are_trimmed() {
        assert_eq!(split_list("monkey, tree ,, canopy"), vec!["monkey", "tree", "canopy"]);
    }
}
