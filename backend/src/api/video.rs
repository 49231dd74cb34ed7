use crate::models::{ProxyError, RangeHeader, VideoStream};
use crate::services::upstream::video_stream_path;
use crate::AppState;
use futures::TryStreamExt;
use log::{error, info};
use rocket::http::uri::fmt::Path;
use rocket::http::uri::Segments;
use rocket::http::Status;
use rocket::{get, State};
use std::io;
use tokio_util::io::StreamReader;

#[get("/video/<filename..>")]
pub async fn stream_video(
    filename: Segments<'_, Path>,
    range: RangeHeader,
    state: &State<AppState>,
) -> Result<VideoStream, ProxyError> {
    let filename = filename.collect::<Vec<_>>().join("/");
    if filename.is_empty() {
        return Err(ProxyError::Text(Status::BadRequest, "Filename is required".to_string()));
    }

    let path = video_stream_path(&filename);
    info!("Streaming video from backend: {path} with range {}", range.0);

    let response = state
        .upstream
        .get_range(&path, &range.0)
        .await
        .map_err(|e| stream_error(&e))?;

    let status = response.status();
    if !status.is_success() && status.as_u16() != 206 {
        let reason = status.canonical_reason().unwrap_or_default();
        error!("Failed to fetch video: {reason} ({})", status.as_u16());
        return Err(ProxyError::Text(
            Status::new(status.as_u16()),
            format!("Failed to fetch video: {reason}"),
        ));
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header("Content-Type").unwrap_or_else(|| "video/mp4".to_string());
    let content_range = header("Content-Range");
    let content_length = response.content_length();
    info!(
        "Video response {}: length {:?}, range {:?}",
        status.as_u16(),
        content_length,
        content_range
    );

    let bytes = response
        .bytes_stream()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    let body = StreamReader::new(Box::pin(bytes));

    Ok(VideoStream {
        status: Status::new(status.as_u16()),
        content_type,
        content_length,
        content_range,
        body: Box::new(body),
    })
}

fn stream_error(e: &reqwest::Error) -> ProxyError {
    error!("Error streaming video: {e}");
    ProxyError::Text(Status::InternalServerError, "Error streaming video".to_string())
}
