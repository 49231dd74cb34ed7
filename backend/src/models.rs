use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::tokio::io::AsyncRead;
use rocket::{response, Response};
use std::io::Cursor;
use thiserror::Error;

/// `Range` request header, `bytes=0-` when the client sent none.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeHeader(pub String);

impl RangeHeader {
    pub const FROM_START: &'static str = "bytes=0-";
}

/// JSON error body returned by every proxied JSON route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Answered with an `ErrorResponse` body.
    #[error("{error}")]
    Json {
        status: Status,
        error: String,
        details: Option<String>,
    },
    /// Answered with a plain-text body, used by the video stream.
    #[error("{1}")]
    Text(Status, String),
}

impl ProxyError {
    pub fn json(status: Status, error: impl Into<String>, details: Option<String>) -> Self {
        ProxyError::Json {
            status,
            error: error.into(),
            details,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            ProxyError::Json { status, .. } | ProxyError::Text(status, _) => *status,
        }
    }
}

impl<'r> Responder<'r, 'static> for ProxyError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let (content_type, body) = match self {
            ProxyError::Json { error, details, .. } => {
                let body = serde_json::to_string(&ErrorResponse { error, details })
                    .map_err(|_| Status::InternalServerError)?;
                (ContentType::JSON, body)
            }
            ProxyError::Text(_, message) => (ContentType::Plain, message),
        };

        Response::build()
            .status(status)
            .header(content_type)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

/// Upstream video bytes, read as they arrive.
pub type VideoBody = Box<dyn AsyncRead + Send + Unpin>;

/// A slice of an upstream video, relayed with its range headers.
pub struct VideoStream {
    pub status: Status,
    pub content_type: String,
    pub content_length: Option<u64>,
    pub content_range: Option<String>,
    pub body: VideoBody,
}

impl<'r> Responder<'r, 'static> for VideoStream {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut response = Response::build();
        response
            .status(self.status)
            .raw_header("Content-Type", self.content_type)
            .raw_header("Accept-Ranges", "bytes");
        if let Some(length) = self.content_length {
            response.raw_header("Content-Length", length.to_string());
        }
        if let Some(range) = self.content_range {
            response.raw_header("Content-Range", range);
        }
        response.streamed_body(self.body).ok()
    }
}
