use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Failed to connect to backend: {0}")]
    Network(String),
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        details: Option<String>,
    },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its body text.
    /// `action` names the request in the fallback message, e.g. "Search".
    pub fn from_response(status: u16, body: &str, action: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return ApiError::Http {
                status,
                message: "Failed to parse error response".to_string(),
                details: Some("Unknown error".to_string()),
            };
        };
        let parsed: Option<ErrorResponse> = serde_json::from_value(value).ok();

        let message = parsed
            .as_ref()
            .map(|body| body.error.clone())
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| format!("{action} failed with status: {status}"));
        let details = parsed
            .as_ref()
            .and_then(ErrorResponse::details_text)
            .unwrap_or_else(|| "Unknown error".to_string());

        ApiError::Http {
            status,
            message,
            details: Some(details),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::Http { details, .. } => details.clone(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub async fn get_json<T: DeserializeOwned>(url: &str, action: &str) -> Result<T, ApiError> {
    log::debug!("GET {url}");
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response, action).await
}

pub async fn post_json<B, T>(url: &str, body: &B, action: &str) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    log::debug!("POST {url}");
    let response = Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response, action).await
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, ApiError> {
    let status = response.status();
    log::debug!("{action} response status: {status}");

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status, &body, action);
        log::error!("{action} API error: {error} ({body})");
        return Err(error);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_body_is_used() {
        let error = ApiError::from_response(
            502,
            r#"{"error": "Similar videos API returned status 502", "details": "upstream down"}"#,
            "Similar videos",
        );
        assert_eq!(error.message(), "Similar videos API returned status 502");
        assert_eq!(error.details().as_deref(), Some("upstream down"));
        assert_eq!(error.status(), Some(502));
    }

    #[test]
    fn missing_error_field_falls_back_to_status() {
        let error = ApiError::from_response(500, r#"{"detail": "x"}"#, "Search");
        assert_eq!(error.message(), "Search failed with status: 500");
        assert_eq!(error.details().as_deref(), Some("Unknown error"));
    }

    #[test]
    fn unparseable_error_body() {
        let error = ApiError::from_response(500, "<html>oops</html>", "Search");
        assert_eq!(error.message(), "Failed to parse error response");
        assert_eq!(error.details().as_deref(), Some("Unknown error"));
    }

    #[test]
    fn transport_errors_have_no_details() {
        let error = ApiError::Network("connection refused".into());
        assert_eq!(
            error.message(),
            "Failed to connect to backend: connection refused"
        );
        assert_eq!(error.details(), None);
        assert_eq!(error.status(), None);
    }
}
