use crate::models::ProxyError;
use crate::services::upstream::error_details;
use log::{error, info};
use reqwest::Response;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

/// Relays an upstream JSON answer. `api` names the endpoint in error messages.
pub async fn relay_json(
    api: &str,
    outcome: reqwest::Result<Response>,
) -> Result<Json<Value>, ProxyError> {
    let response = outcome.map_err(|e| transport_error(api, &e))?;
    let status = response.status();
    info!("{api} backend response status: {status}");

    if !status.is_success() {
        let details = match response.text().await {
            Ok(body) => error_details(&body),
            Err(_) => "Could not parse error response".to_string(),
        };
        error!("{api} API returned status {}: {details}", status.as_u16());
        return Err(ProxyError::json(
            Status::new(status.as_u16()),
            format!("{api} API returned status {}", status.as_u16()),
            Some(details),
        ));
    }

    response
        .json::<Value>()
        .await
        .map(Json)
        .map_err(|e| transport_error(api, &e))
}

fn transport_error(api: &str, e: &reqwest::Error) -> ProxyError {
    error!("{api} API error: {e}");
    ProxyError::json(
        Status::InternalServerError,
        format!("Failed to process {} request", api.to_lowercase()),
        Some(e.to_string()),
    )
}
