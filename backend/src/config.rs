use crate::models::RangeHeader;
use crate::services::upstream::Upstream;
use crate::AppState;
use anyhow::{Context, Result};
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::time::Duration;
use url::Url;

lazy_static! {
    pub static ref BACKEND_URL: String = env::var("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:5000".to_string());
    pub static ref FRONTEND_ORIGINS: Vec<String> = parse_origins(
        &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:8080".to_string())
    );
    pub static ref UPSTREAM_TIMEOUT_SECS: u64 = env::var("UPSTREAM_TIMEOUT_SECS")
        .ok()
        .and_then(|secs| secs.parse().ok())
        .unwrap_or(60);
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting footage proxy...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

const UPSTREAM_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn create_upstream(base_url: &str) -> Result<Upstream> {
    build_upstream(base_url, Duration::from_secs(*UPSTREAM_TIMEOUT_SECS))
}

pub fn build_upstream(base_url: &str, request_timeout: Duration) -> Result<Upstream> {
    let base = Url::parse(base_url).with_context(|| format!("Invalid BACKEND_URL: {base_url}"))?;
    let client = reqwest::Client::builder()
        .connect_timeout(UPSTREAM_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let stream_client = reqwest::Client::builder()
        .connect_timeout(UPSTREAM_CONNECT_TIMEOUT)
        .build()
        .context("Failed to build streaming HTTP client")?;
    Ok(Upstream::new(client, stream_client, base.as_str()))
}

pub fn create_app_state() -> Result<AppState> {
    info!("Proxying to backend at: {}", &*BACKEND_URL);
    Ok(AppState {
        upstream: create_upstream(&BACKEND_URL)?,
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    info!("Allowing CORS origins: {:?}", *FRONTEND_ORIGINS);

    let cors = CorsOptions {
        expose_headers: ["Accept-Ranges", "Content-Length", "Content-Range"]
            .iter()
            .map(|header| header.to_string())
            .collect(),
        ..CorsOptions::default()
    }
    .allowed_origins(AllowedOrigins::some_exact(&FRONTEND_ORIGINS[..]))
    .allowed_methods(
        vec![Method::Get, Method::Post, Method::Options]
            .into_iter()
            .map(From::from)
            .collect(),
    )
    .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type", "Range"]))
    .allow_credentials(true)
    .to_cors()
    .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RangeHeader {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let range = request
            .headers()
            .get_one("Range")
            .filter(|range| !range.trim().is_empty())
            .unwrap_or(RangeHeader::FROM_START);
        Outcome::Success(RangeHeader(range.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://localhost:8080/ , https://footage.example.com,,"),
            vec!["http://localhost:8080", "https://footage.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn invalid_backend_url_is_rejected() {
        assert!(create_upstream("not a url").is_err());
        let upstream = create_upstream("http://127.0.0.1:5000").unwrap();
        assert_eq!(upstream.url("/api/videos/a"), "http://127.0.0.1:5000/api/videos/a");
    }
}
