use crate::api::relay::relay_json;
use crate::models::ProxyError;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};
use serde_json::Value;

#[post("/search", format = "json", data = "<body>")]
pub async fn search_videos(body: Json<Value>, state: &State<AppState>) -> Result<Json<Value>, ProxyError> {
    info!(
        "Search request: {}",
        body.get("query_text").and_then(Value::as_str).unwrap_or_default()
    );
    relay_json("Search", state.upstream.post_json("/api/search", &body).await).await
}

#[post("/search/next", format = "json", data = "<body>")]
pub async fn search_next_page(
    body: Json<Value>,
    state: &State<AppState>,
) -> Result<Json<Value>, ProxyError> {
    relay_json("Next page", state.upstream.post_json("/api/search/next", &body).await).await
}
