use crate::api::relay::relay_json;
use crate::models::ProxyError;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde_json::Value;

#[get("/similar-videos/<id>")]
pub async fn similar_videos(id: &str, state: &State<AppState>) -> Result<Json<Value>, ProxyError> {
    info!("Fetching similar videos for video ID: {id}");
    let path = format!("/api/similar-videos/{}", urlencoding::encode(id));
    let data = relay_json("Similar videos", state.upstream.get_json(&path).await).await?;

    let count = data
        .get("similar_videos")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    info!("Successfully fetched similar videos: {count} results");
    Ok(data)
}

#[get("/videos/<id>")]
pub async fn video_data(id: &str, state: &State<AppState>) -> Result<Json<Value>, ProxyError> {
    let path = format!("/api/videos/{}", urlencoding::encode(id));
    relay_json("Video data", state.upstream.get_json(&path).await).await
}
