#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;

use crate::services::upstream::Upstream;
use rocket::{Build, Rocket};

pub struct AppState {
    pub upstream: Upstream,
}

pub fn build_rocket(state: AppState, cors: rocket_cors::Cors) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(cors)
        .mount("/", routes![api::health])
        .mount(
            "/api",
            routes![
                api::search_videos,
                api::search_next_page,
                api::similar_videos,
                api::video_data,
                api::stream_video,
            ],
        )
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state()?;
    let cors = config::create_cors()?;

    let _rocket = build_rocket(state, cors).launch().await?;
    Ok(())
}
