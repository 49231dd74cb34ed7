use std::collections::HashMap;

use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlMediaElement, HtmlVideoElement};
use yew::prelude::*;

use super::{PlayerCommand, PreviewCommand};
use crate::utils::js_error_message;

/// Runs player commands against the element. The outcome of a play request
/// arrives later through `on_play`.
pub fn apply_player_commands(
    video: &HtmlVideoElement,
    commands: Vec<PlayerCommand>,
    on_play: Callback<Result<(), String>>,
) {
    for command in commands {
        match command {
            PlayerCommand::ClearSource => clear_source(video),
            PlayerCommand::Load(url) => {
                video.set_src(&url);
                video.load();
            }
            PlayerCommand::Seek(time) => video.set_current_time(time),
            PlayerCommand::Play => request_play(video, on_play.clone()),
            PlayerCommand::Pause => pause(video),
            PlayerCommand::SetVolume(volume) => video.set_volume(volume),
            PlayerCommand::SetMuted(muted) => video.set_muted(muted),
        }
    }
}

/// Runs preview commands against the tile elements they name. Tiles that are
/// not mounted any more are skipped.
pub fn apply_preview_commands(
    nodes: &HashMap<String, NodeRef>,
    commands: Vec<PreviewCommand>,
    on_play: Callback<(String, Result<(), String>)>,
) {
    for command in commands {
        let tile = match &command {
            PreviewCommand::Pause { tile }
            | PreviewCommand::AssignSource { tile, .. }
            | PreviewCommand::Restart { tile }
            | PreviewCommand::Play { tile } => tile.clone(),
        };
        let Some(video) = nodes
            .get(&tile)
            .and_then(|node| node.cast::<HtmlVideoElement>())
        else {
            continue;
        };

        match command {
            PreviewCommand::Pause { .. } => pause(&video),
            PreviewCommand::AssignSource { url, .. } => {
                video.set_preload("metadata");
                video.set_src(&url);
                video.load();
            }
            PreviewCommand::Restart { .. } => video.set_current_time(0.0),
            PreviewCommand::Play { tile } => {
                let on_play = on_play.clone();
                request_play(
                    &video,
                    Callback::from(move |result| on_play.emit((tile.clone(), result))),
                );
            }
        }
    }
}

/// Text for the `error` event of a media element.
pub fn media_error_message(media: &HtmlMediaElement) -> String {
    match media.error() {
        Some(error) if !error.message().is_empty() => error.message(),
        Some(error) => match error.code() {
            1 => "Playback aborted".to_string(),
            2 => "Network error while loading video".to_string(),
            3 => "Video could not be decoded".to_string(),
            4 => "Video format not supported".to_string(),
            code => format!("Unknown media error ({code})"),
        },
        None => "Unknown media error".to_string(),
    }
}

fn clear_source(media: &HtmlMediaElement) {
    pause(media);
    if media.remove_attribute("src").is_err() {
        log::warn!("Could not clear video source");
    }
    media.load();
}

fn pause(media: &HtmlMediaElement) {
    if let Err(e) = media.pause() {
        log::warn!("Pause failed: {}", js_error_message(&e));
    }
}

fn request_play(media: &HtmlMediaElement, on_result: Callback<Result<(), String>>) {
    match media.play() {
        Ok(promise) => spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| js_error_message(&e));
            on_result.emit(result);
        }),
        Err(e) => on_result.emit(Err(js_error_message(&e))),
    }
}
