//! Hover previews for grids of video tiles.
//!
//! Hovering a tile requests playback but the play call is deferred by a short
//! debounce. The [`PlayToken`] handed out on hover is checked again when the
//! debounce fires, so a tile that was left (or lost to another hover) in the
//! meantime never starts playing.

use std::collections::HashMap;

use super::is_benign_interruption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayToken {
    tile: String,
    generation: u64,
}

impl PlayToken {
    pub fn tile(&self) -> &str {
        &self.tile
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewCommand {
    Pause { tile: String },
    AssignSource { tile: String, url: String },
    Restart { tile: String },
    Play { tile: String },
}

#[derive(Debug, Default, Clone)]
struct TileState {
    requested: bool,
    error: Option<String>,
}

#[derive(Debug, Default)]
pub struct PreviewController {
    tiles: HashMap<String, TileState>,
    active: Option<String>,
    generation: u64,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, tile: &str) -> bool {
        self.active.as_deref() == Some(tile)
    }

    pub fn is_requested(&self, tile: &str) -> bool {
        self.tiles.get(tile).is_some_and(|state| state.requested)
    }

    pub fn error(&self, tile: &str) -> Option<&str> {
        self.tiles.get(tile).and_then(|state| state.error.as_deref())
    }

    /// Marks `tile` as wanting playback and pauses whatever else was playing.
    pub fn hover_enter(&mut self, tile: &str) -> (PlayToken, Vec<PreviewCommand>) {
        self.generation += 1;
        let mut commands = Vec::new();

        if let Some(active) = self.active.take() {
            if active != tile {
                commands.push(PreviewCommand::Pause { tile: active });
            } else {
                self.active = Some(active);
            }
        }
        for (id, state) in self.tiles.iter_mut() {
            if id != tile {
                state.requested = false;
            }
        }

        let state = self.tiles.entry(tile.to_string()).or_default();
        state.requested = true;
        state.error = None;

        let token = PlayToken {
            tile: tile.to_string(),
            generation: self.generation,
        };
        (token, commands)
    }

    /// Called once the debounce has elapsed. `None` means the request was
    /// cancelled and nothing must be done.
    pub fn resume(
        &mut self,
        token: &PlayToken,
        url: &str,
        source_assigned: bool,
    ) -> Option<Vec<PreviewCommand>> {
        if token.generation != self.generation || !self.is_requested(&token.tile) {
            log::debug!("Skipping cancelled preview for {}", token.tile);
            return None;
        }
        let tile = token.tile.clone();

        if url.is_empty() {
            if let Some(state) = self.tiles.get_mut(&tile) {
                state.requested = false;
                state.error = Some("No preview available".to_string());
            }
            return None;
        }

        let mut commands = Vec::with_capacity(3);
        if !source_assigned {
            commands.push(PreviewCommand::AssignSource {
                tile: tile.clone(),
                url: url.to_string(),
            });
        }
        commands.push(PreviewCommand::Restart { tile: tile.clone() });
        commands.push(PreviewCommand::Play { tile: tile.clone() });
        self.active = Some(tile);
        Some(commands)
    }

    pub fn hover_leave(&mut self, tile: &str) -> Vec<PreviewCommand> {
        if let Some(state) = self.tiles.get_mut(tile) {
            state.requested = false;
        }
        if self.is_active(tile) {
            self.active = None;
            vec![PreviewCommand::Pause {
                tile: tile.to_string(),
            }]
        } else {
            Vec::new()
        }
    }

    pub fn play_rejected(&mut self, tile: &str, message: &str) {
        if self.is_active(tile) {
            self.active = None;
        }
        if is_benign_interruption(message) {
            log::debug!("Preview {tile} interrupted: {message}");
            return;
        }
        log::error!("Error playing preview {tile}: {message}");
        self.tiles.entry(tile.to_string()).or_default().error =
            Some(format!("Failed to play: {message}"));
    }

    pub fn media_error(&mut self, tile: &str, message: &str) {
        log::error!("Preview {tile} failed to load: {message}");
        if self.is_active(tile) {
            self.active = None;
        }
        let state = self.tiles.entry(tile.to_string()).or_default();
        state.requested = false;
        state.error = Some(message.to_string());
    }

    pub fn dismiss_error(&mut self, tile: &str) {
        if let Some(state) = self.tiles.get_mut(tile) {
            state.error = None;
        }
    }

    pub fn ended(&mut self, tile: &str) {
        if self.is_active(tile) {
            self.active = None;
        }
    }

    /// Forgets every tile, e.g. when the page switches to another video.
    pub fn reset(&mut self) -> Vec<PreviewCommand> {
        self.generation += 1;
        self.tiles.clear();
        self.active
            .take()
            .map(|tile| vec![PreviewCommand::Pause { tile }])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:8000/api/video/a.mp4";

    fn play_commands(tile: &str, assign: bool) -> Vec<PreviewCommand> {
        let mut commands = Vec::new();
        if assign {
            commands.push(PreviewCommand::AssignSource {
                tile: tile.into(),
                url: URL.into(),
            });
        }
        commands.push(PreviewCommand::Restart { tile: tile.into() });
        commands.push(PreviewCommand::Play { tile: tile.into() });
        commands
    }

    #[test]
    fn hover_plays_after_debounce() {
        let mut previews = PreviewController::new();
        let (token, commands) = previews.hover_enter("a");
        assert!(commands.is_empty());
        assert!(previews.is_requested("a"));
        assert!(!previews.is_active("a"));

        assert_eq!(previews.resume(&token, URL, false), Some(play_commands("a", true)));
        assert!(previews.is_active("a"));
    }

    #[test]
    fn assigned_source_is_not_reloaded() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        assert_eq!(previews.resume(&token, URL, true), Some(play_commands("a", false)));
    }

    #[test]
    fn leaving_before_debounce_cancels_play() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        assert!(previews.hover_leave("a").is_empty());
        assert_eq!(previews.resume(&token, URL, true), None);
        assert_eq!(previews.active(), None);
    }

    #[test]
    fn newer_hover_supersedes_pending_one() {
        let mut previews = PreviewController::new();
        let (token_a, _) = previews.hover_enter("a");
        let (token_b, _) = previews.hover_enter("b");

        assert_eq!(previews.resume(&token_a, URL, true), None);
        assert!(!previews.is_requested("a"));
        assert!(previews.resume(&token_b, URL, true).is_some());
        assert_eq!(previews.active(), Some("b"));
    }

    #[test]
    fn hovering_another_tile_pauses_the_active_one() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        previews.resume(&token, URL, false);

        let (_, commands) = previews.hover_enter("b");
        assert_eq!(commands, vec![PreviewCommand::Pause { tile: "a".into() }]);
        assert_eq!(previews.active(), None);
    }

    #[test]
    fn leaving_active_tile_pauses_it() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        previews.resume(&token, URL, false);
        assert_eq!(
            previews.hover_leave("a"),
            vec![PreviewCommand::Pause { tile: "a".into() }]
        );
        assert_eq!(previews.active(), None);
    }

    #[test]
    fn interrupted_rejections_are_filtered() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        previews.resume(&token, URL, false);

        previews.play_rejected("a", "The play() request was interrupted by a call to pause()");
        assert_eq!(previews.error("a"), None);
        assert_eq!(previews.active(), None);

        previews.play_rejected("a", "NotAllowedError");
        assert_eq!(previews.error("a"), Some("Failed to play: NotAllowedError"));
        previews.dismiss_error("a");
        assert_eq!(previews.error("a"), None);
    }

    #[test]
    fn missing_url_reports_error_instead_of_playing() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        assert_eq!(previews.resume(&token, "", false), None);
        assert_eq!(previews.error("a"), Some("No preview available"));
    }

    #[test]
    fn media_errors_are_kept_per_tile() {
        let mut previews = PreviewController::new();
        previews.media_error("b", "Error loading video");
        assert_eq!(previews.error("b"), Some("Error loading video"));
        assert_eq!(previews.error("a"), None);
    }

    #[test]
    fn reset_pauses_and_invalidates_everything() {
        let mut previews = PreviewController::new();
        let (token, _) = previews.hover_enter("a");
        previews.resume(&token, URL, false);
        let (pending, _) = previews.hover_enter("a");

        assert_eq!(previews.reset(), vec![PreviewCommand::Pause { tile: "a".into() }]);
        assert_eq!(previews.resume(&pending, URL, true), None);
        assert!(!previews.is_requested("a"));
    }
}
