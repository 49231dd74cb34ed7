//! State machine for the primary detail-page player.
//!
//! The machine never touches the DOM. Every transition returns the commands
//! the `<video>` element has to execute, which keeps source swaps, seeks and
//! play requests in one place.

use crate::models::Clip;

use super::is_benign_interruption;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    ClearSource,
    Load(String),
    Seek(f64),
    Play,
    Pause,
    SetVolume(f64),
    SetMuted(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerPhase {
    Idle,
    Loading { source: String },
    Ready { source: String },
    Playing { source: String },
    Failed { source: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMachine {
    video_id: Option<String>,
    phase: PlayerPhase,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    selected_clip: Option<Clip>,
    clip_bounded: bool,
    scrubbing: bool,
    error: Option<String>,
}

impl Default for PlayerMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerMachine {
    pub fn new() -> Self {
        Self {
            video_id: None,
            phase: PlayerPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            selected_clip: None,
            clip_bounded: false,
            scrubbing: false,
            error: None,
        }
    }

    pub fn phase(&self) -> &PlayerPhase {
        &self.phase
    }

    pub fn source(&self) -> Option<&str> {
        match &self.phase {
            PlayerPhase::Idle => None,
            PlayerPhase::Loading { source }
            | PlayerPhase::Ready { source }
            | PlayerPhase::Playing { source } => Some(source),
            PlayerPhase::Failed { source } => source.as_deref(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(
            self.phase,
            PlayerPhase::Ready { .. } | PlayerPhase::Playing { .. }
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PlayerPhase::Loading { .. })
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PlayerPhase::Playing { .. })
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selected_clip.as_ref()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Binds the player to a video. Reopening the same video and source is a
    /// no-op unless the last load failed.
    pub fn open(&mut self, video_id: &str, source: &str) -> Vec<PlayerCommand> {
        if self.video_id.as_deref() == Some(video_id) && self.source() == Some(source) {
            return if self.can_retry() { self.retry() } else { Vec::new() };
        }

        self.reset();
        self.video_id = Some(video_id.to_string());

        if source.is_empty() {
            self.phase = PlayerPhase::Failed { source: None };
            self.error = Some(
                "No video URL available. This may be a placeholder or incomplete video record."
                    .to_string(),
            );
            return vec![PlayerCommand::ClearSource];
        }

        log::debug!("Loading main video {video_id} from {source}");
        self.phase = PlayerPhase::Loading {
            source: source.to_string(),
        };
        vec![
            PlayerCommand::ClearSource,
            PlayerCommand::Load(source.to_string()),
        ]
    }

    fn reset(&mut self) {
        let volume = self.volume;
        let muted = self.muted;
        let clip_bounded = self.clip_bounded;
        *self = Self::new();
        self.volume = volume;
        self.muted = muted;
        self.clip_bounded = clip_bounded;
    }

    pub fn metadata_loaded(&mut self, duration: f64) -> Vec<PlayerCommand> {
        let PlayerPhase::Loading { source } = &self.phase else {
            return Vec::new();
        };
        self.phase = PlayerPhase::Ready {
            source: source.clone(),
        };
        self.duration = if duration.is_finite() { duration } else { 0.0 };

        match &self.selected_clip {
            Some(clip) => {
                self.current_time = clip.start;
                vec![PlayerCommand::Seek(clip.start)]
            }
            None => Vec::new(),
        }
    }

    /// Seeks within the already loaded source; loading defers the seek.
    pub fn select_clip(&mut self, clip: Clip) -> Vec<PlayerCommand> {
        let start = clip.start;
        self.selected_clip = Some(clip);
        if self.is_loaded() {
            self.current_time = start;
            vec![PlayerCommand::Seek(start)]
        } else {
            Vec::new()
        }
    }

    pub fn toggle_play(&mut self) -> Vec<PlayerCommand> {
        match &self.phase {
            PlayerPhase::Ready { .. } => {
                if let Some(clip) = self.selected_clip.as_ref().filter(|_| self.clip_bounded) {
                    if self.current_time >= clip.end || self.current_time < clip.start {
                        self.current_time = clip.start;
                        return vec![PlayerCommand::Seek(clip.start), PlayerCommand::Play];
                    }
                }
                vec![PlayerCommand::Play]
            }
            PlayerPhase::Playing { source } => {
                self.phase = PlayerPhase::Ready {
                    source: source.clone(),
                };
                vec![PlayerCommand::Pause]
            }
            _ => Vec::new(),
        }
    }

    /// The element reported that playback actually started.
    pub fn play_started(&mut self) {
        if let PlayerPhase::Ready { source } = &self.phase {
            self.phase = PlayerPhase::Playing {
                source: source.clone(),
            };
        }
    }

    pub fn paused(&mut self) {
        if let PlayerPhase::Playing { source } = &self.phase {
            self.phase = PlayerPhase::Ready {
                source: source.clone(),
            };
        }
    }

    pub fn ended(&mut self) {
        self.paused();
    }

    pub fn play_rejected(&mut self, message: &str) {
        self.paused();
        if is_benign_interruption(message) {
            log::debug!("Ignoring interrupted play request: {message}");
            return;
        }
        log::error!("Error playing video: {message}");
        self.error = Some("Failed to play video. Please try again.".to_string());
    }

    pub fn time_update(&mut self, time: f64) -> Vec<PlayerCommand> {
        if !self.scrubbing {
            self.current_time = time;
        }

        if !self.clip_bounded {
            return Vec::new();
        }
        match (&self.phase, &self.selected_clip) {
            (PlayerPhase::Playing { source }, Some(clip)) if time >= clip.end => {
                self.phase = PlayerPhase::Ready {
                    source: source.clone(),
                };
                vec![PlayerCommand::Pause]
            }
            _ => Vec::new(),
        }
    }

    pub fn media_error(&mut self, message: &str) {
        log::error!("Video error: {message}");
        self.phase = PlayerPhase::Failed {
            source: self.source().map(str::to_string),
        };
        self.error = Some(format!("Error loading video: {message}"));
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn can_retry(&self) -> bool {
        matches!(self.phase, PlayerPhase::Failed { source: Some(_) })
    }

    /// Reloads a failed source. The selected clip is kept and seeked to once
    /// metadata arrives again.
    pub fn retry(&mut self) -> Vec<PlayerCommand> {
        let PlayerPhase::Failed {
            source: Some(source),
        } = &self.phase
        else {
            return Vec::new();
        };
        let source = source.clone();
        log::debug!("Retrying video load from {source}");
        self.phase = PlayerPhase::Loading {
            source: source.clone(),
        };
        self.error = None;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.scrubbing = false;
        vec![PlayerCommand::ClearSource, PlayerCommand::Load(source)]
    }

    /// Seeks to a fraction of the timeline, as picked on the progress bar.
    pub fn seek_fraction(&mut self, fraction: f64) -> Vec<PlayerCommand> {
        if !self.is_loaded() || self.duration <= 0.0 || !fraction.is_finite() {
            return Vec::new();
        }
        let time = fraction.clamp(0.0, 1.0) * self.duration;
        self.current_time = time;
        vec![PlayerCommand::Seek(time)]
    }

    pub fn skip(&mut self, delta: f64) -> Vec<PlayerCommand> {
        if !self.is_loaded() {
            return Vec::new();
        }
        let time = (self.current_time + delta).clamp(0.0, self.duration.max(0.0));
        self.current_time = time;
        vec![PlayerCommand::Seek(time)]
    }

    pub fn set_volume(&mut self, volume: f64) -> Vec<PlayerCommand> {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.volume = volume;
        self.muted = volume == 0.0;
        vec![
            PlayerCommand::SetVolume(volume),
            PlayerCommand::SetMuted(self.muted),
        ]
    }

    pub fn toggle_mute(&mut self) -> Vec<PlayerCommand> {
        self.muted = !self.muted;
        vec![PlayerCommand::SetMuted(self.muted)]
    }

    /// Mirrors volume changes made through the element itself.
    pub fn volume_changed(&mut self, volume: f64, muted: bool) {
        self.volume = volume;
        self.muted = muted;
    }

    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
    }

    pub fn end_scrub(&mut self) {
        self.scrubbing = false;
    }

    pub fn set_clip_bounded(&mut self, bounded: bool) {
        self.clip_bounded = bounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_A: &str = "http://localhost:8000/api/video/A.mp4";
    const SOURCE_B: &str = "http://localhost:8000/api/video/B.mp4";

    fn clip(start: f64, end: f64) -> Clip {
        Clip {
            start,
            end,
            score: Some(1.0),
            confidence: "high".into(),
            thumbnail_url: String::new(),
        }
    }

    fn ready_player() -> PlayerMachine {
        let mut player = PlayerMachine::new();
        player.open("a", SOURCE_A);
        player.metadata_loaded(120.0);
        player
    }

    #[test]
    fn open_loads_source_and_waits_for_metadata() {
        let mut player = PlayerMachine::new();
        let commands = player.open("a", SOURCE_A);
        assert_eq!(
            commands,
            vec![
                PlayerCommand::ClearSource,
                PlayerCommand::Load(SOURCE_A.into())
            ]
        );
        assert!(player.is_loading());
        assert!(player.toggle_play().is_empty());

        player.metadata_loaded(42.5);
        assert!(player.is_loaded());
        assert_eq!(player.duration(), 42.5);
    }

    #[test]
    fn reopening_same_video_is_noop() {
        let mut player = ready_player();
        assert!(player.open("a", SOURCE_A).is_empty());
        assert!(player.is_loaded());
    }

    #[test]
    fn selecting_clip_on_loaded_source_only_seeks() {
        let mut player = ready_player();
        let commands = player.select_clip(clip(12.0, 20.0));
        assert_eq!(commands, vec![PlayerCommand::Seek(12.0)]);
        assert_eq!(player.current_time(), 12.0);
        assert_eq!(player.source(), Some(SOURCE_A));
    }

    #[test]
    fn switching_video_reloads_before_seeking() {
        let mut player = ready_player();
        player.select_clip(clip(12.0, 20.0));

        let commands = player.open("b", SOURCE_B);
        assert_eq!(
            commands,
            vec![
                PlayerCommand::ClearSource,
                PlayerCommand::Load(SOURCE_B.into())
            ]
        );
        assert!(player.selected_clip().is_none());

        assert!(player.select_clip(clip(30.0, 40.0)).is_empty());
        assert_eq!(player.metadata_loaded(90.0), vec![PlayerCommand::Seek(30.0)]);
        assert_eq!(player.current_time(), 30.0);
    }

    #[test]
    fn play_and_pause_follow_element_events() {
        let mut player = ready_player();
        assert_eq!(player.toggle_play(), vec![PlayerCommand::Play]);
        assert!(!player.is_playing());
        player.play_started();
        assert!(player.is_playing());

        assert_eq!(player.toggle_play(), vec![PlayerCommand::Pause]);
        assert!(!player.is_playing());
        assert!(player.is_loaded());
    }

    #[test]
    fn clip_bounded_playback_pauses_at_clip_end() {
        let mut player = ready_player();
        player.set_clip_bounded(true);
        player.select_clip(clip(12.0, 20.0));
        player.toggle_play();
        player.play_started();

        assert!(player.time_update(15.0).is_empty());
        assert_eq!(player.time_update(20.1), vec![PlayerCommand::Pause]);
        assert!(!player.is_playing());

        // Restarting from past the end jumps back to the clip start.
        assert_eq!(
            player.toggle_play(),
            vec![PlayerCommand::Seek(12.0), PlayerCommand::Play]
        );
    }

    #[test]
    fn unbounded_playback_runs_past_clip_end() {
        let mut player = ready_player();
        player.select_clip(clip(12.0, 20.0));
        player.toggle_play();
        player.play_started();
        assert!(player.time_update(25.0).is_empty());
        assert!(player.is_playing());
    }

    #[test]
    fn scrubbing_freezes_reported_time() {
        let mut player = ready_player();
        player.begin_scrub();
        player.seek_fraction(0.5);
        player.time_update(3.0);
        assert_eq!(player.current_time(), 60.0);
        player.end_scrub();
        player.time_update(61.0);
        assert_eq!(player.current_time(), 61.0);
    }

    #[test]
    fn skip_is_clamped_to_timeline() {
        let mut player = ready_player();
        assert_eq!(player.skip(-10.0), vec![PlayerCommand::Seek(0.0)]);
        player.time_update(115.0);
        assert_eq!(player.skip(10.0), vec![PlayerCommand::Seek(120.0)]);
    }

    #[test]
    fn interrupted_play_is_not_reported() {
        let mut player = ready_player();
        player.toggle_play();
        player.play_rejected("The play() request was interrupted by a new load request.");
        assert_eq!(player.error(), None);

        player.play_rejected("NotAllowedError: play() failed because the user didn't interact");
        assert_eq!(player.error(), Some("Failed to play video. Please try again."));
        player.dismiss_error();
        assert_eq!(player.error(), None);
    }

    #[test]
    fn media_error_fails_without_losing_source() {
        let mut player = ready_player();
        player.media_error("MEDIA_ERR_SRC_NOT_SUPPORTED");
        assert_eq!(
            player.phase(),
            &PlayerPhase::Failed {
                source: Some(SOURCE_A.into())
            }
        );
        assert!(player.error().unwrap().contains("MEDIA_ERR_SRC_NOT_SUPPORTED"));
        assert!(player.toggle_play().is_empty());
    }

    #[test]
    fn missing_source_fails_with_message() {
        let mut player = PlayerMachine::new();
        assert_eq!(player.open("ghost", ""), vec![PlayerCommand::ClearSource]);
        assert!(player.error().unwrap().starts_with("No video URL available"));
    }

    #[test]
    fn zero_volume_mutes_and_survives_reload() {
        let mut player = ready_player();
        assert_eq!(
            player.set_volume(0.0),
            vec![PlayerCommand::SetVolume(0.0), PlayerCommand::SetMuted(true)]
        );
        player.open("b", SOURCE_B);
        assert!(player.is_muted());
        assert_eq!(player.toggle_mute(), vec![PlayerCommand::SetMuted(false)]);
    }

    #[test]
    fn failed_source_can_be_reloaded() {
        let mut player = ready_player();
        player.select_clip(clip(30.0, 45.0));
        player.media_error("MEDIA_ERR_NETWORK");
        player.dismiss_error();
        assert!(player.can_retry());

        assert_eq!(
            player.open("a", SOURCE_A),
            vec![
                PlayerCommand::ClearSource,
                PlayerCommand::Load(SOURCE_A.into())
            ]
        );
        assert!(player.is_loading());
        assert_eq!(player.error(), None);
        assert_eq!(player.metadata_loaded(120.0), vec![PlayerCommand::Seek(30.0)]);
        assert!(!player.can_retry());
        assert!(player.retry().is_empty());
    }

    #[test]
    fn missing_source_cannot_be_retried() {
        let mut player = PlayerMachine::new();
        player.open("ghost", "");
        assert!(!player.can_retry());
        assert!(player.retry().is_empty());
    }
}
