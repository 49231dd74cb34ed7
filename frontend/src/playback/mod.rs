//! Keeps `<video>` elements in step with what the user asked for.

mod element;
mod player;
mod preview;
mod tiles;

pub use element::{apply_player_commands, apply_preview_commands, media_error_message};
pub use player::{PlayerCommand, PlayerMachine, PlayerPhase};
pub use preview::{PlayToken, PreviewCommand, PreviewController};
pub use tiles::{use_preview_tiles, PreviewTiles};

/// A play() rejection caused by a newer load or pause, not by the media.
pub fn is_benign_interruption(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("interrupted") || message.contains("aborted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interruptions_are_benign() {
        assert!(is_benign_interruption(
            "AbortError: The play() request was interrupted by a call to pause()."
        ));
        assert!(is_benign_interruption("The fetching process was aborted"));
        assert!(!is_benign_interruption("NotSupportedError: no supported sources"));
    }
}
