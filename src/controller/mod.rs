//! Controller module - Command handling on top of the player store
//!
//! This module contains the application controller that turns console commands
//! into store operations and formats the results for display.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Command line parsing and dispatch
//! - `playback`: Transport control methods and the track-end policy
//! - `library`: Playlist and audio list management
//! - `render`: Text rendering of lists and the now-playing line

mod input;
mod playback;
mod library;
mod render;

pub use input::{Command, CommandError};
pub use render::format_duration;

use crate::model::{LibraryError, PlayerStore};

#[derive(Clone)]
pub struct AppController {
    pub(crate) store: PlayerStore,
}

impl AppController {
    pub fn new(store: PlayerStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    pub(crate) fn format_error(error: &LibraryError) -> String {
        match error {
            LibraryError::Network(_) => {
                "Error: Network error. Check that the library server is reachable.".to_string()
            }
            LibraryError::Server(msg) if msg.is_empty() => "Error: request rejected by server".to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Consume the new-track signal and describe what started playing.
    ///
    /// This is the console's stand-in for restarting an audio element at position zero.
    pub async fn acknowledge_track_change(&self) -> Option<String> {
        if !self.store.take_playing_audio_reset().await {
            return None;
        }
        let info = self.store.playback_info().await;
        info.current.as_ref().map(render::now_playing_line)
    }
}
