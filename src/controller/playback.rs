//! Playback control methods

use crate::model::{PlayMode, PlayerState};

use super::{render, AppController};

impl AppController {
    pub async fn play_audio(&self, audio_id: &str) -> String {
        if self.store.play(audio_id).await {
            tracing::info!(audio_id, "Playback started");
            String::new()
        } else {
            format!("No track `{}` in the selected playlist", audio_id)
        }
    }

    /// Skip forward; random pick when the play mode is shuffle.
    pub async fn next_track(&self) -> String {
        let shuffle = self.play_mode().await == PlayMode::Shuffle;
        self.store.next(shuffle).await;
        self.queue_empty_notice().await
    }

    pub async fn previous_track(&self) -> String {
        let shuffle = self.play_mode().await == PlayMode::Shuffle;
        self.store.previous(shuffle).await;
        self.queue_empty_notice().await
    }

    pub async fn pause(&self) -> String {
        self.store.pause().await;
        self.status().await
    }

    pub async fn resume(&self) -> String {
        self.store.resume().await;
        self.status().await
    }

    pub async fn stop(&self) -> String {
        self.store.stop().await;
        self.status().await
    }

    pub async fn cycle_play_mode(&self) -> String {
        let mode = self.store.cycle_play_mode().await;
        format!("Play mode: {}", mode.label())
    }

    /// React to the audio element reaching the end of the current track.
    ///
    /// `Single` repeats, `Sequence` stops after the last track, `Shuffle` picks
    /// at random and `Loop` wraps around.
    pub async fn track_finished(&self) -> String {
        let info = self.store.playback_info().await;
        if info.state != PlayerState::Playing {
            return String::new();
        }
        tracing::debug!(mode = info.mode.label(), at_list_end = info.at_list_end, "Track finished");
        match info.mode {
            PlayMode::Single => self.store.replay().await,
            PlayMode::Sequence if info.at_list_end => {
                self.store.stop().await;
                return "End of list".to_string();
            }
            PlayMode::Sequence | PlayMode::Loop => self.store.next(false).await,
            PlayMode::Shuffle => self.store.next(true).await,
        }
        String::new()
    }

    pub async fn status(&self) -> String {
        render::status(&self.store.playback_info().await)
    }

    async fn play_mode(&self) -> PlayMode {
        self.store.playback_info().await.mode
    }

    async fn queue_empty_notice(&self) -> String {
        if self.store.playback_info().await.queue_len == 0 {
            "Nothing queued. Use `play <id>` first.".to_string()
        } else {
            String::new()
        }
    }
}
