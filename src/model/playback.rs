//! Playback session state: the "now playing" queue and transport rules

use rand::Rng;

use super::types::{AudioItem, PlayMode, PlayerState, PlaylistRef};

/// The now-playing queue and cursor.
///
/// The queue is a snapshot taken by [`PlaybackSession::start`]; it never follows
/// later changes to the selected list.
#[derive(Clone, Debug, Default)]
pub struct PlaybackSession {
    playing_audio_list: Vec<AudioItem>,
    playing_playlist: PlaylistRef,
    playing_audio_index: Option<usize>,
    player_state: PlayerState,
    play_mode: PlayMode,
    playing_audio_reset: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with `list` and start playing the item at `index`.
    ///
    /// Returns `false` and leaves the session untouched when `index` is out of range.
    pub fn start(&mut self, list: Vec<AudioItem>, playlist: PlaylistRef, index: usize) -> bool {
        if index >= list.len() {
            return false;
        }
        self.playing_audio_list = list;
        self.playing_playlist = playlist;
        self.playing_audio_index = Some(index);
        self.player_state = PlayerState::Playing;
        self.playing_audio_reset = true;
        true
    }

    pub fn next(&mut self, shuffle: bool) {
        self.next_with(shuffle, &mut rand::rng());
    }

    pub fn previous(&mut self, shuffle: bool) {
        self.previous_with(shuffle, &mut rand::rng());
    }

    pub fn next_with<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) {
        let len = self.playing_audio_list.len();
        if len == 0 {
            return;
        }
        let index = if shuffle {
            rng.random_range(0..len)
        } else {
            match self.playing_audio_index {
                Some(i) => (i + 1) % len,
                None => 0,
            }
        };
        self.jump_to(index);
    }

    pub fn previous_with<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) {
        let len = self.playing_audio_list.len();
        if len == 0 {
            return;
        }
        let index = if shuffle {
            rng.random_range(0..len)
        } else {
            match self.playing_audio_index {
                Some(i) => (i + len - 1) % len,
                None => len - 1,
            }
        };
        self.jump_to(index);
    }

    /// Restart the current track from the beginning.
    pub fn replay(&mut self) {
        if let Some(index) = self.valid_index() {
            self.jump_to(index);
        }
    }

    fn jump_to(&mut self, index: usize) {
        self.playing_audio_index = Some(index);
        self.player_state = PlayerState::Playing;
        self.playing_audio_reset = true;
    }

    pub fn pause(&mut self) {
        if self.valid_index().is_some() {
            self.player_state = PlayerState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.valid_index().is_some() {
            self.player_state = PlayerState::Playing;
        }
    }

    pub fn stop(&mut self) {
        self.player_state = PlayerState::Stopped;
    }

    pub fn cycle_play_mode(&mut self) -> PlayMode {
        self.play_mode = self.play_mode.next();
        self.play_mode
    }

    /// Read and clear the "new track selected" signal.
    pub fn take_playing_audio_reset(&mut self) -> bool {
        std::mem::take(&mut self.playing_audio_reset)
    }

    pub fn current_item(&self) -> Option<&AudioItem> {
        self.playing_audio_index
            .and_then(|i| self.playing_audio_list.get(i))
    }

    pub fn at_list_end(&self) -> bool {
        match self.playing_audio_index {
            Some(i) => i + 1 == self.playing_audio_list.len(),
            None => false,
        }
    }

    fn valid_index(&self) -> Option<usize> {
        self.playing_audio_index
            .filter(|&i| i < self.playing_audio_list.len())
    }

    pub fn playing_audio_list(&self) -> &[AudioItem] {
        &self.playing_audio_list
    }

    pub fn playing_playlist(&self) -> &PlaylistRef {
        &self.playing_playlist
    }

    pub fn playing_audio_index(&self) -> Option<usize> {
        self.playing_audio_index
    }

    pub fn player_state(&self) -> PlayerState {
        self.player_state
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn playing_audio_reset(&self) -> bool {
        self.playing_audio_reset
    }

    pub fn info(&self) -> PlaybackInfo {
        PlaybackInfo {
            current: self.current_item().cloned(),
            playing_playlist: self.playing_playlist.clone(),
            index: self.playing_audio_index,
            queue_len: self.playing_audio_list.len(),
            at_list_end: self.at_list_end(),
            state: self.player_state,
            mode: self.play_mode,
            reset_pending: self.playing_audio_reset,
        }
    }
}

/// Complete playback information for rendering the control bar
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackInfo {
    pub current: Option<AudioItem>,
    pub playing_playlist: PlaylistRef,
    pub index: Option<usize>,
    pub queue_len: usize,
    pub at_list_end: bool,
    pub state: PlayerState,
    pub mode: PlayMode,
    pub reset_pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(id: &str) -> AudioItem {
        AudioItem {
            id: id.to_string(),
            title: format!("Title {id}"),
            author: "Author".to_string(),
            album: "Album".to_string(),
            duration: 180.0,
            url: format!("/media/{id}.mp3"),
            cover: None,
            selected: None,
        }
    }

    fn session_with(len: usize, index: usize) -> PlaybackSession {
        let list = (0..len).map(|i| item(&i.to_string())).collect();
        let mut session = PlaybackSession::new();
        assert!(session.start(list, PlaylistRef::All, index));
        session
    }

    #[test]
    fn new_session_is_idle() {
        let session = PlaybackSession::new();
        assert_eq!(session.player_state(), PlayerState::Stopped);
        assert_eq!(session.play_mode(), PlayMode::Sequence);
        assert_eq!(session.playing_audio_index(), None);
        assert!(session.current_item().is_none());
        assert!(!session.at_list_end());
        assert!(!session.playing_audio_reset());
    }

    #[test]
    fn start_rejects_out_of_range_index() {
        let mut session = PlaybackSession::new();
        assert!(!session.start(vec![item("a")], PlaylistRef::All, 1));
        assert_eq!(session.player_state(), PlayerState::Stopped);
        assert!(session.playing_audio_list().is_empty());
    }

    #[test]
    fn next_cycles_back_to_start_after_len_steps() {
        for len in 1..6 {
            for start in 0..len {
                let mut session = session_with(len, start);
                for _ in 0..len {
                    session.next(false);
                }
                assert_eq!(session.playing_audio_index(), Some(start));
            }
        }
    }

    #[test]
    fn next_then_previous_restores_index() {
        for start in 0..4 {
            let mut session = session_with(4, start);
            session.next(false);
            session.previous(false);
            assert_eq!(session.playing_audio_index(), Some(start));
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut session = session_with(3, 0);
        session.previous(false);
        assert_eq!(session.playing_audio_index(), Some(2));
        assert!(session.at_list_end());
    }

    #[test]
    fn transport_on_empty_queue_is_noop() {
        let mut session = PlaybackSession::new();
        session.next(false);
        session.previous(true);
        assert_eq!(session.playing_audio_index(), None);
        assert_eq!(session.player_state(), PlayerState::Stopped);
        assert!(!session.playing_audio_reset());
    }

    #[test]
    fn shuffle_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = session_with(5, 2);
        for _ in 0..200 {
            session.next_with(true, &mut rng);
            let index = session.playing_audio_index().unwrap();
            assert!(index < 5);
            session.previous_with(true, &mut rng);
            assert!(session.playing_audio_index().unwrap() < 5);
        }
    }

    #[test]
    fn next_sets_playing_and_reset_even_when_paused() {
        let mut session = session_with(3, 0);
        session.take_playing_audio_reset();
        session.pause();
        session.next(false);
        assert_eq!(session.player_state(), PlayerState::Playing);
        assert!(session.playing_audio_reset());
    }

    #[test]
    fn pause_and_resume_only_touch_state() {
        let mut session = session_with(3, 1);
        session.take_playing_audio_reset();
        session.pause();
        assert_eq!(session.player_state(), PlayerState::Paused);
        assert_eq!(session.playing_audio_index(), Some(1));
        assert!(!session.playing_audio_reset());
        session.resume();
        assert_eq!(session.player_state(), PlayerState::Playing);
        assert_eq!(session.playing_audio_list().len(), 3);
    }

    #[test]
    fn resume_without_track_keeps_stopped() {
        let mut session = PlaybackSession::new();
        session.resume();
        assert_eq!(session.player_state(), PlayerState::Stopped);
    }

    #[test]
    fn reset_flag_is_one_shot() {
        let mut session = session_with(2, 0);
        assert!(session.take_playing_audio_reset());
        assert!(!session.take_playing_audio_reset());
        session.replay();
        assert!(session.take_playing_audio_reset());
        assert_eq!(session.playing_audio_index(), Some(0));
    }

    #[test]
    fn cycle_play_mode_four_times_is_identity() {
        let mut session = PlaybackSession::new();
        let start = session.play_mode();
        for _ in 0..4 {
            session.cycle_play_mode();
        }
        assert_eq!(session.play_mode(), start);
    }

    #[test]
    fn info_reflects_derived_state() {
        let session = session_with(3, 2);
        let info = session.info();
        assert_eq!(info.current.as_ref().map(|i| i.id.as_str()), Some("2"));
        assert!(info.at_list_end);
        assert_eq!(info.queue_len, 3);
        assert_eq!(info.state, PlayerState::Playing);
    }
}
