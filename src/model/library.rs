//! Library directory state: known playlists and the selected playlist's contents

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::types::{AudioItem, PlaylistRef};

/// Playlists known to the client and the materialized contents of the selected one
#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    /// User playlists only; `All` and `Favorite` are synthetic
    pub playlists: Vec<PlaylistRef>,
    pub selected_playlist: PlaylistRef,
    pub selected_audio_list: Vec<AudioItem>,
    /// When `selected_audio_list` was last fetched
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl LibraryState {
    pub fn find_playlist(&self, id: &str) -> Option<&PlaylistRef> {
        self.playlists.iter().find(|p| p.id() == Some(id))
    }

    pub fn position_of(&self, audio_id: &str) -> Option<usize> {
        self.selected_audio_list.iter().position(|a| a.id == audio_id)
    }

    /// Swap in a freshly fetched selection in one assignment.
    pub fn replace_selection(&mut self, playlist: PlaylistRef, audios: Vec<AudioItem>) {
        self.selected_playlist = playlist;
        self.selected_audio_list = audios;
        self.refreshed_at = Some(Utc::now());
    }

    pub fn replace_audio_list(&mut self, audios: Vec<AudioItem>) {
        self.selected_audio_list = audios;
        self.refreshed_at = Some(Utc::now());
    }

    /// Flip the multi-select marker of one item. Returns the new value.
    pub fn toggle_selected(&mut self, audio_id: &str) -> Option<bool> {
        let item = self
            .selected_audio_list
            .iter_mut()
            .find(|a| a.id == audio_id)?;
        let selected = !item.is_selected();
        item.selected = Some(selected);
        Some(selected)
    }

    pub fn clear_selection_marks(&mut self) {
        for item in &mut self.selected_audio_list {
            item.selected = None;
        }
    }

    pub fn marked_audio_ids(&self) -> Vec<String> {
        self.selected_audio_list
            .iter()
            .filter(|a| a.is_selected())
            .map(|a| a.id.clone())
            .collect()
    }
}

/// Ids that appear more than once in `audios`.
pub fn duplicate_ids(audios: &[AudioItem]) -> Vec<&str> {
    let mut seen = HashSet::new();
    audios
        .iter()
        .filter(|a| !seen.insert(a.id.as_str()))
        .map(|a| a.id.as_str())
        .collect()
}
