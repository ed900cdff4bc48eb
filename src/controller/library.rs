//! Library-related controller methods (playlists, selected list, bulk edits)

use crate::model::{AudioItem, LibraryResult, PlaylistRef};
use super::{render, AppController};

impl AppController {
    /// Initial fetch: playlist listing and the `All` contents, side by side.
    pub async fn load_library(&self) -> String {
        let (playlists, selection) = futures::join!(
            self.store.list_playlists(),
            self.store.select_playlist(&PlaylistRef::All)
        );
        let mut errors = Vec::new();
        for result in [playlists, selection] {
            if let Err(e) = result {
                errors.push(Self::format_error(&e));
            }
        }
        errors.join("\n")
    }

    pub async fn show_playlists(&self) -> String {
        if let Err(e) = self.store.list_playlists().await {
            return Self::format_error(&e);
        }
        let all = self.store.all_playlists().await;
        let selected = self.store.selected_playlist().await;
        render::playlists(&all, &selected)
    }

    pub async fn select_playlist(&self, playlist: &PlaylistRef) -> String {
        match self.store.select_playlist(playlist).await {
            Ok(()) => self.show_selected_list().await,
            Err(e) => Self::format_error(&e),
        }
    }

    pub async fn show_selected_list(&self) -> String {
        let library = self.store.library_state().await;
        let playing = self.store.current_item().await;
        render::audio_list(&library, playing.as_ref().map(|item| item.id.as_str()))
    }

    pub async fn refresh_selected(&self) -> String {
        self.after(self.store.refresh_selected_audio_list().await).await
    }

    pub async fn toggle_mark(&self, audio_id: &str) -> String {
        match self.store.toggle_audio_selected(audio_id).await {
            Some(true) => format!("Marked {}", audio_id),
            Some(false) => format!("Unmarked {}", audio_id),
            None => format!("No track `{}` in the selected playlist", audio_id),
        }
    }

    pub async fn create_playlist(&self, title: &str) -> String {
        match self.store.add_playlist(title).await {
            Ok(()) => self.show_playlists_cached().await,
            Err(e) => Self::format_error(&e),
        }
    }

    pub async fn remove_playlist(&self, id: &str) -> String {
        match self.store.delete_playlist(id).await {
            Ok(()) => self.show_playlists_cached().await,
            Err(e) => Self::format_error(&e),
        }
    }

    /// Remove one item from the selected playlist, or from the library when a
    /// pseudo-playlist is selected.
    pub async fn remove_audio(&self, audio_id: &str) -> String {
        let scope = self.store.selected_playlist().await;
        self.after(self.store.delete_audio(audio_id, scope.id()).await).await
    }

    pub async fn remove_marked_audios(&self) -> String {
        match self.store.delete_selected_audios().await {
            Ok(0) => "Nothing marked. Use `mark <id>` first.".to_string(),
            Ok(_) => self.show_selected_list().await,
            Err(e) => Self::format_error(&e),
        }
    }

    pub async fn add_to_playlist(&self, playlist_id: &str, audio_ids: &[String]) -> String {
        match self.store.add_audios_to_playlist(audio_ids, playlist_id).await {
            Ok(()) => format!("Added {} track(s) to {}", audio_ids.len(), playlist_id),
            Err(e) => Self::format_error(&e),
        }
    }

    /// Persist a new order. Ids not named keep their relative order after the named ones.
    pub async fn reorder(&self, ids: &[String]) -> String {
        let current = self.store.selected_audio_list().await;
        let mut ordered: Vec<AudioItem> = Vec::with_capacity(current.len());
        for id in ids {
            if let Some(item) = current.iter().find(|a| &a.id == id) {
                if !ordered.iter().any(|o| &o.id == id) {
                    ordered.push(item.clone());
                }
            }
        }
        for item in &current {
            if !ordered.iter().any(|o| o.id == item.id) {
                ordered.push(item.clone());
            }
        }
        self.after(self.store.reorder_selected_playlist(&ordered).await).await
    }

    async fn show_playlists_cached(&self) -> String {
        let all = self.store.all_playlists().await;
        let selected = self.store.selected_playlist().await;
        render::playlists(&all, &selected)
    }

    async fn after(&self, result: LibraryResult<()>) -> String {
        match result {
            Ok(()) => self.show_selected_list().await,
            Err(e) => Self::format_error(&e),
        }
    }
}
