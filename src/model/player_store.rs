//! Main player store: library directory and playback session in one container

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::error::{LibraryError, LibraryResult};
use super::library::{duplicate_ids, LibraryState};
use super::library_client::LibraryBackend;
use super::playback::{PlaybackInfo, PlaybackSession};
use super::types::{AudioItem, PlayMode, PlaylistRef};

/// Shared player state.
///
/// Backend calls are made without holding any lock; results are written back
/// with a single assignment so readers never see a half-applied update.
/// Overlapping selections are not sequenced: whichever response lands last wins.
#[derive(Clone)]
pub struct PlayerStore {
    backend: Arc<dyn LibraryBackend>,
    library: Arc<RwLock<LibraryState>>,
    session: Arc<Mutex<PlaybackSession>>,
}

impl PlayerStore {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self {
            backend,
            library: Arc::new(RwLock::new(LibraryState::default())),
            session: Arc::new(Mutex::new(PlaybackSession::new())),
        }
    }

    // ========================================================================
    // Library Directory
    // ========================================================================

    pub async fn list_playlists(&self) -> LibraryResult<()> {
        let summaries = self.backend.list_playlists().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to fetch playlists");
        })?;
        let playlists: Vec<PlaylistRef> = summaries.into_iter().map(PlaylistRef::from).collect();
        tracing::debug!(count = playlists.len(), "Playlists refreshed");
        self.library.write().await.playlists = playlists;
        Ok(())
    }

    pub async fn add_playlist(&self, title: &str) -> LibraryResult<()> {
        self.backend.add_playlist(title).await.inspect_err(|e| {
            tracing::error!(title, error = %e, "Failed to add playlist");
        })?;
        tracing::info!(title, "Playlist added");
        self.refresh_playlists_after_mutation().await;
        Ok(())
    }

    pub async fn select_playlist(&self, playlist: &PlaylistRef) -> LibraryResult<()> {
        let resolved = match playlist {
            PlaylistRef::User { id, .. } => {
                let known = self.library.read().await.find_playlist(id).cloned();
                match known {
                    Some(p) => p,
                    None => {
                        tracing::error!(playlist_id = %id, "Cannot select unknown playlist");
                        return Err(LibraryError::PlaylistNotFound(id.clone()));
                    }
                }
            }
            other => other.clone(),
        };

        let audios = self.fetch_audios(&resolved).await?;
        tracing::info!(playlist = resolved.display_name(), count = audios.len(), "Playlist selected");
        self.library.write().await.replace_selection(resolved, audios);
        Ok(())
    }

    pub async fn refresh_selected_audio_list(&self) -> LibraryResult<()> {
        let selected = self.library.read().await.selected_playlist.clone();
        let audios = self.fetch_audios(&selected).await?;

        let mut library = self.library.write().await;
        // A selection that landed while we were fetching takes precedence.
        if library.selected_playlist != selected {
            tracing::debug!("Selection changed during refresh, discarding result");
            return Ok(());
        }
        library.replace_audio_list(audios);
        Ok(())
    }

    pub async fn reorder_selected_playlist(&self, ordered: &[AudioItem]) -> LibraryResult<()> {
        let selected = self.library.read().await.selected_playlist.clone();
        let Some(id) = selected.id() else {
            tracing::error!(playlist = selected.display_name(), "Reorder requested on a pseudo-playlist");
            return Err(LibraryError::ReorderUnsupported);
        };

        let audios: Vec<String> = ordered.iter().map(|a| a.id.clone()).collect();
        self.backend
            .update_playlist_audios(id, &audios)
            .await
            .inspect_err(|e| {
                tracing::error!(playlist_id = id, error = %e, "Failed to rearrange playlist");
            })?;
        tracing::info!(playlist_id = id, count = audios.len(), "Playlist rearranged");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_playlist(&self, id: &str) -> LibraryResult<()> {
        self.backend.delete_playlist(id).await.inspect_err(|e| {
            tracing::error!(playlist_id = id, error = %e, "Failed to delete playlist");
        })?;
        tracing::info!(playlist_id = id, "Playlist deleted");
        self.refresh_playlists_after_mutation().await;

        if let Err(e) = self.select_playlist(&PlaylistRef::All).await {
            // Never leave the selection pointing at a playlist that no longer exists.
            tracing::warn!(error = %e, "Could not load library after playlist deletion");
            self.library
                .write()
                .await
                .replace_selection(PlaylistRef::All, Vec::new());
        }
        Ok(())
    }

    pub async fn delete_audio(&self, audio_id: &str, playlist_id: Option<&str>) -> LibraryResult<()> {
        self.backend
            .delete_audio(audio_id, playlist_id)
            .await
            .inspect_err(|e| {
                tracing::error!(audio_id, playlist_id, error = %e, "Failed to delete audio");
            })?;
        tracing::info!(audio_id, playlist_id, "Audio deleted");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_audios(&self, audio_ids: &[String], playlist_id: Option<&str>) -> LibraryResult<()> {
        self.backend
            .delete_audios(audio_ids, playlist_id)
            .await
            .inspect_err(|e| {
                tracing::error!(count = audio_ids.len(), playlist_id, error = %e, "Failed to delete audios");
            })?;
        tracing::info!(count = audio_ids.len(), playlist_id, "Audios deleted");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn add_audios_to_playlist(&self, audio_ids: &[String], playlist_id: &str) -> LibraryResult<()> {
        self.backend
            .add_audios_to_playlist(audio_ids, playlist_id)
            .await
            .inspect_err(|e| {
                tracing::error!(count = audio_ids.len(), playlist_id, error = %e, "Failed to add audios");
            })?;
        tracing::info!(count = audio_ids.len(), playlist_id, "Audios added to playlist");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn toggle_audio_selected(&self, audio_id: &str) -> Option<bool> {
        self.library.write().await.toggle_selected(audio_id)
    }

    pub async fn clear_audio_selection(&self) {
        self.library.write().await.clear_selection_marks();
    }

    pub async fn selected_audio_ids(&self) -> Vec<String> {
        self.library.read().await.marked_audio_ids()
    }

    /// Delete every marked item from the scope of the selected playlist.
    ///
    /// Pseudo-playlists delete from the whole library.
    pub async fn delete_selected_audios(&self) -> LibraryResult<usize> {
        let (ids, scope) = {
            let library = self.library.read().await;
            let scope = library.selected_playlist.id().map(str::to_string);
            (library.marked_audio_ids(), scope)
        };
        if ids.is_empty() {
            return Ok(0);
        }
        self.delete_audios(&ids, scope.as_deref()).await?;
        Ok(ids.len())
    }

    async fn fetch_audios(&self, playlist: &PlaylistRef) -> LibraryResult<Vec<AudioItem>> {
        tracing::debug!(playlist = playlist.display_name(), "Fetching playlist contents");
        let result = match playlist {
            PlaylistRef::User { id, .. } => self.backend.playlist_audios(id).await,
            // Favorites has no endpoint of its own
            PlaylistRef::All | PlaylistRef::Favorite => self.backend.all_audios().await,
        };
        let audios = result.inspect_err(|e| {
            tracing::error!(playlist = playlist.display_name(), error = %e, "Failed to fetch playlist");
        })?;
        let duplicates = duplicate_ids(&audios);
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Backend returned duplicate audio ids");
        }
        Ok(audios)
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh_selected_audio_list().await {
            tracing::warn!(error = %e, "Selected list is stale after mutation");
        }
    }

    async fn refresh_playlists_after_mutation(&self) {
        if let Err(e) = self.list_playlists().await {
            tracing::warn!(error = %e, "Playlist listing is stale after mutation");
        }
    }

    // ========================================================================
    // Playback Session
    // ========================================================================

    /// Snapshot the selected list into the session and start at `audio_id`.
    ///
    /// An unknown id is logged and ignored; the return value tells whether playback started.
    pub async fn play(&self, audio_id: &str) -> bool {
        let (list, playlist, index) = {
            let library = self.library.read().await;
            let Some(index) = library.position_of(audio_id) else {
                tracing::error!(audio_id, "Audio not found in selected list");
                return false;
            };
            (
                library.selected_audio_list.clone(),
                library.selected_playlist.clone(),
                index,
            )
        };
        tracing::info!(audio_id, index, playlist = playlist.display_name(), "Starting playback");
        self.session.lock().await.start(list, playlist, index)
    }

    pub async fn next(&self, shuffle: bool) {
        let mut session = self.session.lock().await;
        session.next(shuffle);
        tracing::debug!(index = ?session.playing_audio_index(), shuffle, "Next track");
    }

    pub async fn previous(&self, shuffle: bool) {
        let mut session = self.session.lock().await;
        session.previous(shuffle);
        tracing::debug!(index = ?session.playing_audio_index(), shuffle, "Previous track");
    }

    pub async fn replay(&self) {
        self.session.lock().await.replay();
    }

    pub async fn pause(&self) {
        self.session.lock().await.pause();
    }

    pub async fn resume(&self) {
        self.session.lock().await.resume();
    }

    pub async fn stop(&self) {
        self.session.lock().await.stop();
    }

    pub async fn cycle_play_mode(&self) -> PlayMode {
        let mode = self.session.lock().await.cycle_play_mode();
        tracing::debug!(mode = mode.label(), "Play mode changed");
        mode
    }

    pub async fn take_playing_audio_reset(&self) -> bool {
        self.session.lock().await.take_playing_audio_reset()
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    /// Pseudo-playlists followed by the known user playlists.
    pub async fn all_playlists(&self) -> Vec<PlaylistRef> {
        let library = self.library.read().await;
        let mut all = vec![PlaylistRef::All, PlaylistRef::Favorite];
        all.extend(library.playlists.iter().cloned());
        all
    }

    pub async fn playlists(&self) -> Vec<PlaylistRef> {
        self.library.read().await.playlists.clone()
    }

    pub async fn selected_playlist(&self) -> PlaylistRef {
        self.library.read().await.selected_playlist.clone()
    }

    pub async fn selected_audio_list(&self) -> Vec<AudioItem> {
        self.library.read().await.selected_audio_list.clone()
    }

    pub async fn library_state(&self) -> LibraryState {
        self.library.read().await.clone()
    }

    pub async fn playing_audio_list(&self) -> Vec<AudioItem> {
        self.session.lock().await.playing_audio_list().to_vec()
    }

    pub async fn current_item(&self) -> Option<AudioItem> {
        self.session.lock().await.current_item().cloned()
    }

    pub async fn at_list_end(&self) -> bool {
        self.session.lock().await.at_list_end()
    }

    pub async fn playback_info(&self) -> PlaybackInfo {
        self.session.lock().await.info()
    }
}
