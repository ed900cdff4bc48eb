//! In-memory library backend shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use musicbox_rs::model::{AudioItem, LibraryBackend, LibraryError, LibraryResult, PlaylistSummary};

pub fn audio(id: &str) -> AudioItem {
    AudioItem {
        id: id.to_string(),
        title: format!("Track {id}"),
        author: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        duration: 200.0,
        url: format!("/media/{id}.mp3"),
        cover: None,
        selected: None,
    }
}

#[derive(Default)]
struct Library {
    audios: Vec<AudioItem>,
    playlists: Vec<PlaylistSummary>,
    contents: HashMap<String, Vec<String>>,
    next_id: usize,
}

/// Library server double with scripted failures and a call log.
#[derive(Default)]
pub struct FakeBackend {
    library: Mutex<Library>,
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<HashMap<&'static str, LibraryError>>,
    held: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audios(ids: &[&str]) -> Self {
        let backend = Self::new();
        backend.library.lock().unwrap().audios = ids.iter().map(|id| audio(id)).collect();
        backend
    }

    pub fn add_playlist_with(&self, id: &str, title: &str, audio_ids: &[&str]) {
        let mut lib = self.library.lock().unwrap();
        lib.playlists.push(PlaylistSummary {
            id: id.to_string(),
            title: title.to_string(),
        });
        lib.contents
            .insert(id.to_string(), audio_ids.iter().map(|s| s.to_string()).collect());
    }

    pub fn push_audio(&self, id: &str) {
        self.library.lock().unwrap().audios.push(audio(id));
    }

    /// Make the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: &'static str, error: LibraryError) {
        self.fail_next.lock().unwrap().insert(operation, error);
    }

    /// Park the next fetch matching `key` until the returned gate is notified.
    ///
    /// Keys are `all_audios` or `playlist_audios:<id>`.
    pub fn hold(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.held.lock().unwrap().insert(key.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn playlist_contents(&self, id: &str) -> Vec<String> {
        self.library
            .lock()
            .unwrap()
            .contents
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    async fn wait_if_held(&self, key: &str) {
        let gate = self.held.lock().unwrap().remove(key);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn enter(&self, operation: &'static str) -> LibraryResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.fail_next.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LibraryBackend for FakeBackend {
    async fn list_playlists(&self) -> LibraryResult<Vec<PlaylistSummary>> {
        self.enter("list_playlists")?;
        Ok(self.library.lock().unwrap().playlists.clone())
    }

    async fn add_playlist(&self, title: &str) -> LibraryResult<()> {
        self.enter("add_playlist")?;
        let mut lib = self.library.lock().unwrap();
        lib.next_id += 1;
        let id = format!("new{}", lib.next_id);
        lib.playlists.push(PlaylistSummary {
            id: id.clone(),
            title: title.to_string(),
        });
        lib.contents.insert(id, Vec::new());
        Ok(())
    }

    async fn delete_playlist(&self, id: &str) -> LibraryResult<()> {
        self.enter("delete_playlist")?;
        let mut lib = self.library.lock().unwrap();
        lib.playlists.retain(|p| p.id != id);
        lib.contents.remove(id);
        Ok(())
    }

    async fn all_audios(&self) -> LibraryResult<Vec<AudioItem>> {
        self.enter("all_audios")?;
        self.wait_if_held("all_audios").await;
        Ok(self.library.lock().unwrap().audios.clone())
    }

    async fn playlist_audios(&self, id: &str) -> LibraryResult<Vec<AudioItem>> {
        self.enter("playlist_audios")?;
        self.wait_if_held(&format!("playlist_audios:{id}")).await;
        let lib = self.library.lock().unwrap();
        let ids = lib
            .contents
            .get(id)
            .ok_or_else(|| LibraryError::Server("no such playlist".to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|aid| lib.audios.iter().find(|a| &a.id == aid).cloned())
            .collect())
    }

    async fn update_playlist_audios(&self, id: &str, audios: &[String]) -> LibraryResult<()> {
        self.enter("update_playlist_audios")?;
        self.library
            .lock()
            .unwrap()
            .contents
            .insert(id.to_string(), audios.to_vec());
        Ok(())
    }

    async fn delete_audio(&self, audio: &str, playlist: Option<&str>) -> LibraryResult<()> {
        self.enter("delete_audio")?;
        remove(&mut self.library.lock().unwrap(), &[audio.to_string()], playlist);
        Ok(())
    }

    async fn delete_audios(&self, audios: &[String], playlist: Option<&str>) -> LibraryResult<()> {
        self.enter("delete_audios")?;
        remove(&mut self.library.lock().unwrap(), audios, playlist);
        Ok(())
    }

    async fn add_audios_to_playlist(&self, audios: &[String], playlist: &str) -> LibraryResult<()> {
        self.enter("add_audios_to_playlist")?;
        let mut lib = self.library.lock().unwrap();
        let entry = lib
            .contents
            .get_mut(playlist)
            .ok_or_else(|| LibraryError::Server("no such playlist".to_string()))?;
        entry.extend(audios.iter().cloned());
        Ok(())
    }
}

fn remove(lib: &mut Library, audios: &[String], playlist: Option<&str>) {
    match playlist {
        Some(pid) => {
            if let Some(entry) = lib.contents.get_mut(pid) {
                entry.retain(|a| !audios.contains(a));
            }
        }
        None => {
            lib.audios.retain(|a| !audios.contains(&a.id));
            for entry in lib.contents.values_mut() {
                entry.retain(|a| !audios.contains(a));
            }
        }
    }
}
