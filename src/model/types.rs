//! Core type definitions for the application

use serde::{Deserialize, Serialize};

/// A playlist as seen by the library directory.
///
/// `All` and `Favorite` are pseudo-playlists with no server-side identity.
/// Only user playlists carry an id and a title.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaylistRef {
    #[default]
    All,
    Favorite,
    User { id: String, title: String },
}

impl PlaylistRef {
    pub fn user(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::User {
            id: id.into(),
            title: title.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::User { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        !matches!(self, Self::User { .. })
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Favorite => "Favorites",
            Self::User { title, .. } => title,
        }
    }
}

/// Playlist entry as returned by the playlist listing endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl From<PlaylistSummary> for PlaylistRef {
    fn from(summary: PlaylistSummary) -> Self {
        PlaylistRef::User {
            id: summary.id,
            title: summary.title,
        }
    }
}

/// A single audio item from the library
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub album: String,
    /// Length in seconds
    pub duration: f64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// UI-only multi-select marker, never sent back to the server
    #[serde(default, skip_serializing)]
    pub selected: Option<bool>,
}

impl AudioItem {
    pub fn is_selected(&self) -> bool {
        self.selected.unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// How the transport layer should continue when a track finishes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Repeat the current track
    Single,
    /// Play through the list once
    #[default]
    Sequence,
    Shuffle,
    /// Play through the list and wrap around
    Loop,
}

impl PlayMode {
    pub fn next(self) -> Self {
        match self {
            PlayMode::Single => PlayMode::Sequence,
            PlayMode::Sequence => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::Loop,
            PlayMode::Loop => PlayMode::Single,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::Single => "single",
            PlayMode::Sequence => "sequence",
            PlayMode::Shuffle => "shuffle",
            PlayMode::Loop => "loop",
        }
    }
}
