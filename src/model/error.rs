//! Errors surfaced by library directory operations

use thiserror::Error;

/// Failure of a library operation.
///
/// The `Display` text is what a presentation layer shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// The backend answered with a non-zero code
    #[error("{0}")]
    Server(String),

    /// Transport or decode failure; the detail is kept for logs only
    #[error("Network error")]
    Network(String),

    #[error("Playlist not found")]
    PlaylistNotFound(String),

    #[error("Only user playlists can be reordered")]
    ReorderUnsupported,
}

impl LibraryError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err)
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
