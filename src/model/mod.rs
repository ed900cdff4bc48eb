//! Model module - Player state and data types
//!
//! This module contains all the data structures and state management for the player.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (playlists, audio items, player enums)
//! - `error`: Errors returned by library operations
//! - `library`: Library directory state (playlists, selected list)
//! - `playback`: Playback session state and transport rules
//! - `library_client`: Backend trait and its HTTP implementation
//! - `player_store`: The store combining directory and session

mod types;
mod error;
mod library;
mod playback;
mod library_client;
mod player_store;

// Re-export all public types for convenient access
pub use types::{AudioItem, PlayMode, PlayerState, PlaylistRef, PlaylistSummary};

pub use error::{LibraryError, LibraryResult};

pub use library::LibraryState;

pub use playback::{PlaybackInfo, PlaybackSession};

pub use library_client::{HttpLibraryClient, LibraryBackend};

pub use player_store::PlayerStore;
