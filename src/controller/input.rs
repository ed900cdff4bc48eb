//! Console command parsing and dispatch

use thiserror::Error;

use crate::model::PlaylistRef;
use super::AppController;

pub const HELP: &str = "\
Commands:
  playlists               list playlists
  select all|fav|<id>     select a playlist
  list                    show the selected playlist
  refresh                 re-fetch the selected playlist
  play <audio-id>         play from the selected playlist
  next | prev             skip (random when mode is shuffle)
  pause | resume | stop   transport
  mode                    cycle single/sequence/shuffle/loop
  ended                   report that the current track finished
  mark <audio-id>         toggle multi-select on an item
  new <title>             create a playlist
  drop <playlist-id>      delete a playlist
  rm <audio-id>           remove an item from the selected scope
  rm-selected             remove every marked item
  add <playlist-id> <audio-id>...   add items to a playlist
  reorder <audio-id>...   persist a new order for the selected playlist
  status                  show the now-playing line
  help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Playlists,
    Select(PlaylistRef),
    List,
    Refresh,
    Play(String),
    Next,
    Previous,
    Pause,
    Resume,
    Stop,
    CycleMode,
    TrackEnded,
    Mark(String),
    NewPlaylist(String),
    DropPlaylist(String),
    Remove(String),
    RemoveSelected,
    AddTo { playlist: String, audios: Vec<String> },
    Reorder(Vec<String>),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<String> = words.map(str::to_string).collect();

        let one = |name: &'static str, what: &'static str| {
            rest.first()
                .cloned()
                .ok_or(CommandError::MissingArgument(name, what))
        };

        let command = match verb {
            "playlists" | "ls" => Command::Playlists,
            "select" | "sel" => {
                let target = one("select", "all, fav or a playlist id")?;
                Command::Select(match target.as_str() {
                    "all" => PlaylistRef::All,
                    "fav" | "favorites" => PlaylistRef::Favorite,
                    // Title is resolved from the known playlists
                    _ => PlaylistRef::user(target.clone(), ""),
                })
            }
            "list" => Command::List,
            "refresh" => Command::Refresh,
            "play" => Command::Play(one("play", "an audio id")?),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Previous,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "stop" => Command::Stop,
            "mode" => Command::CycleMode,
            "ended" => Command::TrackEnded,
            "mark" => Command::Mark(one("mark", "an audio id")?),
            "new" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("new", "a title"));
                }
                Command::NewPlaylist(rest.join(" "))
            }
            "drop" => Command::DropPlaylist(one("drop", "a playlist id")?),
            "rm" => Command::Remove(one("rm", "an audio id")?),
            "rm-selected" => Command::RemoveSelected,
            "add" => {
                if rest.len() < 2 {
                    return Err(CommandError::MissingArgument("add", "a playlist id and audio ids"));
                }
                Command::AddTo {
                    playlist: rest[0].clone(),
                    audios: rest[1..].to_vec(),
                }
            }
            "reorder" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("reorder", "audio ids"));
                }
                Command::Reorder(rest.clone())
            }
            "status" | "st" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl AppController {
    /// Run one command and return the text to show.
    pub async fn handle_command(&self, command: Command) -> String {
        tracing::debug!(?command, "Handling command");
        match command {
            Command::Playlists => self.show_playlists().await,
            Command::Select(playlist) => self.select_playlist(&playlist).await,
            Command::List => self.show_selected_list().await,
            Command::Refresh => self.refresh_selected().await,
            Command::Play(id) => self.play_audio(&id).await,
            Command::Next => self.next_track().await,
            Command::Previous => self.previous_track().await,
            Command::Pause => self.pause().await,
            Command::Resume => self.resume().await,
            Command::Stop => self.stop().await,
            Command::CycleMode => self.cycle_play_mode().await,
            Command::TrackEnded => self.track_finished().await,
            Command::Mark(id) => self.toggle_mark(&id).await,
            Command::NewPlaylist(title) => self.create_playlist(&title).await,
            Command::DropPlaylist(id) => self.remove_playlist(&id).await,
            Command::Remove(id) => self.remove_audio(&id).await,
            Command::RemoveSelected => self.remove_marked_audios().await,
            Command::AddTo { playlist, audios } => self.add_to_playlist(&playlist, &audios).await,
            Command::Reorder(ids) => self.reorder(&ids).await,
            Command::Status => self.status().await,
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }
}
