//! Text rendering for the console front-end

use crate::model::{AudioItem, LibraryState, PlaybackInfo, PlayerState, PlaylistRef};

pub fn format_duration(seconds: f64) -> String {
    let total_seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Calculate width needed for index column (log10(n) + padding)
fn num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub(crate) fn now_playing_line(item: &AudioItem) -> String {
    format!(
        "> Now playing: {} - {} [{}]",
        item.title,
        item.author,
        format_duration(item.duration)
    )
}

pub(crate) fn playlists(all: &[PlaylistRef], selected: &PlaylistRef) -> String {
    let mut out = String::new();
    for playlist in all {
        let marker = if playlist == selected { '*' } else { ' ' };
        let line = match playlist {
            PlaylistRef::User { id, title } => format!("{marker} {title} ({id})"),
            other => format!("{marker} {}", other.display_name()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub(crate) fn audio_list(library: &LibraryState, playing_id: Option<&str>) -> String {
    let items = &library.selected_audio_list;
    let mut out = format!("{} ({} tracks)", library.selected_playlist.display_name(), items.len());
    if let Some(at) = library.refreshed_at {
        out.push_str(&format!(", fetched {}", at.format("%H:%M:%S")));
    }
    out.push('\n');

    let width = num_width(items.len());
    for (i, item) in items.iter().enumerate() {
        let mark = if item.is_selected() { "[x]" } else { "[ ]" };
        let playing = if Some(item.id.as_str()) == playing_id { ">" } else { " " };
        out.push_str(&format!(
            "{playing}{:>width$} {mark} {} - {} ({}) [{}] id={}\n",
            i + 1,
            item.title,
            item.author,
            item.album,
            format_duration(item.duration),
            item.id,
        ));
    }
    out
}

pub(crate) fn status(info: &PlaybackInfo) -> String {
    let state = match info.state {
        PlayerState::Stopped => "stopped",
        PlayerState::Playing => "playing",
        PlayerState::Paused => "paused",
    };
    let track = info
        .current
        .as_ref()
        .map(|item| format!("{} - {}", item.title, item.author))
        .unwrap_or_else(|| "Not playing".to_string());
    let position = match info.index {
        Some(i) => format!("{}/{}", i + 1, info.queue_len),
        None => format!("-/{}", info.queue_len),
    };
    let end = if info.at_list_end { ", end of list" } else { "" };
    format!(
        "{track} | {state} | {position}{end} | mode: {} | from: {}",
        info.mode.label(),
        info.playing_playlist.display_name()
    )
}
