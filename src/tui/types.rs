//! TUI type definitions for focus, popups, and actions.

use crate::types::{EpisodeId, EpisodeSelection, ShowId, ShowSelection};

/// Which selector popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Shows,
    Episodes,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Show search box changed
    SearchShows(String),
    /// Episode search box changed
    SearchEpisodes(String),
    /// Entry picked in the show selector
    SelectShow(ShowSelection),
    /// Entry picked in the episode selector
    SelectEpisode(EpisodeSelection),
    /// Episodes button of a show card
    RequestEpisodes(ShowId),
    /// Reference button of an episode card
    OpenReference(EpisodeId),
    /// Back to the show listing
    BackToShows,
}
