//! Terminal User Interface for tv-browser using ratatui.
//!
//! This module provides the full-screen surface the controller renders
//! show and episode listings on.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::App;
pub use types::{Action, SelectorKind};

use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
///
/// Key releases are dropped so each key press is reported once.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            other => Ok(Some(other)),
        }
    } else {
        Ok(None)
    }
}
