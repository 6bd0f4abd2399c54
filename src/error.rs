//! Error types for tv-browser.
//!
//! Fetch failures have their own type in [`crate::api::FetchError`] since the
//! controller reacts to them; everything the binary can fail on is collected
//! in [`AppError`].

use std::io;
use thiserror::Error;

use crate::api::FetchError;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog request failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    Config(String),

    /// File or terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external reference opener could not be started
    #[error("Opener error: {0}")]
    Opener(String),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
