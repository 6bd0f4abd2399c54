//! A terminal browser for the TVmaze show catalog.
//!
//! tv-browser lists every show in the catalog, lets you filter them by name,
//! genre or summary, and opens the episode list of the selected show. Episodes
//! can be searched, narrowed down to a single one through the episode
//! selector, and opened on their reference page in the browser.
//!
//! # Usage
//!
//! ```bash
//! # Browse the public TVmaze catalog
//! cargo run
//!
//! # Point at a mirror and log debug output
//! cargo run -- --catalog-base http://localhost:8080 -l 3
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod opener;
pub mod sort;
pub mod tui;
pub mod types;
pub mod view;
