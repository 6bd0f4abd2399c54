//! API client for the TVmaze catalog.
//!
//! This module provides the two read-only requests the browser needs: the
//! show list and the episode list of one show. There is no caching and no
//! retry; every failure is handed back to the caller as a [`FetchError`].

use crate::config::Config;
use crate::sort::sort_shows;
use crate::types::{Episode, Show, ShowId};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("tv-browser/", env!("CARGO_PKG_VERSION"));

/// Errors returned by catalog requests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// The catalog answered with a status outside 200-299.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request could not be completed or the body was not valid JSON.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Http {
                status: status.as_u16(),
            },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

/// Client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client for the catalog configured in `config`.
    ///
    /// A request timeout is only applied when the config sets one.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.catalog_base.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full show list, sorted by name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), tv_browser::api::FetchError> {
    /// let client = tv_browser::api::CatalogClient::new(&tv_browser::config::Config::new())?;
    /// for show in client.fetch_shows().await? {
    ///     println!("{}", show.to_display());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_shows(&self) -> Result<Vec<Show>, FetchError> {
        let url = format!("{}/shows", self.base_url);
        let mut shows: Vec<Show> = self.get_json(&url).await?;
        sort_shows(&mut shows);

        debug!("Loaded {} shows", shows.len());
        Ok(shows)
    }

    /// Fetch the episodes of one show in catalog order.
    pub async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        let episodes: Vec<Episode> = self.get_json(&url).await?;

        debug!("Loaded {} episodes for show {}", episodes.len(), show_id);
        Ok(episodes)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Request to {} returned {}", url, status);
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            warn!("Failed to parse response from {}: {}", url, e);
            FetchError::Transport(e.to_string())
        })
    }
}
