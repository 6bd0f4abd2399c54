//! Type definitions for the tv-browser application.
//!
//! This module contains the catalog records (shows and episodes) as they are
//! deserialized from the TVmaze API, plus the small identifier and selection
//! types the controller and the surface exchange.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Identifier of a show in the catalog.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an episode, unique within its show.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EpisodeId(pub u64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image references attached to a show or episode.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

impl Image {
    /// The preferred image URL, medium size first.
    pub fn url(&self) -> Option<&str> {
        self.medium.as_deref().or(self.original.as_deref())
    }
}

/// Average rating of a show.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

/// A show as returned by `GET /shows`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Show {
    /// Unique identifier for the show.
    pub id: ShowId,

    /// Display name of the show.
    #[serde(default = "unknown_name", deserialize_with = "name_or_unknown")]
    pub name: String,

    /// Poster image, if the catalog has one.
    #[serde(default)]
    pub image: Option<Image>,

    /// Genres in catalog order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,

    /// Running status, e.g. "Ended" or "Running".
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    /// Average rating.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,

    /// Episode runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,

    /// Summary, possibly containing HTML markup.
    #[serde(default)]
    pub summary: Option<String>,
}

impl Show {
    /// Format the show for display in selection menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use tv_browser::types::{Rating, Show, ShowId};
    ///
    /// let show = Show {
    ///     id: ShowId(82),
    ///     name: "Game of Thrones".to_string(),
    ///     image: None,
    ///     genres: vec!["Drama".to_string()],
    ///     status: "Ended".to_string(),
    ///     rating: Rating { average: Some(8.9) },
    ///     runtime: Some(60),
    ///     summary: None,
    /// };
    /// assert_eq!(show.to_display(), "Game of Thrones");
    /// ```
    pub fn to_display(&self) -> String {
        self.name.clone()
    }
}

/// An episode as returned by `GET /shows/{id}/episodes`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: EpisodeId,

    /// Episode title.
    #[serde(default = "unknown_name", deserialize_with = "name_or_unknown")]
    pub name: String,

    /// Season number.
    pub season: u32,

    /// Episode number within the season.
    pub number: u32,

    /// Still image, if the catalog has one.
    #[serde(default)]
    pub image: Option<Image>,

    /// Summary, possibly containing HTML markup.
    #[serde(default)]
    pub summary: Option<String>,

    /// External reference page for the episode.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl Episode {
    /// The `SxxEyy` code of this episode.
    pub fn code(&self) -> String {
        episode_code(self.season, self.number)
    }

    /// Format the episode for display in selection menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use tv_browser::types::{Episode, EpisodeId};
    ///
    /// let ep = Episode {
    ///     id: EpisodeId(4952),
    ///     name: "Winter Is Coming".to_string(),
    ///     season: 1,
    ///     number: 1,
    ///     image: None,
    ///     summary: None,
    ///     url: String::new(),
    /// };
    /// assert_eq!(ep.to_display(), "S01E01 - Winter Is Coming");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }
}

/// Format a season/episode pair as `S01E05`.
///
/// Both numbers are padded to a minimum width of two; larger numbers widen.
///
/// ```
/// use tv_browser::types::episode_code;
///
/// assert_eq!(episode_code(1, 5), "S01E05");
/// assert_eq!(episode_code(12, 100), "S12E100");
/// ```
pub fn episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

/// The two top-level screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    ShowListing,
    EpisodeListing,
}

/// A choice in the show selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowSelection {
    /// The "Select a show" entry.
    Placeholder,
    Show(ShowId),
}

/// A choice in the episode selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeSelection {
    /// The "Show All Episodes" entry.
    All,
    Episode(EpisodeId),
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

fn name_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_name))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
