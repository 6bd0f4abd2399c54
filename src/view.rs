//! Display-ready cards and the surface they are rendered on.
//!
//! The controller never touches the terminal directly. It builds [`Content`]
//! and selector options here and hands them to a [`Surface`], which replaces
//! whatever it showed before.

use crate::types::{
    Episode, EpisodeId, EpisodeSelection, Show, ShowId, ShowSelection, ViewMode, episode_code,
};

/// Marker shown for missing rating or runtime.
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker shown for a missing image.
pub const NO_IMAGE: &str = "no image";

/// One show, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowCard {
    /// Target of the card's "episodes" action.
    pub id: ShowId,
    pub title: String,
    pub image: String,
    pub genres: String,
    pub status: String,
    pub rating: String,
    pub runtime: String,
    pub summary: String,
}

impl ShowCard {
    pub fn from_show(show: &Show) -> Self {
        Self {
            id: show.id,
            title: show.name.clone(),
            image: image_line(show.image.as_ref().and_then(|i| i.url())),
            genres: show.genres.join(" | "),
            status: show.status.clone(),
            rating: show
                .rating
                .average
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            runtime: show
                .runtime
                .map(|m| format!("{} min", m))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            summary: plain_text(show.summary.as_deref()),
        }
    }
}

/// One episode, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeCard {
    pub id: EpisodeId,
    pub title: String,
    /// `SxxEyy` code.
    pub code: String,
    pub image: String,
    pub summary: String,
    /// Target of the card's "reference" action.
    pub url: String,
}

impl EpisodeCard {
    pub fn from_episode(episode: &Episode) -> Self {
        Self {
            id: episode.id,
            title: episode.name.clone(),
            code: episode_code(episode.season, episode.number),
            image: image_line(episode.image.as_ref().and_then(|i| i.url())),
            summary: plain_text(episode.summary.as_deref()),
            url: episode.url.clone(),
        }
    }

    /// Heading as shown in the list, e.g. `Pilot (S01E01)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.code)
    }
}

/// Everything the content region can show.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Shows(Vec<ShowCard>),
    Episodes(Vec<EpisodeCard>),
    /// Neutral notice, e.g. while loading.
    Message(String),
    /// User-facing failure notice.
    Error(String),
}

impl Content {
    /// Number of cards, zero for messages.
    pub fn len(&self) -> usize {
        match self {
            Content::Shows(cards) => cards.len(),
            Content::Episodes(cards) => cards.len(),
            Content::Message(_) | Content::Error(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An entry in a selector control.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorOption<T> {
    pub label: String,
    pub value: T,
}

/// Build the show listing content in list order.
pub fn render_shows(shows: &[Show]) -> Content {
    Content::Shows(shows.iter().map(ShowCard::from_show).collect())
}

/// Build the episode listing content in list order.
pub fn render_episodes(episodes: &[Episode]) -> Content {
    Content::Episodes(episodes.iter().map(EpisodeCard::from_episode).collect())
}

/// Options for the show selector, placeholder first.
pub fn show_options(shows: &[Show]) -> Vec<SelectorOption<ShowSelection>> {
    std::iter::once(SelectorOption {
        label: "Select a show".to_string(),
        value: ShowSelection::Placeholder,
    })
    .chain(shows.iter().map(|s| SelectorOption {
        label: s.to_display(),
        value: ShowSelection::Show(s.id),
    }))
    .collect()
}

/// Options for the episode selector, "all" first.
pub fn episode_options(episodes: &[Episode]) -> Vec<SelectorOption<EpisodeSelection>> {
    std::iter::once(SelectorOption {
        label: "Show All Episodes".to_string(),
        value: EpisodeSelection::All,
    })
    .chain(episodes.iter().map(|e| SelectorOption {
        label: e.to_display(),
        value: EpisodeSelection::Episode(e.id),
    }))
    .collect()
}

/// Text of the episode count indicator.
///
/// ```
/// assert_eq!(tv_browser::view::format_count(3, 12), "Displaying 3/12 episodes.");
/// ```
pub fn format_count(shown: usize, total: usize) -> String {
    format!("Displaying {}/{} episodes.", shown, total)
}

fn image_line(url: Option<&str>) -> String {
    url.map(str::to_string)
        .unwrap_or_else(|| NO_IMAGE.to_string())
}

fn plain_text(markup: Option<&str>) -> String {
    markup
        .map(|s| nanohtml2text::html2text(s).trim().to_string())
        .unwrap_or_default()
}

/// The UI the controller drives.
///
/// Every call replaces what the surface showed before; nothing is patched
/// incrementally.
pub trait Surface {
    /// Replace the content region.
    fn render(&mut self, content: Content);

    /// Show the episode count indicator.
    fn set_count(&mut self, shown: usize, total: usize);

    /// Hide the episode count indicator.
    fn clear_count(&mut self);

    /// Switch which search box and back control are visible.
    fn set_mode(&mut self, mode: ViewMode);

    fn populate_show_selector(&mut self, options: Vec<SelectorOption<ShowSelection>>);

    fn populate_episode_selector(&mut self, options: Vec<SelectorOption<EpisodeSelection>>);

    /// Open an episode's external reference page.
    fn open_reference(&mut self, url: &str);
}
