//! Navigation and selection controller.
//!
//! The controller owns the loaded lists and the current view mode, turns
//! search and selector events into renders on a [`Surface`], and asks its
//! caller to perform fetches through [`Command`]s. Every fetch is tagged with
//! a [`Ticket`]; only the result for the most recent ticket is applied.

use crate::api::{CatalogClient, FetchError};
use crate::filter::{filter_episodes, filter_shows};
use crate::types::{Episode, EpisodeId, EpisodeSelection, Show, ShowId, ShowSelection, ViewMode};
use crate::view::{Content, Surface, episode_options, render_episodes, render_shows, show_options};
use log::{debug, error, info, warn};

pub const SHOWS_FAILED: &str = "Failed to load shows. Please try again later.";
pub const EPISODES_FAILED: &str = "Failed to load episodes. Please try again later.";
pub const SELECT_PROMPT: &str = "Please select a show to display episodes.";

/// Tag identifying the user action that triggered a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// A fetch the caller must perform and report back.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Report with [`Controller::shows_loaded`].
    FetchShows { ticket: Ticket },
    /// Report with [`Controller::episodes_loaded`].
    FetchEpisodes { ticket: Ticket, show_id: ShowId },
}

/// A finished fetch, ready for [`Controller::apply`].
#[derive(Debug)]
pub enum Outcome {
    Shows {
        ticket: Ticket,
        result: Result<Vec<Show>, FetchError>,
    },
    Episodes {
        ticket: Ticket,
        show_id: ShowId,
        result: Result<Vec<Episode>, FetchError>,
    },
}

/// Run `command` against the catalog.
pub async fn perform(client: &CatalogClient, command: Command) -> Outcome {
    match command {
        Command::FetchShows { ticket } => Outcome::Shows {
            ticket,
            result: client.fetch_shows().await,
        },
        Command::FetchEpisodes { ticket, show_id } => Outcome::Episodes {
            ticket,
            show_id,
            result: client.fetch_episodes(show_id).await,
        },
    }
}

/// State holder for the two-screen browser.
pub struct Controller<S: Surface> {
    surface: S,
    mode: ViewMode,
    shows: Vec<Show>,
    episodes: Vec<Episode>,
    episodes_of: Option<ShowId>,
    show_search: String,
    episode_search: String,
    episode_selection: EpisodeSelection,
    next_ticket: u64,
    awaiting: Option<Ticket>,
}

impl<S: Surface> Controller<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mode: ViewMode::ShowListing,
            shows: Vec::new(),
            episodes: Vec::new(),
            episodes_of: None,
            show_search: String::new(),
            episode_search: String::new(),
            episode_selection: EpisodeSelection::All,
            next_ticket: 0,
            awaiting: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Complete show list, sorted.
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Complete episode list of the selected show.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Show whose episodes are loaded.
    pub fn episodes_of(&self) -> Option<ShowId> {
        self.episodes_of
    }

    /// Whether a fetch result is still expected.
    pub fn is_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.awaiting = Some(ticket);
        ticket
    }

    /// Accept `ticket` if it belongs to the most recent request.
    fn redeem(&mut self, ticket: Ticket) -> bool {
        if self.awaiting == Some(ticket) {
            self.awaiting = None;
            true
        } else {
            debug!("Discarding stale result for {:?}", ticket);
            false
        }
    }

    /// Hand a finished fetch to the matching handler.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Shows { ticket, result } => self.shows_loaded(ticket, result),
            Outcome::Episodes {
                ticket,
                show_id,
                result,
            } => self.episodes_loaded(ticket, show_id, result),
        }
    }

    /// Enter the show listing and request the show list.
    pub fn start(&mut self) -> Command {
        self.mode = ViewMode::ShowListing;
        self.surface.set_mode(self.mode);
        self.surface.clear_count();
        self.surface
            .render(Content::Message("Loading shows...".to_string()));
        Command::FetchShows {
            ticket: self.issue_ticket(),
        }
    }

    pub fn shows_loaded(&mut self, ticket: Ticket, result: Result<Vec<Show>, FetchError>) {
        if !self.redeem(ticket) {
            return;
        }

        match result {
            Ok(shows) => {
                info!("Loaded {} shows", shows.len());
                self.shows = shows;
                self.refresh_show_listing();
            }
            Err(e) => {
                error!("Error fetching shows: {}", e);
                self.surface.render(Content::Error(SHOWS_FAILED.to_string()));
            }
        }
    }

    /// React to the show selector.
    pub fn select_show(&mut self, selection: ShowSelection) -> Option<Command> {
        match selection {
            ShowSelection::Placeholder => {
                self.awaiting = None;
                self.leave_episode_listing();
                self.surface
                    .render(Content::Message(SELECT_PROMPT.to_string()));
                None
            }
            ShowSelection::Show(show_id) => {
                let ticket = self.issue_ticket();
                debug!("Requesting episodes of show {} with {:?}", show_id, ticket);
                self.surface
                    .render(Content::Message("Loading episodes...".to_string()));
                Some(Command::FetchEpisodes { ticket, show_id })
            }
        }
    }

    /// Per-card action on a show.
    pub fn request_episodes(&mut self, show_id: ShowId) -> Option<Command> {
        self.select_show(ShowSelection::Show(show_id))
    }

    pub fn episodes_loaded(
        &mut self,
        ticket: Ticket,
        show_id: ShowId,
        result: Result<Vec<Episode>, FetchError>,
    ) {
        if !self.redeem(ticket) {
            return;
        }

        match result {
            Ok(episodes) => {
                info!("Loaded {} episodes for show {}", episodes.len(), show_id);
                self.episodes = episodes;
                self.episodes_of = Some(show_id);
                self.episode_search.clear();
                self.episode_selection = EpisodeSelection::All;
                self.mode = ViewMode::EpisodeListing;
                self.surface.set_mode(self.mode);
                self.surface.render(render_episodes(&self.episodes));
                self.surface
                    .populate_episode_selector(episode_options(&self.episodes));
                self.surface
                    .set_count(self.episodes.len(), self.episodes.len());
            }
            Err(e) => {
                error!("Error fetching episodes for show {}: {}", show_id, e);
                self.leave_episode_listing();
                self.surface
                    .render(Content::Error(EPISODES_FAILED.to_string()));
            }
        }
    }

    /// Re-filter the show list. Ignored outside the show listing.
    pub fn search_shows(&mut self, term: &str) {
        if self.mode != ViewMode::ShowListing {
            return;
        }
        self.show_search = term.to_string();
        if self.shows.is_empty() {
            return;
        }
        self.refresh_show_listing();
    }

    /// Re-filter the episode list. Ignored outside the episode listing.
    pub fn search_episodes(&mut self, term: &str) {
        if self.mode != ViewMode::EpisodeListing {
            return;
        }
        self.episode_search = term.to_string();
        self.episode_selection = EpisodeSelection::All;

        let filtered = filter_episodes(&self.episodes, &self.episode_search);
        self.surface.render(render_episodes(&filtered));
        self.surface
            .populate_episode_selector(episode_options(&filtered));
        self.surface.set_count(filtered.len(), self.episodes.len());
    }

    /// React to the episode selector.
    pub fn select_episode(&mut self, selection: EpisodeSelection) {
        if self.mode != ViewMode::EpisodeListing {
            return;
        }

        let total = self.episodes.len();
        match selection {
            EpisodeSelection::All => {
                self.episode_selection = selection;
                self.surface.render(render_episodes(&self.episodes));
                self.surface.set_count(total, total);
            }
            EpisodeSelection::Episode(id) => {
                let Some(episode) = self.episodes.iter().find(|e| e.id == id) else {
                    warn!("Episode {} is not in the loaded list", id);
                    return;
                };
                self.episode_selection = selection;
                self.surface
                    .render(render_episodes(std::slice::from_ref(episode)));
                self.surface.set_count(1, total);
            }
        }
    }

    /// Leave the episode listing. Returns a fetch when no show list is held.
    pub fn back_to_shows(&mut self) -> Option<Command> {
        self.awaiting = None;
        self.leave_episode_listing();

        if self.shows.is_empty() {
            Some(self.start())
        } else {
            self.refresh_show_listing();
            None
        }
    }

    /// Open the reference page of a loaded episode.
    pub fn open_reference(&mut self, id: EpisodeId) {
        match self.episodes.iter().find(|e| e.id == id) {
            Some(episode) if !episode.url.is_empty() => {
                debug!("Opening reference {}", episode.url);
                let url = episode.url.clone();
                self.surface.open_reference(&url);
            }
            Some(_) => warn!("Episode {} has no reference URL", id),
            None => warn!("Episode {} is not in the loaded list", id),
        }
    }

    /// Drop the loaded episodes and switch the surface to the show listing.
    fn leave_episode_listing(&mut self) {
        self.episodes.clear();
        self.episodes_of = None;
        self.episode_search.clear();
        self.episode_selection = EpisodeSelection::All;

        self.mode = ViewMode::ShowListing;
        self.surface.set_mode(self.mode);
        self.surface.clear_count();
        self.surface.populate_episode_selector(Vec::new());
    }

    fn refresh_show_listing(&mut self) {
        let filtered = filter_shows(&self.shows, &self.show_search);
        self.surface.render(render_shows(&filtered));
        self.surface.populate_show_selector(show_options(&filtered));
    }
}
