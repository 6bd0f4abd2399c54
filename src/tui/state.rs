//! Application state management and input handling.

use crate::opener::Opener;
use crate::types::{EpisodeSelection, ShowSelection, ViewMode};
use crate::view::{Content, SelectorOption, Surface};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::widgets::ListState;

use super::types::{Action, SelectorKind};

/// Application state for the TUI.
///
/// This is the terminal side of [`Surface`]: the controller writes into it,
/// and [`super::draw`] reads from it.
pub struct App {
    /// Current screen being displayed
    pub mode: ViewMode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// What the content region shows
    pub content: Content,
    /// Highlighted card in the content region
    pub content_state: ListState,
    /// Episode count indicator, hidden when `None`
    pub count: Option<(usize, usize)>,
    /// Show search input
    pub show_search: String,
    /// Episode search input
    pub episode_search: String,
    /// Whether the search bar of the current mode is focused
    pub search_focused: bool,
    /// Show selector entries
    pub show_options: Vec<SelectorOption<ShowSelection>>,
    /// Episode selector entries
    pub episode_options: Vec<SelectorOption<EpisodeSelection>>,
    /// Open selector popup
    pub selector: Option<SelectorKind>,
    /// Highlighted entry in the selector popup
    pub selector_state: ListState,
    /// Error message to display
    pub error_message: Option<String>,
    /// Catalog base URL shown in the header
    pub catalog_base: String,
    /// A fetch is in flight
    pub loading: bool,
    opener: Option<Opener>,
}

impl App {
    /// Create a new App with default state.
    pub fn new(catalog_base: String, opener: Option<Opener>) -> Self {
        Self {
            mode: ViewMode::ShowListing,
            should_quit: false,
            content: Content::Message(String::new()),
            content_state: ListState::default(),
            count: None,
            show_search: String::new(),
            episode_search: String::new(),
            search_focused: false,
            show_options: Vec::new(),
            episode_options: Vec::new(),
            selector: None,
            selector_state: ListState::default(),
            error_message: None,
            catalog_base,
            loading: false,
            opener,
        }
    }

    /// Search input of the current mode.
    pub fn active_search(&self) -> &str {
        match self.mode {
            ViewMode::ShowListing => &self.show_search,
            ViewMode::EpisodeListing => &self.episode_search,
        }
    }

    fn active_search_mut(&mut self) -> &mut String {
        match self.mode {
            ViewMode::ShowListing => &mut self.show_search,
            ViewMode::EpisodeListing => &mut self.episode_search,
        }
    }

    fn search_action(&self) -> Action {
        let term = self.active_search().to_string();
        match self.mode {
            ViewMode::ShowListing => Action::SearchShows(term),
            ViewMode::EpisodeListing => Action::SearchEpisodes(term),
        }
    }

    /// Labels of the open selector's entries.
    pub fn selector_labels(&self) -> Vec<&str> {
        match self.selector {
            Some(SelectorKind::Shows) => self.show_options.iter().map(|o| o.label.as_str()).collect(),
            Some(SelectorKind::Episodes) => self
                .episode_options
                .iter()
                .map(|o| o.label.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        if self.selector.is_some() {
            return self.handle_selector_input(key);
        }

        if self.search_focused {
            return self.handle_search_bar_input(key);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_focused = true;
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.content_state.selected().unwrap_or(0);
                if i > 0 {
                    self.content_state.select(Some(i - 1));
                }
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.content_state.selected().unwrap_or(0);
                if i < self.content.len().saturating_sub(1) {
                    self.content_state.select(Some(i + 1));
                }
                Action::None
            }
            KeyCode::Enter => self.card_action(),
            KeyCode::Char('s') => {
                self.open_selector(SelectorKind::Shows);
                Action::None
            }
            KeyCode::Char('e') if self.mode == ViewMode::EpisodeListing => {
                self.open_selector(SelectorKind::Episodes);
                Action::None
            }
            KeyCode::Char('b') | KeyCode::Backspace if self.mode == ViewMode::EpisodeListing => {
                Action::BackToShows
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            _ => Action::None,
        }
    }

    fn card_action(&self) -> Action {
        let Some(i) = self.content_state.selected() else {
            return Action::None;
        };
        match &self.content {
            Content::Shows(cards) => cards
                .get(i)
                .map(|c| Action::RequestEpisodes(c.id))
                .unwrap_or(Action::None),
            Content::Episodes(cards) => cards
                .get(i)
                .map(|c| Action::OpenReference(c.id))
                .unwrap_or(Action::None),
            Content::Message(_) | Content::Error(_) => Action::None,
        }
    }

    fn open_selector(&mut self, kind: SelectorKind) {
        let empty = match kind {
            SelectorKind::Shows => self.show_options.is_empty(),
            SelectorKind::Episodes => self.episode_options.is_empty(),
        };
        if empty {
            return;
        }
        self.selector = Some(kind);
        self.selector_state.select(Some(0));
    }

    fn handle_selector_input(&mut self, key: KeyEvent) -> Action {
        let len = self.selector_labels().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.selector_state.selected().unwrap_or(0);
                if i > 0 {
                    self.selector_state.select(Some(i - 1));
                }
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.selector_state.selected().unwrap_or(0);
                if i < len.saturating_sub(1) {
                    self.selector_state.select(Some(i + 1));
                }
                Action::None
            }
            KeyCode::Enter => {
                let i = self.selector_state.selected().unwrap_or(0);
                let action = match self.selector {
                    Some(SelectorKind::Shows) => self
                        .show_options
                        .get(i)
                        .map(|o| Action::SelectShow(o.value))
                        .unwrap_or(Action::None),
                    Some(SelectorKind::Episodes) => self
                        .episode_options
                        .get(i)
                        .map(|o| Action::SelectEpisode(o.value))
                        .unwrap_or(Action::None),
                    None => Action::None,
                };
                self.selector = None;
                action
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.selector = None;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_search_bar_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.search_focused = false;
                Action::None
            }
            KeyCode::Char(c) => {
                self.active_search_mut().push(c);
                self.search_action()
            }
            KeyCode::Backspace => {
                if self.active_search_mut().pop().is_some() {
                    self.search_action()
                } else {
                    Action::None
                }
            }
            _ => Action::None,
        }
    }
}

impl Surface for App {
    fn render(&mut self, content: Content) {
        let first = if content.is_empty() { None } else { Some(0) };
        self.content = content;
        self.content_state.select(first);
    }

    fn set_count(&mut self, shown: usize, total: usize) {
        self.count = Some((shown, total));
    }

    fn clear_count(&mut self) {
        self.count = None;
    }

    fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.search_focused = false;
        self.selector = None;
        if mode == ViewMode::EpisodeListing {
            self.episode_search.clear();
        }
    }

    fn populate_show_selector(&mut self, options: Vec<SelectorOption<ShowSelection>>) {
        self.show_options = options;
    }

    fn populate_episode_selector(&mut self, options: Vec<SelectorOption<EpisodeSelection>>) {
        self.episode_options = options;
    }

    fn open_reference(&mut self, url: &str) {
        let result = match &self.opener {
            Some(opener) => opener.open(url).map_err(|e| e.to_string()),
            None => Err("No URL opener available".to_string()),
        };
        if let Err(e) = result {
            warn!("Could not open {}: {}", url, e);
            self.set_error(&format!("Could not open {}", url));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EpisodeId, ShowId};
    use crate::view::{EpisodeCard, ShowCard};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn show_card(id: u64, title: &str) -> ShowCard {
        ShowCard {
            id: ShowId(id),
            title: title.to_string(),
            image: String::new(),
            genres: String::new(),
            status: String::new(),
            rating: String::new(),
            runtime: String::new(),
            summary: String::new(),
        }
    }

    fn episode_card(id: u64) -> EpisodeCard {
        EpisodeCard {
            id: EpisodeId(id),
            title: format!("Episode {}", id),
            code: format!("S01E{:02}", id),
            image: String::new(),
            summary: String::new(),
            url: format!("https://www.tvmaze.com/episodes/{}", id),
        }
    }

    fn app() -> App {
        App::new("https://api.tvmaze.com".to_string(), None)
    }

    #[test]
    fn test_render_resets_highlight() {
        let mut app = app();
        app.render(Content::Shows(vec![show_card(1, "A"), show_card(2, "B")]));
        assert_eq!(app.content_state.selected(), Some(0));

        app.render(Content::Error("boom".to_string()));
        assert_eq!(app.content_state.selected(), None);
    }

    #[test]
    fn test_enter_on_show_card_requests_episodes() {
        let mut app = app();
        app.render(Content::Shows(vec![show_card(1, "A"), show_card(169, "B")]));
        app.handle_input(key(KeyCode::Down));
        assert_eq!(
            app.handle_input(key(KeyCode::Enter)),
            Action::RequestEpisodes(ShowId(169))
        );
    }

    #[test]
    fn test_enter_on_episode_card_opens_reference() {
        let mut app = app();
        app.set_mode(ViewMode::EpisodeListing);
        app.render(Content::Episodes(vec![episode_card(7)]));
        assert_eq!(
            app.handle_input(key(KeyCode::Enter)),
            Action::OpenReference(EpisodeId(7))
        );
    }

    #[test]
    fn test_typing_emits_search_for_active_mode() {
        let mut app = app();
        app.handle_input(key(KeyCode::Char('/')));
        assert!(app.search_focused);
        assert_eq!(
            app.handle_input(key(KeyCode::Char('d'))),
            Action::SearchShows("d".to_string())
        );

        app.set_mode(ViewMode::EpisodeListing);
        app.handle_input(key(KeyCode::Char('/')));
        assert_eq!(
            app.handle_input(key(KeyCode::Char('x'))),
            Action::SearchEpisodes("x".to_string())
        );
        assert_eq!(
            app.handle_input(key(KeyCode::Backspace)),
            Action::SearchEpisodes(String::new())
        );
        assert_eq!(app.show_search, "d");
    }

    #[test]
    fn test_show_selector_picks_entry() {
        let mut app = app();
        app.populate_show_selector(vec![
            SelectorOption {
                label: "Select a show".to_string(),
                value: ShowSelection::Placeholder,
            },
            SelectorOption {
                label: "Breaking Bad".to_string(),
                value: ShowSelection::Show(ShowId(169)),
            },
        ]);

        app.handle_input(key(KeyCode::Char('s')));
        assert_eq!(app.selector, Some(SelectorKind::Shows));
        app.handle_input(key(KeyCode::Down));
        assert_eq!(
            app.handle_input(key(KeyCode::Enter)),
            Action::SelectShow(ShowSelection::Show(ShowId(169)))
        );
        assert!(app.selector.is_none());
    }

    #[test]
    fn test_episode_selector_only_in_episode_listing() {
        let mut app = app();
        app.populate_episode_selector(vec![SelectorOption {
            label: "Show All Episodes".to_string(),
            value: EpisodeSelection::All,
        }]);
        app.handle_input(key(KeyCode::Char('e')));
        assert!(app.selector.is_none());

        app.set_mode(ViewMode::EpisodeListing);
        app.handle_input(key(KeyCode::Char('e')));
        assert_eq!(
            app.handle_input(key(KeyCode::Enter)),
            Action::SelectEpisode(EpisodeSelection::All)
        );
    }

    #[test]
    fn test_back_only_in_episode_listing() {
        let mut app = app();
        assert_eq!(app.handle_input(key(KeyCode::Char('b'))), Action::None);
        app.set_mode(ViewMode::EpisodeListing);
        assert_eq!(app.handle_input(key(KeyCode::Char('b'))), Action::BackToShows);
    }

    #[test]
    fn test_open_reference_without_opener_sets_error() {
        let mut app = app();
        app.open_reference("https://www.tvmaze.com/episodes/1");
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let action = app.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, Action::Quit);
        assert!(app.should_quit);
    }
}
