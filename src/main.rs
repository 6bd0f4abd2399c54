//! Main entry point for the tv-browser application.

use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use tv_browser::api::CatalogClient;
use tv_browser::config::Config;
use tv_browser::controller::{Command, Controller, Outcome, perform};
use tv_browser::error::Result;
use tv_browser::opener::Opener;
use tv_browser::tui::{Action, App, draw, poll_event};

/// Command-line arguments for the tv-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "tv-browser",
    version,
    about = "Browse TV shows and their episodes from the terminal",
    long_about = "Browse, search, and open TV show episodes from the TVmaze catalog using a TUI interface."
)]
struct Args {
    /// Base URL of the catalog API (overrides config)
    #[arg(short, long)]
    catalog_base: Option<String>,

    /// Command used to open episode reference pages (overrides config and platform default)
    #[arg(short, long)]
    opener: Option<String>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write a default config file if none exists, print its path, and exit
    #[arg(long)]
    init_config: bool,
}

/// Path of the log file; the terminal belongs to the TUI.
fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("tv-browser").join("tv-browser.log"))
}

fn init_logging(level: u8) {
    let log_level = match level {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);

    let file = log_file_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    if let Some(file) = file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    debug!("Log level set to {:?}", log_level);
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run a fetch in the background and report its outcome on `tx`.
fn dispatch(command: Command, client: &CatalogClient, tx: &mpsc::UnboundedSender<Outcome>) {
    debug!("Dispatching {:?}", command);
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = perform(&client, command).await;
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(outcome);
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Load config
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    if let Some(base) = args.catalog_base {
        config.catalog_base = base;
    }
    if let Some(opener) = args.opener {
        config.opener = Some(opener);
    }

    let client = CatalogClient::new(&config)?;
    info!("Using catalog at {}", client.base_url());

    let opener = match Opener::from_config(config.opener.as_deref(), &config.opener_args) {
        Ok(opener) => Some(opener),
        Err(e) => {
            warn!("{}. Reference pages cannot be opened.", e);
            None
        }
    };

    let mut terminal = init_terminal()?;

    let app = App::new(client.base_url().to_string(), opener);
    let mut controller = Controller::new(app);

    let result = run_app(&mut terminal, &mut controller, &client).await;

    // Restore terminal
    restore_terminal()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<App>,
    client: &CatalogClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let first = controller.start();
    dispatch(first, client, &tx);

    loop {
        // Apply finished fetches before drawing
        while let Ok(outcome) = rx.try_recv() {
            controller.apply(outcome);
        }

        let loading = controller.is_loading();
        controller.surface_mut().loading = loading;
        terminal.draw(|f| draw(f, controller.surface_mut()))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            let action = controller.surface_mut().handle_input(key);

            // Clear error after any input
            if !matches!(action, Action::None) {
                controller.surface_mut().clear_error();
            }

            let command = match action {
                Action::Quit => break,
                Action::None => None,
                Action::SearchShows(term) => {
                    controller.search_shows(&term);
                    None
                }
                Action::SearchEpisodes(term) => {
                    controller.search_episodes(&term);
                    None
                }
                Action::SelectShow(selection) => controller.select_show(selection),
                Action::SelectEpisode(selection) => {
                    controller.select_episode(selection);
                    None
                }
                Action::RequestEpisodes(show_id) => controller.request_episodes(show_id),
                Action::OpenReference(episode_id) => {
                    controller.open_reference(episode_id);
                    None
                }
                Action::BackToShows => controller.back_to_shows(),
            };

            if let Some(command) = command {
                dispatch(command, client, &tx);
            }
        }

        if controller.surface().should_quit {
            break;
        }
    }

    Ok(())
}
