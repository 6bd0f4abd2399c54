//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::state::App;
use super::types::SelectorKind;
use crate::types::ViewMode;
use crate::view::{Content, EpisodeCard, ShowCard, format_count};

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let count_height = if app.mode == ViewMode::EpisodeListing && app.count.is_some() {
        1
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Search bar
            Constraint::Length(count_height), // Episode count
            Constraint::Min(0),               // Content
            Constraint::Length(3),            // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);

    if let Some((shown, total)) = app.count.filter(|_| count_height > 0) {
        let count = Paragraph::new(format_count(shown, total))
            .style(Style::default().fg(Color::Green));
        frame.render_widget(count, chunks[2]);
    }

    draw_content(frame, app, chunks[3]);
    draw_footer(frame, app, chunks[4]);

    if let Some(kind) = app.selector {
        draw_selector_popup(frame, app, kind);
    }

    // Draw error popup if there's an error
    if let Some(error) = &app.error_message {
        draw_error_popup(frame, error);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mode_label = match app.mode {
        ViewMode::ShowListing => "[shows]",
        ViewMode::EpisodeListing => "[episodes]",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "tv-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(mode_label, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(app.catalog_base.as_str(), Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = match app.mode {
        ViewMode::ShowListing => "Search shows",
        ViewMode::EpisodeListing => "Search episodes",
    };

    let input = app.active_search();
    let search_text = if input.is_empty() && !app.search_focused {
        "Press '/' to search..."
    } else {
        input
    };

    let search = Paragraph::new(search_text)
        .style(if app.search_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );

    frame.render_widget(search, area);

    if app.search_focused {
        frame.set_cursor_position((area.x + input.chars().count() as u16 + 1, area.y + 1));
    }
}

fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = match &app.content {
        Content::Message(message) => {
            let notice = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            frame.render_widget(notice, area);
            return;
        }
        Content::Error(message) => {
            let notice = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(notice, area);
            return;
        }
        Content::Shows(cards) => cards.iter().map(|c| ListItem::new(c.title.clone())).collect(),
        Content::Episodes(cards) => cards.iter().map(|c| ListItem::new(c.heading())).collect(),
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title = match &app.content {
        Content::Shows(cards) => format!("Shows ({})", cards.len()),
        Content::Episodes(cards) => format!("Episodes ({})", cards.len()),
        _ => String::new(),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut app.content_state);

    let details = match (&app.content, app.content_state.selected()) {
        (Content::Shows(cards), Some(i)) => cards.get(i).map(show_details),
        (Content::Episodes(cards), Some(i)) => cards.get(i).map(episode_details),
        _ => None,
    }
    .unwrap_or_default();

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn show_details(card: &ShowCard) -> String {
    format!(
        "{}\n\nImage: {}\nGenres: {}\nStatus: {}\nRating: {}\nRuntime: {}\n\n{}\n\nPress Enter to view episodes",
        card.title, card.image, card.genres, card.status, card.rating, card.runtime, card.summary
    )
}

fn episode_details(card: &EpisodeCard) -> String {
    format!(
        "{}\n\nImage: {}\n\n{}\n\nReference: {}\nPress Enter to open",
        card.heading(),
        card.image,
        card.summary,
        card.url
    )
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.search_focused {
        "[type] filter  [Enter/Esc] done"
    } else if app.selector.is_some() {
        "[↑↓] navigate  [Enter] select  [Esc] close"
    } else {
        match app.mode {
            ViewMode::ShowListing => {
                "[/] search  [s] select show  [↑↓] navigate  [Enter] episodes  [q] quit"
            }
            ViewMode::EpisodeListing => {
                "[/] search  [s] select show  [e] select episode  [Enter] reference  [b] back to shows  [q] quit"
            }
        }
    };

    let help_text = if app.loading {
        format!("Loading...  {}", help_text)
    } else {
        help_text.to_string()
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_selector_popup(frame: &mut Frame, app: &mut App, kind: SelectorKind) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let title = match kind {
        SelectorKind::Shows => "Select a show",
        SelectorKind::Episodes => "Select an episode",
    };

    let items: Vec<ListItem> = app
        .selector_labels()
        .into_iter()
        .map(|label| ListItem::new(label.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.selector_state);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
