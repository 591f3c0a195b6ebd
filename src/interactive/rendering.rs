//! TUI rendering with ratatui
//!
//! Draws the card grid and the side panels into the regions of a
//! [`PageLayout`].

use super::app::{App, MessageStyle};
use super::terminal_view::{PageLayout, card_area, card_rects};
use crate::output::formatters::grid_columns;
use crate::view::HeadlessCard;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let layout = PageLayout::compute(f.area());

    render_header(f, layout.header);
    render_cards(f, app, layout.cards);
    render_timer(f, app, layout.timer);
    render_start_button(f, app, layout.start_button);
    render_cheat(f, app, layout.cheat);
    render_applause(f, app, layout.applause);
    render_status(f, app, layout.status);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🃏 MEMORY MATCH - Find the Pairs")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_cards(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Cards ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    f.render_widget(block, area);

    let tiles: Vec<&HeadlessCard> = app.view.tiles().collect();
    if tiles.is_empty() {
        let hint = Paragraph::new("Press 's' to deal a new round")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, card_area(area));
        return;
    }

    let rects = card_rects(card_area(area), tiles.len(), grid_columns(tiles.len()));
    for (position, (tile, rect)) in tiles.iter().zip(rects).enumerate() {
        render_card(f, tile, rect, position == app.cursor, app.view.cheat());
    }
}

fn render_card(f: &mut Frame, tile: &HeadlessCard, area: Rect, selected: bool, cheat: bool) {
    let (text, text_style) = if tile.solved {
        (tile.text.as_str(), Style::default().fg(Color::Green))
    } else if tile.face_up {
        (
            tile.text.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if cheat {
        (tile.text.as_str(), Style::default().fg(Color::DarkGray))
    } else {
        ("?", Style::default().fg(Color::Blue))
    };

    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if tile.solved {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .style(border_style);

    // Centre the face vertically inside the card
    let inner_height = area.height.saturating_sub(2);
    let mut lines = vec![Line::from(""); usize::from(inner_height.saturating_sub(1) / 2)];
    lines.push(Line::from(Span::styled(text, text_style)));

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(card, area);
}

fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.session.is_won() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let timer = Paragraph::new(format!("⏱  {}", app.view.timer_text()))
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Time ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(timer, area);
}

fn render_start_button(f: &mut Frame, app: &App, area: Rect) {
    let label = if app.session.round().is_none() {
        "▶ Start (s)"
    } else {
        "↻ New round (n)"
    };

    let button = Paragraph::new(label)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(button, area);
}

fn render_cheat(f: &mut Frame, app: &App, area: Rect) {
    let (label, color) = if app.view.cheat() {
        ("Cheat: ON (c)", Color::Magenta)
    } else {
        ("Cheat: off (c)", Color::DarkGray)
    };

    let cheat = Paragraph::new(label)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(cheat, area);
}

fn render_applause(f: &mut Frame, app: &App, area: Rect) {
    if !app.view.applause_visible() {
        render_messages(f, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            "👏 👏 👏",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "ALL PAIRS FOUND!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(banner, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let (solved, total) = app
        .session
        .round()
        .map_or((0, 0), |round| (round.solved_pairs(), round.pair_count()));
    let percent = if total > 0 {
        (solved * 100 / total) as u16
    } else {
        0
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(format!("{solved}/{total} pairs"));
    f.render_widget(gauge, chunks[0]);

    let (clicks, mismatches) = app
        .session
        .round()
        .map_or((0, 0), |round| (round.clicks(), round.mismatches()));
    let stats_text = format!(
        "Clicks: {clicks} | Misses: {mismatches} | Won: {}",
        app.session.rounds_completed()
    );
    let stats = Paragraph::new(stats_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(stats, chunks[1]);

    let help_text = if app.session.is_won() {
        "q: Quit | n: New Round | c: Cheat"
    } else {
        "←↑↓→: Move | Space: Flip | n: New | c: Cheat | q: Quit"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
