//! Home shell view: tab bar, per-tab content, status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::admin;
use crate::render::spinner;
use crate::state::{HomeTab, TuiState};

pub fn render(state: &TuiState, tab: HomeTab, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar + separator
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_tab_bar(state, tab, frame, chunks[0]);

    match tab {
        HomeTab::Overview => render_overview(state, frame, chunks[1]),
        HomeTab::Minigame => render_placeholder(
            frame,
            chunks[1],
            "Minigame",
            "Guess the Pokémon from its silhouette.",
        ),
        HomeTab::Store => {
            render_placeholder(frame, chunks[1], "Store", "Spend your coins on card packs.");
        }
        HomeTab::Duel => {
            render_placeholder(frame, chunks[1], "Duel", "Challenge another trainer.");
        }
        HomeTab::Admin => admin::render::render(state, frame, chunks[1]),
    }

    render_status_line(state, tab, frame, chunks[2]);
}

fn render_tab_bar(state: &TuiState, active: HomeTab, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (index, tab) in HomeTab::ALL.iter().enumerate() {
        // The Admin tab stays visible; the guard decides on entry.
        let style = if *tab == active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {}:{} ", index + 1, tab.title()),
            style,
        ));
    }

    let who = match &state.home.user {
        Some(user) if state.home.is_admin => format!("{} [Admin]", user.email),
        Some(user) => user.email.clone(),
        None => String::new(),
    };

    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(used + who.chars().count());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(who, Style::default().fg(Color::Green)));

    let bar = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(bar, area);
}

fn render_overview(state: &TuiState, frame: &mut Frame, area: Rect) {
    let greeting = match &state.home.user {
        Some(user) => format!("Welcome back, {}.", user.email),
        None => "Welcome to the Pokémon catalog.".to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(greeting, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from("Browse the minigame, store and duel tabs, or manage the"),
        Line::from("catalog from the admin tab if your account allows it."),
    ];
    frame.render_widget(Paragraph::new(lines), inset(area));
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, blurb: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            blurb.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Not available yet.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inset(area));
}

fn render_status_line(state: &TuiState, tab: HomeTab, frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = if state.tasks.is_any_running() || !state.admin.saving.is_empty() {
        vec![
            Span::styled(spinner(state), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled("Working...", Style::default().fg(Color::Yellow)),
        ]
    } else {
        let mut spans = vec![
            Span::styled("Tab", Style::default().fg(Color::DarkGray)),
            Span::raw(" switch  "),
            Span::styled("Ctrl+L", Style::default().fg(Color::DarkGray)),
            Span::raw(" logout  "),
            Span::styled("q", Style::default().fg(Color::DarkGray)),
            Span::raw(" quit"),
        ];
        if tab == HomeTab::Admin {
            spans.extend([
                Span::raw("  "),
                Span::styled("s", Style::default().fg(Color::DarkGray)),
                Span::raw(" seed  "),
                Span::styled("d", Style::default().fg(Color::DarkGray)),
                Span::raw(" delete+seed  "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" edit row"),
            ]);
        }
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y,
        area.width.saturating_sub(4),
        area.height,
    )
}
