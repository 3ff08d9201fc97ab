//! Admin panel view.

use pokedex_core::catalog::PokemonMeta;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::common::TaskKind;
use crate::render::spinner;
use crate::state::TuiState;

use super::state::{AdminFocus, EditField, EditSession, stringify_base_stats};

pub fn render(state: &TuiState, frame: &mut Frame, area: Rect) {
    let edit_height = if state.admin.editing.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Seed status + messages
            Constraint::Length(1),           // Filter line
            Constraint::Min(1),              // Catalog table
            Constraint::Length(edit_height), // Edit panel
        ])
        .split(area);

    render_seed_panel(state, frame, chunks[0]);
    render_filter_line(state, frame, chunks[1]);
    render_table(state, frame, chunks[2]);
    if edit_height > 0 {
        render_edit_panel(state, frame, chunks[3]);
    }
}

fn render_seed_panel(state: &TuiState, frame: &mut Frame, area: Rect) {
    let seeded_span = if state.tasks.state(TaskKind::SeedStatus).is_running() {
        Span::styled(
            format!("{} Checking seed status...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )
    } else {
        match state.admin.seeded {
            Some(true) => Span::styled("Catalog is seeded", Style::default().fg(Color::Green)),
            Some(false) => {
                Span::styled("Catalog is not seeded", Style::default().fg(Color::Yellow))
            }
            None => Span::styled("Seed status unknown", Style::default().fg(Color::DarkGray)),
        }
    };

    let mut lines = vec![Line::from(seeded_span)];

    if state.tasks.state(TaskKind::SeedAction).is_running() {
        lines.push(Line::from(Span::styled(
            format!("{} Working...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &state.admin.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(message) = &state.admin.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_filter_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let filter = &state.admin.filter;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let search = if state.admin.focus == AdminFocus::Search {
        format!("{}_", state.admin.search_draft)
    } else if filter.search_term.is_empty() {
        "(none)".to_string()
    } else {
        filter.search_term.clone()
    };
    let search_style = if state.admin.focus == AdminFocus::Search {
        Style::default().fg(Color::Cyan)
    } else {
        value
    };

    let option = |v: Option<i64>| v.map_or("all".to_string(), |n| n.to_string());

    let spans = vec![
        Span::styled("/ search: ", label),
        Span::styled(search, search_style),
        Span::styled("  g gen: ", label),
        Span::styled(option(filter.generation), value),
        Span::styled("  f rarity: ", label),
        Span::styled(option(filter.rarity), value),
        Span::styled("  x reset", label),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(state: &TuiState, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:>6}  {:<20} {:>4}  {:>7}  {:>8}",
            "id", "name", "gen", "rarity", "stats"
        ),
        Style::default().fg(Color::DarkGray),
    ))];

    let height = area.height.saturating_sub(1) as usize;
    let offset = scroll_offset(state.admin.cursor, state.admin.list.len(), height);

    for (index, row) in state.admin.list.iter().enumerate().skip(offset).take(height) {
        lines.push(row_line(state, index, row));
    }

    if let Some(error) = &state.admin.list_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if state.tasks.state(TaskKind::ListPage).is_running() {
        lines.push(Line::from(Span::styled(
            format!("{} Loading...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )));
    } else if state.admin.list.is_empty() {
        lines.push(Line::from(Span::styled(
            "No Pokémon loaded.",
            Style::default().fg(Color::DarkGray),
        )));
    } else if !state.admin.has_more {
        lines.push(Line::from(Span::styled(
            format!("{} loaded, end of list", state.admin.list.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn row_line(state: &TuiState, index: usize, row: &PokemonMeta) -> Line<'static> {
    let selected = index == state.admin.cursor;
    let saving = state.admin.saving.contains(&row.id);
    let editing = state.admin.edits.contains_key(&row.id);

    let style = if selected {
        Style::default().fg(Color::Cyan)
    } else if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let marker = if saving {
        "~"
    } else if editing {
        "*"
    } else if selected {
        ">"
    } else {
        " "
    };

    let stats = stringify_base_stats(&row.base_stat_total);
    let text = format!(
        "{marker}{:>5}  {:<20} {:>4}  {:>7}  {:>8}",
        row.id,
        truncate(&row.name, 20),
        row.generation_id,
        row.rarity.to_string(),
        truncate(&stats, 8),
    );
    Line::from(Span::styled(text, style))
}

fn render_edit_panel(state: &TuiState, frame: &mut Frame, area: Rect) {
    let Some(row_id) = state.admin.editing else {
        return;
    };
    let Some(session) = state.admin.edits.get(&row_id) else {
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("Editing #{row_id} ({})", session.snapshot.name),
        Style::default().fg(Color::White),
    ))];
    lines.push(edit_field_line(session, EditField::Rarity, "rarity"));
    lines.push(edit_field_line(session, EditField::Generation, "generation"));
    lines.push(edit_field_line(session, EditField::BaseStats, "base stats"));
    lines.push(Line::from(Span::styled(
        "Tab next field  Enter save  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn edit_field_line(session: &EditSession, field: EditField, label: &str) -> Line<'static> {
    let focused = session.field == field;
    let value = match field {
        EditField::Rarity => &session.rarity,
        EditField::Generation => &session.generation,
        EditField::BaseStats => &session.base_stats,
    };
    let pointer = if focused { ">" } else { " " };
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(Span::styled(
        format!("{pointer} {label:<11} {value}{cursor}"),
        style,
    ))
}

/// Keeps the cursor row inside the visible window.
fn scroll_offset(cursor: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    if cursor >= height {
        (cursor + 1 - height).min(len - height)
    } else {
        0
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
