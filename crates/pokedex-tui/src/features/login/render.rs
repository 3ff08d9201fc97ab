//! Login screen view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::TaskKind;
use crate::render::spinner;
use crate::state::TuiState;

use super::LoginField;

pub fn render(state: &TuiState, frame: &mut Frame, area: Rect) {
    let popup_width = 52u16.min(area.width);
    let popup_height = 11u16.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Pokédex sign in ");
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let para = Paragraph::new(form_lines(state));
    frame.render_widget(para, inner);
}

fn form_lines(state: &TuiState) -> Vec<Line<'static>> {
    let form = &state.login;
    let masked = "•".repeat(form.password.chars().count());

    let mut lines = vec![
        field_line("Email", &form.email, form.focus == LoginField::Email),
        Line::from(""),
        field_line("Password", &masked, form.focus == LoginField::Password),
        Line::from(""),
    ];

    if state.tasks.state(TaskKind::Login).is_running() {
        lines.push(Line::from(Span::styled(
            format!("{} Signing in...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab switch field  Enter sign in  Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let pointer = if focused { ">" } else { " " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{pointer} {label:<9}"), label_style),
        Span::styled(
            format!("{value}{cursor}"),
            Style::default().fg(Color::White),
        ),
    ])
}
