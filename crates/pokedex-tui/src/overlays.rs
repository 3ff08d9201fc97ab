//! Modal overlays.
//!
//! An overlay temporarily takes over keyboard input. The only one here is
//! the confirmation dialog guarding delete-all-and-seed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Action the user confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Reseed,
}

#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub confirmed: Option<ConfirmAction>,
}

impl OverlayUpdate {
    fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            confirmed: None,
        }
    }

    fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            confirmed: None,
        }
    }

    fn confirm(action: ConfirmAction) -> Self {
        Self {
            transition: OverlayTransition::Close,
            confirmed: Some(action),
        }
    }
}

#[derive(Debug)]
pub struct ConfirmState {
    pub prompt: String,
    pub action: ConfirmAction,
}

#[derive(Debug)]
pub enum Overlay {
    Confirm(ConfirmState),
}

impl Overlay {
    /// The confirmation in front of delete-all-and-seed.
    pub fn confirm_reseed() -> Self {
        Overlay::Confirm(ConfirmState {
            prompt: "Delete all Pokémon data and seed again?".to_string(),
            action: ConfirmAction::Reseed,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Confirm(confirm) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    OverlayUpdate::confirm(confirm.action)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => OverlayUpdate::close(),
                _ => OverlayUpdate::stay(),
            },
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Confirm(confirm) => render_confirm(confirm, frame, area),
        }
    }
}

fn render_confirm(confirm: &ConfirmState, frame: &mut Frame, area: Rect) {
    let width = (confirm.prompt.chars().count() as u16 + 6)
        .max(30)
        .min(area.width);
    let height = 5u16.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm ");
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    let lines = vec![
        Line::from(Span::styled(
            confirm.prompt.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm  n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
