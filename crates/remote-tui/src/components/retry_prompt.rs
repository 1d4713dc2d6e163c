//! RetryPrompt — centered yes/no popup raised by the backend's stream error.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{C_ACCENT, C_POPUP_BG, C_PRIMARY, C_SECONDARY};

#[derive(Default)]
pub struct RetryPrompt;

impl RetryPrompt {
    /// Keys the prompt answers to; anything else falls through to the panes.
    pub fn answer_for(key: &KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }
}

impl Component for RetryPrompt {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if !state.session.retry_pending() {
            return Vec::new();
        }
        Self::answer_for(&key)
            .map(|yes| vec![Action::RetryAnswer(yes)])
            .unwrap_or_default()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !state.session.retry_pending() {
            return;
        }
        let query = state.session.last_query().unwrap_or("");
        let lines = vec![
            Line::from(Span::styled(
                " There was an error preparing the audio stream.",
                Style::default().fg(C_PRIMARY),
            )),
            Line::from(vec![
                Span::styled(" Try again", Style::default().fg(C_PRIMARY)),
                Span::styled(
                    if query.is_empty() {
                        String::new()
                    } else {
                        format!(" with \"{}\"", query)
                    },
                    Style::default().fg(C_SECONDARY),
                ),
                Span::styled("?", Style::default().fg(C_PRIMARY)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y",
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" retry   ", Style::default().fg(C_SECONDARY)),
                Span::styled(
                    "n",
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" dismiss", Style::default().fg(C_SECONDARY)),
            ]),
        ];

        let popup = centered_rect(60, 6, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_ACCENT))
                        .title(" stream error ")
                        .style(Style::default().bg(C_POPUP_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
