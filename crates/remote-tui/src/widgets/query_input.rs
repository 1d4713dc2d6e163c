//! QueryInput — wraps tui-input for the search/play line.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_border, C_INPUT_BG, C_INPUT_FG, C_MUTED};

pub enum InputAction {
    /// Enter pressed; carries the current text.  The text stays in the box,
    /// so the same query can be resubmitted.
    Submitted(String),
    /// Esc pressed; focus should leave the input.
    Left,
    Edited,
}

pub struct QueryInput {
    input: Input,
    placeholder: String,
}

impl QueryInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submitted(self.input.value().to_string()),
            KeyCode::Esc => InputAction::Left,
            _ => {
                self.input.handle_event(&Event::Key(key));
                InputAction::Edited
            }
        }
    }

    /// Render the input box into `area` (bordered, one text row).
    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_border(focused))
            .title(" search / play ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let display = if value.is_empty() && !focused {
            Span::styled(format!("› {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("› {}", visible), Style::default().fg(C_INPUT_FG))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, inner);

        if focused && inner.width > 2 {
            let cursor_x = inner.x + 2 + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(inner.x + inner.width - 1), inner.y));
        }
    }
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new("type a query, Enter to play")
    }
}
