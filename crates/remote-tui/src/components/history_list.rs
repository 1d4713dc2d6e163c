//! HistoryList — past queries from the backend; selecting one plays it.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{
    style_border, style_muted, style_selected, style_selected_focused, C_PLAYING, C_PRIMARY,
};

#[derive(Default)]
pub struct HistoryList {
    selected: usize,
    scroll_offset: usize,
}

impl HistoryList {
    #[cfg(test)]
    fn selected(&self) -> usize {
        self.selected
    }

    /// Keep the selection inside the list after the history was replaced.
    pub fn clamp_to(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + n).min(len - 1);
    }

    fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }
}

impl Component for HistoryList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.session.history().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1, len),
            KeyCode::PageUp => self.select_up(10),
            KeyCode::PageDown => self.select_down(10, len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            KeyCode::Enter if len > 0 => return vec![Action::SelectHistory(self.selected)],
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.session.history().len();
        match event.kind {
            MouseEventKind::ScrollUp => self.select_up(1),
            MouseEventKind::ScrollDown => self.select_down(1, len),
            MouseEventKind::Down(MouseButton::Left) => {
                // Inside the border: first row is area.y + 1
                if event.row <= area.y || event.row >= area.y + area.height.saturating_sub(1) {
                    return Vec::new();
                }
                let idx = self.scroll_offset + (event.row - area.y - 1) as usize;
                if idx < len {
                    self.selected = idx;
                    return vec![Action::SelectHistory(idx)];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let history = state.session.history();
        let last_query = state.session.last_query();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_border(focused))
            .title(format!(" history ({}) ", history.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if history.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(" no history yet", style_muted()))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.clamp_to(history.len());
        self.ensure_visible(height);

        let width = inner.width as usize;
        let lines: Vec<Line> = history
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(height)
            .map(|(i, item)| {
                let marker = if Some(item) == last_query { "♪ " } else { "  " };
                let style = match (i == self.selected, focused) {
                    (true, true) => style_selected_focused(),
                    (true, false) => style_selected(),
                    _ => Style::default().fg(C_PRIMARY),
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(C_PLAYING)),
                    Span::styled(truncate(item, width.saturating_sub(2)), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Cut `s` to at most `max` display columns, ending with `…` when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(items: &str) -> AppState {
        let mut state = AppState::new("ws://test".into());
        state.session.on_message(items);
        state
    }

    #[test]
    fn test_enter_selects_current() {
        let state = state_with(r#"["a","b","b","c"]"#);
        let mut list = HistoryList::default();
        list.handle_key(key(KeyCode::Down), &state);
        list.handle_key(key(KeyCode::Down), &state);
        list.handle_key(key(KeyCode::Down), &state);
        assert_eq!(list.selected(), 2);
        assert_eq!(
            list.handle_key(key(KeyCode::Enter), &state),
            vec![Action::SelectHistory(2)]
        );
    }

    #[test]
    fn test_enter_on_empty_history_does_nothing() {
        let state = state_with("[]");
        let mut list = HistoryList::default();
        assert!(list.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn test_click_maps_row_to_item() {
        let state = state_with(r#"["a","b","c"]"#);
        let mut list = HistoryList::default();
        let area = Rect::new(0, 10, 20, 6);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 12,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            list.handle_mouse(click, area, &state),
            vec![Action::SelectHistory(1)]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long query string", 8), "a long …");
    }
}
