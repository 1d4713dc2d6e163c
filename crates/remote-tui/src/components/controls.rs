//! Controls — play / pause / stop / shutdown buttons.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{C_ACCENT, C_MUTED, C_PAUSED, C_PLAYING, C_PRIMARY, C_SELECTION_BG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    Play,
    Pause,
    Stop,
    Shutdown,
}

impl Button {
    const ALL: [Button; 4] = [Button::Play, Button::Pause, Button::Stop, Button::Shutdown];

    fn label(self) -> &'static str {
        match self {
            Button::Play => " ▶ play ",
            Button::Pause => " ⏸ pause ",
            Button::Stop => " ■ stop ",
            Button::Shutdown => " ⏻ shutdown ",
        }
    }

    fn action(self) -> Action {
        match self {
            Button::Play => Action::SetPause(false),
            Button::Pause => Action::SetPause(true),
            Button::Stop => Action::Kill,
            Button::Shutdown => Action::Shutdown,
        }
    }
}

#[derive(Default)]
pub struct Controls {
    /// (button, first column, width) from the last draw.
    hit_boxes: Vec<(Button, u16, u16)>,
    row: u16,
}

impl Component for Controls {
    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || event.row != self.row {
            return Vec::new();
        }
        let hit = self
            .hit_boxes
            .iter()
            .find(|(_, x, w)| event.column >= *x && event.column < x + w)
            .map(|(b, _, _)| *b);
        match hit {
            // Stop only does something once media is loaded
            Some(Button::Stop) if !state.session.projection().stop_enabled => Vec::new(),
            Some(button) => vec![button.action()],
            None => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let p = state.session.projection();
        let mut spans = vec![Span::raw(" ")];
        let mut x = area.x + 1;
        self.hit_boxes.clear();
        self.row = area.y;

        for button in Button::ALL {
            let (active, color) = match button {
                Button::Play => (p.play_highlighted, C_PAUSED),
                Button::Pause => (p.pause_highlighted, C_PLAYING),
                Button::Stop => (p.stop_enabled, C_ACCENT),
                Button::Shutdown => (false, C_PRIMARY),
            };
            let style = if active {
                Style::default()
                    .fg(color)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else if button == Button::Stop {
                Style::default().fg(C_MUTED)
            } else {
                Style::default().fg(C_PRIMARY)
            };
            let label = button.label();
            let width = unicode_width::UnicodeWidthStr::width(label) as u16;
            self.hit_boxes.push((button, x, width));
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
