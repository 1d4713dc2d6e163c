//! SeekBar — scrub control.  Pointer down starts a drag, every drag event
//! seeks, release or leaving the bar ends it.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::style_border;
use crate::widgets::progress_bar::{self, BarGeometry};

#[derive(Default)]
pub struct SeekBar {
    /// Bar cells from the last draw, used to map pointer columns.
    geometry: Option<(BarGeometry, u16)>,
}

impl SeekBar {
    fn fraction_for(&self, event: &MouseEvent) -> Option<f64> {
        let (geometry, row) = self.geometry?;
        let inside = event.row == row
            && event.column >= geometry.x.saturating_sub(1)
            && event.column <= geometry.x + geometry.width;
        inside.then(|| progress_bar::fraction_at(geometry, event.column))
    }
}

impl Component for SeekBar {
    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let session = &state.session;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !session.projection().scrub_enabled {
                    return Vec::new();
                }
                self.fraction_for(&event)
                    .map(|f| vec![Action::SeekBegin(f)])
                    .unwrap_or_default()
            }
            MouseEventKind::Drag(MouseButton::Left) if session.drag().is_dragging() => {
                match self.fraction_for(&event) {
                    Some(f) => vec![Action::SeekMove(f)],
                    // Pointer left the bar
                    None => vec![Action::SeekEnd],
                }
            }
            MouseEventKind::Up(_) if session.drag().is_dragging() => vec![Action::SeekEnd],
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_border(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let session = &state.session;
        let projection = session.projection();
        let progress = session.state().progress;
        let time_pos = progress.map(|p| p.elapsed_secs());
        let duration = progress.map(|p| p.total_secs());

        // Follow the pointer while dragging; snapshots catch up afterwards.
        let fraction = session
            .drag()
            .last_fraction()
            .unwrap_or(projection.scrub_fraction);

        progress_bar::draw_progress(
            frame,
            inner,
            fraction,
            time_pos,
            duration,
            projection.scrub_enabled,
        );
        self.geometry = (inner.height > 0)
            .then(|| (progress_bar::bar_geometry(inner, time_pos, duration), inner.y));
    }
}
