//! NowPlaying — status label, loading spinner and the detail lines.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{status_color, style_border, C_ACCENT, C_CONNECTING, C_PRIMARY, C_SECONDARY};

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Default)]
pub struct NowPlaying;

impl Component for NowPlaying {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let session = &state.session;
        let projection = session.projection();
        let status = session.state().status;

        let mut title = vec![
            Span::raw(" "),
            Span::styled(
                projection.status_label.to_uppercase(),
                Style::default()
                    .fg(status_color(status))
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if projection.loading_active {
            let icon = SPINNER_FRAMES[state.tick % SPINNER_FRAMES.len()];
            title.push(Span::styled(
                format!(" {}", icon),
                Style::default().fg(C_CONNECTING),
            ));
        }
        title.push(Span::raw(" "));

        let mut lines: Vec<Line> = projection
            .detail_text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(C_PRIMARY))))
            .collect();
        if !state.connected {
            lines.push(Line::from(Span::styled(
                format!("not connected to {}", state.backend_url),
                Style::default().fg(C_ACCENT),
            )));
        } else if let Some(at) = state.last_snapshot_at {
            lines.push(Line::from(Span::styled(
                format!("updated {}", at.format("%H:%M:%S")),
                Style::default().fg(C_SECONDARY),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(style_border(focused))
                        .title(Line::from(title)),
                )
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
