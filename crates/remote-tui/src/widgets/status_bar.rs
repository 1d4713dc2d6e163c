//! Status bar — bottom line with connection state, mode, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Focus;
use crate::theme::{C_ACCENT, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED, C_PLAYING, C_SEPARATOR};

pub fn mode_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Input => "SEARCH",
        Focus::History => "NORMAL",
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, focus: Focus, connected: bool) {
    let label_color = match focus {
        Focus::Input => C_MODE_SEARCH,
        Focus::History => C_MODE_NORMAL,
    };
    let conn_span = if connected {
        Span::styled("●", Style::default().fg(C_PLAYING))
    } else {
        Span::styled("○", Style::default().fg(C_ACCENT))
    };

    let keys = match focus {
        Focus::Input => " type query  Enter play  Esc leave  Ctrl-C quit",
        Focus::History => {
            " ↑↓/jk select  Enter play  Space pause/resume  ←→ seek  x stop  X shutdown  r refresh  / search  q quit"
        }
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode_label(focus)),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        conn_span,
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
