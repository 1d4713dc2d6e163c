//! Smooth Unicode seek bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use remote_proto::progress::format_clock;

use crate::theme::{C_MUTED, C_PLAYING, C_SECONDARY, C_SEPARATOR};

/// Columns occupied by the bar cells themselves (labels excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub x: u16,
    pub width: u16,
}

/// Where the bar cells land inside `area`, given the time labels around it.
pub fn bar_geometry(area: Rect, time_pos: Option<u64>, duration: Option<u64>) -> BarGeometry {
    let (left, right) = labels(time_pos, duration);
    let left_w = if left.is_empty() { 0 } else { left.len() as u16 + 1 };
    let right_w = if right.is_empty() { 0 } else { right.len() as u16 + 1 };
    let width = area.width.saturating_sub(left_w + right_w).max(4).min(area.width);
    BarGeometry {
        x: area.x + left_w.min(area.width.saturating_sub(width)),
        width,
    }
}

/// Scrub fraction for a pointer at `column`, clamped to the bar.
pub fn fraction_at(geometry: BarGeometry, column: u16) -> f64 {
    if geometry.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(geometry.x).min(geometry.width - 1);
    offset as f64 / (geometry.width - 1) as f64
}

/// Render the seek bar in `area`.
/// `progress` is 0.0..=1.0; a disabled bar is drawn dimmed.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    time_pos: Option<u64>,
    duration: Option<u64>,
    enabled: bool,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let (left_label, right_label) = labels(time_pos, duration);
    let bar_w = bar_geometry(area, time_pos, duration).width as usize;

    // Unicode smooth fill: 8 eighths per cell
    let eighths = (progress.clamp(0.0, 1.0) * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks.min(bar_w) {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push('·');
        }
    }

    let bar_color = if enabled { C_PLAYING } else { C_SEPARATOR };
    let mut spans = Vec::new();
    if !left_label.is_empty() {
        spans.push(Span::styled(
            format!("{} ", left_label),
            Style::default().fg(C_SECONDARY),
        ));
    }
    spans.push(Span::styled(bar, Style::default().fg(bar_color)));
    if !right_label.is_empty() {
        spans.push(Span::styled(
            format!(" {}", right_label),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn labels(time_pos: Option<u64>, duration: Option<u64>) -> (String, String) {
    (
        time_pos.map(format_clock).unwrap_or_default(),
        duration.map(format_clock).unwrap_or_default(),
    )
}
