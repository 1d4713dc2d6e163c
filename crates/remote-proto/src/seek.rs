use crate::progress;
use crate::protocol::Command;

/// Tracks a pointer drag on the seek bar.
///
/// Every pointer event that lands while the drag is active produces exactly
/// one `index:` command; nothing is coalesced.  The backend treats the latest
/// one as authoritative.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrubDrag {
    dragging: bool,
    last_fraction: Option<f64>,
}

impl ScrubDrag {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Fraction of the latest pointer event, for drawing the bar under the
    /// pointer until the next snapshot arrives.
    pub fn last_fraction(&self) -> Option<f64> {
        self.last_fraction
    }

    /// Pointer down on the bar.
    pub fn begin(&mut self, fraction: f64, total_secs: u64) -> Command {
        self.dragging = true;
        self.seek(fraction, total_secs)
    }

    /// Pointer moved; ignored unless a drag is active.
    pub fn move_to(&mut self, fraction: f64, total_secs: u64) -> Option<Command> {
        if !self.dragging {
            return None;
        }
        Some(self.seek(fraction, total_secs))
    }

    /// Pointer released or left the bar.
    pub fn end(&mut self) {
        self.dragging = false;
        self.last_fraction = None;
    }

    fn seek(&mut self, fraction: f64, total_secs: u64) -> Command {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.last_fraction = Some(fraction);
        Command::Index(progress::seek_target(fraction, total_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_begin_is_ignored() {
        let mut drag = ScrubDrag::default();
        assert_eq!(drag.move_to(0.5, 200), None);
    }

    #[test]
    fn test_one_command_per_move() {
        let mut drag = ScrubDrag::default();
        assert_eq!(drag.begin(0.25, 200), Command::Index(50));
        assert_eq!(drag.move_to(0.5, 200), Some(Command::Index(100)));
        assert_eq!(drag.move_to(0.5, 200), Some(Command::Index(100)));
        assert_eq!(drag.last_fraction(), Some(0.5));
        drag.end();
        assert!(!drag.is_dragging());
        assert_eq!(drag.move_to(0.75, 200), None);
    }

    #[test]
    fn test_nan_drawn_and_sent_as_start() {
        let mut drag = ScrubDrag::default();
        assert_eq!(drag.begin(f64::NAN, 200), Command::Index(0));
        assert_eq!(drag.last_fraction(), Some(0.0));
        assert_eq!(drag.move_to(1.5, 200), Some(Command::Index(200)));
        assert_eq!(drag.last_fraction(), Some(1.0));
    }

    #[test]
    fn test_unknown_total_still_emits() {
        let mut drag = ScrubDrag::default();
        assert_eq!(drag.begin(0.9, 0), Command::Index(0));
    }
}
