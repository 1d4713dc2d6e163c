//! Reconciliation — merging snapshots into [`PlaybackState`] and deriving
//! what the UI shows.
//!
//! [`apply_snapshot`] is pure: same `(current, incoming)` always gives the
//! same state and projection.  A progress string that fails to decode is
//! returned as a diagnostic next to the result instead of failing the merge.
//! [`ReconciliationEngine`] wraps it with the single owned state instance.

use tracing::{debug, warn};

use crate::progress::{self, ProgressError};
use crate::protocol::{PlaybackStatus, Snapshot};
use crate::state::PlaybackState;

/// Read-only view the UI adapter renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub status_label: String,
    pub detail_text: String,
    pub scrub_fraction: f64,
    pub loading_active: bool,
    pub stop_enabled: bool,
    pub play_highlighted: bool,
    pub pause_highlighted: bool,
    pub scrub_enabled: bool,
}

impl Projection {
    pub fn derive(state: &PlaybackState) -> Self {
        let status = state.status;
        Self {
            status_label: status.label().to_string(),
            detail_text: detail_text(state),
            scrub_fraction: state.scrub_fraction(),
            loading_active: status.is_loading(),
            stop_enabled: status != PlaybackStatus::Idle,
            play_highlighted: status == PlaybackStatus::Paused,
            pause_highlighted: status == PlaybackStatus::Playing,
            scrub_enabled: status.has_timeline(),
        }
    }
}

/// Output of one merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub state: PlaybackState,
    pub projection: Projection,
    /// Set when the snapshot carried a progress string that did not decode.
    pub diagnostic: Option<ProgressError>,
}

pub fn apply_snapshot(current: &PlaybackState, incoming: &Snapshot) -> Reconciled {
    let mut state = current.clone();
    let mut diagnostic = None;

    state.status = incoming.status;
    if let Some(query) = &incoming.search_query {
        state.search_query = Some(query.clone());
    }
    if let Some(url) = &incoming.video_url {
        state.video_url = Some(url.clone());
    }

    // An empty status line carries no progress
    if let Some(raw) = incoming.metadata.as_deref().filter(|m| !m.is_empty()) {
        match progress::decode(raw) {
            Ok(p) => state.progress = Some(p),
            Err(e) => diagnostic = Some(e),
        }
    }

    // Idle wins over whatever progress is left over or just decoded.
    if state.status == PlaybackStatus::Idle {
        state.progress = None;
    }

    let projection = Projection::derive(&state);
    Reconciled {
        state,
        projection,
        diagnostic,
    }
}

/// Status detail: the query while searching, the url (prefixed by the query
/// once playing), then `elapsed / total`.
fn detail_text(state: &PlaybackState) -> String {
    let mut lines = Vec::new();
    let query = state.search_query.as_deref().unwrap_or("");

    if state.status == PlaybackStatus::Searching && !query.is_empty() {
        lines.push(query.to_string());
    }
    if let Some(url) = state.video_url.as_deref().filter(|u| !u.is_empty()) {
        if state.status.has_timeline() && !query.is_empty() {
            lines.push(format!("({})", query));
        }
        lines.push(url.to_string());
    }
    if let Some(p) = state.progress {
        lines.push(format!(
            "{} / {}",
            progress::format_clock(p.elapsed_secs()),
            progress::format_clock(p.total_secs())
        ));
    }

    lines.join("\n")
}

/// Owns the single [`PlaybackState`] and its current projection.
#[derive(Debug)]
pub struct ReconciliationEngine {
    state: PlaybackState,
    projection: Projection,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        let state = PlaybackState::default();
        let projection = Projection::derive(&state);
        Self {
            state,
            projection,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn apply(&mut self, incoming: &Snapshot) -> &Projection {
        let Reconciled {
            state,
            projection,
            diagnostic,
        } = apply_snapshot(&self.state, incoming);

        if let Some(e) = diagnostic {
            warn!("reconcile: keeping last progress: {}", e);
        }
        if state.status != self.state.status {
            debug!("reconcile: status {} -> {}", self.state.status, state.status);
        }

        self.state = state;
        self.projection = projection;
        &self.projection
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;

    fn snap(status: PlaybackStatus) -> Snapshot {
        Snapshot {
            status,
            ..Default::default()
        }
    }

    fn playing_at(elapsed: u64, total: u64) -> PlaybackState {
        PlaybackState {
            status: PlaybackStatus::Playing,
            progress: Some(Progress::new(elapsed, total)),
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_clears_progress_even_when_decodable() {
        let incoming = Snapshot {
            metadata: Some("A:00:00:10/00:01:00(x)".into()),
            ..snap(PlaybackStatus::Idle)
        };
        let out = apply_snapshot(&playing_at(30, 60), &incoming);
        assert_eq!(out.state.progress, None);
        assert_eq!(out.projection.scrub_fraction, 0.0);
        assert!(out.diagnostic.is_none());
    }

    #[test]
    fn test_playing_fraction() {
        let incoming = Snapshot {
            metadata: Some("A:00:02:05/00:05:00(41%)".into()),
            ..snap(PlaybackStatus::Playing)
        };
        let out = apply_snapshot(&PlaybackState::default(), &incoming);
        assert!((out.projection.scrub_fraction - 125.0 / 300.0).abs() < 1e-9);
        assert!((out.projection.scrub_fraction - 0.4167).abs() < 1e-4);
    }

    #[test]
    fn test_absent_fields_are_kept() {
        let current = PlaybackState {
            status: PlaybackStatus::Playing,
            search_query: Some("foo".into()),
            video_url: Some("foo.mp4".into()),
            progress: Some(Progress::new(5, 50)),
        };
        let out = apply_snapshot(&current, &snap(PlaybackStatus::Paused));
        assert_eq!(out.state.status, PlaybackStatus::Paused);
        assert_eq!(out.state.search_query.as_deref(), Some("foo"));
        assert_eq!(out.state.video_url.as_deref(), Some("foo.mp4"));
        assert_eq!(out.state.progress, Some(Progress::new(5, 50)));
    }

    #[test]
    fn test_malformed_progress_keeps_last_good() {
        let incoming = Snapshot {
            metadata: Some("A:garbage".into()),
            ..snap(PlaybackStatus::Playing)
        };
        let out = apply_snapshot(&playing_at(20, 40), &incoming);
        assert_eq!(out.state.progress, Some(Progress::new(20, 40)));
        assert!(matches!(
            out.diagnostic,
            Some(ProgressError::MalformedProgress { .. })
        ));
        assert_eq!(out.projection.scrub_fraction, 0.5);
    }

    #[test]
    fn test_zero_total_fraction() {
        let incoming = Snapshot {
            metadata: Some("A:00:00:00/00:00:00".into()),
            ..snap(PlaybackStatus::Playing)
        };
        let out = apply_snapshot(&PlaybackState::default(), &incoming);
        assert_eq!(out.projection.scrub_fraction, 0.0);
    }

    #[test]
    fn test_projection_flags() {
        let cases = [
            // status, loading, stop, play, pause, scrub
            (PlaybackStatus::Idle, false, false, false, false, false),
            (PlaybackStatus::Searching, true, true, false, false, false),
            (PlaybackStatus::Buffering, true, true, false, false, false),
            (PlaybackStatus::Playing, false, true, false, true, true),
            (PlaybackStatus::Paused, false, true, true, false, true),
        ];
        for (status, loading, stop, play, pause, scrub) in cases {
            let p = apply_snapshot(&PlaybackState::default(), &snap(status)).projection;
            assert_eq!(p.status_label, status.label());
            assert_eq!(p.loading_active, loading, "{}", status);
            assert_eq!(p.stop_enabled, stop, "{}", status);
            assert_eq!(p.play_highlighted, play, "{}", status);
            assert_eq!(p.pause_highlighted, pause, "{}", status);
            assert_eq!(p.scrub_enabled, scrub, "{}", status);
        }
    }

    #[test]
    fn test_detail_text() {
        let searching = Snapshot {
            search_query: Some("foo".into()),
            ..snap(PlaybackStatus::Searching)
        };
        let out = apply_snapshot(&PlaybackState::default(), &searching);
        assert_eq!(out.projection.detail_text, "foo");

        let playing = Snapshot {
            video_url: Some("foo.mp4".into()),
            metadata: Some("A:00:00:10/00:01:00(x)".into()),
            ..snap(PlaybackStatus::Playing)
        };
        let out = apply_snapshot(&out.state, &playing);
        assert_eq!(
            out.projection.detail_text,
            "(foo)\nfoo.mp4\n00:00:10 / 00:01:00"
        );

        let buffering = apply_snapshot(&PlaybackState::default(), &Snapshot {
            video_url: Some("bar.mp4".into()),
            ..snap(PlaybackStatus::Buffering)
        });
        assert_eq!(buffering.projection.detail_text, "bar.mp4");
    }

    #[test]
    fn test_pure() {
        let incoming = Snapshot {
            metadata: Some("A:00:00:10/00:01:00(x)".into()),
            video_url: Some("x".into()),
            ..snap(PlaybackStatus::Playing)
        };
        let current = playing_at(1, 2);
        assert_eq!(
            apply_snapshot(&current, &incoming),
            apply_snapshot(&current, &incoming)
        );
    }

    #[test]
    fn test_empty_metadata_is_not_progress() {
        let incoming = Snapshot {
            metadata: Some(String::new()),
            ..snap(PlaybackStatus::Buffering)
        };
        let out = apply_snapshot(&playing_at(20, 40), &incoming);
        assert!(out.diagnostic.is_none());
        assert_eq!(out.state.progress, Some(Progress::new(20, 40)));
    }

    #[test]
    fn test_engine_keeps_progress_across_bad_frames() {
        let mut engine = ReconciliationEngine::new();
        assert_eq!(engine.projection().status_label, "idle");

        engine.apply(&Snapshot {
            metadata: Some("A:00:00:01/00:00:02".into()),
            ..snap(PlaybackStatus::Playing)
        });
        engine.apply(&Snapshot {
            metadata: Some("nope".into()),
            ..snap(PlaybackStatus::Playing)
        });
        engine.apply(&Snapshot {
            metadata: Some(String::new()),
            ..snap(PlaybackStatus::Buffering)
        });

        assert_eq!(engine.state().progress, Some(Progress::new(1, 2)));
        assert_eq!(engine.projection().scrub_fraction, 0.5);
    }
}
