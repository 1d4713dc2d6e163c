//! Session — the client-side core behind the UI adapter.
//!
//! Owns the reconciliation engine, the display history, the last submitted
//! query and the scrub drag.  Inbound frames go through [`Session::on_message`];
//! user intents are plain method calls that return the commands to send.
//! Nothing here does I/O, so the caller's dispatch loop decides ordering.

use tracing::{info, warn};

use crate::protocol::{Command, Inbound};
use crate::reconcile::{Projection, ReconciliationEngine};
use crate::router::{self, RouteError};
use crate::seek::ScrubDrag;
use crate::state::{HistorySet, PlaybackState};

/// What an inbound frame changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A snapshot was merged; carries the fresh projection.
    State(Projection),
    /// The history list was replaced.
    History,
    /// The backend failed to prepare the stream; ask the user whether to
    /// resubmit the last query, then call [`Session::answer_retry`].
    RetryPrompt,
    /// The frame was not understood and was dropped.
    Dropped(RouteError),
}

#[derive(Debug, Default)]
pub struct Session {
    engine: ReconciliationEngine,
    history: HistorySet,
    last_query: Option<String>,
    retry_pending: bool,
    drag: ScrubDrag,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Read side ────────────────────────────────────────────────────────────

    pub fn state(&self) -> &PlaybackState {
        self.engine.state()
    }

    pub fn projection(&self) -> &Projection {
        self.engine.projection()
    }

    pub fn history(&self) -> &HistorySet {
        &self.history
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    pub fn drag(&self) -> &ScrubDrag {
        &self.drag
    }

    // ── Inbound ──────────────────────────────────────────────────────────────

    pub fn on_message(&mut self, raw: &str) -> Update {
        match router::classify(raw) {
            Ok(Inbound::StreamError) => {
                warn!("backend reported a stream error");
                self.retry_pending = true;
                Update::RetryPrompt
            }
            Ok(Inbound::Snapshot(snapshot)) => Update::State(self.engine.apply(&snapshot).clone()),
            Ok(Inbound::History(items)) => {
                self.history = HistorySet::from_items(items);
                Update::History
            }
            Err(e) => {
                warn!("dropping inbound message: {}", e);
                Update::Dropped(e)
            }
        }
    }

    /// Transport is open: ask for the current status and the history.
    pub fn on_connected(&self) -> Vec<Command> {
        vec![Command::Status, Command::History]
    }

    // ── Intents ──────────────────────────────────────────────────────────────

    /// Search for and play `query`.  Blank queries send nothing.
    pub fn submit_query(&mut self, query: &str) -> Vec<Command> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        info!("play {:?}", query);
        self.last_query = Some(query.to_string());
        vec![Command::Play(query.to_string())]
    }

    pub fn select_history_item(&mut self, idx: usize) -> Vec<Command> {
        match self.history.get(idx).map(str::to_string) {
            Some(query) => self.submit_query(&query),
            None => Vec::new(),
        }
    }

    /// Answer to [`Update::RetryPrompt`].  Yes resubmits the last query
    /// verbatim; no changes nothing.
    pub fn answer_retry(&mut self, retry: bool) -> Vec<Command> {
        self.retry_pending = false;
        if !retry {
            return Vec::new();
        }
        match self.last_query.clone() {
            Some(query) => {
                info!("retrying {:?}", query);
                vec![Command::Play(query)]
            }
            None => Vec::new(),
        }
    }

    pub fn set_pause(&mut self, paused: bool) -> Vec<Command> {
        vec![Command::Pause(paused)]
    }

    /// Pause when playing, resume otherwise.
    pub fn toggle_pause(&mut self) -> Vec<Command> {
        let paused = self.projection().pause_highlighted;
        self.set_pause(paused)
    }

    pub fn kill(&mut self) -> Vec<Command> {
        vec![Command::Kill]
    }

    pub fn shutdown(&mut self) -> Vec<Command> {
        vec![Command::Shutdown]
    }

    pub fn refresh(&mut self) -> Vec<Command> {
        vec![Command::Status, Command::History]
    }

    pub fn seek_begin(&mut self, fraction: f64) -> Vec<Command> {
        let total = self.state().known_total_secs();
        vec![self.drag.begin(fraction, total)]
    }

    pub fn seek_move(&mut self, fraction: f64) -> Vec<Command> {
        let total = self.state().known_total_secs();
        self.drag.move_to(fraction, total).into_iter().collect()
    }

    pub fn seek_end(&mut self) {
        self.drag.end();
    }

    /// One-shot seek (keyboard), relative to the current scrub position.
    pub fn seek_by(&mut self, delta: f64) -> Vec<Command> {
        let total = self.state().known_total_secs();
        let target = (self.projection().scrub_fraction + delta).clamp(0.0, 1.0);
        vec![Command::Index(crate::progress::seek_target(target, total))]
    }
}
