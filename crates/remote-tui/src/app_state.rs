//! AppState — read-only data passed to all components during render/event.
//!
//! Components read the session through this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use remote_proto::Session;

use crate::action::Focus;

pub struct AppState {
    pub session: Session,
    pub backend_url: String,
    pub connected: bool,
    pub focus: Focus,
    /// Advances on every UI tick; drives the loading spinner.
    pub tick: usize,
    /// Local time of the last merged snapshot.
    pub last_snapshot_at: Option<chrono::DateTime<chrono::Local>>,
}

impl AppState {
    pub fn new(backend_url: String) -> Self {
        Self {
            session: Session::new(),
            backend_url,
            connected: false,
            focus: Focus::Input,
            tick: 0,
            last_snapshot_at: None,
        }
    }
}
