//! Action enum — every user intent the UI can raise.

/// Which pane receives plain key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
}

/// Components produce Actions; the App applies them to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    SubmitQuery(String),
    SelectHistory(usize),
    SetPause(bool),
    TogglePause,
    Kill,
    Shutdown,
    Refresh,

    // ── Seek bar ─────────────────────────────────────────────────────────────
    SeekBegin(f64),
    SeekMove(f64),
    SeekEnd,
    SeekBy(f64),

    // ── Retry prompt ─────────────────────────────────────────────────────────
    RetryAnswer(bool),

    // ── UI ───────────────────────────────────────────────────────────────────
    FocusPane(Focus),
    Quit,
}
