//! App — component-based event loop.
//!
//! - `App` owns every component and the `AppState` they read.
//! - One `tokio::mpsc` channel carries `AppMessage`s in from the terminal
//!   reader and the backend connection; the loop handles them one at a time.
//! - Components return `Vec<Action>`; `dispatch` turns each into session calls
//!   and sends the resulting commands out through `cmd_tx`.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use remote_proto::config::Config;
use remote_proto::{Command, Update};

use crate::{
    action::{Action, Focus},
    app_state::AppState,
    component::Component,
    components::{
        controls::Controls, history_list::HistoryList, now_playing::NowPlaying,
        retry_prompt::RetryPrompt, seek_bar::SeekBar,
    },
    connection,
    widgets::{query_input::{InputAction, QueryInput}, status_bar, toast::ToastManager},
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    /// Raw text frame from the backend.
    Inbound(String),
    /// The backend connection is gone; carries the reason.
    Disconnected(String),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn rects, for mouse hit-testing without recomputing the layout.
#[derive(Default, Clone)]
struct PaneAreas {
    seek_bar: Rect,
    controls: Rect,
    history: Rect,
    input: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    now_playing: NowPlaying,
    seek_bar: SeekBar,
    controls: Controls,
    history_list: HistoryList,
    retry_prompt: RetryPrompt,
    query_input: QueryInput,
    toast: ToastManager,

    seek_step: f64,
    tick_ms: u64,

    /// None until connected, and again after the backend goes away.
    cmd_tx: Option<mpsc::Sender<Command>>,
    should_quit: bool,
    pane_areas: PaneAreas,
}

impl App {
    pub fn new(backend_url: String, config: &Config) -> Self {
        Self {
            state: AppState::new(backend_url),
            now_playing: NowPlaying,
            seek_bar: SeekBar::default(),
            controls: Controls::default(),
            history_list: HistoryList::default(),
            retry_prompt: RetryPrompt,
            query_input: QueryInput::default(),
            toast: ToastManager::new(),
            seek_step: config.ui.seek_step,
            tick_ms: config.ui.tick_ms.max(16),
            cmd_tx: None,
            should_quit: false,
            pane_areas: PaneAreas::default(),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Backend connection ────────────────────────────────────────────────
        let url = self.state.backend_url.clone();
        match connection::connect(&url, tx.clone()).await {
            Ok(cmd_tx) => {
                self.cmd_tx = Some(cmd_tx);
                self.state.connected = true;
                let hello = self.state.session.on_connected();
                self.send_all(hello).await;
            }
            Err(e) => {
                warn!("connect failed: {:#}", e);
                self.toast.error(format!("cannot reach {}: {}", url, e));
            }
        }

        // Toast expiry + spinner animation
        let mut ui_tick = tokio::time::interval(Duration::from_millis(self.tick_ms));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg).await;
                    // Drain whatever queued up behind it before redrawing
                    while let Ok(next) = rx.try_recv() {
                        self.handle_message(next).await;
                        if self.should_quit {
                            break;
                        }
                    }
                }
                _ = ui_tick.tick() => {
                    self.toast.tick();
                    self.state.tick = self.state.tick.wrapping_add(1);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("quit");

        Ok(())
    }

    async fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action).await;
                }
            }
            AppMessage::Event(_) => {}
            AppMessage::Inbound(raw) => self.on_inbound(&raw),
            AppMessage::Disconnected(reason) => {
                if self.state.connected {
                    self.state.connected = false;
                    self.cmd_tx = None;
                    self.toast.error(format!("disconnected: {}", reason));
                }
            }
        }
    }

    fn on_inbound(&mut self, raw: &str) {
        match self.state.session.on_message(raw) {
            Update::State(_) => {
                self.state.last_snapshot_at = Some(chrono::Local::now());
            }
            Update::History => {
                self.history_list
                    .clamp_to(self.state.session.history().len());
            }
            Update::RetryPrompt => {
                self.toast.warning("backend could not prepare the stream");
            }
            // Logged by the session; nothing to show
            Update::Dropped(_) => {}
        }
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Retry prompt captures its answer keys while it is up
        let answer = self.retry_prompt.handle_key(key, &self.state);
        if !answer.is_empty() {
            return answer;
        }

        match self.state.focus {
            Focus::Input => match self.query_input.handle_key(key) {
                InputAction::Submitted(text) => vec![Action::SubmitQuery(text)],
                InputAction::Left => vec![Action::FocusPane(Focus::History)],
                InputAction::Edited => Vec::new(),
            },
            Focus::History => match key.code {
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
                    vec![Action::FocusPane(Focus::Input)]
                }
                KeyCode::Char(' ') => vec![Action::TogglePause],
                KeyCode::Char('x') => vec![Action::Kill],
                KeyCode::Char('X') => vec![Action::Shutdown],
                KeyCode::Char('r') => vec![Action::Refresh],
                KeyCode::Left => vec![Action::SeekBy(-self.seek_step)],
                KeyCode::Right => vec![Action::SeekBy(self.seek_step)],
                _ => self.history_list.handle_key(key, &self.state),
            },
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let areas = self.pane_areas.clone();
        let (col, row) = (event.column, event.row);
        let s = &self.state;

        // Drags and releases belong to the seek bar wherever the pointer is
        if matches!(event.kind, MouseEventKind::Drag(_) | MouseEventKind::Up(_)) {
            return self.seek_bar.handle_mouse(event, areas.seek_bar, s);
        }

        if hit(areas.seek_bar, col, row) {
            return self.seek_bar.handle_mouse(event, areas.seek_bar, s);
        }
        if hit(areas.controls, col, row) {
            return self.controls.handle_mouse(event, areas.controls, s);
        }
        if hit(areas.history, col, row) {
            let mut actions = self.history_list.handle_mouse(event, areas.history, s);
            if matches!(event.kind, MouseEventKind::Down(_)) && s.focus != Focus::History {
                actions.insert(0, Action::FocusPane(Focus::History));
            }
            return actions;
        }
        if hit(areas.input, col, row) && matches!(event.kind, MouseEventKind::Down(_)) {
            return vec![Action::FocusPane(Focus::Input)];
        }
        Vec::new()
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        let session = &mut self.state.session;
        let commands = match action {
            Action::SubmitQuery(text) => {
                let commands = session.submit_query(&text);
                if commands.is_empty() {
                    self.toast.info("type something to search for");
                }
                commands
            }
            Action::SelectHistory(idx) => {
                let commands = session.select_history_item(idx);
                if let Some(query) = session.last_query() {
                    self.query_input.set_value(query);
                }
                commands
            }
            Action::SetPause(paused) => session.set_pause(paused),
            Action::TogglePause => session.toggle_pause(),
            Action::Kill => session.kill(),
            Action::Shutdown => session.shutdown(),
            Action::Refresh => session.refresh(),
            Action::SeekBegin(f) => session.seek_begin(f),
            Action::SeekMove(f) => session.seek_move(f),
            Action::SeekEnd => {
                session.seek_end();
                Vec::new()
            }
            Action::SeekBy(delta) => {
                if session.projection().scrub_enabled {
                    session.seek_by(delta)
                } else {
                    Vec::new()
                }
            }
            Action::RetryAnswer(yes) => session.answer_retry(yes),
            Action::FocusPane(focus) => {
                self.state.focus = focus;
                Vec::new()
            }
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
        };
        self.send_all(commands).await;
    }

    async fn send_all(&mut self, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }
        let Some(tx) = &self.cmd_tx else {
            self.toast.warning("not connected");
            return;
        };
        for cmd in commands {
            if tx.send(cmd).await.is_err() {
                warn!("command channel closed");
                break;
            }
        }
    }

    // ── Draw ──────────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // now playing
                Constraint::Length(3), // seek bar
                Constraint::Length(1), // controls
                Constraint::Length(1), // separator
                Constraint::Min(3),    // history
                Constraint::Length(3), // query input
                Constraint::Length(1), // keys bar
            ])
            .split(area);

        let focus = self.state.focus;
        self.now_playing.draw(frame, rows[0], false, &self.state);
        self.seek_bar.draw(frame, rows[1], false, &self.state);
        self.controls.draw(frame, rows[2], false, &self.state);
        status_bar::draw_separator(frame, rows[3]);
        self.history_list
            .draw(frame, rows[4], focus == Focus::History, &self.state);
        self.query_input
            .draw(frame, rows[5], focus == Focus::Input);
        status_bar::draw_keys_bar(frame, rows[6], focus, self.state.connected);

        self.pane_areas = PaneAreas {
            seek_bar: rows[1],
            controls: rows[2],
            history: rows[4],
            input: rows[5],
        };

        // ── Overlays ──────────────────────────────────────────────────────────
        self.retry_prompt.draw(frame, area, true, &self.state);
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{MouseButton, KeyModifiers};

    fn app() -> App {
        App::new("ws://test".into(), &Config::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hit() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(hit(r, 2, 3));
        assert!(hit(r, 5, 4));
        assert!(!hit(r, 6, 4));
        assert!(!hit(Rect::default(), 0, 0));
    }

    #[test]
    fn test_input_focus_submits_text() {
        let mut app = app();
        for c in "foo".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            vec![Action::SubmitQuery("foo".into())]
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Esc)),
            vec![Action::FocusPane(Focus::History)]
        );
    }

    #[test]
    fn test_normal_mode_keys() {
        let mut app = app();
        app.state.focus = Focus::History;
        assert_eq!(app.handle_key(key(KeyCode::Char(' '))), vec![Action::TogglePause]);
        assert_eq!(app.handle_key(key(KeyCode::Left)), vec![Action::SeekBy(-0.05)]);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), vec![Action::Quit]);
    }

    #[test]
    fn test_retry_prompt_takes_keys_first() {
        let mut app = app();
        app.state.focus = Focus::History;
        app.on_inbound("error");
        assert_eq!(
            app.handle_key(key(KeyCode::Char('n'))),
            vec![Action::RetryAnswer(false)]
        );
    }

    #[tokio::test]
    async fn test_dispatch_without_connection_changes_state_only() {
        let mut app = app();
        app.dispatch(Action::SubmitQuery("foo".into())).await;
        assert_eq!(app.state.session.last_query(), Some("foo"));
        assert!(!app.toast.is_empty());
    }

    #[tokio::test]
    async fn test_commands_reach_the_channel() {
        let mut app = app();
        let (tx, mut rx) = mpsc::channel(8);
        app.cmd_tx = Some(tx);
        app.on_inbound(r#"{"status":"playing","metadata":"A:00:00:10/00:01:40(10%)"}"#);
        app.dispatch(Action::SeekBy(0.5)).await;
        app.dispatch(Action::Quit).await;
        assert_eq!(rx.recv().await, Some(Command::Index(60)));
        assert!(app.should_quit);
    }

    #[test]
    fn test_drag_routes_to_seek_bar_outside_area() {
        let mut app = app();
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        // Not dragging: nothing to end
        assert!(app.handle_mouse(up).is_empty());
    }
}
