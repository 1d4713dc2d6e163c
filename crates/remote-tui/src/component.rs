//! Component trait — the interface every UI panel implements.
//!
//! - Components own their local UI state (selection, button hit boxes).
//! - They read the session through `AppState` and never mutate it.
//! - Input handlers return `Vec<Action>`; the App applies them.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event while this component has focus.
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Handle a mouse event. `area` is where the component was last drawn.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
