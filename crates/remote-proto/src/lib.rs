//! Client core for the mpv playback backend: decoding pushed status frames,
//! reconciling them into one playback state, and encoding user intents.

pub mod config;
pub mod platform;
pub mod progress;
pub mod protocol;
pub mod reconcile;
pub mod router;
pub mod seek;
pub mod session;
pub mod state;

pub use protocol::{Command, Inbound, PlaybackStatus, Snapshot};
pub use reconcile::{Projection, ReconciliationEngine};
pub use session::{Session, Update};
