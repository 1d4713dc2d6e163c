use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text frame the backend sends when it failed to prepare a stream.
pub const ERROR_SENTINEL: &str = "error";

/// Playback status as reported by the backend.  Wire form is lowercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    #[default]
    Idle, // nothing loaded
    Searching, // resolving a query to a media url
    Playing,
    Buffering, // url resolved, mpv filling its cache
    Paused,
}

impl PlaybackStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Searching => "searching",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Buffering => "buffering",
            PlaybackStatus::Paused => "paused",
        }
    }

    /// True while a media item is loaded and has a timeline.
    pub fn has_timeline(&self) -> bool {
        matches!(self, PlaybackStatus::Playing | PlaybackStatus::Paused)
    }

    /// True while the backend is working towards playback.
    pub fn is_loading(&self) -> bool {
        matches!(self, PlaybackStatus::Buffering | PlaybackStatus::Searching)
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pushed status snapshot.  Only `status` is guaranteed; every other field
/// is authoritative only when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub status: PlaybackStatus,
    /// mpv status line, see [`crate::progress`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// A classified inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// The error sentinel: the backend could not prepare the stream.
    StreamError,
    Snapshot(Snapshot),
    /// Past queries, as stored by the backend (may contain duplicates).
    History(Vec<String>),
}

/// Outbound commands, encoded as `verb:argument` text frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Pause(bool),
    Kill,
    Shutdown,
    Status,
    History,
    /// Absolute seek target in seconds.
    Index(u64),
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Play(_) => "play",
            Command::Pause(_) => "pause",
            Command::Kill => "kill",
            Command::Shutdown => "shutdown",
            Command::Status => "status",
            Command::History => "history",
            Command::Index(_) => "index",
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play(query) => write!(f, "play:{}", query),
            Command::Pause(paused) => write!(f, "pause:{}", paused),
            Command::Index(secs) => write!(f, "index:{}", secs),
            other => write!(f, "{}:all", other.verb()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised command {0:?}")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Splits on the first colon only, so queries may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCommandError(s.to_string());
        let (verb, arg) = s.split_once(':').ok_or_else(err)?;
        match verb {
            "play" => Ok(Command::Play(arg.to_string())),
            "pause" => arg.parse::<bool>().map(Command::Pause).map_err(|_| err()),
            "index" => arg.parse::<u64>().map(Command::Index).map_err(|_| err()),
            "kill" if arg == "all" => Ok(Command::Kill),
            "shutdown" if arg == "all" => Ok(Command::Shutdown),
            "status" if arg == "all" => Ok(Command::Status),
            "history" if arg == "all" => Ok(Command::History),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_encoding() {
        assert_eq!(Command::Play("lofi beats".into()).encode(), "play:lofi beats");
        assert_eq!(Command::Pause(true).encode(), "pause:true");
        assert_eq!(Command::Pause(false).encode(), "pause:false");
        assert_eq!(Command::Kill.encode(), "kill:all");
        assert_eq!(Command::Shutdown.encode(), "shutdown:all");
        assert_eq!(Command::Status.encode(), "status:all");
        assert_eq!(Command::History.encode(), "history:all");
        assert_eq!(Command::Index(100).encode(), "index:100");
    }

    #[test]
    fn test_command_parse_keeps_colons_in_query() {
        let cmd: Command = "play:artist: song".parse().unwrap();
        assert_eq!(cmd, Command::Play("artist: song".into()));
    }

    #[test]
    fn test_command_parse_rejects_garbage() {
        assert!("pause:maybe".parse::<Command>().is_err());
        assert!("index:-4".parse::<Command>().is_err());
        assert!("kill:one".parse::<Command>().is_err());
        assert!("status".parse::<Command>().is_err());
        assert!("rewind:all".parse::<Command>().is_err());
    }

    #[test]
    fn test_snapshot_wire_names() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"status":"playing","metadata":"A:00:00:10/00:01:00(x)","videoUrl":"foo.mp4","searchQuery":"foo"}"#,
        )
        .unwrap();
        assert_eq!(snap.status, PlaybackStatus::Playing);
        assert_eq!(snap.video_url.as_deref(), Some("foo.mp4"));
        assert_eq!(snap.search_query.as_deref(), Some("foo"));

        let json = serde_json::to_string(&Snapshot {
            status: PlaybackStatus::Idle,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"idle"}"#);
    }
}
