#![allow(dead_code)]

use anyhow::{bail, Result};
use remote_proto::progress::{self, Progress};
use remote_proto::{Command, PlaybackStatus, Snapshot};
use serde_json::json;

/// Scripted stand-in for the playback backend.  It parses the command text a
/// client would put on the wire and answers with the frames the real backend
/// pushes back.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub status: PlaybackStatus,
    pub query: Option<String>,
    pub video_url: Option<String>,
    pub elapsed: u64,
    pub total: u64,
    pub history: Vec<String>,
    /// Next `play:` fails with the error sentinel.
    pub fail_next_play: bool,
    /// Every command text received, in order.
    pub received: Vec<String>,
}

impl FakeBackend {
    pub fn with_history(items: &[&str]) -> Self {
        Self {
            history: items.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn handle(&mut self, wire: &str) -> Result<Vec<String>> {
        self.received.push(wire.to_string());
        let cmd: Command = wire.parse()?;
        let frames = match cmd {
            Command::Play(query) => {
                self.history.push(query.clone());
                if self.fail_next_play {
                    self.fail_next_play = false;
                    return Ok(vec!["error".to_string()]);
                }
                self.query = Some(query.clone());
                self.video_url = Some(format!("https://media.example/{}.mp4", query));
                self.elapsed = 0;
                self.total = 200;
                self.status = PlaybackStatus::Searching;
                let searching = self.frame_with(false, false);
                self.status = PlaybackStatus::Playing;
                vec![searching, self.frame_with(true, true)]
            }
            Command::Pause(paused) => {
                if self.status.has_timeline() {
                    self.status = if paused {
                        PlaybackStatus::Paused
                    } else {
                        PlaybackStatus::Playing
                    };
                }
                vec![self.frame_with(false, true)]
            }
            Command::Index(secs) => {
                if self.total == 0 {
                    return Ok(Vec::new());
                }
                self.elapsed = secs.min(self.total);
                vec![self.frame_with(false, true)]
            }
            Command::Kill => {
                self.status = PlaybackStatus::Idle;
                self.elapsed = 0;
                self.total = 0;
                vec![self.frame_with(false, false)]
            }
            Command::Status => vec![self.frame_with(true, self.status.has_timeline())],
            Command::History => vec![json!(self.history).to_string()],
            Command::Shutdown => Vec::new(),
        };
        Ok(frames)
    }

    fn frame_with(&self, with_url: bool, with_progress: bool) -> String {
        let snapshot = Snapshot {
            status: self.status,
            metadata: with_progress
                .then(|| progress::encode(&Progress::new(self.elapsed, self.total)) + "(0%)"),
            video_url: if with_url { self.video_url.clone() } else { None },
            search_query: self.query.clone(),
        };
        serde_json::to_string(&snapshot).expect("snapshot serializes")
    }

    pub fn last_received(&self) -> Result<&str> {
        match self.received.last() {
            Some(s) => Ok(s),
            None => bail!("backend received nothing"),
        }
    }
}
