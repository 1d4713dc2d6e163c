use std::collections::HashSet;

use crate::progress::Progress;
use crate::protocol::PlaybackStatus;

/// Last-known playback state, merged field by field from snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub search_query: Option<String>,
    pub video_url: Option<String>,
    /// Always `None` while idle.
    pub progress: Option<Progress>,
}

impl PlaybackState {
    /// Scrub position in `0.0..=1.0`.
    pub fn scrub_fraction(&self) -> f64 {
        match (&self.status, &self.progress) {
            (PlaybackStatus::Idle, _) | (_, None) => 0.0,
            (_, Some(p)) => p.fraction(),
        }
    }

    /// Total length used for seek targets; 0 when unknown.
    pub fn known_total_secs(&self) -> u64 {
        self.progress.map(|p| p.total_secs()).unwrap_or(0)
    }
}

/// Past queries reduced for display: no duplicates, no empty entries.
/// Keeps first-seen order so the list does not jump between refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistorySet {
    items: Vec<String>,
}

impl HistorySet {
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| !item.is_empty())
            .filter(|item| seen.insert(item.clone()))
            .collect();
        Self { items }
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.items.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
