//! Codec for mpv's compact status line: `A:HH:MM:SS/HH:MM:SS(extra)`.
//!
//! The backend forwards mpv's terminal status line verbatim as the snapshot
//! `metadata` field.  mpv pads it with spaces (`A: 00:00:10 / 00:01:00 (16%)`)
//! and uses an `AV:` label when a video track is active; both forms decode
//! the same.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("malformed progress {raw:?}: {reason}")]
    MalformedProgress { raw: String, reason: &'static str },
}

impl ProgressError {
    fn malformed(raw: &str, reason: &'static str) -> Self {
        Self::MalformedProgress {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Elapsed/total pair in whole seconds.  `elapsed_secs <= total_secs` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    elapsed_secs: u64,
    total_secs: u64,
}

impl Progress {
    /// Build a progress pair, clamping `elapsed` into `0..=total`.
    pub fn new(elapsed_secs: u64, total_secs: u64) -> Self {
        Self {
            elapsed_secs: elapsed_secs.min(total_secs),
            total_secs,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Scrub position in `0.0..=1.0`; 0 when the total is unknown (zero).
    pub fn fraction(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.elapsed_secs as f64 / self.total_secs as f64
    }
}

/// Decode an encoded progress string.
pub fn decode(raw: &str) -> Result<Progress, ProgressError> {
    let (left, right) = raw
        .split_once('/')
        .ok_or_else(|| ProgressError::malformed(raw, "missing '/' separator"))?;

    let elapsed = parse_clock(raw, strip_label(left))?;
    let total_part = match right.find('(') {
        Some(idx) => &right[..idx],
        None => right,
    };
    let total = parse_clock(raw, total_part)?;

    Ok(Progress::new(elapsed, total))
}

/// Encode a progress pair in the backend's wire form.
pub fn encode(progress: &Progress) -> String {
    format!(
        "A:{}/{}",
        format_clock(progress.elapsed_secs),
        format_clock(progress.total_secs)
    )
}

/// `HH:MM:SS`, hours widening past two digits when needed.
pub fn format_clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Seconds to seek to for a scrub position.  The fraction is clamped to
/// `0.0..=1.0` (NaN counts as 0) and the result rounded to the nearest second.
pub fn seek_target(fraction: f64, total_secs: u64) -> u64 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    (fraction * total_secs as f64).round() as u64
}

/// Drop the `A:` / `AV:` label in front of the elapsed operand, if any.
fn strip_label(left: &str) -> &str {
    let trimmed = left.trim_start();
    match trimmed.split_once(':') {
        Some((label, rest))
            if !label.is_empty() && label.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            rest
        }
        _ => trimmed,
    }
}

fn parse_clock(raw: &str, clock: &str) -> Result<u64, ProgressError> {
    let parts: Vec<&str> = clock.trim().split(':').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(ProgressError::malformed(raw, "fewer than 3 time components"));
    }
    if parts.len() > 3 {
        return Err(ProgressError::malformed(raw, "more than 3 time components"));
    }

    let mut fields = [0u64; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProgressError::malformed(raw, "non-numeric time component"));
        }
        *slot = part
            .parse::<u64>()
            .map_err(|_| ProgressError::malformed(raw, "time component out of range"))?;
    }

    let [h, m, s] = fields;
    h.checked_mul(3600)
        .and_then(|hs| m.checked_mul(60).and_then(|ms| hs.checked_add(ms)))
        .and_then(|t| t.checked_add(s))
        .ok_or_else(|| ProgressError::malformed(raw, "time component out of range"))
}
