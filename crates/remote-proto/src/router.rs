//! Classifies raw inbound text frames into [`Inbound`] variants.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::protocol::{Inbound, Snapshot, ERROR_SENTINEL};

const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Neither the sentinel, a snapshot, nor a history list.
    #[error("protocol violation ({reason}): {preview:?}")]
    ProtocolViolation { reason: String, preview: String },
}

pub fn classify(raw: &str) -> Result<Inbound, RouteError> {
    if raw == ERROR_SENTINEL {
        debug!("router: stream error sentinel");
        return Ok(Inbound::StreamError);
    }

    let violation = |reason: String| RouteError::ProtocolViolation {
        reason,
        preview: preview(raw),
    };

    // Branch on the JSON shape first: serde would happily read a struct from
    // a positional array, so `["idle"]` must never reach the snapshot decoder.
    let value: Value =
        serde_json::from_str(raw).map_err(|e| violation(format!("not json: {}", e)))?;

    match value {
        Value::Object(map) => {
            if !map.contains_key("status") {
                return Err(violation("object without status".to_string()));
            }
            let snapshot: Snapshot = serde_json::from_value(Value::Object(map))
                .map_err(|e| violation(format!("invalid snapshot: {}", e)))?;
            debug!("router: snapshot status={}", snapshot.status);
            Ok(Inbound::Snapshot(snapshot))
        }
        Value::Array(_) => {
            let items: Vec<String> = serde_json::from_value(value)
                .map_err(|_| violation("array with non-string entries".to_string()))?;
            debug!("router: history with {} entries", items.len());
            Ok(Inbound::History(items))
        }
        other => Err(violation(format!("unexpected json {}", json_kind(&other)))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(raw: &str) -> String {
    let mut out: String = raw.chars().take(PREVIEW_CHARS).collect();
    if raw.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PlaybackStatus;

    #[test]
    fn test_sentinel() {
        assert_eq!(classify("error").unwrap(), Inbound::StreamError);
    }

    #[test]
    fn test_sentinel_is_exact() {
        // Anything but the exact sentinel goes through JSON decoding.
        assert!(classify("error ").is_err());
        assert!(classify("\"error\"").is_err());
    }

    #[test]
    fn test_snapshot() {
        match classify(r#"{"status":"searching","searchQuery":"foo"}"#).unwrap() {
            Inbound::Snapshot(s) => {
                assert_eq!(s.status, PlaybackStatus::Searching);
                assert_eq!(s.search_query.as_deref(), Some("foo"));
                assert_eq!(s.metadata, None);
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_ignores_unknown_fields() {
        assert!(matches!(
            classify(r#"{"status":"idle","volume":40}"#),
            Ok(Inbound::Snapshot(_))
        ));
    }

    #[test]
    fn test_history() {
        assert_eq!(
            classify(r#"["a","a","b",""]"#).unwrap(),
            Inbound::History(vec!["a".into(), "a".into(), "b".into(), "".into()])
        );
        assert_eq!(classify("[]").unwrap(), Inbound::History(vec![]));
    }

    #[test]
    fn test_violations() {
        for raw in [
            "",
            "not json",
            r#"{"videoUrl":"x"}"#,
            r#"{"status":"stopped"}"#,
            r#"["a", 1]"#,
            "42",
            "null",
        ] {
            assert!(
                matches!(classify(raw), Err(RouteError::ProtocolViolation { .. })),
                "{:?} should be a violation",
                raw
            );
        }
    }

    #[test]
    fn test_single_status_word_array_is_history() {
        assert_eq!(
            classify(r#"["idle"]"#).unwrap(),
            Inbound::History(vec!["idle".into()])
        );
    }

    #[test]
    fn test_violation_reason() {
        let Err(RouteError::ProtocolViolation { reason, .. }) = classify(r#"{"videoUrl":"x"}"#)
        else {
            panic!("expected violation");
        };
        assert_eq!(reason, "object without status");
    }

    #[test]
    fn test_preview_is_truncated() {
        let long = "x".repeat(500);
        let Err(RouteError::ProtocolViolation { preview, .. }) = classify(&long) else {
            panic!("expected violation");
        };
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
    }
}
