//! JSONL file writer for transcript events.
//!
//! Each [`TranscriptEvent`] becomes one JSON line carrying a `type` field
//! and a UTC timestamp. Records are appended, matching the append-only
//! nature of conversation history.

use colloquy_application::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; flushes after every record so
/// a crash loses at most the record being written.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<std::fs::File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the log file in append mode, creating parent
    /// directories as needed.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record_for(event: TranscriptEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut record = match event.payload {
            Value::Object(map) => Value::Object(map),
            other => serde_json::json!({ "data": other }),
        };
        if let Value::Object(map) = &mut record {
            map.insert("type".to_string(), Value::String(event.event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
        }
        record
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let record = Self::record_for(event);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        match self.writer.lock() {
            Ok(mut writer) => {
                let _ = writeln!(writer, "{}", line);
                let _ = writer.flush();
            }
            Err(_) => warn!("transcript logger lock poisoned; dropping event"),
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.transcript.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "message",
            serde_json::json!({ "agent": "A", "round": 1, "model": "x/y" }),
        ));
        logger.log(TranscriptEvent::new(
            "debit",
            serde_json::json!({ "success": true, "remaining": 9 }),
        ));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "message");
        assert_eq!(first["agent"], "A");
        assert!(first.get("timestamp").is_some());

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "debit");
        assert_eq!(second["remaining"], 9);
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.transcript.jsonl");

        {
            let logger = JsonlTranscriptLogger::open(&path).unwrap();
            logger.log(TranscriptEvent::new("message", serde_json::json!({"n": 1})));
        }
        {
            let logger = JsonlTranscriptLogger::open(&path).unwrap();
            logger.log(TranscriptEvent::new("message", serde_json::json!({"n": 2})));
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();
        logger.log(TranscriptEvent::new("note", serde_json::json!("plain text")));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["type"], "note");
        assert_eq!(value["data"], "plain text");
    }
}
