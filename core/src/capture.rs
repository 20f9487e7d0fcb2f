//! JSON Lines persistence of the event log.

use std::io::Write;
use std::path::Path;

use crate::error::CaptureError;
use crate::event::LogEntry;

fn io_error(path: &Path, source: std::io::Error) -> CaptureError {
    CaptureError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn save_log(path: &Path, entries: &[LogEntry]) -> Result<(), CaptureError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    }

    let mut buf = Vec::with_capacity(entries.len() * 256);
    for entry in entries {
        serde_json::to_writer(&mut buf, entry)?;
        buf.push(b'\n');
    }

    let mut file = std::fs::File::create(path).map_err(|e| io_error(path, e))?;
    file.write_all(&buf).map_err(|e| io_error(path, e))?;
    tracing::info!(target: "kroviz.store", path = %path.display(), entries = entries.len(), "log saved");
    Ok(())
}

pub fn load_log(path: &Path) -> Result<Vec<LogEntry>, CaptureError> {
    let raw = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let mut out = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        let entry = serde_json::from_str::<LogEntry>(s)
            .map_err(|source| CaptureError::Parse { line: idx + 1, source })?;
        out.push(entry);
    }

    tracing::debug!(target: "kroviz.store", path = %path.display(), entries = out.len(), "log loaded");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventState, Represention, ResourceSpecification};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn entries() -> Vec<LogEntry> {
        let mut home = LogEntry::new(ResourceSpecification::new("http://x/", "json"), "GET", None, Utc::now());
        home.repr_type = Some(Represention::Homepage);
        home.state = EventState::Success;
        let post = LogEntry::new(
            ResourceSpecification::new("http://x/objects/a/1/actions/go/invoke", "json"),
            "POST",
            Some("{}".into()),
            Utc::now(),
        );
        vec![home, post]
    }

    #[test]
    fn test_save_then_load_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let original = entries();

        save_log(&path, &original).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);

        assert_eq!(load_log(&path).unwrap(), original);
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let line = serde_json::to_string(&entries()[0]).unwrap();
        std::fs::write(&path, format!("\n{line}\n   \n")).unwrap();

        assert_eq!(load_log(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_reports_bad_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let line = serde_json::to_string(&entries()[0]).unwrap();
        std::fs::write(&path, format!("{line}\nnot json\n")).unwrap();

        match load_log(&path) {
            Err(CaptureError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_log(&dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, CaptureError::Io { .. }));
    }
}
