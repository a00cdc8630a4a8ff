//! Activity Log
//!
//! JSON-lines event log under `~/.garimpo/activity.log`: one serialized
//! [`LogEntry`] per line, so read-back filters on parsed fields instead
//! of the rendered text. Failures to log never break the operation being
//! logged; callers discard the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Page URL or other origin of the event, when there is one.
    #[serde(default)]
    pub source: Option<String>,
    pub event: String,
    #[serde(default)]
    pub details: Option<String>,
}

pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> crate::Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            crate::GarimpoError::storage_error(
                "initialization",
                "could not determine home directory",
            )
        })?;
        let garimpo_dir = user_dirs.home_dir().join(".garimpo");
        fs::create_dir_all(&garimpo_dir)?;
        Ok(Self::at(garimpo_dir.join("activity.log")))
    }

    /// Logger writing to an explicit path, used by tests.
    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn info(
        &self,
        source: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.append(LogLevel::Info, source, event, details)
    }

    pub fn error(
        &self,
        source: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.append(LogLevel::Error, source, event, details)
    }

    fn append(
        &self,
        level: LogLevel,
        source: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            source: source.map(|s| s.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Entries most recent first. `source_filter` matches the recorded
    /// source exactly; lines that fail to parse (a tail truncated by a
    /// crash) are skipped.
    pub fn read_logs(
        &self,
        source_filter: Option<&str>,
        errors_only: bool,
    ) -> crate::Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = std::fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let Ok(entry) = serde_json::from_str::<LogEntry>(&line) else {
                continue;
            };
            if errors_only && entry.level != LogLevel::Error {
                continue;
            }
            if let Some(source) = source_filter {
                if entry.source.as_deref() != Some(source) {
                    continue;
                }
            }
            entries.push(entry);
        }

        entries.reverse();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(dir: &tempfile::TempDir) -> ActivityLogger {
        ActivityLogger::at(dir.path().join("activity.log"))
    }

    #[test]
    fn read_logs_returns_entries_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        logger
            .info(Some("https://a.com.br"), "scan_html", Some("2 records in 3ms"))
            .unwrap();
        logger
            .error(None, "persist_contacts", Some("disk full"))
            .unwrap();

        let entries = logger.read_logs(None, false).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "persist_contacts");
        assert_eq!(entries[1].source.as_deref(), Some("https://a.com.br"));
        assert_eq!(entries[1].details.as_deref(), Some("2 records in 3ms"));
    }

    #[test]
    fn read_logs_filters_on_parsed_level_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        logger.info(Some("https://a.com.br"), "scan_html", None).unwrap();
        logger
            .error(Some("https://a.com.br"), "persist_contacts", None)
            .unwrap();
        logger
            .error(Some("https://b.com.br"), "save_session", None)
            .unwrap();

        let errors = logger.read_logs(None, true).unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.level == LogLevel::Error));

        let from_a = logger.read_logs(Some("https://a.com.br"), false).unwrap();
        assert_eq!(from_a.len(), 2);

        let a_errors = logger.read_logs(Some("https://a.com.br"), true).unwrap();
        assert_eq!(a_errors.len(), 1);
        assert_eq!(a_errors[0].event, "persist_contacts");
    }

    #[test]
    fn unparseable_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        logger.info(None, "scan_html", None).unwrap();
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(dir.path().join("activity.log"))
                .unwrap();
            writeln!(file, "{{truncated").unwrap();
        }
        logger.error(None, "persist_contacts", None).unwrap();

        let entries = logger.read_logs(None, false).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn missing_log_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(logger(&dir).read_logs(None, false).unwrap().is_empty());
    }
}
