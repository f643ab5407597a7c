//! Append-only result log
//!
//! The file is opened in append mode, written, and closed for every
//! finished session. Failures are reported to the caller, which treats them
//! as non-fatal.

use super::entry::SessionReport;
use crate::session::Session;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default log file name, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "sens_log.txt";

/// Failure while persisting a result
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to append to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),
}

/// Text log of finished sessions
#[derive(Clone, Debug)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one rendered report
    pub fn append(&self, report: &SessionReport) -> Result<(), LogError> {
        let io_err = |source: std::io::Error| LogError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(report.render().as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        Ok(())
    }

    /// Log a finished session once; returns `Ok(false)` if it was already logged
    pub fn record(&self, session: &mut Session) -> Result<bool, LogError> {
        if session.is_logged() {
            return Ok(false);
        }

        let report = SessionReport::from_session(session)?;
        self.append(&report)?;
        session.mark_logged();
        tracing::info!(path = %self.path.display(), "session result logged");
        Ok(true)
    }
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{RoundMode, SessionSetup};
    use crate::tuning::{Choice, GameTable, Style};
    use std::fs;

    fn finished_session() -> Session {
        let setup = SessionSetup {
            game: "Apex Legends".to_string(),
            dpi: 1600,
            current_style: Style::Low,
            target_style: Style::High,
            mode: RoundMode::Quick,
            env: None,
        };
        let mut session = Session::start(setup, &GameTable::builtin()).unwrap();
        while !session.is_finished() {
            session.submit(Choice::B).unwrap();
        }
        session
    }

    #[test]
    fn test_record_appends_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("log.txt"));
        let mut session = finished_session();

        assert!(log.record(&mut session).unwrap());
        assert!(!log.record(&mut session).unwrap());

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("==== Sensitivity Test Log ====").count(), 1);
        assert_eq!(content.matches("  Round ").count(), 7);
        assert!(content.contains("Game           : Apex Legends\n"));
    }

    #[test]
    fn test_sessions_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("log.txt"));
        let mut first = finished_session();
        let mut second = finished_session();

        log.record(&mut first).unwrap();
        log.record(&mut second).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("==== Sensitivity Test Log ====").count(), 2);
    }

    #[test]
    fn test_unwritable_path_is_error_and_session_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("missing").join("log.txt"));
        let mut session = finished_session();
        let before = session.outcome().unwrap();

        assert!(matches!(log.record(&mut session), Err(LogError::Io { .. })));
        assert!(!session.is_logged());
        assert_eq!(session.outcome().unwrap(), before);
    }

    #[test]
    fn test_unfinished_session_is_not_logged() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("log.txt"));
        let setup = finished_session().setup().clone();
        let mut session = Session::start(setup, &GameTable::builtin()).unwrap();

        assert!(matches!(log.record(&mut session), Err(LogError::Session(_))));
        assert!(!log.path().exists());
    }
}
