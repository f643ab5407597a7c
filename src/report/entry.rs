//! Log entry for one finished session
//!
//! Human-readable key-value lines, one block per session, terminated by a
//! blank line.

use crate::session::{EnvInfo, Session, SessionError, SessionOutcome};
use crate::tuning::{RoundRecord, Style, StyleBaseline};
use chrono::{DateTime, Local};
use std::fmt::Write;

const HEADER: &str = "==== Sensitivity Test Log ====";

/// Everything the log records about a finished session
#[derive(Clone, Debug)]
pub struct SessionReport {
    pub timestamp: DateTime<Local>,
    pub game: String,
    pub dpi: u32,
    pub baseline: StyleBaseline,
    pub current_style: Style,
    pub target_style: Style,
    pub mode_label: &'static str,
    pub outcome: SessionOutcome,
    pub env: Option<EnvInfo>,
    pub history: Vec<RoundRecord>,
}

impl SessionReport {
    /// Snapshot a finished session, stamped with the current local time
    pub fn from_session(session: &Session) -> Result<Self, SessionError> {
        Self::from_session_at(session, Local::now())
    }

    pub fn from_session_at(
        session: &Session,
        timestamp: DateTime<Local>,
    ) -> Result<Self, SessionError> {
        let outcome = session.outcome()?;
        let setup = session.setup();
        Ok(SessionReport {
            timestamp,
            game: setup.game.clone(),
            dpi: setup.dpi,
            baseline: *session.baseline(),
            current_style: setup.current_style,
            target_style: setup.target_style,
            mode_label: setup.mode.label(),
            outcome,
            env: setup.env.clone(),
            history: session.history().to_vec(),
        })
    }

    /// History line for a round (1-based index)
    pub fn round_line(index: usize, record: &RoundRecord) -> String {
        format!(
            "Round {}: base={:.4}, low={:.4}, high={:.4}, choice={}",
            index,
            record.base_sens,
            record.low_sens,
            record.high_sens,
            record.choice.label()
        )
    }

    /// Render the full log block
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{}", HEADER)?;
        writeln!(out, "Timestamp      : {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "Game           : {}", self.game)?;
        writeln!(out, "DPI            : {}", self.dpi)?;
        writeln!(
            out,
            "Baseline eDPI  : low={:.1}, mid={:.1}, high={:.1}",
            self.baseline.low, self.baseline.mid, self.baseline.high
        )?;
        writeln!(out, "Current style  : {}", self.current_style.key())?;
        writeln!(out, "Target style   : {}", self.target_style.key())?;
        writeln!(out, "Mode           : {}", self.mode_label)?;
        writeln!(out, "Final eDPI     : {:.1}", self.outcome.final_edpi)?;
        writeln!(out, "Final sens     : {:.4}", self.outcome.final_sens)?;
        writeln!(out, "Judged style   : {}", self.outcome.judged.leaning_label())?;

        if let Some(env) = &self.env {
            writeln!(out, "-- Environment --")?;
            for (label, value) in env.fields() {
                writeln!(out, "  {:<12} : {}", label, value)?;
            }
        }

        writeln!(out, "-- Round history --")?;
        for (i, record) in self.history.iter().enumerate() {
            writeln!(out, "  {}", Self::round_line(i + 1, record))?;
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{RoundMode, SessionSetup};
    use crate::tuning::{Choice, GameTable};
    use chrono::TimeZone;

    fn finished_session(env: Option<EnvInfo>) -> Session {
        let setup = SessionSetup {
            game: "Valorant".to_string(),
            dpi: 800,
            current_style: Style::Mid,
            target_style: Style::Mid,
            mode: RoundMode::Quick,
            env,
        };
        let mut session = Session::start(setup, &GameTable::builtin()).unwrap();
        for choice in [Choice::A, Choice::B, Choice::Neutral, Choice::A, Choice::B] {
            session.submit(choice).unwrap();
        }
        session
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 21, 5, 0).unwrap()
    }

    #[test]
    fn test_report_requires_finished_session() {
        let setup = finished_session(None).setup().clone();
        let session = Session::start(setup, &GameTable::builtin()).unwrap();
        assert!(SessionReport::from_session(&session).is_err());
    }

    #[test]
    fn test_render_layout() {
        let session = finished_session(None);
        let text = SessionReport::from_session_at(&session, fixed_time())
            .unwrap()
            .render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Timestamp      : 2026-03-14 21:05:00");
        assert_eq!(lines[2], "Game           : Valorant");
        assert_eq!(lines[4], "Baseline eDPI  : low=131.0, mid=262.0, high=393.0");
        assert_eq!(lines[7], "Mode           : Quick (5 rounds)");
        assert!(!text.contains("-- Environment --"));
        assert_eq!(lines[11], "-- Round history --");
        assert_eq!(
            lines[12],
            "  Round 1: base=0.3275, low=0.2456, high=0.4094, choice=A (lower)"
        );
        assert_eq!(lines.len(), 18);
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_render_includes_environment() {
        let env = EnvInfo {
            temperature: "24.5C".to_string(),
            note: "new mouse pad".to_string(),
            ..EnvInfo::default()
        };
        let text = SessionReport::from_session_at(&finished_session(Some(env)), fixed_time())
            .unwrap()
            .render();
        assert!(text.contains("-- Environment --\n  Temperature  : 24.5C\n"));
        assert!(text.contains("  Note         : new mouse pad\n"));
    }
}
