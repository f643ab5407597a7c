//! Terminal display and UI rendering
//!
//! Features:
//! - Session header (game, DPI, target style)
//! - Candidate A/B cards with sensitivity and eDPI
//! - Low/mid/high reference guide
//! - Result summary and round history

use crate::session::{Session, SessionOutcome};
use crate::tuning::{Candidates, Style};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Result as IoResult, Write};

/// Plain-text result summary, shared by the interactive and scripted paths
pub fn summary_lines(session: &Session, outcome: &SessionOutcome) -> Vec<String> {
    let setup = session.setup();
    let mut lines = vec![
        format!("Game: {}", setup.game),
        format!("DPI: {}", setup.dpi),
        format!("Recommended eDPI: {:.1}", outcome.final_edpi),
        format!(
            "Recommended sensitivity: DPI {} / sens {:.4}",
            setup.dpi, outcome.final_sens
        ),
        format!(
            "(For reference) this eDPI is closest to: {}",
            outcome.judged.leaning_label()
        ),
    ];

    if let Some(env) = &setup.env {
        lines.push(String::new());
        lines.push("Environment:".to_string());
        if env.has_any() {
            for (label, value) in env.fields() {
                if !value.is_empty() {
                    lines.push(format!("  {}: {}", label, value));
                }
            }
        } else {
            lines.push("  (no environment info entered)".to_string());
        }
    }

    lines.push(String::new());
    lines.push("Round history:".to_string());
    for (i, record) in session.history().iter().enumerate() {
        lines.push(format!(
            "  {}",
            crate::report::SessionReport::round_line(i + 1, record)
        ));
    }
    lines
}

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Display on the alternate screen, restored on shutdown
    pub fn alternate() -> IoResult<Self> {
        let mut stdout = stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Display {
            use_alternate_screen: true,
        })
    }

    pub fn clear(&self) -> IoResult<()> {
        let mut stdout = stdout();
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// One line at `row`: colored label followed by plain text
    fn line(&self, row: u16, color: Color, label: &str, text: &str) -> IoResult<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, row),
            SetForegroundColor(color),
            Print(label),
            ResetColor,
            Print(text)
        )?;
        stdout.flush()
    }

    pub fn show_title(&self) -> IoResult<()> {
        self.line(0, Color::Cyan, "Sens Doctor", "  A/B test for your in-game sensitivity")
    }

    /// Game / DPI / target line
    pub fn show_header(&self, session: &Session) -> IoResult<()> {
        let setup = session.setup();
        self.line(
            1,
            Color::DarkGrey,
            "Setup: ",
            &format!(
                "{} / DPI {} / target: {}",
                setup.game,
                setup.dpi,
                setup.target_style.name()
            ),
        )
    }

    pub fn show_round(&self, round: u32, total: u32) -> IoResult<()> {
        self.line(
            3,
            Color::Magenta,
            &format!("Round {} of {}", round, total),
            "  Try both in game and pick the one closer to your ideal",
        )
    }

    /// Candidate A (lower) and B (higher)
    pub fn show_candidates(&self, candidates: &Candidates, dpi: u32) -> IoResult<()> {
        self.line(
            5,
            Color::Blue,
            "[A] Lower   ",
            &format!(
                "DPI {} / sens {:.4} / eDPI {:.1}",
                dpi, candidates.low_sens, candidates.low_edpi
            ),
        )?;
        self.line(
            6,
            Color::Red,
            "[B] Higher  ",
            &format!(
                "DPI {} / sens {:.4} / eDPI {:.1}",
                dpi, candidates.high_sens, candidates.high_edpi
            ),
        )
    }

    /// Rough guide for each style at this DPI
    pub fn show_reference(&self, points: &[(Style, f64, f64); 3]) -> IoResult<()> {
        let text = points
            .iter()
            .map(|(style, sens, edpi)| {
                format!("{}: sens {:.4} (eDPI {:.0})", style.key(), sens, edpi)
            })
            .collect::<Vec<_>>()
            .join("  |  ");
        self.line(8, Color::DarkGrey, "Guide at this DPI: ", &text)
    }

    pub fn show_help(&self, row: u16, text: &str) -> IoResult<()> {
        self.line(row, Color::DarkGrey, "", text)
    }

    /// Full round screen
    pub fn show_test(&self, session: &Session) -> IoResult<()> {
        self.clear()?;
        self.show_title()?;
        self.show_header(session)?;
        self.show_round(session.round(), session.total_rounds())?;
        self.show_candidates(&session.candidates(), session.setup().dpi)?;
        self.show_reference(&session.reference_points())?;
        self.show_help(10, "A / ← lower  |  B / → higher  |  M / ↓ neither  |  Esc to quit")
    }

    /// Result screen; returns the next free row
    pub fn show_result(&self, session: &Session, outcome: &SessionOutcome) -> IoResult<u16> {
        self.clear()?;
        self.show_title()?;
        self.line(2, Color::Green, "Test complete!", "")?;

        let mut row = 4;
        for text in summary_lines(session, outcome) {
            self.line(row, Color::Reset, "", &text)?;
            row += 1;
        }
        Ok(row + 1)
    }

    /// Note about the result log
    pub fn show_log_status(&self, row: u16, ok: bool, text: &str) -> IoResult<()> {
        let color = if ok { Color::DarkGrey } else { Color::Yellow };
        self.line(row, color, "", text)
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> IoResult<()> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        }

        terminal::disable_raw_mode()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EnvInfo, RoundMode, SessionSetup};
    use crate::tuning::{Choice, GameTable};

    fn finished(env: Option<EnvInfo>) -> Session {
        let setup = SessionSetup {
            game: "Minecraft".to_string(),
            dpi: 400,
            current_style: Style::Mid,
            target_style: Style::Mid,
            mode: RoundMode::Quick,
            env,
        };
        let mut session = Session::start(setup, &GameTable::builtin()).unwrap();
        while !session.is_finished() {
            session.submit(Choice::Neutral).unwrap();
        }
        session
    }

    #[test]
    fn test_summary_lines() {
        let session = finished(None);
        let outcome = session.outcome().unwrap();
        let lines = summary_lines(&session, &outcome);

        assert_eq!(lines[0], "Game: Minecraft");
        assert_eq!(lines[2], "Recommended eDPI: 360.0");
        assert_eq!(lines[3], "Recommended sensitivity: DPI 400 / sens 0.9000");
        assert!(lines[4].ends_with("Leaning mid-sens (average)"));
        assert!(!lines.iter().any(|l| l == "Environment:"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("  Round ")).count(), 5);
    }

    #[test]
    fn test_summary_lines_empty_environment() {
        let session = finished(Some(EnvInfo::default()));
        let outcome = session.outcome().unwrap();
        let lines = summary_lines(&session, &outcome);
        assert!(lines.iter().any(|l| l == "  (no environment info entered)"));
    }
}
