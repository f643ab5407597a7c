//! Session state tracking
//!
//! Maintains:
//! - Setup values (game, DPI, current/target style, mode, environment)
//! - Current base sensitivity and round counter
//! - Round history
//! - Phase (test, result)

use super::env::EnvInfo;
use crate::tuning::{
    ab_step, classify, Candidates, Choice, GameTable, RoundRecord, Style, StyleBaseline,
};
use std::ops::RangeInclusive;
use thiserror::Error;

/// DPI values accepted at setup
pub const DPI_RANGE: RangeInclusive<u32> = 100..=6400;

/// Rounds used whenever the target style differs from the current one
pub const EXPLORE_ROUNDS: u32 = 7;

/// Screen the questionnaire is on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Collecting game, DPI and styles
    #[default]
    Setup,
    /// A/B rounds in progress
    Test,
    /// All rounds answered
    Result,
}

/// How many A/B rounds to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoundMode {
    /// 5 rounds
    #[default]
    Quick,
    /// 6 rounds
    Balanced,
    /// 7 rounds
    Thorough,
}

impl RoundMode {
    pub fn rounds(self) -> u32 {
        match self {
            RoundMode::Quick => 5,
            RoundMode::Balanced => 6,
            RoundMode::Thorough => 7,
        }
    }

    /// Label recorded in the result log
    pub fn label(self) -> &'static str {
        match self {
            RoundMode::Quick => "Quick (5 rounds)",
            RoundMode::Balanced => "Balanced (6 rounds)",
            RoundMode::Thorough => "Thorough (7 rounds)",
        }
    }
}

/// Round count for a session: the mode's count, or 7 when exploring a different style
pub fn total_rounds(mode: RoundMode, current: Style, target: Style) -> u32 {
    if target != current {
        EXPLORE_ROUNDS
    } else {
        mode.rounds()
    }
}

/// Errors from driving a session out of order or with bad setup
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("DPI {0} is outside the supported range 100-6400")]
    DpiOutOfRange(u32),
    #[error("all {0} rounds are already answered")]
    AlreadyFinished(u32),
    #[error("result requested after {answered} of {total} rounds")]
    NotFinished { answered: u32, total: u32 },
}

/// Values collected by the setup screen
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSetup {
    pub game: String,
    pub dpi: u32,
    /// Style the user normally plays
    pub current_style: Style,
    /// Style band to tune toward this time
    pub target_style: Style,
    pub mode: RoundMode,
    pub env: Option<EnvInfo>,
}

/// Final recommendation once every round is answered
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOutcome {
    pub final_sens: f64,
    pub final_edpi: f64,
    /// Nearest baseline style (for reference only)
    pub judged: Style,
}

/// Complete session state
#[derive(Clone, Debug)]
pub struct Session {
    setup: SessionSetup,
    baseline: StyleBaseline,
    /// Current base sensitivity
    base_sens: f64,
    /// 1-based round being asked
    round: u32,
    total_rounds: u32,
    history: Vec<RoundRecord>,
    finished: bool,
    logged: bool,
}

impl Session {
    /// Start a session from setup values; the first base is the target style's eDPI / DPI
    pub fn start(setup: SessionSetup, table: &GameTable) -> Result<Self, SessionError> {
        if !DPI_RANGE.contains(&setup.dpi) {
            return Err(SessionError::DpiOutOfRange(setup.dpi));
        }

        let baseline = table.baseline(&setup.game);
        let base_sens = baseline.sensitivity(setup.target_style, setup.dpi);
        let total_rounds = total_rounds(setup.mode, setup.current_style, setup.target_style);

        tracing::info!(
            game = %setup.game,
            dpi = setup.dpi,
            target = %setup.target_style,
            rounds = total_rounds,
            start_sens = base_sens,
            "session started"
        );

        Ok(Session {
            setup,
            baseline,
            base_sens,
            round: 1,
            total_rounds,
            history: Vec::with_capacity(total_rounds as usize),
            finished: false,
            logged: false,
        })
    }

    /// Fresh session with the same setup (the "back to setup" path)
    pub fn restart(&self, table: &GameTable) -> Result<Self, SessionError> {
        Self::start(self.setup.clone(), table)
    }

    pub fn setup(&self) -> &SessionSetup {
        &self.setup
    }

    pub fn baseline(&self) -> &StyleBaseline {
        &self.baseline
    }

    pub fn base_sens(&self) -> f64 {
        self.base_sens
    }

    /// Round currently being asked (1-based)
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Result
        } else {
            Phase::Test
        }
    }

    /// A/B pair for the current round
    pub fn candidates(&self) -> Candidates {
        Candidates::around(self.base_sens, self.setup.dpi)
    }

    /// Sensitivity and eDPI of each baseline style at the session DPI
    pub fn reference_points(&self) -> [(Style, f64, f64); 3] {
        Style::ALL.map(|style| {
            (
                style,
                self.baseline.sensitivity(style, self.setup.dpi),
                self.baseline.edpi(style),
            )
        })
    }

    /// Record an answer and advance; returns the phase after the answer
    pub fn submit(&mut self, choice: Choice) -> Result<Phase, SessionError> {
        if self.finished {
            return Err(SessionError::AlreadyFinished(self.total_rounds));
        }

        let (next_base, record) = ab_step(self.base_sens, self.setup.dpi, choice);
        self.history.push(record);
        self.base_sens = next_base;

        tracing::debug!(
            round = self.round,
            choice = ?choice,
            next_sens = next_base,
            "round answered"
        );

        if self.round >= self.total_rounds {
            self.finished = true;
        } else {
            self.round += 1;
        }
        Ok(self.phase())
    }

    /// Final sensitivity, eDPI and judged style
    pub fn outcome(&self) -> Result<SessionOutcome, SessionError> {
        if !self.finished {
            return Err(SessionError::NotFinished {
                answered: self.history.len() as u32,
                total: self.total_rounds,
            });
        }

        let final_edpi = self.base_sens * f64::from(self.setup.dpi);
        Ok(SessionOutcome {
            final_sens: self.base_sens,
            final_edpi,
            judged: classify(final_edpi, &self.baseline),
        })
    }

    /// Whether the result was already written to the log
    pub fn is_logged(&self) -> bool {
        self.logged
    }

    pub fn mark_logged(&mut self) {
        self.logged = true;
    }
}
