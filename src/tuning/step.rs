//! A/B round update rule
//!
//! Each round offers a lower candidate (A = base × 0.75) and a higher one
//! (B = base × 1.25). The next base is the midpoint between the current base
//! and whatever the user picked.

use std::fmt;

/// Candidate A multiplier
pub const LOW_FACTOR: f64 = 0.75;
/// Candidate B multiplier
pub const HIGH_FACTOR: f64 = 1.25;

/// Answer for one round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Lower candidate felt better
    A,
    /// Higher candidate felt better
    B,
    /// Neither felt right
    Neutral,
}

impl Choice {
    /// Parse a single answer character (A / B / M or N for neutral)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'M' | 'N' => Some(Choice::Neutral),
            _ => None,
        }
    }

    /// Label used in history lines
    pub fn label(self) -> &'static str {
        match self {
            Choice::A => "A (lower)",
            Choice::B => "B (higher)",
            Choice::Neutral => "M (neither)",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The A/B pair offered around a base sensitivity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidates {
    pub base_sens: f64,
    pub low_sens: f64,
    pub high_sens: f64,
    pub low_edpi: f64,
    pub high_edpi: f64,
}

impl Candidates {
    /// Build the pair for a base sensitivity at a DPI
    pub fn around(base_sens: f64, dpi: u32) -> Self {
        let low_sens = base_sens * LOW_FACTOR;
        let high_sens = base_sens * HIGH_FACTOR;
        let dpi = f64::from(dpi);
        Candidates {
            base_sens,
            low_sens,
            high_sens,
            low_edpi: low_sens * dpi,
            high_edpi: high_sens * dpi,
        }
    }
}

/// One completed round
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundRecord {
    pub base_sens: f64,
    pub low_sens: f64,
    pub high_sens: f64,
    pub choice: Choice,
}

/// Apply one answer: returns the next base sensitivity and the round record
pub fn ab_step(base_sens: f64, dpi: u32, choice: Choice) -> (f64, RoundRecord) {
    let candidates = Candidates::around(base_sens, dpi);

    let next_base = match choice {
        Choice::A => (candidates.low_sens + base_sens) / 2.0,
        Choice::B => (candidates.high_sens + base_sens) / 2.0,
        // Candidates are symmetric, so their midpoint is the base itself
        Choice::Neutral => base_sens,
    };

    let record = RoundRecord {
        base_sens,
        low_sens: candidates.low_sens,
        high_sens: candidates.high_sens,
        choice,
    };
    (next_base, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_valorant_first_round_choice_a() {
        let (next, record) = ab_step(0.3275, 800, Choice::A);
        assert!((record.low_sens - 0.245625).abs() < EPS);
        assert!((record.high_sens - 0.409375).abs() < EPS);
        assert!((next - 0.2865625).abs() < EPS);
        assert_eq!(record.choice, Choice::A);
    }

    #[test]
    fn test_candidate_edpi() {
        let c = Candidates::around(0.5, 800);
        assert!((c.low_edpi - 300.0).abs() < EPS);
        assert!((c.high_edpi - 500.0).abs() < EPS);
    }

    #[test]
    fn test_neutral_midpoint_identity() {
        // (0.75s + 1.25s) / 2 == s, so averaging with the base changes nothing
        let base = 0.42;
        let c = Candidates::around(base, 1600);
        let midpoint = (c.low_sens + c.high_sens) / 2.0;
        assert!((midpoint - base).abs() < EPS);
        let (next, _) = ab_step(base, 1600, Choice::Neutral);
        assert_eq!(next, base);
    }

    #[test]
    fn test_choice_from_char() {
        assert_eq!(Choice::from_char('a'), Some(Choice::A));
        assert_eq!(Choice::from_char('B'), Some(Choice::B));
        assert_eq!(Choice::from_char('m'), Some(Choice::Neutral));
        assert_eq!(Choice::from_char('n'), Some(Choice::Neutral));
        assert_eq!(Choice::from_char('x'), None);
    }

    proptest! {
        #[test]
        fn prop_candidates_scale_base(base in 0.001f64..100.0, dpi in 100u32..=6400) {
            let (_, record) = ab_step(base, dpi, Choice::Neutral);
            prop_assert!((record.low_sens - 0.75 * base).abs() <= 1e-12 * base);
            prop_assert!((record.high_sens - 1.25 * base).abs() <= 1e-12 * base);
        }

        #[test]
        fn prop_choice_a_moves_toward_low_without_passing(
            base in 0.001f64..100.0,
            dpi in 100u32..=6400
        ) {
            let (next, record) = ab_step(base, dpi, Choice::A);
            prop_assert!(next < base);
            prop_assert!(next > record.low_sens);
        }

        #[test]
        fn prop_choice_b_moves_toward_high_without_passing(
            base in 0.001f64..100.0,
            dpi in 100u32..=6400
        ) {
            let (next, record) = ab_step(base, dpi, Choice::B);
            prop_assert!(next > base);
            prop_assert!(next < record.high_sens);
        }

        #[test]
        fn prop_neutral_keeps_base(base in 0.001f64..100.0, dpi in 100u32..=6400) {
            let (next, _) = ab_step(base, dpi, Choice::Neutral);
            prop_assert_eq!(next, base);
        }
    }
}
