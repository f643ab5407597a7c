//! Tuning Core: Baselines, the A/B update rule, and style classification
//!
//! # Components
//! - `baseline.rs`: Game table lookup and low/mid/high eDPI baselines
//! - `step.rs`: Candidate pair and next-base update for one round
//! - `classify.rs`: Nearest baseline style for a final eDPI

pub mod baseline;
pub mod classify;
pub mod step;

pub use baseline::{GameProfile, GameTable, GameTableError, Style, StyleBaseline};
pub use classify::classify;
pub use step::{ab_step, Candidates, Choice, RoundRecord};
