//! Sens Doctor - A/B questionnaire for in-game mouse sensitivity
//!
//! Starts from a per-game baseline eDPI, offers a lower and a higher
//! candidate each round, and moves halfway toward whichever one the player
//! prefers. After a fixed number of rounds the remaining value is the
//! recommendation.
//!
//! # Modules
//! - [`tuning`]: baseline table, update rule, style classification
//! - [`session`]: setup → test → result state machine
//! - [`report`]: text log of finished sessions
//! - [`cli`]: crossterm front end used by the `sens-doctor` binary

pub mod cli;
pub mod report;
pub mod session;
pub mod tuning;
