//! Session Management: Setup, round progression, and results
//!
//! # Components
//! - `state.rs`: Session struct driving setup → test → result
//! - `env.rs`: Optional environment notes stored with a result

pub mod env;
pub mod state;

pub use env::EnvInfo;
pub use state::{
    total_rounds, Phase, RoundMode, Session, SessionError, SessionOutcome, SessionSetup, DPI_RANGE,
};
