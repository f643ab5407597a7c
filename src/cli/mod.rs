//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal rendering and UI

pub mod display;
pub mod input;

pub use display::{summary_lines, Display};
pub use input::InputHandler;
