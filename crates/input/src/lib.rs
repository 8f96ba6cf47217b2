//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`] and provides a
//! DAS/ARR repeat handler for the directional commands. Works in terminals
//! that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_repeatable, should_quit};
