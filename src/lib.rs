//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the pieces of
//! the binary that are worth testing on their own: argument parsing,
//! logging setup and the headless driver.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod cli;
pub mod headless;
pub mod logging;
