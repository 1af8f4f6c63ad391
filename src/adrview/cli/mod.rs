//! # CLI Layer
//!
//! One possible client of the adrview library, and the only place that knows
//! about arguments, stdout/stderr and exit codes.
//!
//! - [`setup`]: clap definitions and logging initialization
//! - [`commands`]: context setup and per-command handlers
//! - [`render`]: text rendering of command results

pub mod commands;
pub mod render;
pub mod setup;

pub use commands::run;
