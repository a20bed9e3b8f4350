//! Subcommands of the `baremo` binary
//!
//! Each command takes its parsed options and returns the text to print on
//! stdout; logging goes to stderr.

pub mod commands;

pub use commands::{extract, inspect, locate, stats};
