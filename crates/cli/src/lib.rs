//! # Dimension Registry CLI
//!
//! Subcommands and the interactive REPL behind the `dimensions` binary.

pub mod commands;
pub mod interactive;
