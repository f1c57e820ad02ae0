//! Argument parsing, command execution and log setup for the `encoded-id`
//! binary.
//!
//! - [`config`] - `CliArgs` and the `Configuration` it resolves to.
//! - [`command`] - the subcommands and the reports they print.
//! - [`telemetry`] - `tracing-subscriber` initialisation.

pub mod command;
pub mod config;
pub mod telemetry;
