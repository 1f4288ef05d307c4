//! Joplin MCP CLI Library
//!
//! Command-line definitions, logging setup and the `serve`/`config` commands
//! behind the `joplin-mcp` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// The `config` command
pub mod config;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Logging setup
pub mod logging;
/// The `serve` command
pub mod serve;
