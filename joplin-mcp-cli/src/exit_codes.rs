//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: Completed with warnings (e.g. configuration diagnostics)
//! - 2: Fatal errors

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Completed, but something needs attention
pub const EXIT_WARNING: i32 = 1;

/// The command could not run
pub const EXIT_ERROR: i32 = 2;
