//! The `config` command

use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use anyhow::Result;
use joplin_mcp::ResolvedConfig;
use std::io::Write;

/// Print the resolved connection settings and diagnostics
///
/// Returns [`EXIT_WARNING`] when any diagnostic was produced.
pub fn run_config_command(resolved: &ResolvedConfig, out: &mut impl Write) -> Result<i32> {
    let config = &resolved.config;
    writeln!(out, "Joplin connection")?;
    writeln!(out, "  URL:       {}", config.base_url())?;
    writeln!(out, "  Token:     {}", config.masked_token())?;
    writeln!(out, "  Page size: {}", config.page_size)?;

    if resolved.diagnostics.is_empty() {
        writeln!(out, "\nNo problems found")?;
        return Ok(EXIT_SUCCESS);
    }

    writeln!(out, "\nProblems:")?;
    for diagnostic in &resolved.diagnostics {
        writeln!(out, "  - {diagnostic}")?;
    }
    Ok(EXIT_WARNING)
}
