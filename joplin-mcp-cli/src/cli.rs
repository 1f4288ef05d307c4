use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use joplin_mcp::ConfigOverrides;
use std::io;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "joplin-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing a Joplin notebook collection to AI assistants")]
#[command(long_about = "
joplin-mcp is an MCP (Model Context Protocol) server that talks to the
Joplin desktop app through its Web Clipper Data API. Notes, notebooks,
tags, attachments and revision history become tools an assistant can call.

The API token and port are taken from, in order: command-line flags, the
JOPLIN_TOKEN / JOPLIN_PORT / JOPLIN_HOST environment variables, and the
desktop app's settings.json.

Example usage:
  joplin-mcp                      # Run as MCP server over stdio
  joplin-mcp config               # Show the resolved connection settings
  joplin-mcp --port 41185 serve   # Talk to a non-default port
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Web Clipper service port (overrides JOPLIN_PORT)
    #[arg(long, global = true)]
    pub port: Option<String>,

    /// Web Clipper API token (overrides JOPLIN_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Host running the Web Clipper service (overrides JOPLIN_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run as MCP server over stdio (default)
    #[command(long_about = "
Runs joplin-mcp as an MCP server on stdin/stdout. This is what an MCP
client launches. Logs go to stderr, or to --log-file when given, so the
protocol stream stays clean.

The server stops when the client disconnects or on Ctrl-C.

Example:
  joplin-mcp serve
  # Or configure the binary in your assistant's MCP settings
")]
    Serve,
    /// Show the resolved connection settings and any problems
    #[command(long_about = "
Prints where the server would connect, with the token masked, followed
by every problem found while resolving the configuration (missing token,
invalid port, unreadable settings file).

Exit codes:
  0 - Configuration is complete
  1 - Problems were found

Example:
  joplin-mcp config
  JOPLIN_PORT=41185 joplin-mcp config
")]
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// The command to run; no subcommand means serve
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Connection settings given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port.clone(),
            token: self.token.clone(),
        }
    }

    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::TRACE
        } else {
            Level::INFO
        }
    }

    pub fn is_tty() -> bool {
        io::stderr().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}
