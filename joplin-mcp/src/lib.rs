//! # Joplin MCP
//!
//! Exposes a running Joplin desktop app to AI assistants over the Model Context
//! Protocol.
//!
//! ## Features
//!
//! - **Data API client**: Typed operations over notebooks, notes, tags, resources and revisions
//! - **Transparent pagination**: Collection endpoints are returned as complete sequences
//! - **Tag names**: Tags are assigned and removed by name, created on demand
//! - **Safe attachment deletion**: Resources still embedded in notes are kept
//! - **MCP Support**: Every operation is registered as an MCP tool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use joplin_mcp::{resolve_config, ConfigOverrides, ConfigSources, JoplinApi, NewNote};
//!
//! # async fn example() -> joplin_mcp::Result<()> {
//! let resolved = resolve_config(&ConfigSources::from_environment(), &ConfigOverrides::default());
//! resolved.log_diagnostics();
//!
//! let api = JoplinApi::new(&resolved.config);
//! let note = api
//!     .notes()
//!     .create(NewNote {
//!         title: "Groceries".to_string(),
//!         body: "- milk".to_string(),
//!         tags: Some("home, errands".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("created {} with {} tags", note.note.id, note.tags.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Data API client and domain groups
pub mod client;

/// Connection configuration and its resolution
pub mod config;

/// Error types and utilities
pub mod error;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Records exchanged with the Data API
pub mod models;

pub use client::{
    ItemType, JoplinApi, ListOptions, MockTransport, NewNote, NoteUpdate, OrderDir, Transport,
};
pub use config::{resolve_config, ConfigOverrides, ConfigSources, JoplinConfig, ResolvedConfig};
pub use error::{JoplinError, Result};
pub use mcp::JoplinMcpServer;
pub use models::{Note, NoteWithTags, Notebook, Resource, ResourceDeletion, Revision, Tag};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
