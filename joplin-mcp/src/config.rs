//! Connection configuration for the Joplin Data API
//!
//! Resolution is split in two halves. [`ConfigSources::from_environment`] is the only
//! impure step: it snapshots the process environment and the desktop app's settings
//! file. [`resolve_config`] then turns those sources plus any command-line overrides
//! into a [`JoplinConfig`] and a list of human-readable diagnostics, without touching
//! global state, so it can be exercised directly in tests.

use crate::error::{JoplinError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Port the Joplin Web Clipper service listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 41184;

/// Loopback address the service binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Items requested per page when walking a collection endpoint
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "JOPLIN_TOKEN";

/// Environment variable holding the service port
pub const PORT_ENV: &str = "JOPLIN_PORT";

/// Environment variable holding the service host
pub const HOST_ENV: &str = "JOPLIN_HOST";

/// Connection parameters fixed for the lifetime of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoplinConfig {
    /// Host name or address of the note service
    pub host: String,
    /// TCP port of the note service
    pub port: u16,
    /// API token sent as the `token` query parameter
    pub token: Option<String>,
    /// Page size used by the pagination aggregator
    pub page_size: usize,
}

impl Default for JoplinConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl JoplinConfig {
    /// Create a configuration pointing at the default local service
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Token with everything but the first four characters hidden, for display
    pub fn masked_token(&self) -> String {
        match &self.token {
            Some(token) if token.chars().count() > 4 => {
                let prefix: String = token.chars().take(4).collect();
                format!("{prefix}{}", "*".repeat(token.chars().count() - 4))
            }
            Some(token) => "*".repeat(token.chars().count()),
            None => "<none>".to_string(),
        }
    }
}

/// Subset of the desktop app's `settings.json` relevant to the Data API
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DesktopSettings {
    /// Web Clipper API token
    #[serde(rename = "api.token", default)]
    pub token: Option<String>,
    /// Web Clipper port; stored as a number but tolerated as a string
    #[serde(rename = "api.port", default)]
    pub port: Option<serde_json::Value>,
}

/// Values supplied explicitly on the command line
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Host override
    pub host: Option<String>,
    /// Port override, unparsed so it gets the same validation as other sources
    pub port: Option<String>,
    /// Token override
    pub token: Option<String>,
}

/// Snapshot of every place configuration can come from
#[derive(Debug, Default, Clone)]
pub struct ConfigSources {
    /// Environment variables (only the `JOPLIN_*` ones are consulted)
    pub env: HashMap<String, String>,
    /// Parsed desktop settings, when a settings file was found and readable
    pub settings: Option<DesktopSettings>,
    /// Problems met while gathering the sources
    pub diagnostics: Vec<String>,
}

impl ConfigSources {
    /// Snapshot the process environment and the desktop settings file
    pub fn from_environment() -> Self {
        let env = [TOKEN_ENV, PORT_ENV, HOST_ENV]
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        let mut diagnostics = Vec::new();
        let settings = match discover_settings_file() {
            Some(path) => match load_desktop_settings(&path) {
                Ok(settings) => {
                    tracing::debug!("Loaded desktop settings from {}", path.display());
                    Some(settings)
                }
                Err(e) => {
                    diagnostics.push(format!(
                        "Could not read desktop settings at {}: {e}",
                        path.display()
                    ));
                    None
                }
            },
            None => None,
        };

        Self {
            env,
            settings,
            diagnostics,
        }
    }

    fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Outcome of configuration resolution
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The configuration to build a client from
    pub config: JoplinConfig,
    /// Non-fatal problems worth surfacing to the user
    pub diagnostics: Vec<String>,
}

impl ResolvedConfig {
    /// Emit every diagnostic as a warning
    pub fn log_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            tracing::warn!("{}", diagnostic);
        }
    }
}

/// Validate a port value, falling back to [`DEFAULT_PORT`]
///
/// Returns the port to use and, when the input was rejected, a diagnostic
/// explaining why.
pub fn parse_port(raw: &str) -> (u16, Option<String>) {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(port) if (1..=65535).contains(&port) => (port as u16, None),
        Ok(port) => (
            DEFAULT_PORT,
            Some(format!(
                "Port {port} is outside the valid range 1-65535, using default port {DEFAULT_PORT}"
            )),
        ),
        Err(_) => (
            DEFAULT_PORT,
            Some(format!(
                "Port '{trimmed}' is not a number, using default port {DEFAULT_PORT}"
            )),
        ),
    }
}

/// Combine all sources into a configuration
///
/// Precedence per field: overrides, then environment, then desktop settings,
/// then built-in defaults.
pub fn resolve_config(sources: &ConfigSources, overrides: &ConfigOverrides) -> ResolvedConfig {
    let mut diagnostics = sources.diagnostics.clone();
    let mut config = JoplinConfig::default();

    let settings = sources.settings.as_ref();

    let token = overrides
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| sources.env_value(TOKEN_ENV))
        .or_else(|| {
            settings
                .and_then(|s| s.token.as_deref())
                .map(str::trim)
                .filter(|t| !t.is_empty())
        });
    match token {
        Some(token) => config.token = Some(token.to_string()),
        None => diagnostics.push(format!(
            "No API token found. Set {TOKEN_ENV} or enable the Web Clipper service in Joplin; requests will be rejected until a token is provided"
        )),
    }

    let raw_port = overrides
        .port
        .clone()
        .or_else(|| sources.env_value(PORT_ENV).map(str::to_string))
        .or_else(|| {
            settings.and_then(|s| match &s.port {
                Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                _ => None,
            })
        });
    if let Some(raw) = raw_port {
        let (port, diagnostic) = parse_port(&raw);
        config.port = port;
        diagnostics.extend(diagnostic);
    }

    if let Some(host) = overrides
        .host
        .as_deref()
        .or_else(|| sources.env_value(HOST_ENV))
    {
        config.host = host.to_string();
    }

    ResolvedConfig {
        config,
        diagnostics,
    }
}

/// Locate the desktop app's settings file, if one exists
pub fn discover_settings_file() -> Option<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|home| home.join(".config").join("joplin-desktop")),
        dirs::config_dir().map(|dir| dir.join("joplin-desktop")),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join("settings.json"))
        .find(|path| path.is_file())
}

/// Read and parse a desktop settings file
pub fn load_desktop_settings(path: &Path) -> Result<DesktopSettings> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        JoplinError::Config(format!("Invalid settings file {}: {e}", path.display()))
    })
}
