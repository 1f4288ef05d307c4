//! Endpoint and query-string construction

use serde::{Deserialize, Serialize};

/// Sort direction for collection endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum OrderDir {
    /// Ascending
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    /// Descending
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl OrderDir {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// Item type filter for the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Notes
    Note,
    /// Notebooks
    Folder,
    /// Tags
    Tag,
}

impl ItemType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Note => "note",
            ItemType::Folder => "folder",
            ItemType::Tag => "tag",
        }
    }
}

/// Per-call knobs shared by every listing operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Comma-separated field projection; each entity has its own default
    pub fields: Option<String>,
    /// Field to sort by
    pub order_by: Option<String>,
    /// Sort direction
    pub order_dir: Option<OrderDir>,
    /// Maximum number of items to return
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Options with every knob left at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the field projection
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sort by a field
    pub fn with_order(mut self, order_by: impl Into<String>, order_dir: OrderDir) -> Self {
        self.order_by = Some(order_by.into());
        self.order_dir = Some(order_dir);
        self
    }

    /// Cap the number of returned items
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Builder for a relative endpoint with an encoded query string
#[derive(Debug, Clone)]
pub(crate) struct EndpointBuilder {
    path: String,
    params: Vec<(String, String)>,
}

impl EndpointBuilder {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub(crate) fn param_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Apply projection and sorting; `limit` is handled by the aggregator
    pub(crate) fn list_options(self, options: &ListOptions, default_fields: &str) -> Self {
        let fields = options
            .fields
            .clone()
            .unwrap_or_else(|| default_fields.to_string());
        self.param("fields", fields)
            .param_opt("order_by", options.order_by.clone())
            .param_opt("order_dir", options.order_dir.map(|dir| dir.as_str()))
    }

    pub(crate) fn build(self) -> String {
        if self.params.is_empty() {
            return self.path;
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Append page-cursor parameters to an endpoint that may already have a query
pub(crate) fn paged_endpoint(endpoint: &str, limit: usize, page: usize) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}limit={limit}&page={page}")
}
