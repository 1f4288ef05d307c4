//! Name-indexed set of Joplin tools
//!
//! Each tool (`list_notes`, `add_tags_to_note`, ...) is a unit struct
//! implementing [`McpTool`]. [`JoplinMcpServer`](super::server::JoplinMcpServer)
//! builds one [`ToolRegistry`] at startup and dispatches `call_tool` requests
//! through it.

use crate::client::JoplinApi;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use std::collections::HashMap;
use std::sync::Arc;

/// What a tool gets to work with: the Joplin client
#[derive(Clone)]
pub struct ToolContext {
    /// Facade over every Joplin endpoint group
    pub api: Arc<JoplinApi>,
}

impl ToolContext {
    /// Wrap the shared client
    pub fn new(api: Arc<JoplinApi>) -> Self {
        Self { api }
    }
}

/// One operation exposed to MCP clients
///
/// `schema` is the JSON Schema of the request type, normally produced by
/// `generate_tool_schema`. `execute` returns `Err` for argument problems;
/// other Joplin failures come back as an `is_error` result.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Snake-case tool name, unique within the registry
    fn name(&self) -> &'static str;

    /// Shown to the model when it picks a tool
    fn description(&self) -> &'static str;

    /// JSON Schema object for the arguments
    fn schema(&self) -> serde_json::Value;

    /// Run the tool against Joplin
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Joplin tools keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tool`; a later registration under the same name wins
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Look up a tool by its exact name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Tool names in alphabetical order
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Descriptors for `tools/list`, sorted by name so the listing is stable
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .tools
            .values()
            .map(|tool| {
                // a schema that is not an object is advertised as taking no arguments
                let input_schema = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };
                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(input_schema),
                    annotations: None,
                }
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Argument decoding and text responses shared by the Joplin tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Decode `arguments` into a request type
    ///
    /// A missing or mistyped field is reported as `invalid_params` naming the
    /// field, before any call reaches Joplin.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))
    }

    /// Plain-text result for a successful call
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        Self::text_result(content.into(), false)
    }

    /// `is_error` result reading `error: details`, or just `error`
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };
        Self::text_result(text, true)
    }

    fn text_result(text: String, is_error: bool) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text }),
                None,
            )],
            is_error: Some(is_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTransport;
    use serde::Deserialize;

    struct EchoTool;

    #[async_trait::async_trait]
    impl McpTool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the given text"
        }

        fn schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }

        async fn execute(
            &self,
            arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            #[derive(Deserialize)]
            struct Args {
                text: String,
            }
            let args: Args = BaseToolImpl::parse_arguments(arguments)?;
            Ok(BaseToolImpl::create_success_response(args.text))
        }
    }

    fn context() -> ToolContext {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        ToolContext::new(Arc::new(JoplinApi::with_transport(mock, 100)))
    }

    #[test]
    fn test_registry_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(EchoTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_tool("echo").is_some());
        assert!(registry.get_tool("missing").is_none());

        let tools = registry.list_tools();
        assert_eq!(tools[0].name, "echo");
        assert_eq!(tools[0].description.as_deref(), Some("Echo the given text"));
        assert!(tools[0].input_schema.contains_key("properties"));
    }

    #[tokio::test]
    async fn test_execute_and_bad_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        let tool = registry.get_tool("echo").unwrap();

        let mut args = serde_json::Map::new();
        args.insert("text".into(), serde_json::json!("hi"));
        let result = tool.execute(args, &context()).await.unwrap();
        assert_eq!(result.is_error, Some(false));

        let err = tool
            .execute(serde_json::Map::new(), &context())
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid arguments"));
    }

    #[test]
    fn test_error_response_joins_details() {
        let result = BaseToolImpl::create_error_response("Failed", Some("boom".into()));
        assert_eq!(result.is_error, Some(true));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, "Failed: boom");
        } else {
            panic!("Expected text content");
        }
    }
}
