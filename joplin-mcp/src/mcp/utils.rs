//! Utility functions for MCP operations

use serde_json::Value;

/// Generate a JSON schema for a type that implements JsonSchema
pub fn generate_tool_schema<T>() -> Value
where
    T: schemars::JsonSchema,
{
    serde_json::to_value(schemars::schema_for!(T))
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| serde_json::json!({ "type": "object" }))
}

/// Require exactly one of two alternative arguments
pub fn exactly_one<'a>(
    first: (&str, Option<&'a str>),
    second: (&str, Option<&'a str>),
) -> std::result::Result<Choice<'a>, String> {
    match (first.1, second.1) {
        (Some(value), None) => Ok(Choice::First(value)),
        (None, Some(value)) => Ok(Choice::Second(value)),
        (Some(_), Some(_)) => Err(format!("Provide either {} or {}, not both", first.0, second.0)),
        (None, None) => Err(format!("Provide {} or {}", first.0, second.0)),
    }
}

/// Which of two alternative arguments was supplied
#[derive(Debug, PartialEq, Eq)]
pub enum Choice<'a> {
    /// The first alternative
    First(&'a str),
    /// The second alternative
    Second(&'a str),
}
