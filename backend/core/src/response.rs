//! Agent response payload shapes.
//!
//! The runtime streams each payload line as opaque text, but several known
//! JSON envelope shapes show up in practice. They are enumerated here as an
//! untagged sum type with one extraction rule per variant and an explicit
//! stringify fallback for unrecognized objects.

use serde::Deserialize;
use serde_json::Value;

/// A single block inside a `content` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Text { text: String },
    Plain(String),
    Other(Value),
}

/// A `content` field: block list, bare string, or anything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentField {
    Blocks(Vec<ContentBlock>),
    Plain(String),
    Other(Value),
}

impl ContentField {
    /// Reduce to display text. Only the first block of a list is used;
    /// an empty list stringifies.
    fn into_text(self) -> String {
        match self {
            ContentField::Plain(s) => s,
            ContentField::Blocks(blocks) => match blocks.into_iter().next() {
                Some(ContentBlock::Text { text }) => text,
                Some(ContentBlock::Plain(s)) => s,
                Some(ContentBlock::Other(v)) => stringify(&v),
                None => "[]".to_string(),
            },
            ContentField::Other(v) => stringify(&v),
        }
    }
}

/// In-band marker that the runtime started invoking a tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolUseInfo {
    pub name: String,
}

/// The known JSON object shapes an agent runtime may emit, tried in order.
///
/// Variants mirror the envelope formats seen from different runtime
/// versions; `Opaque` catches any other JSON object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AgentPayload {
    /// `{"role": "assistant", "content": [{"text": "Hello!"}]}`
    RoleContent { role: String, content: ContentField },
    /// `{"current_tool_use": {"name": "get_current_weather"}}`
    ToolUse { current_tool_use: ToolUseInfo },
    /// `{"text": "Hello!"}`
    Text { text: String },
    /// `{"content": ...}`
    Content { content: ContentField },
    /// `{"message": ...}`
    Message { message: Value },
    /// `{"response": ...}`
    Response { response: Value },
    /// `{"result": ...}`
    Result { result: Value },
    /// Any other JSON object.
    Opaque(serde_json::Map<String, Value>),
}

impl AgentPayload {
    /// Apply this variant's extraction rule.
    pub fn into_text(self) -> String {
        match self {
            AgentPayload::RoleContent { content, .. } => content.into_text(),
            AgentPayload::ToolUse { current_tool_use } => {
                format!("\n*Using tool: {}*\n", current_tool_use.name)
            }
            AgentPayload::Text { text } => text,
            AgentPayload::Content { content } => content.into_text(),
            AgentPayload::Message { message } => stringify(&message),
            AgentPayload::Response { response } => stringify(&response),
            AgentPayload::Result { result } => stringify(&result),
            AgentPayload::Opaque(map) => stringify(&Value::Object(map)),
        }
    }
}

fn stringify(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Interpret one streamed payload fragment.
///
/// A fragment that parses as a JSON object is reduced through
/// [`AgentPayload`]; everything else — plain text, bare JSON strings,
/// numbers, arrays — passes through verbatim so the normalizer sees the
/// stream exactly as it arrived.
pub fn extract_text(raw: &str) -> String {
    match serde_json::from_str::<AgentPayload>(raw) {
        Ok(payload) => payload.into_text(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_content_block_list() {
        let raw = r#"{"role": "assistant", "content": [{"text": "Hello!"}]}"#;
        assert_eq!(extract_text(raw), "Hello!");
    }

    #[test]
    fn test_role_content_plain_block() {
        let raw = r#"{"role": "assistant", "content": ["just a string"]}"#;
        assert_eq!(extract_text(raw), "just a string");
    }

    #[test]
    fn test_role_content_string() {
        let raw = r#"{"role": "assistant", "content": "inline"}"#;
        assert_eq!(extract_text(raw), "inline");
    }

    #[test]
    fn test_role_content_empty_list() {
        let raw = r#"{"role": "assistant", "content": []}"#;
        assert_eq!(extract_text(raw), "[]");
    }

    #[test]
    fn test_text_field() {
        assert_eq!(extract_text(r#"{"text": "hi"}"#), "hi");
    }

    #[test]
    fn test_content_field_object() {
        assert_eq!(extract_text(r#"{"content": {"k": 1}}"#), r#"{"k":1}"#);
    }

    #[test]
    fn test_message_response_result() {
        assert_eq!(extract_text(r#"{"message": "m"}"#), "m");
        assert_eq!(extract_text(r#"{"response": "r"}"#), "r");
        assert_eq!(extract_text(r#"{"result": 5}"#), "5");
    }

    #[test]
    fn test_tool_use_annotation() {
        let raw = r#"{"current_tool_use": {"name": "get_aqi", "input": {}}}"#;
        assert_eq!(extract_text(raw), "\n*Using tool: get_aqi*\n");
    }

    #[test]
    fn test_unknown_object_stringifies() {
        assert_eq!(extract_text(r#"{"foo": "bar"}"#), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_non_json_passes_through() {
        assert_eq!(extract_text("The current temperature"), "The current temperature");
    }

    #[test]
    fn test_quoted_chunk_keeps_quotes() {
        // Bare JSON strings stay verbatim; joining quoted chunks is the
        // normalizer's job.
        assert_eq!(extract_text("\"Hello\""), "\"Hello\"");
    }

    #[test]
    fn test_json_array_passes_through() {
        assert_eq!(extract_text("[1, 2]"), "[1, 2]");
    }
}
