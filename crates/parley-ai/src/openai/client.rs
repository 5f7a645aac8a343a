//! OpenAI API client struct, request building, and response parsing.

use crate::tools::to_openai_tool;
use crate::{AiError, AiResponse, Message, Role, TokenUsage, ToolCall, ToolDefinition};

use super::config::OpenAiConfig;

/// OpenAI chat completions client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the JSON request body for the chat completions API.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|msg| {
                // Tool results travel as plain user text; there is no
                // tool_call_id bookkeeping across rounds.
                let role = match msg.role {
                    Role::User | Role::Tool => "user",
                    Role::Assistant => "assistant",
                    Role::System => "system",
                };
                serde_json::json!({
                    "role": role,
                    "content": msg.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": msgs,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        if !tools.is_empty() {
            let tool_defs: Vec<_> = tools.iter().map(to_openai_tool).collect();
            body["tools"] = serde_json::json!(tool_defs);
        }

        body
    }

    /// Parse a chat completions response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let choice = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?;

        let message = &choice["message"];
        let content = message["content"].as_str().unwrap_or("").to_string();

        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| calls.iter().filter_map(parse_tool_call).collect())
            .unwrap_or_default();

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse {
            content,
            tool_calls,
            usage,
        })
    }
}

/// `function.arguments` is a JSON document encoded as a string.
fn parse_tool_call(call: &serde_json::Value) -> Option<ToolCall> {
    let function = call.get("function")?;
    let name = function["name"].as_str()?.to_string();
    let arguments = match &function["arguments"] {
        serde_json::Value::String(raw) => serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.clone())),
        serde_json::Value::Null => serde_json::json!({}),
        other => other.clone(),
    };
    Some(ToolCall {
        id: call["id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        name,
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url("http://localhost:9/v1/"))
            .unwrap()
    }

    #[test]
    fn api_url_appends_endpoint() {
        assert_eq!(client().api_url(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn request_body_includes_model_and_function_tools() {
        let tools = vec![ToolDefinition {
            name: "get_stock_quote".into(),
            description: "quote".into(),
            parameters: serde_json::json!({"type": "object"}),
        }];
        let body = client().build_request_body(
            &[
                Message::new(Role::User, "PETR4?"),
                Message::new(Role::Tool, "[Tool Result: get_stock_quote]\n38.50 BRL"),
            ],
            &tools,
        );

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "get_stock_quote");
    }

    #[test]
    fn request_body_omits_empty_tool_list() {
        let body = client().build_request_body(&[Message::new(Role::User, "oi")], &[]);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn parses_tool_calls_with_string_arguments() {
        let json = serde_json::json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "get_stock_quote", "arguments": "{\"ticker\":\"PETR4.SA\"}" }
                    }]
                }
            }],
            "usage": { "prompt_tokens": 20, "completion_tokens": 7 }
        });

        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls[0].id, "call_1");
        assert_eq!(response.tool_calls[0].arguments["ticker"], "PETR4.SA");
        assert_eq!(response.usage.total_tokens(), 27);
    }

    #[test]
    fn unparseable_arguments_are_kept_as_text() {
        let call = serde_json::json!({
            "id": "c",
            "function": { "name": "x", "arguments": "not json" }
        });
        let parsed = parse_tool_call(&call).unwrap();
        assert_eq!(parsed.arguments, serde_json::Value::String("not json".into()));
    }

    #[test]
    fn missing_choices_is_parse_error() {
        let err = client()
            .parse_response(serde_json::json!({ "error": "x" }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }
}
