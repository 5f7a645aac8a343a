//! AiClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, Message, ToolDefinition};

use super::client::OpenAiClient;

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools);

        debug!(model = %self.config.model, tools = tools.len(), "OpenAI API request");

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(AiError::from_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::OpenAiConfig;
    use crate::test_support::{refused_base, serve_once};
    use crate::Role;

    fn client_for(base: String) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url(format!("{base}/v1"))).unwrap()
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error_with_status() {
        let (base, _) = serve_once("503 Service Unavailable", "{\"error\":\"overloaded\"}").await;
        let err = client_for(base)
            .send_message(&[Message::new(Role::User, "oi")], &[])
            .await
            .unwrap_err();
        match err {
            AiError::ApiError(msg) => {
                assert!(msg.starts_with("HTTP 503"), "got {msg}");
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let (base, _) = serve_once("429 Too Many Requests", "{}").await;
        let err = client_for(base)
            .send_message(&[Message::new(Role::User, "oi")], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::RateLimited));
    }

    #[tokio::test]
    async fn success_is_parsed() {
        let (base, request) = serve_once(
            "200 OK",
            "{\"choices\":[{\"message\":{\"content\":\"Olá!\"}}],\"usage\":{\"prompt_tokens\":3,\"completion_tokens\":2}}",
        )
        .await;
        let response = client_for(base)
            .send_message(&[Message::new(Role::User, "oi")], &[])
            .await
            .unwrap();
        assert_eq!(response.content, "Olá!");
        assert_eq!(response.usage.output_tokens, 2);

        let request = request.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /v1/chat/completions "), "got {request}");
        assert!(request.contains("authorization: bearer sk-test"));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let err = client_for(refused_base().await)
            .send_message(&[Message::new(Role::User, "oi")], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_)), "got {err:?}");
    }
}
