use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::llm::models::provider_base::{rejected_reply, ProviderClient, ProviderReply};

const ANTHROPIC_VERSION: &str = "2023-06-01";

// Fixed low-cost model for the verification probe; never used for real
// prompts.
const VERIFICATION_PROBE_MODEL: &str = "claude-3-haiku-20240307";

const GENERATION_TEMPERATURE: f64 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    pub base_url: String,
    pub api_key: String,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    async fn post_messages(&self, request_body: &Value) -> Result<reqwest::Response> {
        self.http_client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await
            .context("Failed to send request to Anthropic API")
    }
}

/// Minimal one-token request used purely as a key probe, not a real prompt.
pub(crate) fn build_verification_probe_body() -> Value {
    json!({
        "model": VERIFICATION_PROBE_MODEL,
        "max_tokens": 1,
        "messages": [{ "role": "user", "content": "Hi" }],
    })
}

pub(crate) fn build_messages_request_body(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": GENERATION_MAX_TOKENS,
        "temperature": GENERATION_TEMPERATURE,
        "messages": [{ "role": "user", "content": prompt }],
    })
}

pub(crate) fn message_text_from_response(response: &Value) -> Option<String> {
    response
        .pointer("/content/0/text")
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
}

impl ProviderClient for AnthropicClient {
    async fn verify_key(&self) -> Result<ProviderReply<()>> {
        let response = self.post_messages(&build_verification_probe_body()).await?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }
        Ok(ProviderReply::Accepted(()))
    }

    async fn send_prompt(&self, model: &str, prompt: &str) -> Result<ProviderReply<String>> {
        let response = self
            .post_messages(&build_messages_request_body(model, prompt))
            .await?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }

        let json: Value = response
            .json()
            .await
            .context("Failed to parse response JSON")?;

        let text = message_text_from_response(&json)
            .context("No text block in Anthropic response")?;
        Ok(ProviderReply::Accepted(text))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_messages_request_body, build_verification_probe_body, message_text_from_response,
    };
    use serde_json::json;

    #[test]
    fn verification_probe_requests_a_single_token() {
        let body = build_verification_probe_body();
        assert_eq!(body.get("max_tokens").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(
            body.pointer("/messages/0/role").and_then(|v| v.as_str()),
            Some("user")
        );
        assert!(body.get("model").and_then(|v| v.as_str()).is_some());
    }

    #[test]
    fn messages_request_body_caps_output_tokens() {
        let body = build_messages_request_body("claude-sonnet-4-20250514", "Hello");
        assert_eq!(body.get("max_tokens").and_then(|v| v.as_u64()), Some(1000));
        assert_eq!(body.get("temperature").and_then(|v| v.as_f64()), Some(0.7));
        assert_eq!(
            body.pointer("/messages/0/content").and_then(|v| v.as_str()),
            Some("Hello")
        );
    }

    #[test]
    fn message_text_from_response_reads_first_content_block() {
        let response = json!({
            "content": [
                { "type": "text", "text": "first" },
                { "type": "text", "text": "second" }
            ]
        });
        assert_eq!(message_text_from_response(&response).as_deref(), Some("first"));
    }

    #[test]
    fn message_text_from_response_rejects_empty_content() {
        assert!(message_text_from_response(&json!({ "content": [] })).is_none());
    }
}
