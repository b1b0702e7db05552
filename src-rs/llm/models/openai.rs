use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::llm::models::provider_base::{rejected_reply, ProviderClient, ProviderReply};

const GENERATION_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub base_url: String,
    pub api_key: String,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }
}

pub(crate) fn build_chat_completions_request_body(model: &str, prompt: &str) -> Value {
    // No output-length cap here: the chat-completions call runs uncapped.
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": GENERATION_TEMPERATURE,
    })
}

pub(crate) fn completion_text_from_response(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
}

impl ProviderClient for OpenAiClient {
    async fn verify_key(&self) -> Result<ProviderReply<()>> {
        let url = format!("{}/v1/models", self.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }
        Ok(ProviderReply::Accepted(()))
    }

    async fn send_prompt(&self, model: &str, prompt: &str) -> Result<ProviderReply<String>> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let request_body = build_chat_completions_request_body(model, prompt);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }

        let json: Value = response
            .json()
            .await
            .context("Failed to parse response JSON")?;

        let text = completion_text_from_response(&json)
            .context("No completion text in OpenAI response")?;
        Ok(ProviderReply::Accepted(text))
    }
}

#[cfg(test)]
mod tests {
    use super::{build_chat_completions_request_body, completion_text_from_response};
    use serde_json::json;

    #[test]
    fn completion_text_from_response_reads_first_choice() {
        let response = json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Hello back" }
            }]
        });
        assert_eq!(
            completion_text_from_response(&response).as_deref(),
            Some("Hello back")
        );
    }

    #[test]
    fn completion_text_from_response_rejects_missing_choices() {
        assert!(completion_text_from_response(&json!({ "choices": [] })).is_none());
        assert!(completion_text_from_response(&json!({})).is_none());
    }

    #[test]
    fn request_body_carries_model_prompt_and_temperature() {
        let body = build_chat_completions_request_body("gpt-4o", "Hello");
        assert_eq!(body.get("model").and_then(|v| v.as_str()), Some("gpt-4o"));
        assert_eq!(
            body.pointer("/messages/0/content").and_then(|v| v.as_str()),
            Some("Hello")
        );
        assert_eq!(
            body.get("temperature").and_then(|v| v.as_f64()),
            Some(0.7)
        );
        assert!(body.get("max_tokens").is_none());
    }
}
