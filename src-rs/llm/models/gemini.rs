use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::llm::models::provider_base::{rejected_reply, ProviderClient, ProviderReply};

const GENERATION_TEMPERATURE: f64 = 0.7;
const GENERATION_MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub base_url: String,
    pub api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }
}

// Gemini authenticates with the key in the query string, not a header.
pub(crate) fn list_models_url(base_url: &str, api_key: &str) -> String {
    format!(
        "{}/v1beta/models?key={}",
        base_url.trim_end_matches('/'),
        api_key
    )
}

pub(crate) fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        base_url.trim_end_matches('/'),
        model,
        api_key
    )
}

pub(crate) fn build_generate_content_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": GENERATION_TEMPERATURE,
            "maxOutputTokens": GENERATION_MAX_OUTPUT_TOKENS,
        },
    })
}

pub(crate) fn candidate_text_from_response(response: &Value) -> Option<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
}

impl ProviderClient for GeminiClient {
    async fn verify_key(&self) -> Result<ProviderReply<()>> {
        let url = list_models_url(&self.base_url, &self.api_key);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }
        Ok(ProviderReply::Accepted(()))
    }

    async fn send_prompt(&self, model: &str, prompt: &str) -> Result<ProviderReply<String>> {
        let url = generate_content_url(&self.base_url, model, &self.api_key);
        let request_body = build_generate_content_request_body(prompt);

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            return rejected_reply(response).await;
        }

        let json: Value = response
            .json()
            .await
            .context("Failed to parse response JSON")?;

        let text = candidate_text_from_response(&json)
            .context("No candidate text in Gemini response")?;
        Ok(ProviderReply::Accepted(text))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_generate_content_request_body, candidate_text_from_response, generate_content_url,
        list_models_url,
    };
    use serde_json::json;

    #[test]
    fn generate_content_url_embeds_model_and_key() {
        let url = generate_content_url(
            "https://generativelanguage.googleapis.com/",
            "gemini-2.0-flash",
            "secret",
        );
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=secret"
        );
    }

    #[test]
    fn list_models_url_puts_key_in_query_string() {
        let url = list_models_url("https://generativelanguage.googleapis.com", "secret");
        assert!(url.ends_with("/v1beta/models?key=secret"));
    }

    #[test]
    fn request_body_nests_prompt_under_contents_parts() {
        let body = build_generate_content_request_body("Hello");
        assert_eq!(
            body.pointer("/contents/0/parts/0/text").and_then(|v| v.as_str()),
            Some("Hello")
        );
        assert_eq!(
            body.pointer("/generationConfig/temperature").and_then(|v| v.as_f64()),
            Some(0.7)
        );
        assert_eq!(
            body.pointer("/generationConfig/maxOutputTokens").and_then(|v| v.as_u64()),
            Some(1000)
        );
    }

    #[test]
    fn candidate_text_from_response_descends_to_first_part() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hi there" }] }
            }]
        });
        assert_eq!(
            candidate_text_from_response(&response).as_deref(),
            Some("hi there")
        );
    }

    #[test]
    fn candidate_text_from_response_rejects_empty_candidates() {
        assert!(candidate_text_from_response(&json!({ "candidates": [] })).is_none());
    }
}
