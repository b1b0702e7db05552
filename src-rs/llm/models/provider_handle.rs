use anyhow::Result;

use crate::cons::provider_cons::LLMProvider;

use super::anthropic::AnthropicClient;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
pub use super::provider_base::{ProviderClient, ProviderReply};

/// Closed set of provider clients; a match over this enum keeps all three
/// adapter mappings exhaustively checked.
pub enum AnyProviderClient {
    OpenAI(OpenAiClient),
    Anthropic(AnthropicClient),
    Gemini(GeminiClient),
}

impl ProviderClient for AnyProviderClient {
    async fn verify_key(&self) -> Result<ProviderReply<()>> {
        match self {
            AnyProviderClient::OpenAI(c) => c.verify_key().await,
            AnyProviderClient::Anthropic(c) => c.verify_key().await,
            AnyProviderClient::Gemini(c) => c.verify_key().await,
        }
    }

    async fn send_prompt(&self, model: &str, prompt: &str) -> Result<ProviderReply<String>> {
        match self {
            AnyProviderClient::OpenAI(c) => c.send_prompt(model, prompt).await,
            AnyProviderClient::Anthropic(c) => c.send_prompt(model, prompt).await,
            AnyProviderClient::Gemini(c) => c.send_prompt(model, prompt).await,
        }
    }
}

pub fn create_client(provider: LLMProvider, base_url: String, api_key: String) -> AnyProviderClient {
    match provider {
        LLMProvider::OpenAI => AnyProviderClient::OpenAI(OpenAiClient::new(base_url, api_key)),
        LLMProvider::Anthropic => {
            AnyProviderClient::Anthropic(AnthropicClient::new(base_url, api_key))
        }
        LLMProvider::Gemini => AnyProviderClient::Gemini(GeminiClient::new(base_url, api_key)),
    }
}
