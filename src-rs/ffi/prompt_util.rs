use napi_derive::napi;

use crate::config::AppConfig;
use crate::cons::provider_cons::LLMProvider;
use crate::llm::models::provider_handle::{create_client, ProviderClient, ProviderReply};

/// Uniform result shape returned to the shell by both core operations.
/// Every call resolves to exactly one of these; nothing crosses the FFI
/// boundary as a thrown exception.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub success: bool,
    /// Failure explanation, or a status message on successful validation.
    pub message: Option<String>,
    /// Generated text (prompt dispatch only).
    pub data: Option<String>,
}

impl OperationResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    fn ok_with_data(data: String) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

pub(crate) fn invalid_key_message(provider: LLMProvider, detail: &str) -> String {
    format!("Invalid {} API key: {}", provider.brand_name(), detail)
}

pub(crate) fn provider_error_message(provider: LLMProvider, detail: &str) -> String {
    format!("{} API error: {}", provider.brand_name(), detail)
}

/// Explicit argument wins, then the configured preset, then the provider's
/// built-in default.
fn resolve_base_url(provider: LLMProvider, base_override: Option<String>) -> String {
    if let Some(explicit) = base_override
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return explicit.to_string();
    }

    match AppConfig::load() {
        Ok(config) => config
            .base_url_for(provider.provider_name())
            .map(|url| url.to_string())
            .unwrap_or_else(|| provider.default_base_url().to_string()),
        Err(e) => {
            log::warn!("Failed to load config, using default base URL: {}", e);
            provider.default_base_url().to_string()
        }
    }
}

/// Checks a candidate API key against the provider with one lightweight
/// call. Keys and prompt text are never logged.
pub async fn validate(
    provider: &str,
    api_key: &str,
    base_url: Option<String>,
) -> OperationResult {
    let Some(provider) = LLMProvider::from_name(provider) else {
        return OperationResult::fail("Unknown provider");
    };
    if api_key.trim().is_empty() {
        return OperationResult::fail("API key cannot be empty");
    }

    let base = resolve_base_url(provider, base_url);
    let client = create_client(provider, base, api_key.trim().to_string());
    log::info!("validate start provider={}", provider);

    match client.verify_key().await {
        Ok(ProviderReply::Accepted(())) => {
            log::info!("validate success provider={}", provider);
            OperationResult::ok("API key is valid")
        }
        Ok(ProviderReply::Rejected(detail)) => {
            log::info!("validate rejected provider={}", provider);
            OperationResult::fail(invalid_key_message(provider, &detail))
        }
        Err(e) => {
            log::warn!("validate error provider={} err={:#}", provider, e);
            OperationResult::fail(format!("Error validating API key: {}", e))
        }
    }
}

/// Sends one prompt and returns the generated text. Input checks run in a
/// fixed order before any network call: credential, then prompt, then
/// provider.
pub async fn dispatch(
    provider: &str,
    model: &str,
    api_key: &str,
    prompt: &str,
    base_url: Option<String>,
) -> OperationResult {
    if api_key.trim().is_empty() {
        return OperationResult::fail("API key is required");
    }
    if prompt.trim().is_empty() {
        return OperationResult::fail("Prompt cannot be empty");
    }
    let Some(provider) = LLMProvider::from_name(provider) else {
        return OperationResult::fail("Unknown provider");
    };

    let base = resolve_base_url(provider, base_url);
    let client = create_client(provider, base, api_key.trim().to_string());
    log::info!(
        "dispatch start provider={} model={} prompt_chars={}",
        provider,
        model,
        prompt.len()
    );

    match client.send_prompt(model, prompt).await {
        Ok(ProviderReply::Accepted(text)) => {
            log::info!(
                "dispatch success provider={} response_chars={}",
                provider,
                text.len()
            );
            OperationResult::ok_with_data(text)
        }
        Ok(ProviderReply::Rejected(detail)) => {
            log::info!("dispatch rejected provider={}", provider);
            OperationResult::fail(provider_error_message(provider, &detail))
        }
        Err(e) => {
            log::warn!("dispatch error provider={} err={:#}", provider, e);
            OperationResult::fail(format!("Error sending prompt: {}", e))
        }
    }
}
