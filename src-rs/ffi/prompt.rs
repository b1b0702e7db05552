use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::init_logger;

use super::prompt_util::{self, OperationResult};

/// Checks whether `api_key` is accepted by the given provider. Always
/// resolves; failures are reported through `OperationResult`.
#[napi]
pub async fn validate_api_key(
    provider: String,
    api_key: String,
    base_url: Option<String>,
) -> Result<OperationResult> {
    init_logger();
    Ok(prompt_util::validate(&provider, &api_key, base_url).await)
}

/// Sends a single prompt to the given provider/model and returns the
/// generated text in `data`. Always resolves.
#[napi]
pub async fn send_prompt(
    provider: String,
    model: String,
    api_key: String,
    prompt: String,
    base_url: Option<String>,
) -> Result<OperationResult> {
    init_logger();
    Ok(prompt_util::dispatch(&provider, &model, &api_key, &prompt, base_url).await)
}
