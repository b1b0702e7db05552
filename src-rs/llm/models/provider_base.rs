use anyhow::Result;
use serde_json::Value;

/// Outcome of one provider HTTP round trip. The provider either accepted
/// the request (carrying the success payload) or rejected it with a detail
/// string taken from its error body.
pub enum ProviderReply<T> {
    Accepted(T),
    Rejected(String),
}

#[allow(async_fn_in_trait)]
pub trait ProviderClient: Send + Sync {
    /// Single lightweight call that checks whether the configured API key
    /// is accepted by the provider. `Rejected` carries the provider-supplied
    /// detail; transport and decode failures surface as `Err`.
    async fn verify_key(&self) -> Result<ProviderReply<()>>;

    /// Single generation call. `Accepted` carries the generated text.
    async fn send_prompt(&self, model: &str, prompt: &str) -> Result<ProviderReply<String>>;
}

/// Pulls the human-readable detail out of a parsed provider error body.
/// All three providers use an `error.message` field; some proxies return
/// `error` as a bare string or a top-level `message` instead.
pub(crate) fn error_detail_from_body(payload: &Value) -> String {
    if let Some(error) = payload.get("error") {
        match error {
            Value::String(s) => return s.clone(),
            Value::Object(map) => {
                if let Some(Value::String(message)) = map.get("message") {
                    return message.clone();
                }
            }
            _ => {}
        }
    }
    if let Some(Value::String(message)) = payload.get("message") {
        return message.clone();
    }
    "Unknown error".to_string()
}

/// Reads a non-2xx response body and turns it into a `Rejected` reply.
/// An unreadable or non-JSON error body is a decode failure, not a
/// provider rejection.
pub(crate) async fn rejected_reply<T>(response: reqwest::Response) -> Result<ProviderReply<T>> {
    let status = response.status();
    let body_text = response.text().await?;
    log::debug!("provider rejected request: status={}", status);
    let payload: Value = serde_json::from_str(&body_text)?;
    Ok(ProviderReply::Rejected(error_detail_from_body(&payload)))
}

#[cfg(test)]
mod tests {
    use super::error_detail_from_body;
    use serde_json::json;

    #[test]
    fn error_detail_from_body_reads_error_message() {
        let payload = json!({ "error": { "message": "invalid x-api-key" } });
        assert_eq!(error_detail_from_body(&payload), "invalid x-api-key");
    }

    #[test]
    fn error_detail_from_body_handles_string_error() {
        let payload = json!({ "error": "quota exceeded" });
        assert_eq!(error_detail_from_body(&payload), "quota exceeded");
    }

    #[test]
    fn error_detail_from_body_handles_top_level_message() {
        let payload = json!({ "message": "not found" });
        assert_eq!(error_detail_from_body(&payload), "not found");
    }

    #[test]
    fn error_detail_from_body_falls_back_to_unknown_error() {
        let payload = json!({ "error": { "type": "invalid_request_error" } });
        assert_eq!(error_detail_from_body(&payload), "Unknown error");

        let payload = json!({});
        assert_eq!(error_detail_from_body(&payload), "Unknown error");
    }
}
