//! Chat-completion clients.
//!
//! `ChatClient` calls an OpenAI-compatible `/chat/completions` endpoint;
//! `EchoModel` answers offline and is selected with `APP_USE_FAKE_LLM=1`.
use shortlist_core::config::{api_key_from_env, LlmSettings};
use shortlist_core::traits::LanguageModel;
use shortlist_core::Result;
use tracing::info;

pub mod chat;
pub mod fake;

pub use chat::ChatClient;
pub use fake::EchoModel;

pub fn use_fake_llm() -> bool {
    std::env::var("APP_USE_FAKE_LLM")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_model(settings: &LlmSettings) -> Result<Box<dyn LanguageModel>> {
    if use_fake_llm() {
        info!("using echo language model");
        return Ok(Box::new(EchoModel::new()));
    }
    let api_key = api_key_from_env(&settings.api_key_env)?;
    info!(model = %settings.model, "using chat completions model");
    Ok(Box::new(ChatClient::new(&api_key, settings)?))
}
