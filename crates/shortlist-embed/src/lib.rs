//! Embedding providers.
//!
//! `HttpEmbedder` talks to an OpenAI-compatible embeddings endpoint;
//! `HashingEmbedder` is a deterministic offline stand-in used in tests and
//! when `APP_USE_FAKE_EMBEDDINGS=1`.
use shortlist_core::config::{api_key_from_env, EmbeddingSettings};
use shortlist_core::traits::Embedder;
use shortlist_core::Result;
use tracing::info;

pub mod hashing;
pub mod http;
pub mod pool;

pub use hashing::HashingEmbedder;
pub use http::HttpEmbedder;
pub use pool::{cosine, l2_normalize};

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_embedder(settings: &EmbeddingSettings) -> Result<Box<dyn Embedder>> {
    if use_fake_embeddings() {
        info!("using hashing embedder");
        return Ok(Box::new(HashingEmbedder::new(settings.dimensions.unwrap_or(1024))));
    }
    let api_key = api_key_from_env(&settings.api_key_env)?;
    info!(model = %settings.model, "using HTTP embedder");
    Ok(Box::new(HttpEmbedder::new(&api_key, settings)?))
}
