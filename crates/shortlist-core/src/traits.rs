use crate::error::Result;
use crate::types::ChatMessage;

/// Maps text to fixed-dimension vectors.
///
/// `embed_batch` must return exactly one vector per input, in input order.
/// Every failure surfaces as [`crate::Error::EmbeddingService`].
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `http:models/embedding-001`).
    fn embedder_id(&self) -> &str;
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| crate::Error::EmbeddingService("provider returned no vector".into()))
    }
}

/// A chat-style language model. Failures surface as [`crate::Error::LanguageModel`].
pub trait LanguageModel: Send + Sync {
    fn model_id(&self) -> &str;
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
