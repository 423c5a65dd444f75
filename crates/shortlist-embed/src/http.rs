//! Embeddings client for OpenAI-compatible `/embeddings` endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use shortlist_core::config::EmbeddingSettings;
use shortlist_core::traits::Embedder;
use shortlist_core::{Error, Result};
use tracing::debug;

/// Blocking embeddings client. Inputs are sent in `batch_size` slices and the
/// results are reassembled in input order.
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: Option<usize>,
    batch_size: usize,
    id: String,
}

impl HttpEmbedder {
    pub fn new(api_key: &str, settings: &EmbeddingSettings) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("missing embedding API key".into()));
        }
        if settings.model.trim().is_empty() {
            return Err(Error::InvalidConfig("missing embedding model name".into()));
        }
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| Error::InvalidConfig("invalid embedding API key".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                Error::InvalidConfig(format!("failed to build embeddings HTTP client: {e}"))
            })?;
        let endpoint = format!("{}/embeddings", settings.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            batch_size: settings.batch_size.max(1),
            id: format!("http:{}", settings.model),
        })
    }

    fn request(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            dimensions: self.dimensions,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| Error::EmbeddingService(format!("embeddings request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::EmbeddingService(format!(
                "embeddings endpoint returned {status}: {text}"
            )));
        }
        let mut parsed: EmbeddingResponse = resp
            .json()
            .map_err(|e| {
                Error::EmbeddingService(format!("failed to parse embeddings response: {e}"))
            })?;
        if parsed.data.len() != inputs.len() {
            return Err(Error::EmbeddingService(format!(
                "provider returned {} embeddings for {} inputs",
                parsed.data.len(),
                inputs.len()
            )));
        }
        parsed.data.sort_by_key(|entry| entry.index);
        // After sorting, a permutation of 0..n is exactly the identity.
        if let Some((pos, entry)) =
            parsed.data.iter().enumerate().find(|(pos, entry)| entry.index != *pos)
        {
            return Err(Error::EmbeddingService(format!(
                "provider returned index {} at position {pos}; expected each of 0..{} once",
                entry.index,
                inputs.len()
            )));
        }
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

impl Embedder for HttpEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for (n, batch) in texts.chunks(self.batch_size).enumerate() {
            debug!(batch = n, size = batch.len(), "requesting embeddings");
            out.extend(self.request(batch)?);
        }
        if let Some(first) = out.first() {
            let dim = first.len();
            if dim == 0 || out.iter().any(|v| v.len() != dim) {
                return Err(Error::EmbeddingService(
                    "provider returned vectors of inconsistent dimension".into(),
                ));
            }
        }
        Ok(out)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
