use shortlist_core::traits::Embedder;
use shortlist_core::types::Chunk;
use shortlist_core::{Error, Result};
use tracing::{debug, info};

use crate::cache::{hash_content, CacheEntry, EmbeddingCache};
use crate::VectorIndex;

/// Embed every chunk in order-preserving batches and assemble the index.
///
/// Nothing is returned unless every chunk received a vector; a provider
/// failure aborts the whole build. Vectors embedded by batches that did
/// succeed stay in `cache`.
pub fn build_index(
    embedder: &dyn Embedder,
    chunks: Vec<Chunk>,
    batch_size: usize,
    cache: &mut EmbeddingCache,
) -> Result<VectorIndex> {
    let embedder_id = embedder.embedder_id().to_string();
    let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(chunks.len());
    let mut embedded = 0usize;

    for (n, batch) in chunks.chunks(batch_size.max(1)).enumerate() {
        let hashes: Vec<String> = batch.iter().map(|c| hash_content(&c.content)).collect();
        let hits = cache.get_many(&embedder_id, &hashes);

        let mut texts = Vec::new();
        let mut miss_indices = Vec::new();
        for (i, (chunk, h)) in batch.iter().zip(&hashes).enumerate() {
            if !hits.contains_key(h) {
                texts.push(chunk.content.clone());
                miss_indices.push(i);
            }
        }

        let mut batch_vectors: Vec<Vec<f32>> =
            hashes.iter().map(|h| hits.get(h).cloned().unwrap_or_default()).collect();
        if !texts.is_empty() {
            let embs = embedder.embed_batch(&texts)?;
            if embs.len() != texts.len() {
                return Err(Error::EmbeddingService(format!(
                    "embedder returned {} vectors for {} texts",
                    embs.len(),
                    texts.len()
                )));
            }
            let mut new_entries = Vec::with_capacity(embs.len());
            for (v, &i) in embs.into_iter().zip(&miss_indices) {
                new_entries.push(CacheEntry {
                    content_hash: hashes[i].clone(),
                    embedder_id: embedder_id.clone(),
                    vector: v.clone(),
                });
                batch_vectors[i] = v;
            }
            cache.put_many(new_entries);
            embedded += texts.len();
        }
        debug!(batch = n, size = batch.len(), misses = texts.len(), "embedded batch");
        vectors.extend(batch_vectors);
    }

    let index = VectorIndex::from_parts(chunks, vectors, &embedder_id)?;
    info!(
        chunks = index.len(),
        embedded,
        cached = index.len() - embedded,
        dim = index.dim(),
        "vector index built"
    );
    Ok(index)
}
