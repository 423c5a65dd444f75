//! In-memory vector index over portfolio chunks.
//!
//! An index is built in one pass (see `index_build`) and is immutable
//! afterwards; a rebuild produces a fresh [`VectorIndex`].
use serde::{Deserialize, Serialize};
use shortlist_core::types::Chunk;
use shortlist_core::{Error, Result};

pub mod cache;
pub mod index_build;
pub mod search;

pub use cache::EmbeddingCache;
pub use index_build::build_index;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dim: usize,
    embedder_id: String,
}

impl VectorIndex {
    /// Pair chunks with vectors index-for-index. Every chunk needs exactly one
    /// vector and all vectors must share one dimension.
    pub fn from_parts(
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
        embedder_id: &str,
    ) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(Error::EmbeddingService(format!(
                "{} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }
        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        if vectors.iter().any(|v| v.len() != dim || v.is_empty()) {
            return Err(Error::EmbeddingService(format!(
                "dim mismatch: expected {dim} for every vector"
            )));
        }
        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();
        Ok(Self { entries, dim, embedder_id: embedder_id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn embedder_id(&self) -> &str {
        &self.embedder_id
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlist_core::types::Meta;
    use shortlist_core::ErrorKind;

    pub(crate) fn chunk(id: &str, content: &str) -> Chunk {
        Chunk {
            id: id.into(),
            content: content.into(),
            metadata: Meta::new(),
            chunk_index: 0,
            total_chunks: 1,
        }
    }

    #[test]
    fn pairs_one_vector_per_chunk() {
        let idx = VectorIndex::from_parts(
            vec![chunk("a", "A"), chunk("b", "B")],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            "test",
        )
        .unwrap();
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.dim(), 2);
        assert_eq!(idx.chunks().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_missing_vectors() {
        let chunks = vec![chunk("a", "A"), chunk("b", "B")];
        let err = VectorIndex::from_parts(chunks, vec![vec![1.0]], "test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmbeddingService);
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let err = VectorIndex::from_parts(
            vec![chunk("a", "A"), chunk("b", "B")],
            vec![vec![1.0, 0.0], vec![1.0]],
            "test",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmbeddingService);
    }
}
