use std::hash::{Hash, Hasher};

use shortlist_core::traits::Embedder;
use shortlist_core::Result;
use twox_hash::XxHash64;

use crate::pool::l2_normalize;

/// Deterministic bag-of-words embedder: each lowercase alphanumeric token is
/// hashed into one of `dim` buckets. Needs no network and no model files.
pub struct HashingEmbedder {
    dim: usize,
    id: String,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, id: format!("hashing:d{dim}") }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in tokens(text) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let weight = 0.5 + (((h >> 32) as u32) as f32) / (u32::MAX as f32) * 0.5;
            v[idx] += weight;
        }
        l2_normalize(&mut v);
        v
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(1024)
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

impl Embedder for HashingEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::cosine;

    #[test]
    fn shapes_norm_and_determinism() {
        let e = HashingEmbedder::new(256);
        let embs = e.embed_batch(&["hello world".to_string(), "hello world".to_string()]).unwrap();
        assert_eq!(embs[0].len(), 256);
        let norm: f32 = embs[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
        assert_eq!(embs[0], embs[1]);
    }

    #[test]
    fn punctuation_and_case_do_not_matter() {
        let e = HashingEmbedder::default();
        let a = e.embed("Who knows Python?").unwrap();
        let b = e.embed("who KNOWS python").unwrap();
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shared_tokens_score_higher() {
        let e = HashingEmbedder::default();
        let q = e.embed("python").unwrap();
        let hit = e.embed("Skills: Python, SQL").unwrap();
        let miss = e.embed("Skills: Rust, Go").unwrap();
        assert!(cosine(&q, &hit) > cosine(&q, &miss));
    }

    #[test]
    fn empty_text_gives_zero_vector() {
        let v = HashingEmbedder::new(8).embed("  ,, ").unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
