//! In-memory embedding cache keyed by `(embedder_id, content_hash)`.
//!
//! Consulted before calling a provider and written through on misses, so
//! rebuilding the same dataset only pays for chunks whose text changed.
use std::collections::{HashMap, HashSet};

pub fn hash_content(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub content_hash: String,
    pub embedder_id: String,
    pub vector: Vec<f32>,
}

#[derive(Debug, Default)]
pub struct EmbeddingCache {
    vectors: HashMap<(String, String), Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get_many(&self, embedder_id: &str, hashes: &[String]) -> HashMap<String, Vec<f32>> {
        let mut out = HashMap::new();
        for h in hashes {
            if let Some(v) = self.vectors.get(&(embedder_id.to_string(), h.clone())) {
                out.insert(h.clone(), v.clone());
            }
        }
        out
    }

    pub fn put_many(&mut self, entries: Vec<CacheEntry>) {
        for e in entries {
            self.vectors.insert((e.embedder_id, e.content_hash), e.vector);
        }
    }

    /// Drop every vector except `embedder_id`'s entries for `hashes`.
    pub fn retain_hashes(&mut self, embedder_id: &str, hashes: &[String]) {
        let keep: HashSet<&str> = hashes.iter().map(String::as_str).collect();
        self.vectors.retain(|(eid, hash), _| eid == embedder_id && keep.contains(hash.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_scoped_by_embedder() {
        let mut cache = EmbeddingCache::new();
        let h = hash_content("Portfolio: Alice");
        cache.put_many(vec![CacheEntry {
            content_hash: h.clone(),
            embedder_id: "a".into(),
            vector: vec![1.0],
        }]);
        assert_eq!(cache.get_many("a", &[h.clone()]).get(&h), Some(&vec![1.0]));
        assert!(cache.get_many("b", &[h]).is_empty());
    }

    #[test]
    fn retain_drops_stale_and_foreign_entries() {
        let mut cache = EmbeddingCache::new();
        let hashes: Vec<String> =
            ["Alice", "Bob", "Carol"].iter().map(|s| hash_content(s)).collect();
        let entry = |h: &String, eid: &str| CacheEntry {
            content_hash: h.clone(),
            embedder_id: eid.into(),
            vector: vec![1.0],
        };
        cache.put_many(hashes.iter().map(|h| entry(h, "a")).collect());
        cache.put_many(vec![entry(&hashes[0], "b")]);
        assert_eq!(cache.len(), 4);

        cache.retain_hashes("a", &hashes[1..]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_many("a", &hashes[..1]).is_empty());
        assert!(cache.get_many("b", &hashes[..1]).is_empty());
        assert_eq!(cache.get_many("a", &hashes[1..]).len(), 2);
    }
}
