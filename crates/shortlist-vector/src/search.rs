use std::cmp::Ordering;

use shortlist_core::types::ScoredChunk;
use shortlist_core::{Error, Result};
use shortlist_embed::cosine;

use crate::VectorIndex;

impl VectorIndex {
    /// Top-`k` chunks by cosine similarity, best first. Equal scores keep
    /// insertion order.
    pub fn search_vec(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dim() {
            return Err(Error::EmbeddingService(format!(
                "query vector has dimension {}, index has {}",
                query.len(),
                self.dim()
            )));
        }
        let mut scored: Vec<(usize, f32)> = self
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let s = cosine(query, &e.vector);
                (i, if s.is_nan() { f32::NEG_INFINITY } else { s })
            })
            .collect();
        // sort_by is stable, so ties stay in insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored
            .into_iter()
            .map(|(i, score)| ScoredChunk { chunk: self.entries()[i].chunk.clone(), score })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::chunk;
    use crate::VectorIndex;
    use shortlist_core::ErrorKind;

    fn index() -> VectorIndex {
        VectorIndex::from_parts(
            vec![chunk("a", "A"), chunk("b", "B"), chunk("c", "C"), chunk("d", "D")],
            vec![vec![1.0, 0.0], vec![0.6, 0.8], vec![0.0, 1.0], vec![0.6, 0.8]],
            "test",
        )
        .unwrap()
    }

    #[test]
    fn ordered_by_decreasing_score() {
        let hits = index().search_vec(&[0.0, 1.0], 3).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "d"]);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let hits = index().search_vec(&[0.6, 0.8], 2).unwrap();
        assert_eq!(hits[0].chunk.id, "b");
        assert_eq!(hits[1].chunk.id, "d");
        assert!((hits[0].score - hits[1].score).abs() < 1e-6);
    }

    #[test]
    fn at_most_k_results() {
        assert_eq!(index().search_vec(&[1.0, 0.0], 10).unwrap().len(), 4);
        assert_eq!(index().search_vec(&[1.0, 0.0], 1).unwrap().len(), 1);
        assert!(index().search_vec(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn wrong_query_dimension_fails() {
        let err = index().search_vec(&[1.0, 0.0, 0.0], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmbeddingService);
    }
}
