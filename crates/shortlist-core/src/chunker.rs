//! Fixed-size sliding-window chunker.
//!
//! Windows are counted in characters. Each step advances by
//! `chunk_size - chunk_overlap`, so neighbouring chunks share exactly
//! `chunk_overlap` characters and the last window is never empty.
use crate::config::ChunkingSettings;
use crate::error::Result;
use crate::types::{Chunk, TextUnit};

#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        let ChunkingSettings { chunk_size, chunk_overlap } = ChunkingSettings::default();
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker {
    pub fn new(settings: ChunkingSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { chunk_size: settings.chunk_size, chunk_overlap: settings.chunk_overlap })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Character windows of `text`. Empty input yields no windows.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        // Byte offsets of every char boundary, plus the end of the string.
        let bounds: Vec<usize> =
            text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let char_len = bounds.len() - 1;
        if char_len == 0 {
            return Vec::new();
        }
        let step = self.chunk_size - self.chunk_overlap;
        let mut windows = Vec::new();
        let mut start = 0usize;
        loop {
            let end = (start + self.chunk_size).min(char_len);
            windows.push(text[bounds[start]..bounds[end]].to_string());
            if end == char_len {
                break;
            }
            start += step;
        }
        windows
    }

    /// Chunks for every unit, in unit order, each carrying its parent's metadata.
    pub fn split_units(&self, units: &[TextUnit]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for unit in units {
            let windows = self.split_text(&unit.text);
            let total_chunks = windows.len();
            for (chunk_index, content) in windows.into_iter().enumerate() {
                chunks.push(Chunk {
                    id: format!("{}:{}", unit.source(), chunk_index),
                    content,
                    metadata: unit.metadata.clone(),
                    chunk_index,
                    total_chunks,
                });
            }
        }
        chunks
    }
}
