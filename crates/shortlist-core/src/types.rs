//! Domain types shared by the normalizer, chunker, index and pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ChunkId = String;
pub type Meta = BTreeMap<String, String>;

/// Metadata key holding the provenance back-reference (`portfolio_{row}`).
pub const SOURCE_KEY: &str = "source";

/// One validated row of the portfolio dataset.
///
/// Produced once at ingestion; column lookups never happen after this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub name: String,
    pub skills: String,
    pub experience: String,
    pub location: String,
}

/// The self-describing text rendering of a [`PortfolioRow`] plus provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub text: String,
    pub metadata: Meta,
}

impl TextUnit {
    pub fn source(&self) -> &str {
        self.metadata.get(SOURCE_KEY).map(String::as_str).unwrap_or_default()
    }
}

/// A bounded window of a [`TextUnit`] and the atomic retrieval unit.
///
/// - `id`: `{source}:{chunk_index}`, unique within one build
/// - `content`: the window text, never empty
/// - `metadata`: copied unchanged from the parent unit
/// - `chunk_index`/`total_chunks`: position within the parent unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub metadata: Meta,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

impl Chunk {
    pub fn source(&self) -> &str {
        self.metadata.get(SOURCE_KEY).map(String::as_str).unwrap_or_default()
    }
}

/// A retrieved chunk with its similarity score. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One turn of a chat-style prompt sent to a [`crate::traits::LanguageModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}
