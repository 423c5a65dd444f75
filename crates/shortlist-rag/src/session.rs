use std::io::Read;
use std::path::Path;
use std::time::Instant;

use shortlist_core::chunker::Chunker;
use shortlist_core::config::Settings;
use shortlist_core::data_processor::DataProcessor;
use shortlist_core::traits::{Embedder, LanguageModel};
use shortlist_core::types::{PortfolioRow, ScoredChunk};
use shortlist_core::{Error, Result};
use shortlist_vector::cache::hash_content;
use shortlist_vector::{build_index, EmbeddingCache, VectorIndex};
use tracing::{info, warn};

use crate::outcome::{
    BuildReport, EmailDraft, PipelineState, QueryOutcome, QueryResult, StageError,
};
use crate::prompts::{answer_messages, email_messages};

/// One pipeline session. Starts without an index; every query fails with
/// [`Error::IndexNotBuilt`] until a build succeeds.
///
/// A build swaps in its index only once it is complete, so a failed
/// rebuild leaves the previous index in place.
pub struct Session {
    embedder: Box<dyn Embedder>,
    model: Box<dyn LanguageModel>,
    settings: Settings,
    chunker: Chunker,
    processor: DataProcessor,
    cache: EmbeddingCache,
    index: Option<VectorIndex>,
}

impl Session {
    pub fn new(
        embedder: Box<dyn Embedder>,
        model: Box<dyn LanguageModel>,
        settings: Settings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            chunker: Chunker::new(settings.chunking)?,
            processor: DataProcessor::with_delimiter(settings.dataset.delimiter_byte()),
            embedder,
            model,
            settings,
            cache: EmbeddingCache::new(),
            index: None,
        })
    }

    /// Session wired to the configured providers (or their offline fakes).
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let embedder = shortlist_embed::get_default_embedder(&settings.embedding)?;
        let model = shortlist_llm::get_default_model(&settings.llm)?;
        Self::new(embedder, model, settings)
    }

    pub fn is_initialized(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&VectorIndex> {
        self.index.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of vectors held in the session's embedding cache.
    pub fn cached_vectors(&self) -> usize {
        self.cache.len()
    }

    pub fn build_from_path(&mut self, path: &Path) -> Result<BuildReport> {
        let rows = self.processor.read_rows_from_path(path)?;
        self.build(&rows)
    }

    pub fn build_from_reader<R: Read>(&mut self, reader: R) -> Result<BuildReport> {
        let rows = self.processor.read_rows(reader)?;
        self.build(&rows)
    }

    /// Replace the index with one built from `rows`.
    pub fn build(&mut self, rows: &[PortfolioRow]) -> Result<BuildReport> {
        if rows.is_empty() {
            return Err(Error::Schema("dataset contains no rows".into()));
        }
        let start = Instant::now();
        let units = self.processor.to_text_units(rows);
        let chunks = self.chunker.split_units(&units);
        let batch_size = self.settings.embedding.batch_size;
        let index = match build_index(self.embedder.as_ref(), chunks, batch_size, &mut self.cache) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, kept_previous = self.index.is_some(), "index build failed");
                return Err(e);
            }
        };
        let report = BuildReport {
            rows: rows.len(),
            chunks: index.len(),
            dim: index.dim(),
            elapsed: start.elapsed(),
        };
        let live: Vec<String> = index.chunks().map(|c| hash_content(&c.content)).collect();
        self.cache.retain_hashes(index.embedder_id(), &live);
        self.index = Some(index);
        info!(
            rows = report.rows,
            chunks = report.chunks,
            cached = self.cache.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "session index ready"
        );
        Ok(report)
    }

    /// Top-`k` chunks for `query`, best first.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let index = self.index.as_ref().ok_or(Error::IndexNotBuilt)?;
        let query_vec = self.embedder.embed(query)?;
        index.search_vec(&query_vec, k)
    }

    /// Retrieve with the configured `k` and compose a grounded answer.
    pub fn answer(&self, query: &str) -> Result<QueryResult> {
        self.answer_staged(query).map_err(|e| e.error)
    }

    pub fn draft_email(&self, answer: &str) -> Result<EmailDraft> {
        let email_body = self.model.complete(&email_messages(answer, &self.settings.email))?;
        Ok(EmailDraft { email_body })
    }

    /// Answer, then draft the email from that answer. An email failure is
    /// reported inside the outcome and never discards the answer.
    pub fn run(&self, query: &str) -> std::result::Result<QueryOutcome, StageError> {
        let result = self.answer_staged(query)?;
        let email = self.draft_email(&result.answer);
        if let Err(e) = &email {
            warn!(error = %e, "email drafting failed; answer kept");
        }
        Ok(QueryOutcome { result, email })
    }

    fn answer_staged(&self, query: &str) -> std::result::Result<QueryResult, StageError> {
        let start = Instant::now();
        let retrieved = self
            .retrieve(query, self.settings.retrieval.k)
            .map_err(|error| StageError { reached: PipelineState::Idle, error })?;
        let answer = self
            .model
            .complete(&answer_messages(query, &retrieved))
            .map_err(|error| StageError { reached: PipelineState::Retrieved, error })?;
        let elapsed = start.elapsed();
        info!(
            hits = retrieved.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            model = %self.model.model_id(),
            "answered query"
        );
        Ok(QueryResult { query: query.to_string(), retrieved, answer, elapsed })
    }
}
