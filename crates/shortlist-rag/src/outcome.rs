use std::time::Duration;

use shortlist_core::types::ScoredChunk;
use shortlist_core::{Error, ErrorKind};

/// Summary of a successful index build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub rows: usize,
    pub chunks: usize,
    pub dim: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub query: String,
    /// Best match first.
    pub retrieved: Vec<ScoredChunk>,
    pub answer: String,
    /// Retrieval plus answer generation.
    pub elapsed: Duration,
}

impl QueryResult {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub email_body: String,
}

/// How far a query got: `Idle -> Retrieved -> Answered -> EmailDrafted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Retrieved,
    Answered,
    EmailDrafted,
}

/// A query that produced an answer. The email stage may still have failed.
#[derive(Debug)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub email: Result<EmailDraft, Error>,
}

impl QueryOutcome {
    pub fn state(&self) -> PipelineState {
        if self.email.is_ok() {
            PipelineState::EmailDrafted
        } else {
            PipelineState::Answered
        }
    }
}

/// A query that failed before an answer existed, with the last stage reached.
#[derive(Debug, thiserror::Error)]
#[error("query failed after reaching {reached:?}: {error}")]
pub struct StageError {
    pub reached: PipelineState,
    #[source]
    pub error: Error,
}

impl StageError {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
