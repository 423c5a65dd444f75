//! Retrieval-augmented query pipeline over a portfolio dataset.
//!
//! A [`Session`] owns the vector index. Building normalizes, chunks and
//! embeds the dataset; querying retrieves the nearest chunks, composes a
//! grounded answer and then drafts an outreach email from that answer.
pub mod outcome;
pub mod prompts;
pub mod session;

pub use outcome::{BuildReport, EmailDraft, PipelineState, QueryOutcome, QueryResult, StageError};
pub use session::Session;
