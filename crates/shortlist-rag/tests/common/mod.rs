#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use shortlist_core::traits::{Embedder, LanguageModel};
use shortlist_core::types::{ChatMessage, Role};
use shortlist_core::{Error, Result};

pub const VOCAB: [&str; 6] = ["python", "rust", "java", "react", "sql", "go"];

/// One dimension per skill keyword plus a constant bias dimension.
#[derive(Clone, Default)]
pub struct KeywordEmbedder {
    pub fail: Arc<AtomicBool>,
    pub calls: Arc<AtomicUsize>,
}

impl KeywordEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split(|c: char| !c.is_alphanumeric()).collect();
        let mut v: Vec<f32> = VOCAB
            .iter()
            .map(|k| words.iter().filter(|w| *w == k).count() as f32)
            .collect();
        v.push(0.1);
        v
    }
}

impl Embedder for KeywordEmbedder {
    fn embedder_id(&self) -> &str {
        "keyword"
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::EmbeddingService("quota exceeded".into()));
        }
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Echoes the prompt it receives; fails on the email stage when asked to.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    pub fail_answer: Arc<AtomicBool>,
    pub fail_email: Arc<AtomicBool>,
    pub prompts: Arc<std::sync::Mutex<Vec<Vec<ChatMessage>>>>,
}

impl LanguageModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted"
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if let Ok(mut log) = self.prompts.lock() {
            log.push(messages.to_vec());
        }
        let is_email = messages.iter().any(|m| m.role == Role::System);
        if is_email && self.fail_email.load(Ordering::SeqCst) {
            return Err(Error::LanguageModel("rate limited after 3 attempts".into()));
        }
        if !is_email && self.fail_answer.load(Ordering::SeqCst) {
            return Err(Error::LanguageModel("timed out after 3 attempts".into()));
        }
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        Ok(if is_email {
            format!("EMAIL[{last}]")
        } else {
            last
        })
    }
}

pub const PORTFOLIOS: &str = "\
name,skills,experience,location
Alice,Python,3y,NY
Bob,Rust,5y,Berlin
Carol,Java,2y,Pune
";
