//! In-memory provider for tests: fixed vectors, recorded calls, injectable failures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::embedding::{Embedding, EmbeddingError, EmbeddingProvider};

#[derive(Default)]
pub struct FakeEmbedder {
    vectors: HashMap<String, Embedding>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, vector: &[f32]) -> Self {
        self.vectors.insert(text.to_string(), vector.to_vec());
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    /// Every text passed to `embed`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.lock().unwrap().push(text.to_string());

        if self.failing.contains(text) {
            return Err(EmbeddingError::Api {
                status: 429,
                message: "rate limited".to_string(),
            });
        }

        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::Malformed(format!("no vector for '{text}'")))
    }
}
