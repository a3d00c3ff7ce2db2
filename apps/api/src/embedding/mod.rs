//! Embedding Provider: maps a skill string to a fixed-length vector.
//!
//! The vectorizer only sees `dyn EmbeddingProvider`, so the OpenAI-backed
//! client can be swapped for an in-memory fake in tests.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

#[cfg(test)]
pub mod fake;

pub use openai::OpenAiEmbedder;

/// A single embedding vector as returned by the provider.
pub type Embedding = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds one piece of text. Implementations must not retry; the caller
    /// treats any error as fatal for the whole request.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}
