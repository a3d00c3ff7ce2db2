//! Skill matching: embeds both skill lists and scores job-skill coverage.
//!
//! Flow is strictly one way: raw skill lists → `SkillVectorizer` →
//! `compute_similarity` → `SimilarityReport`.

use thiserror::Error;

use crate::embedding::EmbeddingError;

pub mod handlers;
pub mod matcher;
pub mod similarity;
pub mod vectorizer;

pub use matcher::{SimilarityReport, SkillMatcher};
pub use vectorizer::SkillVectorizer;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("embedding unavailable for skill '{skill}': {source}")]
    EmbeddingUnavailable {
        skill: String,
        source: EmbeddingError,
    },

    #[error("skill '{skill}' embedded to a zero vector; cannot compute cosine similarity")]
    ZeroVector { skill: String },

    #[error(
        "embedding dimensions differ: '{candidate_skill}' has {candidate_dim}, '{job_skill}' has {job_dim}"
    )]
    DimensionMismatch {
        candidate_skill: String,
        candidate_dim: usize,
        job_skill: String,
        job_dim: usize,
    },

    #[error("threshold must be a finite value in [-1, 1], got {0}")]
    InvalidThreshold(f32),
}
