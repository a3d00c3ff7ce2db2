//! Extraction: turns a CV (PDF) and a job posting (free text) into skill
//! lists the matcher can consume.
//!
//! Everything the chat model returns is validated in `schemas` before it
//! reaches the matcher.

use thiserror::Error;

use crate::llm_client::LlmError;

pub mod extractor;
pub mod prompts;
pub mod schemas;
pub mod text;

pub use extractor::SkillExtractor;
pub use schemas::{CvProfile, JobProfile};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("{0} contains no extractable text")]
    EmptyDocument(&'static str),

    #[error("structured extraction failed: {0}")]
    Llm(#[from] LlmError),

    #[error("extracted record is invalid: {0}")]
    Schema(String),
}
