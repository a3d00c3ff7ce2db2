use tracing::info;

use crate::extraction::prompts::{CV_EXTRACT_PROMPT, EXTRACTION_SYSTEM, JOB_EXTRACT_PROMPT};
use crate::extraction::schemas::{CvProfile, JobProfile, RawCvProfile, RawJobProfile};
use crate::extraction::text::clean_text;
use crate::extraction::ExtractionError;
use crate::llm_client::LlmClient;

/// Structured-data extractor backed by the chat model.
#[derive(Clone)]
pub struct SkillExtractor {
    llm: LlmClient,
}

impl SkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Extracts a CV record from the CV's raw text.
    pub async fn extract_cv(&self, raw_text: &str) -> Result<CvProfile, ExtractionError> {
        let prompt = build_prompt(CV_EXTRACT_PROMPT, raw_text, "CV")?;
        let raw: RawCvProfile = self.llm.call_json(&prompt, EXTRACTION_SYSTEM).await?;
        let cv = CvProfile::try_from(raw)?;
        info!(
            skills = cv.skills.len(),
            text_chars = cv.full_text.len(),
            "extracted CV profile"
        );
        Ok(cv)
    }

    /// Extracts a job record from free-form posting text.
    pub async fn extract_job(&self, raw_text: &str) -> Result<JobProfile, ExtractionError> {
        let prompt = build_prompt(JOB_EXTRACT_PROMPT, raw_text, "job description")?;
        let raw: RawJobProfile = self.llm.call_json(&prompt, EXTRACTION_SYSTEM).await?;
        let job = JobProfile::try_from(raw)?;
        info!(
            skills = job.skills.len(),
            text_chars = job.full_text.len(),
            "extracted job profile"
        );
        Ok(job)
    }
}

/// Cleans `raw_text` and substitutes it into `template`.
fn build_prompt(
    template: &str,
    raw_text: &str,
    document: &'static str,
) -> Result<String, ExtractionError> {
    let cleaned = clean_text(raw_text);
    if cleaned.is_empty() {
        return Err(ExtractionError::EmptyDocument(document));
    }
    Ok(template.replace("{text}", &cleaned))
}
