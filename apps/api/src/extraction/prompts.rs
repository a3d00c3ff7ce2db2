// Prompts for structured CV and job-posting extraction.
// Placeholders are substituted with `str::replace`.

pub const EXTRACTION_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const CV_EXTRACT_PROMPT: &str = r#"Extract structured resume information from the following CV text.

Return JSON with exactly these fields:
- name (string or null)
- email (string or null)
- phone (string or null)
- skills (list of strings)
- full_text (string)

CV Text:
{text}"#;

pub const JOB_EXTRACT_PROMPT: &str = r#"Extract structured job description information from the following text.

Return JSON with exactly these fields:
- title (string or null)
- company (string or null)
- skills (list of strings)
- full_text (string)

Job Description Text:
{text}"#;
