//! Records produced by structured extraction.
//!
//! The model's output is deserialized into a `Raw*` type where every field
//! may be missing or null, then converted into the strict record. Only the
//! strict records leave this module.

use serde::{Deserialize, Serialize};

use crate::extraction::ExtractionError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCvProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub full_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJobProfile {
    pub title: Option<String>,
    pub company: Option<String>,
    pub skills: Option<Vec<String>>,
    pub full_text: Option<String>,
}

/// A candidate's CV after validation. `full_text` is the model's copy of the
/// document text; it is logged by length and never echoed back over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub full_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobProfile {
    pub title: Option<String>,
    pub company: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub full_text: String,
}

impl TryFrom<RawCvProfile> for CvProfile {
    type Error = ExtractionError;

    fn try_from(raw: RawCvProfile) -> Result<Self, Self::Error> {
        Ok(CvProfile {
            name: non_blank(raw.name),
            email: non_blank(raw.email),
            phone: non_blank(raw.phone),
            skills: raw.skills.unwrap_or_default(),
            full_text: required_text(raw.full_text, "CV")?,
        })
    }
}

impl TryFrom<RawJobProfile> for JobProfile {
    type Error = ExtractionError;

    fn try_from(raw: RawJobProfile) -> Result<Self, Self::Error> {
        Ok(JobProfile {
            title: non_blank(raw.title),
            company: non_blank(raw.company),
            skills: raw.skills.unwrap_or_default(),
            full_text: required_text(raw.full_text, "job description")?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_text(value: Option<String>, record: &str) -> Result<String, ExtractionError> {
    value.ok_or_else(|| ExtractionError::Schema(format!("{record} record is missing full_text")))
}
