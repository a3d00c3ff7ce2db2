//! Similarity Matcher: cross-compares candidate and job skill vectors.
//!
//! Scoring is job-coverage centric: the report says which job skills are
//! covered by at least one candidate skill. Candidate skills that cover
//! nothing are not reported.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matching::similarity::{cosine_similarity, Operand, SimilarityError};
use crate::matching::vectorizer::{SkillVectorizer, SkillVectors};
use crate::matching::MatchError;

/// Threshold used when neither the caller nor the matcher overrides it.
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// One candidate skill that clears the threshold against one job skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub candidate_skill: String,
    pub job_skill: String,
    pub similarity: f32, // -1.0 – 1.0
}

/// Outcome of one match request. Lists are in ascending skill order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub matched_skills: Vec<SkillMatch>,
    pub unmatched_skills: Vec<String>,
    pub similarity_score: f32, // 0.0 – 1.0
}

impl SimilarityReport {
    /// Distinct job skills covered by at least one match.
    pub fn matched_job_skills(&self) -> BTreeSet<&str> {
        self.matched_skills
            .iter()
            .map(|m| m.job_skill.as_str())
            .collect()
    }

    /// Number of unique job skills the report was computed over.
    pub fn total_job_skills(&self) -> usize {
        self.matched_job_skills().len() + self.unmatched_skills.len()
    }
}

pub fn validate_threshold(threshold: f32) -> Result<f32, MatchError> {
    if threshold.is_finite() && (-1.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(MatchError::InvalidThreshold(threshold))
    }
}

/// Compares every candidate vector against every job vector and aggregates
/// job-skill coverage.
///
/// A pair with `similarity >= threshold` becomes a [`SkillMatch`]. All
/// qualifying pairs are kept, so one job skill may appear under several
/// candidate skills. Unmatched job skills are the set difference between
/// all job skills and the matched ones. The score is `matched / total`, or
/// `0.0` when there are no job skills.
pub fn compute_similarity(
    candidate: &SkillVectors,
    job: &SkillVectors,
    threshold: f32,
) -> Result<SimilarityReport, MatchError> {
    let threshold = validate_threshold(threshold)?;

    let mut matched_skills = Vec::new();
    let mut below_threshold = 0_usize;

    for (candidate_skill, candidate_vec) in candidate {
        for (job_skill, job_vec) in job {
            let similarity = cosine_similarity(candidate_vec, job_vec).map_err(|e| match e {
                SimilarityError::ZeroVector(Operand::Left) => MatchError::ZeroVector {
                    skill: candidate_skill.clone(),
                },
                SimilarityError::ZeroVector(Operand::Right) => MatchError::ZeroVector {
                    skill: job_skill.clone(),
                },
                SimilarityError::DimensionMismatch { left, right } => {
                    MatchError::DimensionMismatch {
                        candidate_skill: candidate_skill.clone(),
                        candidate_dim: left,
                        job_skill: job_skill.clone(),
                        job_dim: right,
                    }
                }
            })?;

            if similarity >= threshold {
                matched_skills.push(SkillMatch {
                    candidate_skill: candidate_skill.clone(),
                    job_skill: job_skill.clone(),
                    similarity,
                });
            } else {
                below_threshold += 1;
            }
        }
    }

    let matched_job: BTreeSet<&str> = matched_skills
        .iter()
        .map(|m| m.job_skill.as_str())
        .collect();

    let unmatched_skills: Vec<String> = job
        .keys()
        .filter(|skill| !matched_job.contains(skill.as_str()))
        .cloned()
        .collect();

    let total = matched_job.len() + unmatched_skills.len();
    let similarity_score = if total > 0 {
        matched_job.len() as f32 / total as f32
    } else {
        0.0
    };

    debug!(
        pairs = candidate.len() * job.len(),
        matches = matched_skills.len(),
        below_threshold,
        "pairwise comparison finished"
    );

    Ok(SimilarityReport {
        matched_skills,
        unmatched_skills,
        similarity_score,
    })
}

/// Full match pipeline: vectorize both skill lists, then compute the report.
#[derive(Clone)]
pub struct SkillMatcher {
    vectorizer: SkillVectorizer,
    default_threshold: f32,
}

impl SkillMatcher {
    pub fn new(vectorizer: SkillVectorizer) -> Self {
        Self {
            vectorizer,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_default_threshold(mut self, threshold: f32) -> Result<Self, MatchError> {
        self.default_threshold = validate_threshold(threshold)?;
        Ok(self)
    }

    pub fn default_threshold(&self) -> f32 {
        self.default_threshold
    }

    /// Matches a candidate's skills against a job's skills.
    ///
    /// `threshold` overrides the matcher default for this call. It is
    /// validated before any provider call is made.
    pub async fn match_skills(
        &self,
        candidate_skills: &[String],
        job_skills: &[String],
        threshold: Option<f32>,
    ) -> Result<SimilarityReport, MatchError> {
        let threshold = validate_threshold(threshold.unwrap_or(self.default_threshold))?;

        let (candidate, job) = self
            .vectorizer
            .vectorize(candidate_skills, job_skills)
            .await?;

        let report = compute_similarity(&candidate, &job, threshold)?;

        info!(
            candidate_skills = candidate.len(),
            job_skills = report.total_job_skills(),
            matched_job_skills = report.matched_job_skills().len(),
            matches = report.matched_skills.len(),
            unmatched = report.unmatched_skills.len(),
            score = report.similarity_score,
            threshold,
            "skill match complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::embedding::fake::FakeEmbedder;

    fn vectors(items: &[(&str, &[f32])]) -> SkillVectors {
        items
            .iter()
            .map(|(skill, v)| (skill.to_string(), v.to_vec()))
            .collect()
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // Unit vectors with cos(Python, python) = 0.95 and every other
    // candidate/job pair well below 0.65.
    fn scenario_embedder() -> FakeEmbedder {
        let s = (1.0_f32 - 0.95 * 0.95).sqrt();
        let y = 0.005 / s;
        let z = (1.0_f32 - 0.01 - y * y).sqrt();
        FakeEmbedder::new()
            .with("Python", &[1.0, 0.0, 0.0, 0.0])
            .with("python", &[0.95, s, 0.0, 0.0])
            .with("SQL", &[0.1, y, z, 0.0])
            .with("machine learning", &[0.2, 0.0, 0.0, 0.96_f32.sqrt()])
    }

    #[tokio::test]
    async fn test_concrete_scenario_half_coverage() {
        let matcher = SkillMatcher::new(SkillVectorizer::new(Arc::new(scenario_embedder()), 4));

        let report = matcher
            .match_skills(
                &skills(&["Python", "SQL"]),
                &skills(&["python", "machine learning"]),
                Some(0.65),
            )
            .await
            .unwrap();

        assert_eq!(report.matched_skills.len(), 1);
        let m = &report.matched_skills[0];
        assert_eq!(m.candidate_skill, "Python");
        assert_eq!(m.job_skill, "python");
        assert!((m.similarity - 0.95).abs() < 1e-4, "got {}", m.similarity);
        assert_eq!(report.unmatched_skills, vec!["machine learning".to_string()]);
        assert_eq!(report.similarity_score, 0.5);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_scores_zero_without_candidate_calls() {
        let fake = Arc::new(FakeEmbedder::new().with("python", &[1.0, 0.0]));
        let matcher = SkillMatcher::new(SkillVectorizer::new(fake.clone(), 4));

        let report = matcher
            .match_skills(&[], &skills(&["python"]), Some(0.65))
            .await
            .unwrap();

        assert!(report.matched_skills.is_empty());
        assert_eq!(report.unmatched_skills, vec!["python".to_string()]);
        assert_eq!(report.similarity_score, 0.0);
        assert_eq!(fake.calls(), vec!["python".to_string()]);
    }

    #[test]
    fn test_empty_job_list_scores_zero() {
        let candidate = vectors(&[("rust", &[1.0, 0.0])]);
        let report = compute_similarity(&candidate, &SkillVectors::new(), 0.75).unwrap();

        assert!(report.matched_skills.is_empty());
        assert!(report.unmatched_skills.is_empty());
        assert_eq!(report.similarity_score, 0.0);
        assert_eq!(report.total_job_skills(), 0);
    }

    #[test]
    fn test_full_coverage_scores_one() {
        let candidate = vectors(&[("rust", &[1.0, 0.0]), ("go", &[0.0, 1.0])]);
        let job = vectors(&[("Rust", &[0.99, 0.01]), ("golang", &[0.02, 0.98])]);

        let report = compute_similarity(&candidate, &job, 0.75).unwrap();
        assert_eq!(report.similarity_score, 1.0);
        assert!(report.unmatched_skills.is_empty());
    }

    #[test]
    fn test_job_skill_may_match_several_candidate_skills() {
        let candidate = vectors(&[("postgres", &[1.0, 0.1]), ("sql", &[1.0, 0.0])]);
        let job = vectors(&[("databases", &[1.0, 0.05])]);

        let report = compute_similarity(&candidate, &job, 0.75).unwrap();
        assert_eq!(report.matched_skills.len(), 2);
        assert_eq!(report.matched_job_skills().len(), 1);
        assert_eq!(report.similarity_score, 1.0);
    }

    #[test]
    fn test_failed_pair_does_not_mark_matched_skill_unmatched() {
        // "rust" fails against "java" but succeeds against "rust-lang".
        let candidate = vectors(&[("java", &[0.0, 1.0]), ("rust-lang", &[1.0, 0.0])]);
        let job = vectors(&[("rust", &[1.0, 0.0])]);

        let report = compute_similarity(&candidate, &job, 0.75).unwrap();
        assert!(report.unmatched_skills.is_empty());
        assert_eq!(report.similarity_score, 1.0);
    }

    #[test]
    fn test_matched_and_unmatched_partition_job_skills() {
        let candidate = vectors(&[("a", &[1.0, 0.0, 0.0]), ("b", &[0.0, 1.0, 0.0])]);
        let job = vectors(&[
            ("x", &[1.0, 0.1, 0.0]),
            ("y", &[0.0, 0.0, 1.0]),
            ("z", &[0.1, 1.0, 0.0]),
        ]);

        let report = compute_similarity(&candidate, &job, 0.75).unwrap();
        let matched = report.matched_job_skills();
        let unmatched: BTreeSet<&str> =
            report.unmatched_skills.iter().map(String::as_str).collect();

        assert!(matched.is_disjoint(&unmatched));
        let union: BTreeSet<&str> = matched.union(&unmatched).copied().collect();
        let all: BTreeSet<&str> = job.keys().map(String::as_str).collect();
        assert_eq!(union, all);
        assert!((report.similarity_score - 2.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let candidate = vectors(&[("a", &[1.0, 0.0])]);
        let job = vectors(&[("b", &[1.0, 0.0])]);

        let report = compute_similarity(&candidate, &job, 1.0).unwrap();
        assert_eq!(report.matched_skills.len(), 1);
    }

    #[test]
    fn test_zero_vector_aborts_matching() {
        let candidate = vectors(&[("blank", &[0.0, 0.0])]);
        let job = vectors(&[("rust", &[1.0, 0.0])]);

        let err = compute_similarity(&candidate, &job, 0.75).unwrap_err();
        match err {
            MatchError::ZeroVector { skill } => assert_eq!(skill, "blank"),
            other => panic!("expected ZeroVector, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_job_vector_names_job_skill() {
        let candidate = vectors(&[("rust", &[1.0, 0.0])]);
        let job = vectors(&[("", &[0.0, 0.0])]);

        let err = compute_similarity(&candidate, &job, 0.75).unwrap_err();
        assert!(matches!(err, MatchError::ZeroVector { skill } if skill.is_empty()));
    }

    #[test]
    fn test_dimension_mismatch_aborts_matching() {
        let candidate = vectors(&[("rust", &[1.0, 0.0, 0.0])]);
        let job = vectors(&[("go", &[1.0, 0.0])]);

        let err = compute_similarity(&candidate, &job, 0.75).unwrap_err();
        assert!(matches!(
            err,
            MatchError::DimensionMismatch {
                candidate_dim: 3,
                job_dim: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let empty = SkillVectors::new();
        assert!(matches!(
            compute_similarity(&empty, &empty, 1.5),
            Err(MatchError::InvalidThreshold(_))
        ));
        assert!(matches!(
            compute_similarity(&empty, &empty, f32::NAN),
            Err(MatchError::InvalidThreshold(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_threshold_makes_no_provider_calls() {
        let fake = Arc::new(FakeEmbedder::new().with("rust", &[1.0]));
        let matcher = SkillMatcher::new(SkillVectorizer::new(fake.clone(), 4));

        let err = matcher
            .match_skills(&skills(&["rust"]), &skills(&["rust"]), Some(-2.0))
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::InvalidThreshold(_)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_matching_is_deterministic() {
        let matcher = SkillMatcher::new(SkillVectorizer::new(Arc::new(scenario_embedder()), 3))
            .with_default_threshold(0.1)
            .unwrap();
        let candidate = skills(&["SQL", "Python", "Python"]);
        let job = skills(&["machine learning", "python"]);

        let first = matcher.match_skills(&candidate, &job, None).await.unwrap();
        let second = matcher.match_skills(&candidate, &job, None).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_default_threshold_applies_when_not_overridden() {
        let matcher = SkillMatcher::new(SkillVectorizer::new(Arc::new(scenario_embedder()), 2));
        assert_eq!(matcher.default_threshold(), DEFAULT_THRESHOLD);

        // 0.95 clears the 0.75 default; nothing else does.
        let report = matcher
            .match_skills(&skills(&["Python"]), &skills(&["python"]), None)
            .await
            .unwrap();
        assert_eq!(report.similarity_score, 1.0);
    }

    #[test]
    fn test_report_serializes_field_names() {
        let report = SimilarityReport {
            matched_skills: vec![SkillMatch {
                candidate_skill: "Python".to_string(),
                job_skill: "python".to_string(),
                similarity: 0.95,
            }],
            unmatched_skills: vec!["machine learning".to_string()],
            similarity_score: 0.5,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["matched_skills"][0]["job_skill"], "python");
        assert_eq!(json["unmatched_skills"][0], "machine learning");
        assert_eq!(json["similarity_score"], 0.5);
    }
}
