use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::embedding::{Embedding, EmbeddingProvider};
use crate::matching::MatchError;

/// Unique skill → embedding. Ordered so that every walk over it is deterministic.
pub type SkillVectors = BTreeMap<String, Embedding>;

/// Turns raw skill lists into one embedding per unique skill.
///
/// The provider is injected at construction; `concurrency` bounds how many
/// provider calls are in flight for a single skill list.
#[derive(Clone)]
pub struct SkillVectorizer {
    provider: Arc<dyn EmbeddingProvider>,
    concurrency: usize,
}

impl SkillVectorizer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Embeds both sides. Either side failing fails the whole call, and no
    /// partial maps are returned.
    pub async fn vectorize(
        &self,
        candidate_skills: &[String],
        job_skills: &[String],
    ) -> Result<(SkillVectors, SkillVectors), MatchError> {
        futures::try_join!(
            self.embed_skills(candidate_skills),
            self.embed_skills(job_skills)
        )
    }

    /// Deduplicates `skills` by exact string equality and embeds each unique
    /// value once. The first provider error aborts the remaining calls.
    pub async fn embed_skills(&self, skills: &[String]) -> Result<SkillVectors, MatchError> {
        let unique: BTreeSet<String> = skills.iter().cloned().collect();
        if unique.is_empty() {
            return Ok(SkillVectors::new());
        }

        debug!(
            requested = skills.len(),
            unique = unique.len(),
            "vectorizing skills"
        );

        let provider = Arc::clone(&self.provider);
        stream::iter(unique)
            .map(move |skill| {
                let provider = Arc::clone(&provider);
                async move {
                    match provider.embed(&skill).await {
                        Ok(vector) => Ok((skill, vector)),
                        Err(source) => {
                            warn!(skill = %skill, error = %source, "embedding provider failed");
                            Err(MatchError::EmbeddingUnavailable { skill, source })
                        }
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await
    }
}
