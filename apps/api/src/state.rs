use crate::config::Config;
use crate::extraction::SkillExtractor;
use crate::matching::SkillMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: SkillExtractor,
    /// Carries the embedding provider chosen at startup; tests inject a fake.
    pub matcher: SkillMatcher,
}
