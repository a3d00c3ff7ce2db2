use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_chat_model: String,
    pub openai_embedding_model: String,
    /// Threshold applied when a match request does not carry its own.
    pub match_threshold: f32,
    /// Maximum number of embedding calls in flight per skill list.
    pub embed_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold = optional_env("MATCH_THRESHOLD", "0.65")
            .parse::<f32>()
            .context("MATCH_THRESHOLD must be a number")?;
        if !(-1.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must lie in [-1, 1], got {match_threshold}");
        }

        let embed_concurrency = optional_env("EMBED_CONCURRENCY", "8")
            .parse::<usize>()
            .context("EMBED_CONCURRENCY must be a positive integer")?;
        if embed_concurrency == 0 {
            bail!("EMBED_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", "https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            openai_chat_model: optional_env("OPENAI_CHAT_MODEL", "gpt-4o-mini"),
            openai_embedding_model: optional_env(
                "OPENAI_EMBEDDING_MODEL",
                "text-embedding-3-small",
            ),
            match_threshold,
            embed_concurrency,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
