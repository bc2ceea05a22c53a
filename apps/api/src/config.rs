use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub static_dir: String,
    /// Credential for the remote completion service. `None` disables the
    /// remote path and every card comes from the local template.
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,
    pub remote_timeout_secs: u64,
    pub short_intro_threshold: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            static_dir: env_or("STATIC_DIR", "public"),
            deepseek_api_key: std::env::var("DEEPSEEK_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            deepseek_base_url: env_or("DEEPSEEK_BASE_URL", "https://api.deepseek.com"),
            remote_timeout_secs: env_or("REMOTE_TIMEOUT_SECS", "15")
                .parse::<u64>()
                .context("REMOTE_TIMEOUT_SECS must be a number of seconds")?,
            short_intro_threshold: env_or("SHORT_INTRO_THRESHOLD", "120")
                .parse::<usize>()
                .context("SHORT_INTRO_THRESHOLD must be a character count")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
