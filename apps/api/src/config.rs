use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::job::JobId;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// External job platform. `None` runs against the simulated platform.
    pub platform_base_url: Option<String>,
    pub platform_api_key: Option<String>,
    pub platform_timeout: Duration,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_matching: bool,
    pub max_matches: usize,
    pub apply_concurrency: usize,
    pub apply_timeout: Duration,
    pub max_upload_bytes: usize,
    pub simulated_reject_job_ids: Vec<JobId>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            platform_base_url: optional_env("PLATFORM_BASE_URL"),
            platform_api_key: optional_env("PLATFORM_API_KEY"),
            platform_timeout: parse_secs("PLATFORM_TIMEOUT_SECS", 30)?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            enable_llm_matching: parse_env("ENABLE_LLM_MATCHING", false)?,
            max_matches: parse_env::<usize>("MAX_MATCHES", 5)?.max(1),
            apply_concurrency: parse_env::<usize>("APPLY_CONCURRENCY", 4)?.max(1),
            apply_timeout: parse_secs("APPLY_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            simulated_reject_job_ids: parse_job_ids(
                &std::env::var("SIMULATED_REJECT_JOB_IDS").unwrap_or_default(),
            )
            .context("SIMULATED_REJECT_JOB_IDS must be a comma-separated list of job ids")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// Whole seconds, at least one.
fn parse_secs(key: &str, default: u64) -> Result<Duration> {
    let secs: u64 = parse_env(key, default)?;
    if secs == 0 {
        bail!("Environment variable '{key}' must be at least 1 second");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_job_ids(raw: &str) -> Result<Vec<JobId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map(JobId)
                .with_context(|| format!("'{s}' is not a job id"))
        })
        .collect()
}
