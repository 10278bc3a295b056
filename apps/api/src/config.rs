use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the store table names have hard requirements; AWS credentials come
/// from the default provider chain and the Gemini key is optional (without
/// it the ranking path runs on the lexical fallback).
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    /// Endpoint override for a local DynamoDB (dynamodb-local / LocalStack).
    pub dynamodb_endpoint: Option<String>,
    pub jobs_table: String,
    pub users_table: String,
    pub applications_table: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on one resume's fetch + parse, seconds.
    pub extraction_timeout_secs: u64,
    /// Applications scored concurrently per ranking request.
    pub ranking_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            aws_region: env_or("AWS_REGION", "us-east-1"),
            dynamodb_endpoint: optional_env("DYNAMODB_ENDPOINT"),
            jobs_table: env_or("JOBS_TABLE", "Jobs"),
            users_table: env_or("USERS_TABLE", "Users"),
            applications_table: env_or("APPLICATIONS_TABLE", "Applications"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", crate::llm_client::DEFAULT_MODEL),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            extraction_timeout_secs: env_or("EXTRACTION_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("EXTRACTION_TIMEOUT_SECS must be an integer")?,
            ranking_concurrency: env_or("RANKING_CONCURRENCY", "4")
                .parse::<usize>()
                .context("RANKING_CONCURRENCY must be an integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Missing and empty both read as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
