//! Applicant-ranking engine: lexical primitives, semantic scoring with
//! lexical fallback, content-hash cache, and the per-job orchestration that
//! ties them together.

pub mod cache;
pub mod handlers;
pub mod lexical;
pub mod orchestrator;
pub mod prompts;
pub mod semantic;
pub mod text;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which path produced a ranked result. `Cache` is response-only: stored
/// entries always record the path that originally computed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Fallback,
    Cache,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Fallback => "fallback",
            Provider::Cache => "cache",
        }
    }

    /// Lenient parse for values read back from the store; anything
    /// unrecognized is treated as a fallback-produced entry.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "gemini" => Provider::Gemini,
            "cache" => Provider::Cache,
            _ => Provider::Fallback,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
