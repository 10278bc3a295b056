use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::cache::RankingCache;

/// Composite application identifier, rendered as `jobId#userId#timestamp`.
/// The store keys applications by (partition = jobId, sort = userId#timestamp);
/// this type owns that encoding so nothing else splits strings ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationId {
    pub job_id: String,
    pub user_id: String,
    /// Application time, epoch milliseconds. Part of the key so a user's
    /// re-application after a withdrawal stays distinct.
    pub applied_at_ms: i64,
}

#[derive(Debug, Error, PartialEq)]
#[error("malformed application id `{0}`, expected jobId#userId#timestamp")]
pub struct ParseApplicationIdError(String);

impl ApplicationId {
    pub fn new(job_id: impl Into<String>, user_id: impl Into<String>, applied_at_ms: i64) -> Self {
        Self {
            job_id: job_id.into(),
            user_id: user_id.into(),
            applied_at_ms,
        }
    }

    /// Store sort key: `userId#timestamp`.
    pub fn sort_key(&self) -> String {
        format!("{}#{}", self.user_id, self.applied_at_ms)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}#{}", self.job_id, self.user_id, self.applied_at_ms)
    }
}

impl FromStr for ApplicationId {
    type Err = ParseApplicationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '#');
        let (Some(job_id), Some(user_id), Some(ts)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseApplicationIdError(s.to_string()));
        };
        if job_id.is_empty() || user_id.is_empty() {
            return Err(ParseApplicationIdError(s.to_string()));
        }
        let applied_at_ms = ts
            .parse::<i64>()
            .map_err(|_| ParseApplicationIdError(s.to_string()))?;
        Ok(Self::new(job_id, user_id, applied_at_ms))
    }
}

impl Serialize for ApplicationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApplicationId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Store values are free-form strings; anything unrecognized reads as
    /// `Pending`, matching the stored default.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "Accepted" => ApplicationStatus::Accepted,
            "Rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Pending,
        }
    }
}

/// One user's application to one job. Uniqueness per (job, user) is enforced
/// by the application-submission flow, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub company_id: String,
    pub status: ApplicationStatus,
    /// Extracted resume text, backfilled lazily on first extraction; empty
    /// until then (or when extraction failed).
    pub resume_text: String,
    /// Memoized scoring result; `None` until the ranking engine first scores
    /// this application.
    pub ranking_cache: Option<RankingCache>,
}

impl Application {
    pub fn job_id(&self) -> &str {
        &self.id.job_id
    }

    pub fn user_id(&self) -> &str {
        &self.id.user_id
    }
}
