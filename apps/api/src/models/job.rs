use serde::{Deserialize, Serialize};

/// A posted job. Owned by a company; the ranking engine only ever reads it,
/// keyed by the description hash, so edits to `description` transparently
/// invalidate previously cached scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: i64,
    pub visible: bool,
    /// Posting time, epoch milliseconds (as stored).
    pub posted_at: i64,
}
