//! Typed repositories over the document store. Each entity gets an explicit
//! trait; the DynamoDB implementations keep the established partition/sort-key
//! layout (`Jobs`: companyId/jobId, `Users`: userId/"PROFILE",
//! `Applications`: jobId/userId#timestamp) but nothing outside this module
//! touches keys or attribute maps.

pub mod applications;
pub mod dynamo;
pub mod jobs;
pub mod users;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Application, ApplicationId, Job, User};
use crate::ranking::cache::RankingCache;

pub use applications::DynamoApplicationStore;
pub use jobs::DynamoJobStore;
pub use users::DynamoUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),

    #[error("malformed item: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn list_for_job(&self, job_id: &str) -> Result<Vec<Application>, StoreError>;

    async fn get(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError>;

    /// Backfills extracted resume text onto the application record.
    /// Idempotent upsert; callers treat failure as non-fatal.
    async fn set_resume_text(&self, id: &ApplicationId, resume_text: &str)
        -> Result<(), StoreError>;

    /// Upserts the embedded ranking cache entry. Idempotent; callers treat
    /// failure as non-fatal.
    async fn set_ranking_cache(
        &self,
        id: &ApplicationId,
        cache: &RankingCache,
    ) -> Result<(), StoreError>;
}
