//! Application repository. Applications live under partition = jobId, sort =
//! `userId#timestamp`; the embedded ranking cache is a nested map attribute
//! written back by the ranking engine.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{Application, ApplicationId, ApplicationStatus};
use crate::ranking::cache::RankingCache;
use crate::ranking::Provider;
use crate::store::dynamo::{
    get_item, get_map, get_n_u32, get_s, get_s_or_default, get_string_list, map, n,
    query_partition, s, string_list, update_item, Item,
};
use crate::store::{ApplicationStore, StoreError};

pub struct DynamoApplicationStore {
    client: Client,
    table: String,
}

impl DynamoApplicationStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ApplicationStore for DynamoApplicationStore {
    async fn list_for_job(&self, job_id: &str) -> Result<Vec<Application>, StoreError> {
        let items = query_partition(&self.client, &self.table, job_id).await?;
        Ok(items
            .iter()
            .filter_map(|item| {
                let app = application_from_item(item);
                if app.is_none() {
                    warn!(job_id, "skipping malformed application item");
                }
                app
            })
            .collect())
    }

    async fn get(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let item = get_item(&self.client, &self.table, &id.job_id, &id.sort_key()).await?;
        Ok(item.as_ref().and_then(application_from_item))
    }

    async fn set_resume_text(
        &self,
        id: &ApplicationId,
        resume_text: &str,
    ) -> Result<(), StoreError> {
        update_item(
            &self.client,
            &self.table,
            &id.job_id,
            &id.sort_key(),
            vec![("resumeText", s(resume_text))],
        )
        .await?;
        Ok(())
    }

    async fn set_ranking_cache(
        &self,
        id: &ApplicationId,
        cache: &RankingCache,
    ) -> Result<(), StoreError> {
        update_item(
            &self.client,
            &self.table,
            &id.job_id,
            &id.sort_key(),
            vec![("rankingCache", cache_to_attr(cache))],
        )
        .await?;
        Ok(())
    }
}

fn application_from_item(item: &Item) -> Option<Application> {
    let id = match get_s(item, "applicationId") {
        Some(raw) => raw.parse().ok()?,
        None => {
            let pk = get_s(item, "PK")?;
            let sk = get_s(item, "SK")?;
            format!("{pk}#{sk}").parse().ok()?
        }
    };
    Some(Application {
        id,
        company_id: get_s_or_default(item, "companyId"),
        status: ApplicationStatus::parse_lossy(&get_s_or_default(item, "status")),
        resume_text: get_s_or_default(item, "resumeText"),
        ranking_cache: get_map(item, "rankingCache").and_then(cache_from_item),
    })
}

/// An empty or partial map (no hashes yet) reads as "no cache", matching how
/// records are created before the first scoring pass.
fn cache_from_item(item: &Item) -> Option<RankingCache> {
    let jd_hash = get_s(item, "jdHash")?;
    let resume_hash = get_s(item, "resumeHash")?;
    Some(RankingCache {
        jd_hash,
        resume_hash,
        provider: Provider::parse_lossy(&get_s_or_default(item, "provider")),
        jd_match_score: get_n_u32(item, "jdMatchScore").unwrap_or(0),
        resume_quality_score: get_n_u32(item, "resumeQualityScore").unwrap_or(0),
        final_score: get_n_u32(item, "finalScore").unwrap_or(0),
        matched_keywords: get_string_list(item, "matchedKeywords"),
        missing_skills: get_string_list(item, "missingSkills"),
        computed_at: get_s(item, "computedAt")
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    })
}

fn cache_to_attr(cache: &RankingCache) -> aws_sdk_dynamodb::types::AttributeValue {
    let mut item = Item::new();
    item.insert("jdHash".to_string(), s(&cache.jd_hash));
    item.insert("resumeHash".to_string(), s(&cache.resume_hash));
    item.insert("provider".to_string(), s(cache.provider.as_str()));
    item.insert("jdMatchScore".to_string(), n(i64::from(cache.jd_match_score)));
    item.insert(
        "resumeQualityScore".to_string(),
        n(i64::from(cache.resume_quality_score)),
    );
    item.insert("finalScore".to_string(), n(i64::from(cache.final_score)));
    item.insert(
        "matchedKeywords".to_string(),
        string_list(&cache.matched_keywords),
    );
    item.insert("missingSkills".to_string(), string_list(&cache.missing_skills));
    item.insert("computedAt".to_string(), s(cache.computed_at.to_rfc3339()));
    map(item)
}
