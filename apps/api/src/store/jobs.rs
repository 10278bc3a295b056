//! Job repository. Jobs live under partition = companyId, sort = jobId, so a
//! lookup by jobId alone is a filtered scan on the sort key. That is the
//! access pattern the table was built with; ranking hits it once per request.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;

use crate::models::Job;
use crate::store::dynamo::{get_bool_or, get_n_i64, get_s, get_s_or_default, s, Item};
use crate::store::{JobStore, StoreError};

pub struct DynamoJobStore {
    client: Client,
    table: String,
}

impl DynamoJobStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl JobStore for DynamoJobStore {
    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .filter_expression("#SK = :jobId")
            .expression_attribute_names("#SK", "SK")
            .expression_attribute_values(":jobId", s(job_id))
            .send()
            .await
            .map_err(|e| StoreError::Request(DisplayErrorContext(e).to_string()))?;

        Ok(output
            .items
            .unwrap_or_default()
            .first()
            .and_then(job_from_item))
    }
}

fn job_from_item(item: &Item) -> Option<Job> {
    let id = get_s(item, "jobId").or_else(|| get_s(item, "SK"))?;
    let company_id = get_s(item, "PK")?;
    Some(Job {
        id,
        company_id,
        title: get_s_or_default(item, "title"),
        description: get_s_or_default(item, "description"),
        location: get_s_or_default(item, "location"),
        category: get_s_or_default(item, "category"),
        level: get_s_or_default(item, "level"),
        salary: get_n_i64(item, "salary").unwrap_or(0),
        visible: get_bool_or(item, "visible", true),
        posted_at: get_n_i64(item, "date").unwrap_or(0),
    })
}
