//! User repository. Profiles live under partition = userId with the literal
//! sort key `PROFILE`.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use crate::models::User;
use crate::store::dynamo::{get_item, get_s, get_s_or_default, Item};
use crate::store::{StoreError, UserStore};

const PROFILE_SK: &str = "PROFILE";

pub struct DynamoUserStore {
    client: Client,
    table: String,
}

impl DynamoUserStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let item = get_item(&self.client, &self.table, user_id, PROFILE_SK).await?;
        Ok(item.as_ref().and_then(user_from_item))
    }
}

fn user_from_item(item: &Item) -> Option<User> {
    let id = get_s(item, "PK")?;
    Some(User {
        id,
        name: get_s_or_default(item, "name"),
        email: get_s_or_default(item, "email"),
        resume_url: get_s_or_default(item, "resume"),
        image: get_s(item, "image"),
    })
}
