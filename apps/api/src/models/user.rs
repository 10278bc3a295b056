use serde::{Deserialize, Serialize};

/// A job seeker. Ids are issued by the external identity provider and treated
/// as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Location of the uploaded resume document; empty when none was uploaded.
    pub resume_url: String,
    pub image: Option<String>,
}
