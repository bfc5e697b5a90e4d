use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::account::AccountId;

pub type SectionId = i64;
pub type ContentId = i64;

/// A note-taking area owned by a single account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: SectionId,
    pub owner_id: AccountId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Section {
    pub fn new(owner_id: AccountId, title: &str, description: &str) -> Self {
        Section {
            id: 0,
            owner_id,
            title: title.to_string(),
            description: description.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

/// An entry inside a section. Content has no owner of its own: whoever owns
/// the parent section owns the content.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Content {
    #[serde(rename = "_id")]
    pub id: ContentId,
    pub section_id: SectionId,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Content {
    pub fn new(section_id: SectionId, title: &str, text: &str) -> Self {
        Content {
            id: 0,
            section_id,
            title: title.to_string(),
            text: text.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
