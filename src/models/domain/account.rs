use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::dto::request::CreateAccountRequest;

pub type AccountId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub password_hash: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// A regular account. The id is assigned by the repository on create.
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        Account {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            phone_number: None,
            birth_date: None,
            password_hash,
            is_superuser: false,
            created_at: Some(Utc::now()),
        }
    }

    pub fn new_superuser(username: &str, email: &str, password_hash: String) -> Self {
        Account {
            is_superuser: true,
            ..Account::new(username, email, password_hash)
        }
    }

    pub fn from_request(request: CreateAccountRequest, password_hash: String) -> Self {
        Account {
            phone_number: request.phone_number,
            birth_date: request.birth_date,
            ..Account::new(&request.username, &request.email, password_hash)
        }
    }
}
