use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{is_duplicate_key, Database},
    errors::{AppError, AppResult},
    models::domain::{Account, AccountId},
    repositories::db_helpers::{delete_by_id, find_sorted},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Stores a new account and assigns its id.
    async fn create(&self, account: Account) -> AppResult<Account>;
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
    async fn find_all(&self) -> AppResult<Vec<Account>>;
    async fn update(&self, account: Account) -> AppResult<Account>;
    async fn delete(&self, id: AccountId) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAccountRepository {
    db: Database,
    collection: Collection<Account>,
}

impl MongoAccountRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("accounts");
        Self {
            db: db.clone(),
            collection,
        }
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::AlreadyExists(format!("Account with username '{}' already exists", username))
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn create(&self, mut account: Account) -> AppResult<Account> {
        account.id = self.db.next_id("accounts").await?;

        self.collection.insert_one(&account).await.map_err(|e| {
            if is_duplicate_key(&e) {
                username_taken(&account.username)
            } else {
                e.into()
            }
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let account = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let account = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(account)
    }

    async fn find_all(&self) -> AppResult<Vec<Account>> {
        find_sorted(&self.collection, doc! {}).await
    }

    async fn update(&self, account: Account) -> AppResult<Account> {
        let result = self
            .collection
            .replace_one(doc! { "_id": account.id }, &account)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    username_taken(&account.username)
                } else {
                    AppError::from(e)
                }
            })?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Account with id {} not found",
                account.id
            )));
        }

        Ok(account)
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        delete_by_id(&self.collection, id, "Account").await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on accounts.username");

        Ok(())
    }
}
