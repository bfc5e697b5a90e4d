use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AccountId, Section, SectionId},
    repositories::db_helpers::{delete_by_id, find_ids, find_page, replace_by_id},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn create(&self, section: Section) -> AppResult<Section>;
    async fn find_by_id(&self, id: SectionId) -> AppResult<Option<Section>>;
    /// One page of sections, optionally restricted to one owner, with the
    /// total count of the restricted set.
    async fn list(
        &self,
        owner_id: Option<AccountId>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Section>, u64)>;
    async fn ids_owned_by(&self, owner_id: AccountId) -> AppResult<Vec<SectionId>>;
    async fn update(&self, section: Section) -> AppResult<Section>;
    async fn delete(&self, id: SectionId) -> AppResult<()>;
    async fn delete_by_owner(&self, owner_id: AccountId) -> AppResult<u64>;
}

pub struct MongoSectionRepository {
    db: Database,
    collection: Collection<Section>,
}

impl MongoSectionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection("sections"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for MongoSectionRepository {
    async fn create(&self, mut section: Section) -> AppResult<Section> {
        section.id = self.db.next_id("sections").await?;
        self.collection.insert_one(&section).await?;
        Ok(section)
    }

    async fn find_by_id(&self, id: SectionId) -> AppResult<Option<Section>> {
        let section = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(section)
    }

    async fn list(
        &self,
        owner_id: Option<AccountId>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Section>, u64)> {
        let filter = match owner_id {
            Some(owner_id) => doc! { "owner_id": owner_id },
            None => doc! {},
        };
        find_page(&self.collection, filter, offset, limit).await
    }

    async fn ids_owned_by(&self, owner_id: AccountId) -> AppResult<Vec<SectionId>> {
        find_ids(&self.collection, doc! { "owner_id": owner_id }).await
    }

    async fn update(&self, section: Section) -> AppResult<Section> {
        replace_by_id(&self.collection, section.id, &section, "Section").await?;
        Ok(section)
    }

    async fn delete(&self, id: SectionId) -> AppResult<()> {
        delete_by_id(&self.collection, id, "Section").await
    }

    async fn delete_by_owner(&self, owner_id: AccountId) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "owner_id": owner_id })
            .await?;
        Ok(result.deleted_count)
    }
}
