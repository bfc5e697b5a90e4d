use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Content, ContentId, SectionId},
    repositories::db_helpers::{delete_by_id, find_page, replace_by_id},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, content: Content) -> AppResult<Content>;
    async fn find_by_id(&self, id: ContentId) -> AppResult<Option<Content>>;
    /// One page of content, optionally restricted to the given sections.
    async fn list(
        &self,
        section_ids: Option<Vec<SectionId>>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Content>, u64)>;
    async fn update(&self, content: Content) -> AppResult<Content>;
    async fn delete(&self, id: ContentId) -> AppResult<()>;
    async fn delete_by_sections(&self, section_ids: Vec<SectionId>) -> AppResult<u64>;
}

pub struct MongoContentRepository {
    db: Database,
    collection: Collection<Content>,
}

impl MongoContentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection("contents"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "section_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("section_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn create(&self, mut content: Content) -> AppResult<Content> {
        content.id = self.db.next_id("contents").await?;
        self.collection.insert_one(&content).await?;
        Ok(content)
    }

    async fn find_by_id(&self, id: ContentId) -> AppResult<Option<Content>> {
        let content = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(content)
    }

    async fn list(
        &self,
        section_ids: Option<Vec<SectionId>>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Content>, u64)> {
        let filter = match section_ids {
            Some(ids) => doc! { "section_id": { "$in": ids } },
            None => doc! {},
        };
        find_page(&self.collection, filter, offset, limit).await
    }

    async fn update(&self, content: Content) -> AppResult<Content> {
        replace_by_id(&self.collection, content.id, &content, "Content").await?;
        Ok(content)
    }

    async fn delete(&self, id: ContentId) -> AppResult<()> {
        delete_by_id(&self.collection, id, "Content").await
    }

    async fn delete_by_sections(&self, section_ids: Vec<SectionId>) -> AppResult<u64> {
        if section_ids.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .delete_many(doc! { "section_id": { "$in": section_ids } })
            .await?;
        Ok(result.deleted_count)
    }
}
