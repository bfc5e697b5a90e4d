use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{AppError, AppResult};

/// Every record type is stored under an integer `_id`, so listings sort on it.
pub fn id_order() -> Document {
    doc! { "_id": 1 }
}

pub async fn find_sorted<T>(collection: &Collection<T>, filter: Document) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let options = FindOptions::builder().sort(id_order()).build();
    let cursor = collection.find(filter).with_options(options).await?;
    let items: Vec<T> = cursor.try_collect().await?;
    Ok(items)
}

pub async fn find_page<T>(
    collection: &Collection<T>,
    filter: Document,
    offset: u64,
    limit: u64,
) -> AppResult<(Vec<T>, u64)>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let total = collection.count_documents(filter.clone()).await?;

    let options = FindOptions::builder()
        .sort(id_order())
        .skip(Some(offset))
        .limit(Some(limit as i64))
        .build();

    let cursor = collection.find(filter).with_options(options).await?;
    let items: Vec<T> = cursor.try_collect().await?;

    Ok((items, total))
}

/// Ids of the records matching `filter`.
pub async fn find_ids<T>(collection: &Collection<T>, filter: Document) -> AppResult<Vec<i64>>
where
    T: Send + Sync,
{
    let options = FindOptions::builder()
        .projection(doc! { "_id": 1 })
        .sort(id_order())
        .build();

    let cursor = collection
        .clone_with_type::<Document>()
        .find(filter)
        .with_options(options)
        .await?;
    let docs: Vec<Document> = cursor.try_collect().await?;

    docs.iter()
        .map(|d| {
            d.get_i64("_id")
                .map_err(|e| AppError::DatabaseError(format!("Malformed _id: {}", e)))
        })
        .collect()
}

pub async fn replace_by_id<T>(
    collection: &Collection<T>,
    id: i64,
    record: &T,
    kind: &str,
) -> AppResult<()>
where
    T: Serialize + Send + Sync,
{
    let result = collection.replace_one(doc! { "_id": id }, record).await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("{} with id {} not found", kind, id)));
    }

    Ok(())
}

pub async fn delete_by_id<T>(collection: &Collection<T>, id: i64, kind: &str) -> AppResult<()>
where
    T: Send + Sync,
{
    let result = collection.delete_one(doc! { "_id": id }).await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("{} with id {} not found", kind, id)));
    }

    Ok(())
}
