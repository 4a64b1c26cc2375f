//! MongoDB Reading Repository Implementation
//!
//! ReadingRepositoryのMongoDB実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::adapter::mongo::client::DocumentCollection;
use crate::adapter::mongo::documents::{
    device_filter, document_to_stored, id_to_string, newest_first, reading_to_document,
};
use crate::domain::entities::sensor_reading::{SensorReading, StoredReading};
use crate::domain::repositories::reading_repository::ReadingRepository;

/// MongoDB読み取り値リポジトリ
pub struct MongoReadingRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl MongoReadingRepository {
    /// 新しいリポジトリを作成
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl ReadingRepository for MongoReadingRepository {
    async fn insert(&self, reading: &SensorReading) -> Result<String> {
        let document = reading_to_document(reading)?;
        let inserted_id = self
            .collection
            .insert_one(document)
            .await
            .context("Failed to insert reading")?;
        Ok(id_to_string(&inserted_id))
    }

    async fn find_recent(&self, device_id: &str, limit: u32) -> Result<Vec<StoredReading>> {
        let documents = self
            .collection
            .find_sorted(device_filter(device_id), newest_first(), i64::from(limit))
            .await
            .context("Failed to query readings")?;

        documents.into_iter().map(document_to_stored).collect()
    }

    async fn ping(&self) -> Result<()> {
        self.collection.ping().await
    }
}
