//! In-Memory Reading Repository Implementation
//!
//! ReadingRepositoryのインメモリ実装（`--in-memory` 起動時と結合テストで使用）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use crate::domain::entities::sensor_reading::{SensorReading, StoredReading};
use crate::domain::repositories::reading_repository::ReadingRepository;

/// プロセス内に記録を保持するリポジトリ
///
/// 識別子はMongoDBと同じ形式（ObjectIdの16進表記）で割り当てる
#[derive(Default)]
pub struct InMemoryReadingRepository {
    readings: Mutex<Vec<StoredReading>>,
}

impl InMemoryReadingRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持している記録の総数
    pub fn len(&self) -> usize {
        self.readings.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// 記録が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadingRepository {
    async fn insert(&self, reading: &SensorReading) -> Result<String> {
        let values =
            serde_json::to_value(&reading.values).context("Failed to encode sensor values")?;
        let id = ObjectId::new().to_hex();

        let stored = StoredReading {
            id: id.clone(),
            device_id: reading.device_id.clone(),
            captured_at: reading.captured_at,
            data_type: Some(reading.category().as_str().to_string()),
            values,
        };

        self.readings
            .lock()
            .map_err(|_| anyhow::anyhow!("In-memory store lock poisoned"))?
            .push(stored);
        debug!("In-memory store now holds {} readings", self.len());

        Ok(id)
    }

    async fn find_recent(&self, device_id: &str, limit: u32) -> Result<Vec<StoredReading>> {
        let readings = self
            .readings
            .lock()
            .map_err(|_| anyhow::anyhow!("In-memory store lock poisoned"))?;

        let mut matching: Vec<StoredReading> = readings
            .iter()
            .filter(|r| r.device_id == device_id)
            .cloned()
            .collect();
        drop(readings);

        // Stable sort keeps insertion order among equal timestamps
        matching.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        matching.truncate(limit as usize);

        Ok(matching)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
