//! MongoDB Document Mapping
//!
//! ドメインエンティティとBSONドキュメントの相互変換
//!
//! 保存形式: `{_id, deviceId, timestamp: datetime, values: {...}, data_type}`

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, Bson, Document};

use crate::domain::entities::sensor_reading::{SensorReading, StoredReading};

pub const FIELD_ID: &str = "_id";
pub const FIELD_DEVICE_ID: &str = "deviceId";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_VALUES: &str = "values";
pub const FIELD_DATA_TYPE: &str = "data_type";

/// SensorReadingを保存用ドキュメントに変換
pub fn reading_to_document(reading: &SensorReading) -> Result<Document> {
    let values = bson::to_document(&reading.values).context("Failed to encode sensor values")?;

    Ok(doc! {
        FIELD_DEVICE_ID: reading.device_id.as_str(),
        FIELD_TIMESTAMP: bson::DateTime::from_millis(reading.captured_at.timestamp_millis()),
        FIELD_VALUES: values,
        FIELD_DATA_TYPE: reading.category().as_str(),
    })
}

/// 保存済みドキュメントをStoredReadingに変換
///
/// `deviceId` と日時型の `timestamp` は必須。`values` と `data_type` は欠けていてもよい
pub fn document_to_stored(document: Document) -> Result<StoredReading> {
    let id = match document.get(FIELD_ID) {
        Some(id) => id_to_string(id),
        None => return Err(anyhow!("Stored document has no {}", FIELD_ID)),
    };

    let device_id = document
        .get_str(FIELD_DEVICE_ID)
        .with_context(|| format!("Stored document {} has no string {}", id, FIELD_DEVICE_ID))?
        .to_string();

    let stored_at = document
        .get_datetime(FIELD_TIMESTAMP)
        .with_context(|| format!("Stored document {} has no datetime {}", id, FIELD_TIMESTAMP))?;
    let captured_at = DateTime::<Utc>::from_timestamp_millis(stored_at.timestamp_millis())
        .ok_or_else(|| anyhow!("Stored document {} has an out-of-range timestamp", id))?;

    let data_type = document.get_str(FIELD_DATA_TYPE).ok().map(str::to_string);

    let values = document
        .get(FIELD_VALUES)
        .cloned()
        .map(Bson::into_relaxed_extjson)
        .unwrap_or(serde_json::Value::Null);

    Ok(StoredReading {
        id,
        device_id,
        captured_at,
        data_type,
        values,
    })
}

/// `_id` を文字列に変換（ObjectIdは16進表記）
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

/// デバイスで絞り込むフィルタ
pub fn device_filter(device_id: &str) -> Document {
    doc! { FIELD_DEVICE_ID: device_id }
}

/// タイムスタンプ降順のソート
pub fn newest_first() -> Document {
    doc! { FIELD_TIMESTAMP: -1 }
}
