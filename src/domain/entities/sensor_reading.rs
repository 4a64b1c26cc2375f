//! # SensorReading Entity
//!
//! 保存対象のセンサー読み取り値と、ストアから読み出した記録

use chrono::{DateTime, Utc};

use super::sensor_data::{CategoryValues, SensorCategory, SensorData, SensorValues};
use crate::domain::services::timestamp::{TimestampError, TimestampService};

/// センサー読み取り値のドメインエンティティ
///
/// カテゴリは測定値のバリアントから導出されるため、タグと値が食い違うことはない
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub device_id: String,
    pub captured_at: DateTime<Utc>,
    pub values: SensorValues,
}

impl SensorReading {
    /// 新しい読み取り値を作成
    pub fn new(device_id: String, captured_at: DateTime<Utc>, values: SensorValues) -> Self {
        Self {
            device_id,
            captured_at,
            values,
        }
    }

    /// 受信ペイロードから作成
    ///
    /// # Errors
    ///
    /// タイムスタンプが日時として表現できない場合にエラーを返す
    pub fn from_payload<V: CategoryValues>(payload: SensorData<V>) -> Result<Self, TimestampError> {
        let captured_at = TimestampService::from_epoch_millis(payload.timestamp)?;
        Ok(Self::new(
            payload.device_id,
            captured_at,
            payload.values.into_values(),
        ))
    }

    /// 読み取り値のカテゴリ
    pub fn category(&self) -> SensorCategory {
        self.values.category()
    }
}

/// ストアから読み出した記録
///
/// ストアはスキーマレスなので、測定値は汎用JSONとして保持する
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReading {
    /// ストアが割り当てた識別子
    pub id: String,
    pub device_id: String,
    pub captured_at: DateTime<Utc>,
    pub data_type: Option<String>,
    pub values: serde_json::Value,
}
