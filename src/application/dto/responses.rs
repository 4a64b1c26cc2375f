//! # Response DTOs
//!
//! ユースケースの結果をHTTPレスポンスの形で表すData Transfer Object

use serde::Serialize;

use crate::domain::entities::sensor_reading::StoredReading;
use crate::domain::services::timestamp::TimestampService;

/// 受信確認
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestAck {
    pub status: String,
    pub device_id: String,
}

impl IngestAck {
    /// 成功した受信確認を作成
    pub fn success(device_id: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            device_id: device_id.into(),
        }
    }
}

/// 問い合わせ結果の1件
///
/// タイムスタンプはエポックミリ秒に戻して返す
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub timestamp: i64,
    pub values: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

impl From<StoredReading> for ReadingView {
    fn from(stored: StoredReading) -> Self {
        Self {
            timestamp: TimestampService::to_epoch_millis(&stored.captured_at),
            id: stored.id,
            device_id: stored.device_id,
            values: stored.values,
            data_type: stored.data_type,
        }
    }
}

/// サービス情報（ルートエンドポイント）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

impl ServiceInfo {
    /// 稼働中のサービス情報
    pub fn running() -> Self {
        Self {
            message: "API running correctly".to_string(),
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
