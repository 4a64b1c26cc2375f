//! # Query Readings Use Case
//!
//! デバイスの最新記録の問い合わせユースケース

use log::{debug, error};
use std::sync::Arc;

use crate::application::dto::responses::ReadingView;
use crate::application::error::ServiceError;
use crate::domain::repositories::reading_repository::ReadingRepository;

/// 問い合わせ件数の既定値
pub const DEFAULT_QUERY_LIMIT: u32 = 100;

/// 記録が見つからない場合のメッセージ
pub const DEVICE_NOT_FOUND: &str = "Device not found";

/// 最新記録問い合わせユースケース
///
/// デバイスの記録をタイムスタンプの降順で最大 `limit` 件取得し、
/// タイムスタンプをエポックミリ秒に戻して返す
pub struct QueryReadingsUseCase<R: ReadingRepository + ?Sized> {
    reading_repository: Arc<R>,
}

impl<R: ReadingRepository + ?Sized> QueryReadingsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `reading_repository` - 読み取り値リポジトリ
    pub fn new(reading_repository: Arc<R>) -> Self {
        Self { reading_repository }
    }

    /// デバイスの最新記録を取得
    ///
    /// # Arguments
    ///
    /// * `device_id` - デバイス識別子
    /// * `limit` - 取得する最大件数
    ///
    /// # Errors
    ///
    /// - `limit` が1未満の場合は `ServiceError::Validation`
    /// - 記録が1件もない場合は `ServiceError::NotFound`
    /// - 読み込みに失敗した場合は `ServiceError::Storage`
    pub async fn execute(&self, device_id: &str, limit: i64) -> Result<Vec<ReadingView>, ServiceError> {
        let limit = validate_limit(limit)?;

        let mut readings = self
            .reading_repository
            .find_recent(device_id, limit)
            .await
            .map_err(|e| {
                error!("Failed to query readings for device {}: {:#}", device_id, e);
                ServiceError::Storage(e)
            })?;

        if readings.is_empty() {
            return Err(ServiceError::NotFound(DEVICE_NOT_FOUND.to_string()));
        }

        readings.truncate(limit as usize);
        debug!("Returning {} readings for device {}", readings.len(), device_id);

        Ok(readings.into_iter().map(ReadingView::from).collect())
    }
}

/// 問い合わせ件数を検証
fn validate_limit(limit: i64) -> Result<u32, ServiceError> {
    if limit < 1 {
        return Err(ServiceError::Validation(format!(
            "limit must be at least 1, got {}",
            limit
        )));
    }
    Ok(u32::try_from(limit).unwrap_or(u32::MAX))
}
