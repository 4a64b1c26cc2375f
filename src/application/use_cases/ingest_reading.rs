//! # Ingest Reading Use Case
//!
//! センサー読み取り値の受信ユースケース

use log::{error, info};
use std::sync::Arc;

use crate::application::dto::responses::IngestAck;
use crate::application::error::ServiceError;
use crate::domain::entities::sensor_data::{CategoryValues, SensorData};
use crate::domain::entities::sensor_reading::SensorReading;
use crate::domain::repositories::reading_repository::ReadingRepository;

/// 読み取り値受信ユースケース
///
/// ペイロードのタイムスタンプを日時に変換し、カテゴリを付けて1件保存する
pub struct IngestReadingUseCase<R: ReadingRepository + ?Sized> {
    reading_repository: Arc<R>,
}

impl<R: ReadingRepository + ?Sized> IngestReadingUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `reading_repository` - 読み取り値リポジトリ
    pub fn new(reading_repository: Arc<R>) -> Self {
        Self { reading_repository }
    }

    /// 読み取り値を保存して受信確認を返す
    ///
    /// # Errors
    ///
    /// - タイムスタンプが日時に変換できない場合は `ServiceError::Validation`
    /// - 書き込みに失敗した場合は `ServiceError::Storage`
    pub async fn execute<V: CategoryValues>(
        &self,
        payload: SensorData<V>,
    ) -> Result<IngestAck, ServiceError> {
        let reading = SensorReading::from_payload(payload)?;

        match self.reading_repository.insert(&reading).await {
            Ok(id) => {
                info!(
                    "Stored {} reading {} for device {}",
                    reading.category(),
                    id,
                    reading.device_id
                );
                Ok(IngestAck::success(reading.device_id))
            }
            Err(e) => {
                error!(
                    "Failed to store {} reading for device {}: {:#}",
                    reading.category(),
                    reading.device_id,
                    e
                );
                Err(ServiceError::Storage(e))
            }
        }
    }
}
