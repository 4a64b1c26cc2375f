//! # Reading Repository Trait
//!
//! センサー読み取り値の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::sensor_reading::{SensorReading, StoredReading};

/// 読み取り値リポジトリ
///
/// 読み取り値の保存と、デバイスごとの最新記録の取得を担当するリポジトリ
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// 読み取り値を1件保存する
    ///
    /// # Returns
    ///
    /// ストアが割り当てた識別子
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    async fn insert(&self, reading: &SensorReading) -> Result<String>;

    /// デバイスの最新の記録を取得する
    ///
    /// # Arguments
    ///
    /// * `device_id` - デバイス識別子
    /// * `limit` - 取得する最大件数（1以上）
    ///
    /// # Returns
    ///
    /// タイムスタンプの降順に並んだ記録。最大 `limit` 件
    ///
    /// # Errors
    ///
    /// 読み込みに失敗した場合にエラーを返す
    async fn find_recent(&self, device_id: &str, limit: u32) -> Result<Vec<StoredReading>>;

    /// ストアへの疎通を確認する
    async fn ping(&self) -> Result<()>;
}
