//! # Timestamp Service
//!
//! エポックミリ秒と日時の相互変換

use chrono::{DateTime, Utc};
use thiserror::Error;

/// タイムスタンプ変換エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp {0} is out of the representable datetime range")]
    OutOfRange(i64),
}

/// タイムスタンプ変換サービス
///
/// 受信時と読み出し時の変換はすべてここを通る。ミリ秒精度で可逆
pub struct TimestampService;

impl TimestampService {
    /// エポックミリ秒を日時に変換
    ///
    /// # Errors
    ///
    /// 日時として表現できない値の場合に `TimestampError::OutOfRange` を返す
    pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, TimestampError> {
        DateTime::from_timestamp_millis(millis).ok_or(TimestampError::OutOfRange(millis))
    }

    /// 日時をエポックミリ秒に変換
    ///
    /// ミリ秒未満は切り捨てる
    pub fn to_epoch_millis(datetime: &DateTime<Utc>) -> i64 {
        datetime.timestamp_millis()
    }
}
