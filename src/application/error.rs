//! # Service Error
//!
//! ユースケースが返すエラー

use thiserror::Error;

use crate::domain::services::timestamp::TimestampError;

/// ユースケースのエラー
///
/// HTTP層でステータスコードに対応付けられる
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 入力が不正
    #[error("{0}")]
    Validation(String),

    /// 該当する記録がない
    #[error("{0}")]
    NotFound(String),

    /// ストアの読み書きに失敗
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// 原因の連鎖を含めたメッセージ
    pub fn detail(&self) -> String {
        match self {
            ServiceError::Storage(err) => format!("{:#}", err),
            other => other.to_string(),
        }
    }
}

impl From<TimestampError> for ServiceError {
    fn from(err: TimestampError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
