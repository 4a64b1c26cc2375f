//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **IngestReadingUseCase**: センサー読み取り値の受信と保存
//! - **QueryReadingsUseCase**: デバイスの最新記録の問い合わせ

pub mod ingest_reading;
pub mod query_readings;
