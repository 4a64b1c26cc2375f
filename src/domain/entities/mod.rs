//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SensorData**: センサーから受信するペイロードとカテゴリ別測定値
//! - **SensorReading**: 保存対象の読み取り値と、ストアから読み出した記録

pub mod sensor_data;
pub mod sensor_reading;
