//! # Sensor Data Entity
//!
//! センサーから受信するペイロードとカテゴリ別の測定値

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// センサーカテゴリ
///
/// 保存時の `data_type` タグとして使用される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorCategory {
    Traffic,
    Environmental,
    Weather,
    AirQuality,
}

impl SensorCategory {
    /// 全カテゴリ
    pub const ALL: [SensorCategory; 4] = [
        SensorCategory::Traffic,
        SensorCategory::Environmental,
        SensorCategory::Weather,
        SensorCategory::AirQuality,
    ];

    /// ドキュメントに保存されるタグ文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorCategory::Traffic => "traffic",
            SensorCategory::Environmental => "environmental",
            SensorCategory::Weather => "weather",
            SensorCategory::AirQuality => "air_quality",
        }
    }

    /// 受信エンドポイントのパス（末尾スラッシュ付き）
    pub fn ingest_path(&self) -> &'static str {
        match self {
            SensorCategory::Traffic => "/traffic-data/",
            SensorCategory::Environmental => "/environmental-data/",
            SensorCategory::Weather => "/weather-data/",
            SensorCategory::AirQuality => "/airquality-data/",
        }
    }
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 交通量カウント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficValues {
    pub peaton: i64,
    pub bicicleta: i64,
    pub carro: i64,
    pub moto: i64,
    pub bus: i64,
    pub camion: i64,
}

/// 環境測定値（日射量・UV指数・気温・湿度）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalValues {
    pub solar_radiation_max: i64,
    pub solar_radiation_min: i64,
    pub solar_radiation_avg: i64,
    pub uv_index_max: f64,
    pub uv_index_min: f64,
    pub uv_index_avg: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub temperature_avg: f64,
    pub humidity_max: f64,
    pub humidity_min: f64,
    pub humidity_avg: f64,
}

/// 気象測定値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherValues {
    pub rain_ticks: f64,
    pub wind_speed_max: i64,
    pub wind_speed_min: i64,
    pub wind_speed_avg: i64,
    pub wind_direction_avg: i64,
}

/// 大気質測定値（PM2.5・PM10・騒音）
///
/// フィールド名はセンサー側のキーをそのまま使うため個別にリネームしている
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityValues {
    #[serde(rename = "massPM2_5Max")]
    pub mass_pm2_5_max: f64,
    #[serde(rename = "massPM2_5Min")]
    pub mass_pm2_5_min: f64,
    #[serde(rename = "massPM2_5Avg")]
    pub mass_pm2_5_avg: f64,
    #[serde(rename = "massPM10_0Max")]
    pub mass_pm10_0_max: f64,
    #[serde(rename = "massPM10_0Min")]
    pub mass_pm10_0_min: f64,
    #[serde(rename = "massPM10_0Avg")]
    pub mass_pm10_0_avg: f64,
    #[serde(rename = "noiseMax")]
    pub noise_max: f64,
    #[serde(rename = "noiseMin")]
    pub noise_min: f64,
    #[serde(rename = "noiseAvg")]
    pub noise_avg: f64,
}

/// カテゴリ別測定値
///
/// シリアライズ時はタグを付けず、値のマップのみを出力する
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValues {
    Traffic(TrafficValues),
    Environmental(EnvironmentalValues),
    Weather(WeatherValues),
    AirQuality(AirQualityValues),
}

impl SensorValues {
    /// 測定値のカテゴリ
    pub fn category(&self) -> SensorCategory {
        match self {
            SensorValues::Traffic(_) => SensorCategory::Traffic,
            SensorValues::Environmental(_) => SensorCategory::Environmental,
            SensorValues::Weather(_) => SensorCategory::Weather,
            SensorValues::AirQuality(_) => SensorCategory::AirQuality,
        }
    }
}

/// カテゴリ固有の測定値型
///
/// 各測定値型は自身のカテゴリを知っており、`SensorValues` に変換できる
pub trait CategoryValues: DeserializeOwned + Send + 'static {
    /// この測定値型のカテゴリ
    const CATEGORY: SensorCategory;

    /// `SensorValues` に変換
    fn into_values(self) -> SensorValues;
}

impl CategoryValues for TrafficValues {
    const CATEGORY: SensorCategory = SensorCategory::Traffic;

    fn into_values(self) -> SensorValues {
        SensorValues::Traffic(self)
    }
}

impl CategoryValues for EnvironmentalValues {
    const CATEGORY: SensorCategory = SensorCategory::Environmental;

    fn into_values(self) -> SensorValues {
        SensorValues::Environmental(self)
    }
}

impl CategoryValues for WeatherValues {
    const CATEGORY: SensorCategory = SensorCategory::Weather;

    fn into_values(self) -> SensorValues {
        SensorValues::Weather(self)
    }
}

impl CategoryValues for AirQualityValues {
    const CATEGORY: SensorCategory = SensorCategory::AirQuality;

    fn into_values(self) -> SensorValues {
        SensorValues::AirQuality(self)
    }
}

/// センサーから受信するペイロード
///
/// `timestamp` はエポックからのミリ秒
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorData<V> {
    pub device_id: String,
    pub timestamp: i64,
    pub values: V,
}
