//! Sensorhub - Sensor Data Ingestion Service
//!
//! センサーデータを受信して MongoDB に保存

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use sensorhub::adapter::config::Config;
use sensorhub::driver::{Args, IngestServer};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Load configuration (file, then environment overrides)
    let config = Config::resolve(args.config.as_deref())?;

    // Create server with injected configuration
    let server = IngestServer::new(config, &args);

    server.run().await
}
