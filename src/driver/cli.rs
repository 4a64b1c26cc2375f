//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// センサーデータを受信してMongoDBに保存するHTTPサーバー
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sensorhub")]
#[command(about = "HTTP ingestion service for sensor readings backed by MongoDB", long_about = None)]
pub struct Args {
    /// Config file path (JSON). Defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen address, overrides config and BIND_ADDRESS
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Keep readings in process memory instead of MongoDB
    #[arg(long)]
    pub in_memory: bool,
}
