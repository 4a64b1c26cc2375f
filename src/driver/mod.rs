//! # Driver Layer (Presentation)
//!
//! HTTPやCLIなどの外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **http**: ルーティングとハンドラ
//! - **server**: サーバー全体のオーケストレーション

pub mod cli;
pub mod http;
pub mod server;

pub use cli::Args;
pub use server::IngestServer;
