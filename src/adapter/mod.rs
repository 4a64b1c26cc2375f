//! Adapter Layer
//!
//! 外部システム（MongoDB, 設定ファイル, 環境変数）との統合

pub mod config;
pub mod mongo;
pub mod repositories;
