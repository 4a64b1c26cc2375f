//! MongoDB Integration
//!
//! ドライバの薄いラッパーとドキュメント変換

pub mod client;
pub mod documents;
