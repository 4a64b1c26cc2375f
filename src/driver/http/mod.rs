//! HTTP Interface
//!
//! axumによるルーティング、ハンドラ、エラーレスポンス

pub mod error;
pub mod routes;

pub use routes::{build_router, AppState};
