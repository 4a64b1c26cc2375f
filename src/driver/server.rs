//! Server Orchestration
//!
//! Wires repositories and use cases together and runs the HTTP server

use anyhow::{Context, Result};
use log::{info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::adapter::config::Config;
use crate::adapter::mongo::client::MongoCollection;
use crate::adapter::repositories::in_memory_reading_repository::InMemoryReadingRepository;
use crate::adapter::repositories::mongo_reading_repository::MongoReadingRepository;
use crate::domain::repositories::reading_repository::ReadingRepository;

use super::cli::Args;
use super::http::routes::{build_router, AppState};

/// Hide the `user:password@` part of a connection URL
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

/// Serve `state` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}

/// Sensor ingestion server
pub struct IngestServer {
    config: Config,
    in_memory: bool,
}

impl IngestServer {
    /// Create a server, applying CLI overrides on top of the resolved config
    pub fn new(mut config: Config, args: &Args) -> Self {
        if let Some(bind) = &args.bind {
            config.bind_address = bind.clone();
        }
        Self {
            config,
            in_memory: args.in_memory,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run until Ctrl-C or SIGTERM
    pub async fn run(&self) -> Result<()> {
        info!("Starting sensor ingestion server...");
        info!("  Bind address: {}", self.config.bind_address);
        info!("  Default query limit: {}", self.config.default_query_limit);

        let (repository, mongo): (Arc<dyn ReadingRepository>, Option<Arc<MongoCollection>>) =
            if self.in_memory {
                warn!("Using in-memory store; readings are lost on shutdown");
                let repository: Arc<dyn ReadingRepository> =
                    Arc::new(InMemoryReadingRepository::new());
                (repository, None)
            } else {
                info!(
                    "  MongoDB: {} (db: {}, collection: {})",
                    redact_url(&self.config.mongodb_url),
                    self.config.db_name,
                    self.config.collection_name
                );
                let collection = Arc::new(MongoCollection::connect(&self.config).await?);
                let repository: Arc<dyn ReadingRepository> =
                    Arc::new(MongoReadingRepository::new(collection.clone()));
                (repository, Some(collection))
            };

        repository
            .ping()
            .await
            .context("Failed to connect to the document store")?;
        info!("✓ Document store reachable");

        let listener = TcpListener::bind(&self.config.bind_address)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_address))?;
        info!("✓ Listening on {}", self.config.bind_address);

        let state = AppState::new(repository, self.config.default_query_limit);
        let result = serve(listener, state, shutdown_signal()).await;

        if let Some(collection) = mongo {
            collection.shutdown().await;
        }
        info!("Server stopped");

        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
