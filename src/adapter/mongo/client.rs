//! MongoDB Client Abstractions
//!
//! コレクション操作の抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};

#[cfg(test)]
use mockall::automock;

use crate::adapter::config::Config;

const APP_NAME: &str = "sensorhub";

/// Trait for the collection operations the service needs
/// This enables mocking in tests while using the real driver in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Insert one document and return the store-assigned `_id`
    async fn insert_one(&self, document: Document) -> Result<Bson>;

    /// Find documents matching `filter`, ordered by `sort`, at most `limit`
    async fn find_sorted(&self, filter: Document, sort: Document, limit: i64)
        -> Result<Vec<Document>>;

    /// Round-trip a `ping` command to the server
    async fn ping(&self) -> Result<()>;
}

/// Real MongoDB collection wrapper implementing DocumentCollection
///
/// The driver pools connections internally; cloning the client is cheap.
pub struct MongoCollection {
    client: Client,
    collection: Collection<Document>,
}

impl MongoCollection {
    pub fn new(client: Client, db_name: &str, collection_name: &str) -> Self {
        let collection = client.database(db_name).collection::<Document>(collection_name);
        Self { client, collection }
    }

    /// Connect using the configured URL, database and collection
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_url)
            .await
            .context("Failed to parse MongoDB connection URL")?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        info!(
            "MongoDB client created for {}.{}",
            config.db_name, config.collection_name
        );

        Ok(Self::new(client, &config.db_name, &config.collection_name))
    }

    /// Close the client and its connection pool
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn insert_one(&self, document: Document) -> Result<Bson> {
        let result = self
            .collection
            .insert_one(document, None)
            .await
            .context("MongoDB insert failed")?;
        Ok(result.inserted_id)
    }

    async fn find_sorted(
        &self,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> Result<Vec<Document>> {
        let options = FindOptions::builder().sort(sort).limit(limit).build();

        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .context("MongoDB find failed")?;

        let mut documents = Vec::new();
        while cursor.advance().await.context("MongoDB cursor failed")? {
            let document = cursor
                .deserialize_current()
                .context("Failed to decode MongoDB document")?;
            documents.push(document);
        }

        Ok(documents)
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}
