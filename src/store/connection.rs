//! MongoDB connection for the store adapter
//!
//! One client is opened per run, used for a single bulk insert and dropped.
//! There is no pooling configuration and no reconnection.

use std::time::Duration;

use bson::Document;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::error::mongo::{classify_connect_error, classify_insert_error, extract_error_info};
use crate::record::Record;

use super::{APP_NAME, COLLECTION_NAME, DATABASE_NAME, sanitize_uri};

/// Connected handle to the records collection
pub struct StoreConnection {
    /// MongoDB client instance
    client: Client,

    /// Target collection
    collection: Collection<Document>,
}

impl StoreConnection {
    /// Parse the connection string and create a client
    ///
    /// Parsing may resolve SRV records, but no server is contacted until
    /// the first operation.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `timeout` - Server selection timeout
    pub async fn open(uri: &str, timeout: Duration) -> Result<Self, StoreError> {
        debug!("Opening MongoDB client for {}", sanitize_uri(uri));

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| classify_connect_error(&e))?;
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options).map_err(|e| classify_connect_error(&e))?;
        let collection = client.database(DATABASE_NAME).collection(COLLECTION_NAME);

        Ok(Self { client, collection })
    }

    /// Insert every record in one bulk operation
    ///
    /// # Returns
    /// * `Result<usize>` - Number of inserted documents
    pub async fn insert_records(&self, records: &[Record]) -> Result<usize, StoreError> {
        let documents = records
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Executing insertMany on '{}.{}' ({} documents)",
            DATABASE_NAME,
            COLLECTION_NAME,
            documents.len()
        );

        let result = self.collection.insert_many(documents).await.map_err(|e| {
            if let Ok(json) = extract_error_info(&e).to_json_compact() {
                warn!("insertMany failed: {}", json);
            }
            classify_insert_error(&e)
        })?;

        let inserted = result.inserted_ids.len();
        info!("Inserted {} documents into {}.{}", inserted, DATABASE_NAME, COLLECTION_NAME);
        Ok(inserted)
    }

    /// Close the client
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

/// Convert a record to a store document with keys `id, fr, fc, spo2`
pub fn to_document(record: &Record) -> Result<Document, StoreError> {
    bson::to_document(record).map_err(|e| StoreError::Conversion(e.to_string()))
}
