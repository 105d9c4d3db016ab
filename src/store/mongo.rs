//! MongoDB-backed record store.
//!
//! # Responsibilities
//! - Connect to the configured deployment and collection
//! - Map `Person` records to and from `{_id: ObjectId, name, number}` documents
//! - Run schema validation before every write
//! - Bound every database call with the configured timeout
//!
//! # Design Decisions
//! - Ids that are not 24-hex-digit ObjectIds are rejected before any I/O
//! - Connectivity failures and timeouts are reported, never retried
//! - The client connects lazily; an unreachable server surfaces on first use

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::{StorageBackend, StorageConfig};
use crate::contacts::validation::validate_schema;
use crate::contacts::{NewPerson, Person};
use crate::observability::metrics;
use crate::store::{PersonStore, StoreError, StoreResult};

/// Document shape stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub number: String,
}

impl From<PersonDocument> for Person {
    fn from(doc: PersonDocument) -> Self {
        Person {
            name: doc.name,
            number: doc.number,
            id: doc.id.to_hex(),
        }
    }
}

/// Persistent backend over a single MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<PersonDocument>,
    op_timeout: Duration,
}

impl MongoStore {
    /// Build a store from configuration. Does not contact the server.
    pub async fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.database_url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid database url: {}", e)))?;

        let op_timeout = config.operation_timeout();
        options.app_name = Some("phonebook".to_string());
        options.server_selection_timeout = Some(op_timeout);
        options.connect_timeout = Some(op_timeout);

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.database_name));
        let collection = database.collection::<PersonDocument>(&config.collection);

        tracing::info!(
            database = %database.name(),
            collection = %config.collection,
            timeout_ms = op_timeout.as_millis() as u64,
            "MongoDB store configured"
        );

        Ok(Self::new(client, collection, op_timeout))
    }

    pub fn new(client: Client, collection: Collection<PersonDocument>, op_timeout: Duration) -> Self {
        Self {
            client,
            collection,
            op_timeout,
        }
    }

    /// Round-trip a `ping` to verify connectivity.
    pub async fn ping(&self) -> StoreResult<()> {
        self.bounded(
            "ping",
            self.client.database("admin").run_command(doc! { "ping": 1 }),
        )
        .await
        .map(|_| ())
    }

    /// Run a driver call under the operation timeout, mapping failures.
    async fn bounded<F, T>(&self, operation: &'static str, call: F) -> StoreResult<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        let result = match timeout(self.op_timeout, call.into_future()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => StoreError::Unavailable(e.to_string()),
            Err(_) => StoreError::Timeout(self.op_timeout),
        };

        tracing::warn!(operation, error = %result, "MongoDB operation failed");
        metrics::record_store_error(StorageBackend::Mongo, result.kind());
        Err(result)
    }
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl PersonStore for MongoStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Mongo
    }

    async fn list(&self) -> StoreResult<Vec<Person>> {
        // One deadline covers the query and draining the cursor.
        let documents = self
            .bounded("find", async {
                let cursor = self.collection.find(doc! {}).await?;
                cursor.try_collect::<Vec<PersonDocument>>().await
            })
            .await?;
        Ok(documents.into_iter().map(Person::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let oid = parse_id(id)?;
        let found = self
            .bounded("find_one", self.collection.find_one(doc! { "_id": oid }))
            .await?;
        Ok(found.map(Person::from))
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        validate_schema(&person)?;

        let document = PersonDocument {
            id: ObjectId::new(),
            name: person.name,
            number: person.number,
        };
        self.bounded("insert_one", self.collection.insert_one(&document))
            .await?;

        tracing::debug!(id = %document.id, "Person inserted");
        Ok(document.into())
    }

    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<Person>> {
        let oid = parse_id(id)?;
        validate_schema(&person)?;

        let updated = self
            .bounded(
                "find_one_and_update",
                self.collection
                    .find_one_and_update(
                        doc! { "_id": oid },
                        doc! { "$set": { "name": person.name.as_str(), "number": person.number.as_str() } },
                    )
                    .return_document(ReturnDocument::After),
            )
            .await?;
        Ok(updated.map(Person::from))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        // No stored document can carry an unparseable id.
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(());
        };
        let result = self
            .bounded("delete_one", self.collection.delete_one(doc! { "_id": oid }))
            .await?;

        tracing::debug!(id = %id, removed = result.deleted_count, "Delete applied");
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        let count = self
            .bounded("count_documents", self.collection.count_documents(doc! {}))
            .await?;
        Ok(count as usize)
    }
}

impl std::fmt::Debug for MongoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoStore")
            .field("collection", &self.collection.name())
            .field("timeout", &self.op_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ValidationError;

    /// Points at a port nothing listens on, with a short timeout.
    async fn unreachable_store() -> MongoStore {
        let config = StorageConfig {
            backend: StorageBackend::Mongo,
            database_url: "mongodb://127.0.0.1:9/?directConnection=true".to_string(),
            operation_timeout_ms: 200,
            ..StorageConfig::default()
        };
        MongoStore::from_config(&config).await.unwrap()
    }

    #[test]
    fn test_document_to_person() {
        let oid = ObjectId::new();
        let person = Person::from(PersonDocument {
            id: oid,
            name: "Ada Lovelace".into(),
            number: "39-445323523".into(),
        });
        assert_eq!(person.id, oid.to_hex());
        assert_eq!(person.id.len(), 24);
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("5f8d0d55b54764421b7156c3").is_ok());
        assert!(matches!(parse_id("999999"), Err(StoreError::MalformedId(_))));
        assert!(matches!(parse_id("not-an-object-id-at-all!"), Err(StoreError::MalformedId(_))));
    }

    #[tokio::test]
    async fn test_one_deadline_covers_every_step() {
        // Each step fits in the 200 ms budget on its own; together they don't.
        let store = unreachable_store().await;
        let result = store
            .bounded("two_steps", async {
                tokio::time::sleep(Duration::from_millis(150)).await;
                tokio::time::sleep(Duration::from_millis(150)).await;
                Ok::<(), mongodb::error::Error>(())
            })
            .await;
        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_malformed_id_rejected_before_io() {
        let store = unreachable_store().await;
        let err = store.find_by_id("123").await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedId(id) if id == "123"));

        let err = store
            .update_by_id("123", NewPerson::new("Ada Lovelace", "040-123456"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedId(_)));
    }

    #[tokio::test]
    async fn test_invalid_record_rejected_before_io() {
        let store = unreachable_store().await;
        let err = store
            .insert(NewPerson::new("Ada Lovelace", "123456"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidNumber { .. })
        ));

        let err = store
            .insert(NewPerson::new("Al", "040-123456"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NameTooShort { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_with_malformed_id_is_silent() {
        let store = unreachable_store().await;
        assert!(store.delete_by_id("not-an-id").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_unavailable() {
        let store = unreachable_store().await;
        let err = store.count().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unavailable(_) | StoreError::Timeout(_)
        ));
    }
}
