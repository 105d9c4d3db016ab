//! In-process record store.
//!
//! Records live in a single ordered collection guarded by one mutex. Every
//! operation takes the lock exactly once, so concurrent requests observe the
//! same one-at-a-time semantics as a single-threaded event loop.

use async_trait::async_trait;
use rand::Rng;
use std::sync::{Mutex, MutexGuard};

use crate::config::StorageBackend;
use crate::contacts::{NewPerson, Person};
use crate::store::{PersonStore, StoreError, StoreResult};

/// Ids are drawn uniformly from `0..ID_RANGE`.
pub const ID_RANGE: u32 = 100_000_000;

/// In-memory backend. State is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    people: Mutex<Vec<Person>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the classic sample entries.
    pub fn with_sample_data() -> Self {
        let people = [
            ("Arto Hellas", "040-123456", "1"),
            ("Ada Lovelace", "39-44-5323523", "2"),
            ("Dan Abramov", "12-43-234345", "3"),
            ("Mary Poppendieck", "39-23-6423122", "4"),
        ]
        .into_iter()
        .map(|(name, number, id)| NewPerson::new(name, number).with_id(id))
        .collect();

        Self {
            people: Mutex::new(people),
        }
    }

    fn people(&self) -> MutexGuard<'_, Vec<Person>> {
        // A panic while holding the lock cannot leave the Vec half-written,
        // so a poisoned lock is still safe to use.
        self.people.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Draw a random id not currently in use.
fn generate_id(people: &[Person]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id = rng.gen_range(0..ID_RANGE).to_string();
        if !people.iter().any(|p| p.id == id) {
            return id;
        }
    }
}

#[async_trait]
impl PersonStore for InMemoryStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn list(&self) -> StoreResult<Vec<Person>> {
        Ok(self.people().clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        Ok(self.people().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        let mut people = self.people();
        if people.iter().any(|p| p.name == person.name) {
            return Err(StoreError::DuplicateName(person.name));
        }

        let id = generate_id(&people);
        let person = person.with_id(id);
        people.push(person.clone());

        tracing::debug!(id = %person.id, count = people.len(), "Person added");
        Ok(person)
    }

    async fn update_by_id(&self, _id: &str, _person: NewPerson) -> StoreResult<Option<Person>> {
        Err(StoreError::Unsupported {
            operation: "update",
            backend: StorageBackend::Memory,
        })
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut people = self.people();
        let before = people.len();
        people.retain(|p| p.id != id);

        tracing::debug!(id = %id, removed = before - people.len(), "Delete applied");
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.people().len())
    }
}
