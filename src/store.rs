//! In-process document store.
//!
//! Every collection guarantees atomicity for a single document write and
//! nothing more. There are no cross-collection transactions, so operations
//! spanning several documents must order their writes to keep interrupted
//! runs recoverable.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::admin::Admin;
use crate::models::club::Club;
use crate::models::enrollment::Enrollment;
use crate::models::event::Event;
use crate::models::faculty::Faculty;
use crate::models::guest::Guest;
use crate::models::session::Session;
use crate::models::student::Student;

#[derive(Debug, Error)]
#[error("document write failed: {0}")]
pub struct StoreError(pub String);

pub type StoreResult<T> = Result<T, StoreError>;

/// Anything that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// Shared countdown for making writes fail on purpose.
#[derive(Default)]
struct WriteLimit(Mutex<Option<usize>>);

impl WriteLimit {
    fn charge(&self) -> StoreResult<()> {
        let mut remaining = self.0.lock().unwrap();
        match remaining.as_mut() {
            Some(0) => Err(StoreError("write limit reached".to_owned())),
            Some(count) => {
                *count -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn set(&self, limit: Option<usize>) {
        *self.0.lock().unwrap() = limit;
    }
}

pub struct Collection<T: Document> {
    documents: RwLock<BTreeMap<Uuid, T>>,
    write_limit: Arc<WriteLimit>,
}

impl<T: Document> Collection<T> {
    fn new(write_limit: Arc<WriteLimit>) -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            write_limit,
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.documents.read().await.get(&id).cloned()
    }

    pub async fn find<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool + Send,
    {
        self.documents
            .read()
            .await
            .values()
            .find(|document| predicate(document))
            .cloned()
    }

    pub async fn filter<F>(&self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool + Send,
    {
        self.documents
            .read()
            .await
            .values()
            .filter(|document| predicate(document))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.documents.read().await.values().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Inserts or fully replaces one document.
    pub async fn save(&self, document: &T) -> StoreResult<()> {
        let mut documents = self.documents.write().await;
        self.write_limit.charge()?;
        documents.insert(document.id(), document.clone());

        Ok(())
    }

    /// Inserts `document` unless some existing document matches `taken`,
    /// returning whether the insert happened. The check and the insert run
    /// under one lock, so two racing calls can never both get in.
    pub async fn insert_unless<F>(&self, document: &T, mut taken: F) -> StoreResult<bool>
    where
        F: FnMut(&T) -> bool + Send,
    {
        let mut documents = self.documents.write().await;
        if documents.values().any(|existing| taken(existing)) {
            return Ok(false);
        }

        self.write_limit.charge()?;
        documents.insert(document.id(), document.clone());

        Ok(true)
    }

    /// Read-modify-write on one document without letting go of the lock
    /// in between. Returns `None` when the document does not exist.
    pub async fn update<F, R>(&self, id: Uuid, apply: F) -> StoreResult<Option<R>>
    where
        F: FnOnce(&mut T) -> R + Send,
        R: Send,
    {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&id) {
            Some(document) => {
                self.write_limit.charge()?;
                Ok(Some(apply(document)))
            }
            None => Ok(None),
        }
    }

    pub async fn remove(&self, id: Uuid) -> StoreResult<Option<T>> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(&id) {
            return Ok(None);
        }

        self.write_limit.charge()?;
        Ok(documents.remove(&id))
    }
}

/// One collection per document type, all sharing a write limit.
pub struct Store {
    pub admins: Collection<Admin>,
    pub clubs: Collection<Club>,
    pub enrollments: Collection<Enrollment>,
    pub events: Collection<Event>,
    pub faculty: Collection<Faculty>,
    pub guests: Collection<Guest>,
    pub sessions: Collection<Session>,
    pub students: Collection<Student>,
    write_limit: Arc<WriteLimit>,
}

impl Store {
    pub fn new() -> Arc<Self> {
        let write_limit = Arc::new(WriteLimit::default());

        Arc::new(Self {
            admins: Collection::new(write_limit.clone()),
            clubs: Collection::new(write_limit.clone()),
            enrollments: Collection::new(write_limit.clone()),
            events: Collection::new(write_limit.clone()),
            faculty: Collection::new(write_limit.clone()),
            guests: Collection::new(write_limit.clone()),
            sessions: Collection::new(write_limit.clone()),
            students: Collection::new(write_limit.clone()),
            write_limit,
        })
    }

    /// Lets the next `remaining` writes through and fails every one after
    /// that, across all collections. Exercises the recovery behavior of
    /// multi-document operations.
    pub fn limit_writes(&self, remaining: usize) {
        self.write_limit.set(Some(remaining));
    }

    pub fn lift_write_limit(&self) {
        self.write_limit.set(None);
    }
}
