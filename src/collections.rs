use std::time::SystemTime;

use sha1::{Digest, Sha1};

use crate::record_id::RecordId;

/// A named, ordered set of saved records.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Hex SHA-1 of the collection name.
    pub id: String,
    pub name: String,
    /// Member record ids in insertion order, without duplicates.
    pub record_ids: Vec<RecordId>,
    /// Unix seconds at creation.
    pub created_at: u64,
}

/// Outcome of [`CollectionStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Outcome of [`CollectionStore::add_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    NoSuchCollection,
}

/// Outcome of [`CollectionStore::remove_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
    NoSuchCollection,
}

/// In-memory registry of collections, keyed by content-derived record ids.
///
/// Lives for one session; nothing is persisted.
#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: Vec<Collection>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection named `name`. The id is the hex SHA-1 of the
    /// name, so creating the same name twice reports `AlreadyExists`.
    pub fn create(&mut self, name: &str) -> CreateOutcome {
        let id = collection_id(name);
        if self.get(&id).is_some() {
            return CreateOutcome::AlreadyExists;
        }
        self.collections.push(Collection {
            id,
            name: name.to_string(),
            record_ids: Vec::new(),
            created_at: unix_now(),
        });
        CreateOutcome::Created
    }

    pub fn add_record(
        &mut self,
        collection_id: &str,
        record_id: &RecordId,
    ) -> AddOutcome {
        let Some(collection) = self.get_mut(collection_id) else {
            return AddOutcome::NoSuchCollection;
        };
        if collection.record_ids.contains(record_id) {
            return AddOutcome::AlreadyPresent;
        }
        collection.record_ids.push(record_id.clone());
        AddOutcome::Added
    }

    pub fn remove_record(
        &mut self,
        collection_id: &str,
        record_id: &RecordId,
    ) -> RemoveOutcome {
        let Some(collection) = self.get_mut(collection_id) else {
            return RemoveOutcome::NoSuchCollection;
        };
        let Some(position) =
            collection.record_ids.iter().position(|id| id == record_id)
        else {
            return RemoveOutcome::NotFound;
        };
        collection.record_ids.remove(position);
        RemoveOutcome::Removed
    }

    /// Delete a whole collection. Returns false when no such collection
    /// exists.
    pub fn remove(&mut self, collection_id: &str) -> bool {
        let before = self.collections.len();
        self.collections.retain(|c| c.id != collection_id);
        self.collections.len() < before
    }

    pub fn get(&self, collection_id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == collection_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// All collections in creation order.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    fn get_mut(&mut self, collection_id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == collection_id)
    }
}

/// Collection ids hash the raw name (case-sensitive), unlike record ids,
/// which normalize their inputs first.
fn collection_id(name: &str) -> String {
    hex::encode(Sha1::digest(name.as_bytes()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
