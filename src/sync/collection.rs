use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::kv::KvStore;

/// A record that can live in a [`SyncedCollection`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// An ordered collection of records mirrored to durable storage under an
/// identity-scoped key.
///
/// The contract:
/// - `activate` loads the collection for an identity: the stored payload if
///   present and well-formed, the seed set on a miss or malformed payload,
///   and the seed set (never touching the store) for the anonymous identity.
/// - every successful mutation persists the full collection synchronously,
///   unless the identity is anonymous.
/// - ids are assigned from a counter recomputed at load as one greater than
///   the maximum stored id (zero for an empty collection), so loaded ids are
///   never reused.
///
/// Storage failures are logged and swallowed; the in-memory collection stays
/// authoritative for the session.
pub struct SyncedCollection<T: Record> {
    namespace: &'static str,
    seed: fn() -> Vec<T>,
    validate: fn(&T) -> bool,
    capacity: Option<usize>,
    identity: Option<String>,
    records: Vec<T>,
    next_id: u64,
}

impl<T: Record> SyncedCollection<T> {
    /// Create an inactive collection. Call [`activate`](Self::activate)
    /// before use; until then the collection is empty.
    pub fn new(namespace: &'static str, seed: fn() -> Vec<T>, validate: fn(&T) -> bool) -> Self {
        SyncedCollection {
            namespace,
            seed,
            validate,
            capacity: None,
            identity: None,
            records: Vec::new(),
            next_id: 0,
        }
    }

    /// Cap the collection at `cap` records; `add` rejects beyond that.
    pub fn with_capacity_limit(mut self, cap: usize) -> Self {
        self.capacity = Some(cap);
        self
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The storage key for the current identity, or `None` when anonymous.
    pub fn storage_key(&self) -> Option<String> {
        self.identity
            .as_deref()
            .map(|identity| format!("{}_{}", self.namespace, identity))
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// The id the next successful `add` will assign.
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    /// Load the collection for `identity`, replacing whatever is in memory.
    ///
    /// Mutations are persisted as they happen, so there is never unsaved
    /// state to carry across an identity transition; the old collection is
    /// simply discarded.
    pub fn activate(&mut self, store: &dyn KvStore, identity: Option<&str>) {
        self.identity = identity.map(str::to_string);
        self.records = match self.storage_key() {
            None => (self.seed)(),
            Some(key) => match store.get(&key) {
                None => (self.seed)(),
                Some(payload) => match serde_json::from_str::<Vec<T>>(&payload) {
                    Ok(records) => records,
                    Err(e) => {
                        tracing::warn!(
                            namespace = self.namespace,
                            error = %e,
                            "stored payload is malformed, falling back to defaults"
                        );
                        (self.seed)()
                    }
                },
            },
        };
        self.next_id = self
            .records
            .iter()
            .map(Record::id)
            .max()
            .map_or(0, |max| max + 1);
    }

    /// Add a record, assigning its id. Returns the id, or `None` when the
    /// record fails validation or the collection is at capacity.
    pub fn add(&mut self, store: &mut dyn KvStore, mut record: T) -> Option<u64> {
        if !(self.validate)(&record) {
            return None;
        }
        if let Some(cap) = self.capacity
            && self.records.len() >= cap
        {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        record.set_id(id);
        self.records.push(record);
        self.persist(store);
        Some(id)
    }

    /// Patch the record with the given id in place. Unknown ids are a no-op.
    /// Returns whether a record was modified.
    pub fn update(
        &mut self,
        store: &mut dyn KvStore,
        id: u64,
        patch: impl FnOnce(&mut T),
    ) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            return false;
        };
        patch(record);
        self.persist(store);
        true
    }

    /// Remove the record with the given id. Unknown ids are a no-op.
    /// Returns whether a record was removed.
    pub fn remove(&mut self, store: &mut dyn KvStore, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            return false;
        }
        self.persist(store);
        true
    }

    /// Replace the whole collection (a theme generation run does this).
    /// Incoming records are re-assigned ids from the counter.
    pub fn replace_all(&mut self, store: &mut dyn KvStore, records: Vec<T>) {
        self.records = records;
        for record in &mut self.records {
            let id = self.next_id;
            self.next_id += 1;
            record.set_id(id);
        }
        self.persist(store);
    }

    fn persist(&self, store: &mut dyn KvStore) {
        let Some(key) = self.storage_key() else {
            // Anonymous identity lives in memory only.
            return;
        };
        let payload = match serde_json::to_string(&self.records) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(namespace = self.namespace, error = %e, "could not serialize collection");
                return;
            }
        };
        if let Err(e) = store.set(&key, &payload) {
            tracing::warn!(
                namespace = self.namespace,
                error = %e,
                "store write failed; in-memory state remains authoritative"
            );
        }
    }
}
