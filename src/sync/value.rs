use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::kv::KvStore;

/// A single value mirrored to durable storage under an identity-scoped key.
///
/// Same contract as [`SyncedCollection`](crate::sync::SyncedCollection):
/// load on identity change with a default fallback, persist on every set,
/// never persist for the anonymous identity, degrade silently on storage
/// failures. The wedding date is the one instance.
pub struct SyncedValue<T> {
    namespace: &'static str,
    default: fn() -> T,
    identity: Option<String>,
    value: T,
}

impl<T: Clone + Serialize + DeserializeOwned> SyncedValue<T> {
    pub fn new(namespace: &'static str, default: fn() -> T) -> Self {
        SyncedValue {
            namespace,
            default,
            identity: None,
            value: default(),
        }
    }

    pub fn storage_key(&self) -> Option<String> {
        self.identity
            .as_deref()
            .map(|identity| format!("{}_{}", self.namespace, identity))
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Load the value for `identity`, replacing whatever is in memory.
    pub fn activate(&mut self, store: &dyn KvStore, identity: Option<&str>) {
        self.identity = identity.map(str::to_string);
        self.value = match self.storage_key() {
            None => (self.default)(),
            Some(key) => match store.get(&key) {
                None => (self.default)(),
                Some(payload) => match serde_json::from_str::<T>(&payload) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(
                            namespace = self.namespace,
                            error = %e,
                            "stored value is malformed, falling back to default"
                        );
                        (self.default)()
                    }
                },
            },
        };
    }

    /// Set the value and persist it (unless anonymous).
    pub fn set(&mut self, store: &mut dyn KvStore, value: T) {
        self.value = value;
        let Some(key) = self.storage_key() else {
            return;
        };
        let payload = match serde_json::to_string(&self.value) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(namespace = self.namespace, error = %e, "could not serialize value");
                return;
            }
        };
        if let Err(e) = store.set(&key, &payload) {
            tracing::warn!(
                namespace = self.namespace,
                error = %e,
                "store write failed; in-memory value remains authoritative"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn default_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    #[test]
    fn set_then_reload_round_trips() {
        let mut store = MemoryStore::new();
        let mut date = SyncedValue::new("wedding_date", default_date);
        date.activate(&store, Some("sam"));

        let picked = NaiveDate::from_ymd_opt(2031, 6, 14).unwrap();
        date.set(&mut store, picked);
        assert_eq!(store.get("wedding_date_sam").as_deref(), Some("\"2031-06-14\""));

        date.activate(&store, Some("sam"));
        assert_eq!(*date.get(), picked);
    }

    #[test]
    fn anonymous_uses_default_and_skips_store() {
        let mut store = MemoryStore::new();
        let mut date = SyncedValue::new("wedding_date", default_date);
        date.activate(&store, None);
        assert_eq!(*date.get(), default_date());

        date.set(&mut store, NaiveDate::from_ymd_opt(2031, 6, 14).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set("wedding_date_sam", "garbage").unwrap();

        let mut date = SyncedValue::new("wedding_date", default_date);
        date.activate(&store, Some("sam"));
        assert_eq!(*date.get(), default_date());
    }

    #[test]
    fn identities_see_their_own_value() {
        let mut store = MemoryStore::new();
        let mut date = SyncedValue::new("wedding_date", default_date);

        date.activate(&store, Some("sam"));
        date.set(&mut store, NaiveDate::from_ymd_opt(2031, 6, 14).unwrap());

        date.activate(&store, Some("riley"));
        assert_eq!(*date.get(), default_date());
    }
}
