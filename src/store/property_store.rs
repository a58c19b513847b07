// src/store/property_store.rs
use crate::db::KeyValueStorage;
use crate::domain::ids::generate_property_id;
use crate::domain::{default_properties, Property, PropertyPatch};
use crate::errors::StoreError;
use crate::store::observers::{ChangeOrigin, ObserverRegistry, Subscription};
use std::cell::{Cell, RefCell};

pub const DEFAULT_STORAGE_KEY: &str = "properties";

/// Outcome of a save. Storage failures never reach the caller as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Durability {
    /// The collection reached the storage medium.
    Persisted,
    /// The medium rejected the write; the collection lives only in this store.
    MemoryOnly,
}

/// The local, persisted property collection and its observers.
///
/// The whole collection is stored as one JSON value under a single key.
/// Several stores may share a medium (one per tab or process). They do not
/// lock: each mutation reads, computes and writes the full collection, so when
/// two contexts mutate concurrently the last write wins and the other change is
/// lost without any conflict being reported.
///
/// Durability is best-effort. If a write fails, the collection stays visible
/// through `load()` in this store until a later write succeeds or another
/// context overwrites the medium.
pub struct PropertyStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    observers: ObserverRegistry,
    unpersisted: RefCell<Option<Vec<Property>>>,
    // Medium state as of the last write or poll from this store.
    seen_version: Cell<Option<i64>>,
    seen_payload: RefCell<Option<String>>,
    // Set when the payload could not be read at construction: the next poll
    // records what is stored instead of reporting it as a change.
    resync_pending: Cell<bool>,
}

impl<S: KeyValueStorage> PropertyStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let seen_version = match storage.external_version() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not read storage version");
                None
            }
        };
        let (seen_payload, resync_pending) = match storage.get_item(&key) {
            Ok(payload) => (payload, false),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not read stored properties; will resync on next poll");
                (None, true)
            }
        };

        Self {
            storage,
            key,
            observers: ObserverRegistry::default(),
            unpersisted: RefCell::new(None),
            seen_version: Cell::new(seen_version),
            seen_payload: RefCell::new(seen_payload),
            resync_pending: Cell::new(resync_pending),
        }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current collection. A missing, blank or malformed stored value yields
    /// the default set; this never fails.
    ///
    /// "Empty" means no usable text under the key. A stored `[]` is a real
    /// collection (every entry deleted) and loads as empty.
    pub fn load(&self) -> Vec<Property> {
        if let Some(pending) = self.unpersisted.borrow().as_ref() {
            return pending.clone();
        }
        self.read_persisted().unwrap_or_else(default_properties)
    }

    /// Overwrites the stored collection and notifies this store's observers.
    pub fn save(&self, collection: &[Property]) -> Durability {
        let durability = match self.write(collection) {
            Ok(payload) => {
                *self.unpersisted.borrow_mut() = None;
                *self.seen_payload.borrow_mut() = Some(payload);
                self.resync_pending.set(false);
                Durability::Persisted
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "property write failed; keeping collection in memory"
                );
                *self.unpersisted.borrow_mut() = Some(collection.to_vec());
                Durability::MemoryOnly
            }
        };

        self.observers.notify(collection, ChangeOrigin::Local);
        durability
    }

    /// Insert or update by id and return the id used.
    ///
    /// The id is `id` if given, else the patch's own id, else a fresh one.
    /// An existing entry is merged with the patch; otherwise a new entry is
    /// placed first in the collection.
    pub fn upsert(&self, patch: PropertyPatch, id: Option<&str>) -> String {
        let mut collection = self.load();

        let resolved = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| patch.id())
            .map(str::to_string)
            .unwrap_or_else(|| generate_property_id(collection.iter().map(|p| p.id.as_str())));

        match collection.iter_mut().find(|p| p.id == resolved) {
            Some(existing) => existing.merge(patch),
            None => collection.insert(0, Property::from_patch(resolved.clone(), patch)),
        }

        let _ = self.save(&collection);
        resolved
    }

    /// Remove the entry with `id`. Returns false, and writes nothing, when no
    /// such entry exists.
    pub fn delete(&self, id: &str) -> bool {
        let mut collection = self.load();
        let before = collection.len();
        collection.retain(|p| p.id != id);

        if collection.len() == before {
            tracing::debug!(id, "delete of unknown property ignored");
            return false;
        }

        let _ = self.save(&collection);
        true
    }

    pub fn reset_to_defaults(&self) -> Durability {
        self.save(&default_properties())
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Property], ChangeOrigin) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Check the medium for a write made by another context and, if the stored
    /// collection changed, deliver it to observers as an external change.
    ///
    /// This is the counterpart of the browser's storage event; callers run it
    /// from their event loop. Returns whether observers were notified.
    pub fn poll_external_changes(&self) -> bool {
        let version = match self.storage.external_version() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not poll storage for changes");
                return false;
            }
        };

        if self.seen_version.get() == Some(version) {
            return false;
        }

        // Nothing is recorded until the payload is in hand, so a failed read
        // is retried by the next poll.
        let payload = match self.storage.get_item(&self.key) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read changed collection");
                return false;
            }
        };

        self.seen_version.set(Some(version));

        if self.resync_pending.replace(false) {
            tracing::debug!(key = %self.key, "resynced stored properties");
            *self.seen_payload.borrow_mut() = payload;
            return false;
        }

        // Another key on the same medium changed, not ours.
        if *self.seen_payload.borrow() == payload {
            return false;
        }
        *self.seen_payload.borrow_mut() = payload;

        // The other context wrote after us, so its collection wins.
        *self.unpersisted.borrow_mut() = None;

        let current = self.load();
        tracing::info!(key = %self.key, count = current.len(), "property collection changed in another context");
        self.observers.notify(&current, ChangeOrigin::External);
        true
    }

    fn read_persisted(&self) -> Option<Vec<Property>> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read stored properties");
                return None;
            }
        };

        if raw.trim().is_empty() {
            return None;
        }

        match serde_json::from_str::<Vec<Property>>(&raw) {
            Ok(collection) => Some(collection),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored properties are malformed; using defaults");
                None
            }
        }
    }

    fn write(&self, collection: &[Property]) -> Result<String, StoreError> {
        let payload = serde_json::to_string(collection)?;
        self.storage.set_item(&self.key, &payload)?;
        Ok(payload)
    }
}
