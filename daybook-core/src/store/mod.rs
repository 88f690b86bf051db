//! The shared event store.
//!
//! There is exactly one [`EventStore`] per process. Every view holds a clone
//! of the same handle, so an event added through one view is immediately
//! visible through all the others. The store is the only component that
//! talks to the blob backend: it loads once at start and writes the whole
//! mapping back after every change.

mod backend;
mod event_map;

pub use backend::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use event_map::EventMap;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;

use crate::constants::STORAGE_KEY;
use crate::date_key::DateKey;
use crate::event::{Event, EventId};

#[derive(Clone)]
pub struct EventStore {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn BlobStore>,
    state: RwLock<State>,
    /// Revision most recently written to the backend. Held across the
    /// backend write, which makes the store its only writer.
    persisted: Mutex<u64>,
}

struct State {
    events: Arc<EventMap>,
    /// Bumped by every change to `events`, loads included.
    revision: u64,
}

impl EventStore {
    /// An empty store over `backend`. Call [`EventStore::load`] to read the
    /// persisted events, or use [`EventStore::open`].
    pub fn new(backend: Arc<dyn BlobStore>) -> Self {
        EventStore {
            inner: Arc::new(Inner {
                backend,
                state: RwLock::new(State {
                    events: Arc::new(EventMap::new()),
                    revision: 0,
                }),
                persisted: Mutex::new(0),
            }),
        }
    }

    /// A store loaded from `backend`.
    pub async fn open(backend: Arc<dyn BlobStore>) -> Self {
        let store = Self::new(backend);
        store.load().await;
        store
    }

    /// Replace the in-memory events with the persisted ones.
    ///
    /// A missing, unreadable or corrupt blob loads as an empty store. If the
    /// store changed while the read was in flight the result is discarded,
    /// so a slow load never overwrites newer events. Returns whether the
    /// loaded events were applied.
    pub async fn load(&self) -> bool {
        let started_at = self.read_state().revision;

        let loaded = match self.inner.backend.get_string(STORAGE_KEY).await {
            Ok(Some(json)) => EventMap::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("Stored events are unreadable, starting empty: {e}");
                EventMap::new()
            }),
            Ok(None) => EventMap::new(),
            Err(e) => {
                tracing::warn!("Could not read stored events, starting empty: {e}");
                EventMap::new()
            }
        };

        let mut state = self.write_state();
        if state.revision != started_at {
            tracing::debug!("Discarding stale load (store changed since it started)");
            return false;
        }

        tracing::debug!("Loaded {} events", loaded.len());
        state.events = Arc::new(loaded);
        state.revision += 1;
        true
    }

    /// The current events. Cheap: the snapshot is shared, not copied.
    pub fn snapshot(&self) -> Arc<EventMap> {
        Arc::clone(&self.read_state().events)
    }

    /// Events on `key`, in the order they were added.
    pub fn get(&self, key: &DateKey) -> Vec<Event> {
        self.read_state().events.get(key).to_vec()
    }

    pub fn has_events(&self, key: &DateKey) -> bool {
        self.read_state().events.has_events(key)
    }

    /// Dates with events between `from` and `to`, both inclusive.
    pub fn events_between(&self, from: &DateKey, to: &DateKey) -> Vec<(DateKey, Vec<Event>)> {
        self.snapshot()
            .range(from, to)
            .map(|(key, events)| (key.clone(), events.to_vec()))
            .collect()
    }

    /// File a new event titled `title` under `key` and persist.
    ///
    /// A blank title changes nothing and returns `None`.
    pub async fn add(&self, key: &DateKey, title: &str) -> Option<Event> {
        let event = {
            let mut state = self.write_state();
            let (next, event) = state.events.with_added(key, title)?;
            state.events = Arc::new(next);
            state.revision += 1;
            event
        };

        tracing::debug!("Added event {} on {key}", event.id);
        self.persist().await;
        Some(event)
    }

    /// Delete event `id` from `key` and persist. Returns whether it existed.
    pub async fn remove(&self, key: &DateKey, id: &EventId) -> bool {
        let removed = {
            let mut state = self.write_state();
            match state.events.with_removed(key, id) {
                Some(next) => {
                    state.events = Arc::new(next);
                    state.revision += 1;
                    true
                }
                None => false,
            }
        };

        if removed {
            tracing::debug!("Removed event {id} from {key}");
            self.persist().await;
        }
        removed
    }

    /// Write the current events to the backend.
    ///
    /// Always writes the newest snapshot, and skips the write if that
    /// revision is already persisted. A failed write is logged and dropped;
    /// memory stays authoritative and the next change retries.
    pub async fn persist(&self) {
        let mut persisted = self.inner.persisted.lock().await;

        let (events, revision) = {
            let state = self.read_state();
            (Arc::clone(&state.events), state.revision)
        };
        if revision <= *persisted {
            return;
        }

        let json = match events.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Could not serialize events: {e}");
                return;
            }
        };

        match self.inner.backend.set_string(STORAGE_KEY, &json).await {
            Ok(()) => *persisted = revision,
            Err(e) => tracing::warn!("Could not save events, changes will not survive a restart: {e}"),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
