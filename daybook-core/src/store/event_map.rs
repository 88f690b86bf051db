//! Immutable snapshot of the date-key to events mapping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::date_key::{self, DateKey};
use crate::error::DaybookResult;
use crate::event::{Event, EventId};

/// Events grouped by date, in insertion order within each date.
///
/// Updates return a new map and leave `self` untouched. Dates never hold an
/// empty bucket: removing the last event of a date drops the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventMap {
    buckets: BTreeMap<DateKey, Vec<Event>>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> &[Event] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_events(&self, key: &DateKey) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of events across all dates.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Dates with events between `from` and `to`, both inclusive.
    pub fn range<'a>(
        &'a self,
        from: &DateKey,
        to: &DateKey,
    ) -> impl Iterator<Item = (&'a DateKey, &'a [Event])> + use<'a> {
        let bounds = (from <= to).then(|| from.clone()..=to.clone());
        bounds
            .into_iter()
            .flat_map(|bounds| self.buckets.range(bounds))
            .map(|(k, v)| (k, v.as_slice()))
    }

    /// Append a new event titled `title` under `key`.
    ///
    /// Returns `None` if the title is blank.
    pub fn with_added(&self, key: &DateKey, title: &str) -> Option<(EventMap, Event)> {
        let event = Event::new(title)?;

        let mut next = self.clone();
        next.buckets
            .entry(key.clone())
            .or_default()
            .push(event.clone());

        Some((next, event))
    }

    /// Drop the event `id` from `key`.
    ///
    /// Returns `None` if there was no such event.
    pub fn with_removed(&self, key: &DateKey, id: &EventId) -> Option<EventMap> {
        let bucket = self.buckets.get(key)?;
        let position = bucket.iter().position(|e| &e.id == id)?;

        let mut next = self.clone();
        if bucket.len() == 1 {
            next.buckets.remove(key);
        } else if let Some(events) = next.buckets.get_mut(key) {
            events.remove(position);
        }

        Some(next)
    }

    pub fn to_json(&self) -> DaybookResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored blob.
    ///
    /// The blob must be a JSON object of arrays of `{id, title}`. Dates that
    /// are not valid keys are dropped with a warning; empty arrays are
    /// dropped silently.
    pub fn from_json(json: &str) -> DaybookResult<EventMap> {
        let raw: BTreeMap<String, Vec<Event>> = serde_json::from_str(json)?;

        let mut buckets = BTreeMap::new();
        for (key, events) in raw {
            if events.is_empty() {
                continue;
            }
            match date_key::decode(&key) {
                Ok(date) => {
                    buckets.insert(DateKey::from(date), events);
                }
                Err(e) => tracing::warn!("Skipping stored events: {e}"),
            }
        }

        Ok(EventMap { buckets })
    }
}
