//! Event persistence on top of a [`KeyValueStore`].
//!
//! The whole collection lives under one key and is always rewritten whole:
//! load everything, change it in memory, save everything. There is no merge
//! step, so a second concurrent writer would silently lose updates.

use crate::error::{CampusError, CampusResult};
use crate::event::{Event, NewEvent};
use crate::rsvp::{RsvpAction, toggle_rsvp};
use crate::store::{EVENTS_KEY, KeyValueStore, read_json, read_json_lossy, write_json};
use crate::user::SessionUser;

pub struct EventRepository<S> {
    store: S,
}

impl<S: KeyValueStore> EventRepository<S> {
    pub fn new(store: S) -> Self {
        EventRepository { store }
    }

    /// All stored events in insertion order. Absent, malformed or unreadable
    /// storage yields an empty list.
    pub fn list_all(&self) -> Vec<Event> {
        let events: Vec<Event> = read_json_lossy(&self.store, EVENTS_KEY).unwrap_or_default();
        tracing::debug!(count = events.len(), "loaded events");
        events
    }

    /// Like [`list_all`](Self::list_all), but a failing read is an error.
    /// Used before every write so an unreadable collection is never
    /// replaced.
    pub fn load_all(&self) -> CampusResult<Vec<Event>> {
        Ok(read_json(&self.store, EVENTS_KEY)?.unwrap_or_default())
    }

    pub fn find(&self, event_id: &str) -> Option<Event> {
        self.list_all().into_iter().find(|e| e.id == event_id)
    }

    /// Replace the stored collection with `events`.
    pub fn save(&mut self, events: &[Event]) -> CampusResult<()> {
        write_json(&mut self.store, EVENTS_KEY, events)?;
        tracing::debug!(count = events.len(), "saved events");
        Ok(())
    }

    /// Build an event authored by `author` and append it to the collection.
    pub fn create(&mut self, input: NewEvent, author: &SessionUser) -> CampusResult<Event> {
        let event = input.into_event(author)?;

        let mut events = self.load_all()?;
        events.push(event.clone());
        self.save(&events)?;

        tracing::info!(event_id = %event.id, title = %event.title, "created event");
        Ok(event)
    }

    /// Toggle attendance against the full stored collection and persist it.
    ///
    /// Nothing is written when the toggle is refused.
    pub fn toggle_rsvp(
        &mut self,
        event_id: &str,
        user_id: &str,
    ) -> CampusResult<(Event, RsvpAction)> {
        let events = self.load_all()?;
        let (updated, action) = toggle_rsvp(&events, event_id, user_id)?;
        self.save(&updated)?;

        tracing::info!(event_id, user_id, ?action, "rsvp toggled");

        let event = updated
            .into_iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CampusError::EventNotFound(event_id.to_string()))?;
        Ok((event, action))
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
