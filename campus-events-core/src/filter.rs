//! List views over the event collection.
//!
//! Every function here is pure: the current time is passed in, and inputs are
//! never modified. Output keeps input order.
//!
//! A listing is built in two stages. [`upcoming`] runs once when events are
//! loaded and produces the [`WorkingSet`]. Search and category filters are
//! then re-applied to the whole working set whenever either changes, so
//! filtering is never cumulative.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::CampusError;
use crate::event::{Category, Event};

/// Events whose start is strictly after `now`.
pub fn upcoming(events: &[Event], now: NaiveDateTime) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.starts_at() > now)
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title or description.
/// An empty term matches everything.
pub fn search(events: &[Event], term: &str) -> Vec<Event> {
    if term.is_empty() {
        return events.to_vec();
    }

    let needle = term.to_lowercase();
    events
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn by_category(events: &[Event], filter: CategoryFilter) -> Vec<Event> {
    match filter {
        CategoryFilter::All => events.to_vec(),
        CategoryFilter::Only(category) => events
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect(),
    }
}

/// Events `user_id` has RSVPed to.
pub fn attending(events: &[Event], user_id: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.is_attending(user_id))
        .cloned()
        .collect()
}

/// Events organized by `user_id`.
pub fn created_by(events: &[Event], user_id: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.created_by == user_id)
        .cloned()
        .collect()
}

/// Category selector value; `all` disables category filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Current search term and category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl EventQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        EventQuery {
            search: search.into(),
            category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category == CategoryFilter::All
    }

    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        by_category(&search(events, &self.search), self.category)
    }
}

/// The upcoming events as of load time.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    events: Vec<Event>,
}

impl WorkingSet {
    pub fn load(events: &[Event], now: NaiveDateTime) -> Self {
        WorkingSet {
            events: upcoming(events, now),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filtered view; always computed from the full working set.
    pub fn view(&self, query: &EventQuery) -> Vec<Event> {
        query.apply(&self.events)
    }

    /// The event with `event_id`, if it was upcoming at load time.
    pub fn get(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Swap in a newer copy of an event, such as the result of
    /// `EventRepository::toggle_rsvp`. Returns false if it is not in the set.
    pub fn replace(&mut self, event: Event) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }
}
