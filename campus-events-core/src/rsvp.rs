//! RSVP toggling with capacity enforcement.
//!
//! Per event and user there are two states, not attending and attending.
//! Joining is guarded by capacity; cancelling never is.

use crate::error::{CampusError, CampusResult};
use crate::event::Event;

/// Which transition a toggle performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAction {
    Joined,
    Cancelled,
}

/// What a user may do with an event right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpState {
    /// Already attending; the action available is cancelling
    Attending,
    /// Not attending and there is room
    Open,
    /// Not attending and capacity is reached; joining must be disabled
    Full,
}

pub fn rsvp_state(event: &Event, user_id: &str) -> RsvpState {
    if event.is_attending(user_id) {
        RsvpState::Attending
    } else if event.is_full() {
        RsvpState::Full
    } else {
        RsvpState::Open
    }
}

/// Toggle `user_id`'s attendance of the event with `event_id`.
///
/// Returns a new collection where only that event differs. Joining a full
/// event fails with [`CampusError::CapacityExceeded`] and an unknown id with
/// [`CampusError::EventNotFound`]; `events` itself is never modified.
pub fn toggle_rsvp(
    events: &[Event],
    event_id: &str,
    user_id: &str,
) -> CampusResult<(Vec<Event>, RsvpAction)> {
    let index = events
        .iter()
        .position(|e| e.id == event_id)
        .ok_or_else(|| CampusError::EventNotFound(event_id.to_string()))?;

    let (event, action) = toggled(&events[index], user_id)?;

    let mut updated = events.to_vec();
    updated[index] = event;
    Ok((updated, action))
}

fn toggled(event: &Event, user_id: &str) -> CampusResult<(Event, RsvpAction)> {
    let mut event = event.clone();

    match rsvp_state(&event, user_id) {
        RsvpState::Attending => {
            event.attendees.retain(|id| id != user_id);
            Ok((event, RsvpAction::Cancelled))
        }
        RsvpState::Open => {
            event.attendees.push(user_id.to_string());
            Ok((event, RsvpAction::Joined))
        }
        RsvpState::Full => Err(CampusError::CapacityExceeded {
            event_id: event.id,
            max: event.max_attendees.unwrap_or_default(),
        }),
    }
}
