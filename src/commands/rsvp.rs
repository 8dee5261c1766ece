use anyhow::Result;
use campus_events_core::event::Event;
use campus_events_core::filter::{WorkingSet, attending};
use campus_events_core::repository::EventRepository;
use campus_events_core::rsvp::{RsvpAction, RsvpState, rsvp_state};
use campus_events_core::store::{FileStore, KeyValueStore};
use campus_events_core::user::SessionUser;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::render::{attendance, event_card, pluralize};

pub fn run(store: &mut FileStore, user: &SessionUser, event_id: &str) -> Result<()> {
    let mut repo = EventRepository::new(store);
    let mut working_set = WorkingSet::load(&repo.load_all()?, Local::now().naive_local());

    let (event, action) = toggle_upcoming(&mut repo, &mut working_set, user, event_id)?;

    match action {
        RsvpAction::Joined => println!(
            "{}",
            format!("  You're going to {} ({})", event.title, attendance(&event)).green()
        ),
        RsvpAction::Cancelled => println!(
            "{}",
            format!("  Cancelled RSVP for {}", event.title).yellow()
        ),
    }

    let going = attending(working_set.events(), &user.id).len();
    println!(
        "{}",
        format!("  {} upcoming {}", going, pluralize("RSVP", going)).dimmed()
    );

    Ok(())
}

/// Toggle `user`'s RSVP on an event in the working set and keep the set in
/// step with what was stored.
///
/// Past events are not in the working set and are refused, as are full
/// events the user has not joined.
fn toggle_upcoming<S: KeyValueStore>(
    repo: &mut EventRepository<S>,
    working_set: &mut WorkingSet,
    user: &SessionUser,
    event_id: &str,
) -> Result<(Event, RsvpAction)> {
    let Some(event) = working_set.get(event_id) else {
        anyhow::bail!("Event not found or already past: {}", event_id);
    };

    if rsvp_state(event, &user.id) == RsvpState::Full {
        anyhow::bail!(
            "{} is full ({} attendees)",
            event.title,
            attendance(event)
        );
    }

    let (event, action) = repo.toggle_rsvp(event_id, &user.id)?;
    working_set.replace(event.clone());
    tracing::debug!(event_id, ?action, "working set updated");

    Ok((event, action))
}

/// Upcoming events the user has joined.
pub fn list(store: &mut FileStore, user: &SessionUser) -> Result<()> {
    let repo = EventRepository::new(store);
    let working_set = WorkingSet::load(&repo.list_all(), Local::now().naive_local());
    let mine = attending(working_set.events(), &user.id);

    if mine.is_empty() {
        println!("{}", "You haven't joined any upcoming events".dimmed());
        return Ok(());
    }

    for (i, event) in mine.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event_card(event, &user.id));
    }

    Ok(())
}
