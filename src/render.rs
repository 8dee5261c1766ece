//! Terminal rendering for campus-events types.

use campus_events_core::event::{Category, Event};
use campus_events_core::rsvp::{RsvpState, rsvp_state};
use campus_events_core::user::SessionUser;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let label = format!("[{}]", self.label());
        match self {
            Category::Workshop => label.blue().to_string(),
            Category::ClubMeeting => label.green().to_string(),
            Category::Hackathon => label.purple().to_string(),
            Category::Seminar => label.yellow().to_string(),
            Category::Social => label.magenta().to_string(),
            Category::Sports => label.red().to_string(),
            Category::Other => label.dimmed().to_string(),
        }
    }
}

impl Render for SessionUser {
    fn render(&self) -> String {
        format!("{} {} ({})", self.name.bold(), self.email.dimmed(), self.role)
    }
}

impl Render for RsvpState {
    fn render(&self) -> String {
        match self {
            RsvpState::Attending => "attending".green().to_string(),
            RsvpState::Open => "open".to_string(),
            RsvpState::Full => "full".red().to_string(),
        }
    }
}

/// "12/40" with a cap, "12" without.
pub fn attendance(event: &Event) -> String {
    match event.max_attendees {
        Some(max) => format!("{}/{}", event.attendees.len(), max),
        None => event.attendees.len().to_string(),
    }
}

/// "(3 spots left)" for capped events with room, empty otherwise.
pub fn spots_left(event: &Event) -> String {
    match event.remaining_spots() {
        Some(n) if n > 0 => format!("({} {} left)", n, pluralize("spot", n as usize)),
        _ => String::new(),
    }
}

/// Multi-line card for one event as seen by `viewer_id`.
pub fn event_card(event: &Event, viewer_id: &str) -> String {
    let state = rsvp_state(event, viewer_id);

    let lines = [
        format!("{} {}", event.category.render(), event.title.bold()),
        format!("   {}", event.description),
        format!(
            "   {} at {}, {}",
            event.date.format("%A, %B %-d, %Y"),
            event.time.format("%-I:%M %p"),
            event.location
        ),
        format!(
            "   {} {} {} {}",
            "attendees:".dimmed(),
            attendance(event),
            spots_left(event).dimmed(),
            state.render()
        ),
        format!(
            "   {}",
            format!("Organized by {} | id {}", event.created_by_name, event.id).dimmed()
        ),
    ];

    lines.join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
