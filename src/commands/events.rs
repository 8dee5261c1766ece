use anyhow::Result;
use campus_events_core::filter::{CategoryFilter, EventQuery, WorkingSet, created_by};
use campus_events_core::repository::EventRepository;
use campus_events_core::store::FileStore;
use campus_events_core::user::SessionUser;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::render::{event_card, pluralize};

/// List upcoming events matching the search term and category. With
/// `organizing`, only events the user created are shown.
pub fn run(
    store: &mut FileStore,
    user: &SessionUser,
    search: &str,
    category: &str,
    organizing: bool,
) -> Result<()> {
    let category: CategoryFilter = category.parse()?;
    let query = EventQuery::new(search, category);

    let repo = EventRepository::new(store);
    let working_set = WorkingSet::load(&repo.list_all(), Local::now().naive_local());
    let mut events = working_set.view(&query);
    if organizing {
        events = created_by(&events, &user.id);
    }
    tracing::debug!(upcoming = working_set.len(), shown = events.len(), "listing events");

    if events.is_empty() {
        println!("{}", "No events found".bold());
        println!("{}", empty_hint(&working_set, &query).dimmed());
        return Ok(());
    }

    let heading = if organizing {
        "you're organizing"
    } else {
        "upcoming"
    };
    println!(
        "{}",
        format!(
            "{} {} {}",
            events.len(),
            pluralize("event", events.len()),
            heading
        )
        .bold()
    );

    for event in &events {
        println!();
        println!("{}", event_card(event, &user.id));
    }

    Ok(())
}

fn empty_hint(working_set: &WorkingSet, query: &EventQuery) -> &'static str {
    if working_set.is_empty() {
        "No upcoming events at the moment. Check back later!"
    } else if !query.is_empty() {
        "Try adjusting your search or category filter."
    } else {
        "You aren't organizing any upcoming events. Create one with: campus-events new"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_events_core::event::{Category, Event};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    fn make_test_event() -> Event {
        Event {
            id: "1".to_string(),
            title: "Pickup Soccer".to_string(),
            description: "Bring cleats".to_string(),
            date: NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            location: "North Field".to_string(),
            category: Category::Sports,
            max_attendees: None,
            created_by: "u1".to_string(),
            created_by_name: "Ana".to_string(),
            attendees: vec![],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_hint_distinguishes_no_events_from_no_match() {
        let now = NaiveDateTime::parse_from_str("2025-01-01 00:00", "%Y-%m-%d %H:%M").unwrap();

        let query = EventQuery::new("chess", CategoryFilter::All);

        let nothing = WorkingSet::load(&[], now);
        assert!(empty_hint(&nothing, &query).starts_with("No upcoming events"));

        let some = WorkingSet::load(&[make_test_event()], now);
        assert!(empty_hint(&some, &query).starts_with("Try adjusting"));
        assert!(empty_hint(&some, &EventQuery::default()).starts_with("You aren't organizing"));
    }

    #[test]
    fn test_organizing_view_keeps_own_events() {
        let now = NaiveDateTime::parse_from_str("2025-01-01 00:00", "%Y-%m-%d %H:%M").unwrap();
        let mine = make_test_event();
        let mut theirs = make_test_event();
        theirs.id = "2".to_string();
        theirs.created_by = "u2".to_string();

        let set = WorkingSet::load(&[mine, theirs], now);
        let view = set.view(&EventQuery::new("", CategoryFilter::Only(Category::Sports)));
        let own = created_by(&view, "u1");
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, "1");
    }
}
