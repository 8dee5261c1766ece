use anyhow::{Context, Result};
use campus_events_core::event::{Category, NewEvent, parse_max_attendees};
use campus_events_core::repository::EventRepository;
use campus_events_core::store::FileStore;
use campus_events_core::user::SessionUser;
use chrono::{Local, NaiveDate, NaiveTime};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::prompt_text;

/// Raw values from the command line; missing ones are prompted for.
pub struct EventForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub max_attendees: Option<String>,
}

pub fn run(store: &mut FileStore, author: &SessionUser, form: EventForm) -> Result<()> {
    let interactive = form.title.is_none() || form.date.is_none() || form.time.is_none();
    let today = Local::now().date_naive();

    let title = required(form.title, "  Title")?;
    let description = required(form.description, "  Description")?;

    let date = match form.date {
        Some(d) => parse_date(&d, today)?,
        None => prompt_with_retry("  Date (YYYY-MM-DD)", |s| parse_date(s, today))?,
    };

    let time = match form.time {
        Some(t) => parse_time(&t)?,
        None => prompt_with_retry("  Time (HH:MM)", parse_time)?,
    };

    let location = required(form.location, "  Location")?;

    let category = match form.category {
        Some(c) => c.parse::<Category>()?,
        None => prompt_category()?,
    };

    let max_attendees = match form.max_attendees {
        Some(m) => m,
        None if interactive => prompt_max_attendees()?,
        None => String::new(),
    };

    let input = NewEvent {
        title,
        description,
        date,
        time,
        location,
        category,
        max_attendees,
    };

    if let Some(field) = input.missing_field() {
        anyhow::bail!("The {} field is required", field);
    }

    let event = EventRepository::new(store)
        .create(input, author)
        .context("Could not create event")?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.title).green());
    println!("  {}", format!("id {}", event.id).dimmed());

    Ok(())
}

fn required(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            anyhow::bail!("{} cannot be blank", prompt.trim())
        }
        Some(v) => Ok(v),
        None => prompt_text(prompt),
    }
}

/// Parse a YYYY-MM-DD date that is not earlier than `today`.
fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", input))?;

    if date < today {
        anyhow::bail!("Date {} is in the past", date);
    }

    Ok(date)
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow::anyhow!("Invalid time '{}'. Expected HH:MM (24-hour)", input))
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_category() -> Result<Category> {
    let items: Vec<String> = Category::ALL.iter().map(|c| c.label().to_string()).collect();

    let selection = Select::new()
        .with_prompt("  Category")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Category::ALL[selection])
}

fn prompt_max_attendees() -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Max attendees (unlimited)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;

        match parse_max_attendees(&input) {
            Ok(_) => return Ok(input),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-21", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 21).unwrap()
        );
        assert_eq!(parse_date(" 2025-03-20 ", today()).unwrap(), today());
    }

    #[test]
    fn test_parse_date_rejects_past_and_garbage() {
        assert!(parse_date("2025-03-19", today()).is_err());
        assert!(parse_date("20/03/2025", today()).is_err());
        assert!(parse_date("tomorrow", today()).is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("9am").is_err());
    }

    #[test]
    fn test_required_rejects_blank_flag() {
        assert!(required(Some("  ".to_string()), "  Title").is_err());
        assert_eq!(required(Some("Chess".to_string()), "  Title").unwrap(), "Chess");
    }
}
