//! Campus event types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CampusError, CampusResult};
use crate::user::SessionUser;
use crate::utils::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Workshop,
    ClubMeeting,
    Hackathon,
    Seminar,
    Social,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Workshop,
        Category::ClubMeeting,
        Category::Hackathon,
        Category::Seminar,
        Category::Social,
        Category::Sports,
        Category::Other,
    ];

    /// Stored form, e.g. `club-meeting`.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Workshop => "workshop",
            Category::ClubMeeting => "club-meeting",
            Category::Hackathon => "hackathon",
            Category::Seminar => "seminar",
            Category::Social => "social",
            Category::Sports => "sports",
            Category::Other => "other",
        }
    }

    /// Human-readable label, e.g. `Club Meeting`.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Workshop => "Workshop",
            Category::ClubMeeting => "Club Meeting",
            Category::Hackathon => "Hackathon",
            Category::Seminar => "Seminar",
            Category::Social => "Social Event",
            Category::Sports => "Sports",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Category {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| CampusError::UnknownCategory(s.to_string()))
    }
}

/// A campus event as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub location: String,
    pub category: Category,
    /// `None` means unlimited
    pub max_attendees: Option<u32>,
    pub created_by: String,
    /// Snapshot of the author's name at creation time
    pub created_by_name: String,
    /// User ids, in RSVP order
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Local wall-clock instant the event starts at.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_attending(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|id| id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.max_attendees
            .is_some_and(|max| self.attendees.len() >= max as usize)
    }

    pub fn remaining_spots(&self) -> Option<u32> {
        let taken = u32::try_from(self.attendees.len()).unwrap_or(u32::MAX);
        self.max_attendees.map(|max| max.saturating_sub(taken))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Input for creating an event, as collected by a form.
///
/// `max_attendees` is the raw form text: empty means unlimited.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: Category,
    pub max_attendees: String,
}

impl NewEvent {
    /// First blank required text field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    pub(crate) fn into_event(self, author: &SessionUser) -> CampusResult<Event> {
        if let Some(field) = self.missing_field() {
            return Err(CampusError::MissingField(field));
        }

        Ok(Event {
            id: new_id(),
            max_attendees: parse_max_attendees(&self.max_attendees)?,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            created_by: author.id.clone(),
            created_by_name: author.name.clone(),
            attendees: Vec::new(),
            created_at: Utc::now(),
        })
    }
}

/// Parse the optional capacity field of the create form.
///
/// Blank input means unlimited; anything else must be a positive integer.
pub fn parse_max_attendees(input: &str) -> CampusResult<Option<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(CampusError::InvalidCapacity(trimmed.to_string())),
        Ok(max) => Ok(Some(max)),
    }
}

/// `HH:MM` time-of-day serde format. Seconds are accepted when reading.
/// `HH:MM`, or `HH:MM:SS` when the seconds are not zero.
mod hh_mm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if time.second() == 0 {
            FORMAT
        } else {
            FORMAT_WITH_SECONDS
        };
        serializer.serialize_str(&time.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, FORMAT_WITH_SECONDS))
            .map_err(de::Error::custom)
    }
}
