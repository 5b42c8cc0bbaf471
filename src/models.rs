use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An upcoming event as served by the backend (or the static fallback file).
///
/// Only `id`, `title`, `description`, `link` and `type` are guaranteed; the
/// scheduling metadata varies between payload sources and stays optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub link: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<u32>,
}

/// Creation payload: an [`Event`] without an `id`. The backend assigns the id
/// on success; offline creation derives one from the current timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub link: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<u32>,
}

impl EventDraft {
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            link: self.link,
            event_type: self.event_type,
            date: self.date,
            time: self.time,
            location: self.location,
            capacity: self.capacity,
            registered: self.registered,
        }
    }
}

/// A historical event. Loaded once from a static resource, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastEvent {
    pub title: String,
    pub description: String,
    pub image: String,
    pub date: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub faculty: String,
}

/// Response of the image upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub filename: String,
}

/// The fixed set of event categories the site filters by.
///
/// Events themselves carry `type` as a free string so unknown types survive a
/// round trip; they just never match a category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Workshop,
    Conference,
    Webinar,
    Hackathon,
    Panel,
    #[serde(rename = "Tech Talk")]
    TechTalk,
    Symposium,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Workshop,
        Category::Conference,
        Category::Webinar,
        Category::Hackathon,
        Category::Panel,
        Category::TechTalk,
        Category::Symposium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Workshop => "Workshop",
            Category::Conference => "Conference",
            Category::Webinar => "Webinar",
            Category::Hackathon => "Hackathon",
            Category::Panel => "Panel",
            Category::TechTalk => "Tech Talk",
            Category::Symposium => "Symposium",
        }
    }

    /// Case-insensitive match against an event's free-form `type` field.
    pub fn matches(&self, event_type: &str) -> bool {
        event_type.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    // The category cards on the site use plural titles ("Workshops") while
    // event types are singular, so a trailing "s" is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let singular = trimmed
            .strip_suffix('s')
            .or_else(|| trimmed.strip_suffix('S'))
            .unwrap_or(trimmed);
        Category::ALL
            .into_iter()
            .find(|c| c.matches(trimmed) || c.matches(singular))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
