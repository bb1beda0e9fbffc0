//! Request shapes for the sport and event resources.
//!
//! Each resource has a Create shape (required fields plus defaults) and an
//! Update shape (everything optional, no defaults). Bodies arrive as raw JSON
//! and are checked field by field so every violation is reported at once.

use serde_json::{Map, Value};

use crate::error::FieldError;
use crate::slug::slugify;

mod fields;

use fields::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventType {
    #[default]
    Preplay,
    Inplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    #[default]
    Pending,
    Started,
    Ended,
    Cancelled,
}

/// Settlement result of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Void,
    Unsettled,
}

/// Fixed set of string values stored for an enumerated column
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("'{}'", c.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Choice for EventType {
    const ALL: &'static [Self] = &[EventType::Preplay, EventType::Inplay];

    fn as_str(self) -> &'static str {
        match self {
            EventType::Preplay => "preplay",
            EventType::Inplay => "inplay",
        }
    }
}

impl Choice for EventStatus {
    const ALL: &'static [Self] = &[
        EventStatus::Pending,
        EventStatus::Started,
        EventStatus::Ended,
        EventStatus::Cancelled,
    ];

    fn as_str(self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Started => "started",
            EventStatus::Ended => "ended",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl Choice for Outcome {
    const ALL: &'static [Self] = &[Outcome::Win, Outcome::Lose, Outcome::Void, Outcome::Unsettled];

    fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Void => "void",
            Outcome::Unsettled => "unsettled",
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    body.as_object()
        .ok_or_else(|| vec![FieldError::new("body", "expected a JSON object")])
}

/// Use the given slug unless it is missing or empty, otherwise derive one
fn slug_or_derived(slug: Option<String>, name: &str) -> String {
    slug.filter(|s| !s.is_empty()).unwrap_or_else(|| slugify(name))
}

// Sport shapes

#[derive(Debug, Clone, PartialEq)]
pub struct SportCreate {
    pub name: String,
    pub slug: Option<String>,
    pub active: bool,
}

impl SportCreate {
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = Fields::new(as_object(body)?);
        let name = fields.required_string("name");
        let slug = fields.string("slug");
        let active = fields.boolean("active").unwrap_or(true);
        fields.finish()?;

        Ok(Self {
            // finish() has already rejected a missing name
            name: name.unwrap_or_default(),
            slug,
            active,
        })
    }

    /// The slug that will be stored for this sport
    pub fn resolved_slug(&self) -> String {
        slug_or_derived(self.slug.clone(), &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SportUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl SportUpdate {
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = Fields::new(as_object(body)?);
        let update = Self {
            name: fields.string("name"),
            slug: fields.string("slug"),
            active: fields.boolean("active"),
        };
        fields.finish()?;
        Ok(update)
    }

    /// Column/value pairs for the fields that were actually supplied
    pub fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut set = Vec::new();
        if let Some(name) = &self.name {
            set.push(("name", Value::from(name.as_str())));
        }
        if let Some(slug) = &self.slug {
            set.push(("slug", Value::from(slug.as_str())));
        }
        if let Some(active) = self.active {
            set.push(("active", Value::from(active)));
        }
        set
    }
}

// Event shapes

#[derive(Debug, Clone, PartialEq)]
pub struct EventCreate {
    pub name: String,
    pub active: bool,
    pub slug: Option<String>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub start_time: Option<String>,
    pub actual_start_time: Option<String>,
    pub sport_id: Option<i64>,
}

impl EventCreate {
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = Fields::new(as_object(body)?);
        let name = fields.required_string("name");
        let event = Self {
            name: String::new(),
            active: fields.boolean("active").unwrap_or(true),
            slug: fields.string("slug"),
            event_type: fields.choice("type").unwrap_or_default(),
            status: fields.choice("status").unwrap_or_default(),
            start_time: fields.string("start_time"),
            actual_start_time: fields.string("actual_start_time"),
            sport_id: fields.integer("sport_id"),
        };
        fields.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            ..event
        })
    }

    pub fn into_record(self) -> EventRecord {
        let slug = slug_or_derived(self.slug, &self.name);
        EventRecord {
            slug: Some(slug),
            name: Some(self.name),
            active: self.active,
            event_type: self.event_type,
            status: self.status,
            start_time: self.start_time,
            actual_start_time: self.actual_start_time,
            sport_id: self.sport_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub slug: Option<String>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
    pub start_time: Option<String>,
    pub actual_start_time: Option<String>,
    pub sport_id: Option<i64>,
}

impl EventUpdate {
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = Fields::new(as_object(body)?);
        let update = Self {
            name: fields.string("name"),
            active: fields.boolean("active"),
            slug: fields.string("slug"),
            event_type: fields.choice("type"),
            status: fields.choice("status"),
            start_time: fields.string("start_time"),
            actual_start_time: fields.string("actual_start_time"),
            sport_id: fields.integer("sport_id"),
        };
        fields.finish()?;
        Ok(update)
    }

    /// Full column set written by a PUT. Omitted fields fall back to the
    /// create defaults or null, replacing whatever was stored before.
    pub fn into_record(self) -> EventRecord {
        let slug = match (self.slug.filter(|s| !s.is_empty()), &self.name) {
            (Some(slug), _) => Some(slug),
            (None, Some(name)) => Some(slugify(name)),
            (None, None) => None,
        };
        EventRecord {
            name: self.name,
            active: self.active.unwrap_or(true),
            slug,
            event_type: self.event_type.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            start_time: self.start_time,
            actual_start_time: self.actual_start_time,
            sport_id: self.sport_id,
        }
    }
}

/// Every request-supplied column of an event row, ready to bind
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub name: Option<String>,
    pub active: bool,
    pub slug: Option<String>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub start_time: Option<String>,
    pub actual_start_time: Option<String>,
    pub sport_id: Option<i64>,
}

impl EventRecord {
    /// Values in the column order name, active, slug, type, status,
    /// start_time, actual_start_time, sport_id
    pub fn params(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.active),
            Value::from(self.slug.clone()),
            Value::from(self.event_type.as_str()),
            Value::from(self.status.as_str()),
            Value::from(self.start_time.clone()),
            Value::from(self.actual_start_time.clone()),
            Value::from(self.sport_id),
        ]
    }
}
