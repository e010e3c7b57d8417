use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(DriverId);

/// Format the API uses for event dates, e.g. `2024-07-01`.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One race/rally occurrence as listed by the events endpoint.
///
/// `date` doubles as the human-readable lookup key for the detail route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: String,
}

impl Event {
    pub fn new(id: i64, name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: EventId(id),
            name: name.into(),
            date: date.into(),
        }
    }

    /// Parsed calendar date, when the API sent one in the expected format.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    pub name: String,
    pub date: String,
}

impl EventDetail {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub position: u32,
    pub driver: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub driver_id: DriverId,
    pub position: u32,
    pub points: i64,
}

pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EVENT_DATE_FORMAT).ok()
}
