use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Times of day at which cooperative visits take place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitTime {
    #[serde(rename = "10:00")]
    Morning,
    #[serde(rename = "15:00")]
    Afternoon,
}

impl VisitTime {
    pub const ALL: [VisitTime; 2] = [VisitTime::Morning, VisitTime::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitTime::Morning => "10:00",
            VisitTime::Afternoon => "15:00",
        }
    }

    /// Label used by the confirmation email template.
    pub fn email_label(&self) -> &'static str {
        match self {
            VisitTime::Morning => "10h00",
            VisitTime::Afternoon => "15h00",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "10:00" => Some(VisitTime::Morning),
            "15:00" => Some(VisitTime::Afternoon),
            _ => None,
        }
    }
}

/// A schedulable (date, time) pair. Constructed transiently while a form is
/// being filled in; never persisted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitSlot {
    pub date: NaiveDate,
    pub time: VisitTime,
}

impl VisitSlot {
    pub fn new(date: NaiveDate, time: VisitTime) -> Self {
        Self { date, time }
    }

    /// Wire format for the booking RPC, e.g. `2026-02-18T10:00:00`. Local
    /// wall-clock components with no offset; the backend's storage column
    /// owns the timezone interpretation.
    pub fn wire_format(&self) -> String {
        format!("{}T{}:00", self.date.format("%Y-%m-%d"), self.time.as_str())
    }

    /// Display label for the date, `dd/MM/yyyy`.
    pub fn display_label(&self) -> String {
        date_label(self.date)
    }
}

pub fn date_label(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}
