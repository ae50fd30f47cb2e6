use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_VACATION_TITLE: &str = "Vacation";

/// A blocked-out period drawn as an overlay band on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDate,
    /// Single-day vacations may omit the end.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl Vacation {
    pub fn new(title: impl Into<String>, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_VACATION_TITLE.to_string()
        } else {
            title.trim().to_string()
        };
        Self {
            id: Uuid::new_v4(),
            title,
            start,
            end,
        }
    }

    pub fn end_or_start(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// Inclusive, tolerant of a reversed range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let (a, b) = (self.start, self.end_or_start());
        date >= a.min(b) && date <= a.max(b)
    }
}
