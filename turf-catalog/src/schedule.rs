use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::slot::ShiftSlots;

/// One row of the business schedule: a date the venue deviates from its
/// normal operating calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub is_open: bool,
    pub notes: Option<String>,
}

/// Per-date open/closed calendar. Dates absent from the calendar are open.
#[derive(Debug, Default)]
pub struct BusinessCalendar {
    entries: HashMap<NaiveDate, ScheduleEntry>,
}

impl BusinessCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, entry: ScheduleEntry) {
        self.entries.insert(entry.date, entry);
    }

    pub fn close(&mut self, date: NaiveDate, notes: impl Into<String>) {
        self.set(ScheduleEntry {
            date,
            is_open: false,
            notes: Some(notes.into()),
        });
    }

    /// The closure entry for a date, if the venue is closed that day.
    pub fn closure(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.entries.get(&date).filter(|e| !e.is_open)
    }

    pub fn is_open(&self, date: NaiveDate) -> bool {
        self.closure(date).is_none()
    }
}

/// Result of a catalog query for one `(resource, date)` pair. A closed day
/// is reported explicitly so callers can tell "closed today" apart from an
/// empty slot list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayAvailability {
    Closed { closed: bool, notes: Option<String> },
    Open(Vec<ShiftSlots>),
}

impl DayAvailability {
    pub fn closed(notes: Option<String>) -> Self {
        Self::Closed { closed: true, notes }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn unknown_dates_are_open() {
        let calendar = BusinessCalendar::new();
        assert!(calendar.is_open(date("2025-06-01")));
    }

    #[test]
    fn closed_dates_report_their_notes() {
        let mut calendar = BusinessCalendar::new();
        calendar.close(date("2025-06-02"), "Eid holiday");

        assert!(!calendar.is_open(date("2025-06-02")));
        let entry = calendar.closure(date("2025-06-02")).unwrap();
        assert_eq!(entry.notes.as_deref(), Some("Eid holiday"));
        assert!(calendar.is_open(date("2025-06-03")));
    }

    #[test]
    fn explicitly_open_entries_do_not_close_the_day() {
        let mut calendar = BusinessCalendar::new();
        calendar.set(ScheduleEntry {
            date: date("2025-06-05"),
            is_open: true,
            notes: Some("extended hours".to_string()),
        });
        assert!(calendar.is_open(date("2025-06-05")));
    }
}
