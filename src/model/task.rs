use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual state of a scheduled task relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    InProgress,
    /// Progress reached 100%. Never reported as delayed.
    Complete,
    /// The end date has passed and progress is below 100%.
    Delayed,
}

/// A single row in the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Percent complete, 0..=100.
    #[serde(default)]
    pub progress: u8,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: String::new(),
            task_name: name.into(),
            department: String::new(),
            assignee: String::new(),
            start: Some(start),
            end: Some(end),
            progress: 0,
        }
    }

    /// A task without dates; shown as an "unscheduled" row.
    pub fn unscheduled(name: impl Into<String>) -> Self {
        Self {
            start: None,
            end: None,
            ..Self::new(name, NaiveDate::MIN, NaiveDate::MIN)
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_progress(mut self, progress: i64) -> Self {
        self.set_progress(progress);
        self
    }

    pub fn set_progress(&mut self, progress: i64) {
        self.progress = progress.clamp(0, 100) as u8;
    }

    /// The end date, falling back to the start for open-ended tasks.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.end.or(self.start)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// Completion is checked before lateness, so a finished task is never delayed.
    pub fn status_for(progress: u8, end: NaiveDate, today: NaiveDate) -> TaskStatus {
        if progress >= 100 {
            TaskStatus::Complete
        } else if today > end {
            TaskStatus::Delayed
        } else {
            TaskStatus::InProgress
        }
    }

    pub fn status(&self, today: NaiveDate) -> Option<TaskStatus> {
        self.effective_end()
            .map(|end| Self::status_for(self.progress, end, today))
    }

    /// Case-insensitive match on name, department, or assignee.
    pub fn matches_filter(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.task_name, &self.department, &self.assignee]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn complete_wins_over_delayed() {
        let today = ymd(2024, 7, 1);
        let end = ymd(2024, 6, 1);
        assert_eq!(Task::status_for(100, end, today), TaskStatus::Complete);
        assert_eq!(Task::status_for(99, end, today), TaskStatus::Delayed);
        assert_eq!(Task::status_for(0, today, today), TaskStatus::InProgress);
        assert_eq!(Task::status_for(100, ymd(2024, 8, 1), today), TaskStatus::Complete);
    }

    #[test]
    fn open_ended_task_uses_start_as_end() {
        let mut t = Task::new("Kickoff", ymd(2024, 5, 1), ymd(2024, 5, 3));
        t.end = None;
        assert_eq!(t.effective_end(), Some(ymd(2024, 5, 1)));
        assert_eq!(Task::unscheduled("Later").effective_end(), None);
    }

    #[test]
    fn progress_is_clamped() {
        let t = Task::new("x", ymd(2024, 1, 1), ymd(2024, 1, 2)).with_progress(250);
        assert_eq!(t.progress, 100);
        assert_eq!(t.with_progress(-5).progress, 0);
    }

    #[test]
    fn filter_checks_name_department_and_assignee() {
        let t = Task::new("API Integration", ymd(2024, 1, 1), ymd(2024, 1, 2))
            .with_department("Platform")
            .with_assignee("Choi");
        assert!(t.matches_filter("api"));
        assert!(t.matches_filter("PLAT"));
        assert!(t.matches_filter("cho"));
        assert!(t.matches_filter("   "));
        assert!(!t.matches_filter("design"));
    }

    #[test]
    fn serializes_with_camel_case_and_ymd_dates() {
        let t = Task::new("Design doc", ymd(2024, 5, 1), ymd(2024, 5, 9));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["taskName"], "Design doc");
        assert_eq!(json["start"], "2024-05-01");
        assert_eq!(json["end"], "2024-05-09");
    }
}
