use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::{ChartSettings, FitSettings, PerViewMode, RangePadding, ViewMode};
use super::task::Task;
use super::vacation::Vacation;

/// Sort direction for [`Project::sort_by_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Why a vacation could not be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacationRejection {
    EndBeforeStart,
}

/// A schedule: ordered tasks, vacation periods, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub vacations: Vec<Vacation>,
    /// Per-mode chart padding saved alongside the schedule.
    #[serde(default, rename = "rangePadding", skip_serializing_if = "Option::is_none")]
    pub range_padding: Option<PerViewMode<RangePadding>>,
    #[serde(default, rename = "fitSettings", skip_serializing_if = "Option::is_none")]
    pub fit_settings: Option<PerViewMode<FitSettings>>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: Vec::new(),
            vacations: Vec::new(),
            range_padding: None,
            fit_settings: None,
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Clamp everything that can arrive out of range from a file: task
    /// progress, view settings, and vacations that end before they start
    /// (those are dropped). Returns the number of vacations removed.
    pub fn sanitize(&mut self) -> usize {
        for task in &mut self.tasks {
            task.set_progress(task.progress as i64);
        }
        if let Some(padding) = &mut self.range_padding {
            for mode in ViewMode::ALL {
                let p = padding.get_mut(mode);
                *p = p.clamped();
            }
        }
        if let Some(fit) = &mut self.fit_settings {
            for mode in ViewMode::ALL {
                let f = fit.get_mut(mode);
                *f = f.clamped();
            }
        }
        let before = self.vacations.len();
        self.vacations
            .retain(|v| v.end.map_or(true, |end| end >= v.start));
        before - self.vacations.len()
    }

    /// Copy the chart's per-mode padding and fit into the project.
    pub fn remember_view(&mut self, chart: &ChartSettings) {
        self.range_padding = Some(chart.range_padding);
        self.fit_settings = Some(chart.fit);
    }

    /// Restore saved per-mode padding and fit into `chart`, clamped.
    /// Returns false when the project carries neither.
    pub fn apply_view(&self, chart: &mut ChartSettings) -> bool {
        if self.range_padding.is_none() && self.fit_settings.is_none() {
            return false;
        }
        if let Some(padding) = self.range_padding {
            chart.range_padding = padding;
        }
        if let Some(fit) = self.fit_settings {
            chart.fit = fit;
        }
        chart.sanitize();
        true
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.touch();
    }

    /// Replace the task with the same id. Returns false if it no longer exists.
    pub fn update_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Move a task one slot up (`-1`) or down (`+1`), stopping at the ends.
    pub fn move_task(&mut self, id: Uuid, direction: i64) {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return;
        };
        let last = self.tasks.len() as i64 - 1;
        let next = (idx as i64 + direction).clamp(0, last) as usize;
        if next != idx {
            let task = self.tasks.remove(idx);
            self.tasks.insert(next, task);
            self.touch();
        }
    }

    /// Move a task to a 1-based position, clamped to the list.
    pub fn move_task_to_position(&mut self, id: Uuid, position: i64) {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return;
        };
        let last = self.tasks.len() as i64 - 1;
        let next = (position - 1).clamp(0, last) as usize;
        if next != idx {
            let task = self.tasks.remove(idx);
            self.tasks.insert(next, task);
            self.touch();
        }
    }

    /// Stable sort by start date; unscheduled tasks always go last.
    pub fn sort_by_start(&mut self, order: SortOrder) {
        self.tasks.sort_by(|a, b| match (a.start, b.start) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(x), Some(y)) => match order {
                SortOrder::Ascending => x.cmp(&y),
                SortOrder::Descending => y.cmp(&x),
            },
        });
        self.touch();
    }

    /// Apply dates committed by a chart drag.
    pub fn apply_date_change(&mut self, id: Uuid, start: NaiveDate, end: NaiveDate) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.start = Some(start);
                task.end = Some(end);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn add_vacation(
        &mut self,
        title: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Uuid, VacationRejection> {
        if end.is_some_and(|end| end < start) {
            return Err(VacationRejection::EndBeforeStart);
        }
        let vacation = Vacation::new(title, start, Some(end.unwrap_or(start)));
        let id = vacation.id;
        self.vacations.push(vacation);
        self.touch();
        Ok(id)
    }

    pub fn delete_vacation(&mut self, id: Uuid) -> bool {
        let before = self.vacations.len();
        self.vacations.retain(|v| v.id != id);
        let removed = self.vacations.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Tasks matching the search box, in list order.
    pub fn filtered_tasks(&self, needle: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches_filter(needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(p: &Project) -> Vec<&str> {
        p.tasks.iter().map(|t| t.task_name.as_str()).collect()
    }

    fn sample() -> Project {
        let mut p = Project::new("Demo");
        p.add_task(Task::new("b", ymd(2024, 5, 10), ymd(2024, 5, 12)));
        p.add_task(Task::unscheduled("none"));
        p.add_task(Task::new("a", ymd(2024, 5, 1), ymd(2024, 5, 2)));
        p.add_task(Task::new("c", ymd(2024, 6, 1), ymd(2024, 6, 2)));
        p
    }

    #[test]
    fn sort_puts_unscheduled_last() {
        let mut p = sample();
        p.sort_by_start(SortOrder::Ascending);
        assert_eq!(names(&p), ["a", "b", "c", "none"]);
        p.sort_by_start(SortOrder::Descending);
        assert_eq!(names(&p), ["c", "b", "a", "none"]);
    }

    #[test]
    fn move_stops_at_edges() {
        let mut p = sample();
        let first = p.tasks[0].id;
        p.move_task(first, -1);
        assert_eq!(names(&p), ["b", "none", "a", "c"]);
        p.move_task(first, 1);
        assert_eq!(names(&p), ["none", "b", "a", "c"]);
        p.move_task_to_position(first, 99);
        assert_eq!(names(&p), ["none", "a", "c", "b"]);
        p.move_task_to_position(first, 0);
        assert_eq!(names(&p), ["b", "none", "a", "c"]);
    }

    #[test]
    fn vacation_validation() {
        let mut p = Project::default();
        assert_eq!(
            p.add_vacation("Trip", ymd(2024, 5, 3), Some(ymd(2024, 5, 1))),
            Err(VacationRejection::EndBeforeStart)
        );
        let id = p.add_vacation("  ", ymd(2024, 5, 3), None).unwrap();
        assert_eq!(p.vacations[0].title, "Vacation");
        assert_eq!(p.vacations[0].end, Some(ymd(2024, 5, 3)));
        assert!(p.delete_vacation(id));
        assert!(p.vacations.is_empty());
    }

    #[test]
    fn sanitize_clamps_progress_and_drops_inverted_vacations() {
        let mut p = sample();
        p.tasks[0].progress = 150;
        p.vacations.push(Vacation::new("Backwards", ymd(2024, 5, 9), Some(ymd(2024, 5, 1))));
        p.vacations.push(Vacation::new("Single", ymd(2024, 5, 9), None));
        p.range_padding = Some(PerViewMode {
            day: RangePadding { before: -2, after: 3 },
            week: RangePadding::default(),
            month: RangePadding::default(),
        });

        assert_eq!(p.sanitize(), 1);
        assert_eq!(p.tasks[0].progress, 100);
        assert_eq!(p.vacations.len(), 1);
        assert_eq!(p.vacations[0].title, "Single");
        assert_eq!(p.range_padding.unwrap().day, RangePadding::new(0, 3));
    }

    #[test]
    fn view_settings_travel_with_the_project() {
        let mut chart = ChartSettings::default();
        let mut p = sample();
        assert!(!p.apply_view(&mut chart));

        chart.view_mode = ViewMode::Week;
        chart.set_padding(4, 5);
        chart.set_fit(true, 3);
        p.remember_view(&chart);

        let mut other = ChartSettings::default();
        other.view_mode = ViewMode::Week;
        assert!(p.apply_view(&mut other));
        assert_eq!(other.padding(), RangePadding::new(4, 5));
        assert_eq!(other.fit_settings(), FitSettings { enabled: true, pages: 3 });
    }

    #[test]
    fn date_change_and_crud() {
        let mut p = sample();
        let id = p.tasks[0].id;
        assert!(p.apply_date_change(id, ymd(2024, 5, 11), ymd(2024, 5, 13)));
        assert_eq!(p.task(id).unwrap().start, Some(ymd(2024, 5, 11)));

        let mut edited = p.task(id).unwrap().clone();
        edited.task_name = "renamed".into();
        assert!(p.update_task(edited));
        assert_eq!(p.task(id).unwrap().task_name, "renamed");

        assert!(p.delete_task(id));
        assert!(!p.delete_task(id));
        assert_eq!(p.filtered_tasks("").len(), 3);
        assert_eq!(p.filtered_tasks("NON").len(), 1);
    }
}
