//! Resolves the visible date window of the time axis.

use chrono::NaiveDate;

use crate::dates::{self, days_between};
use crate::model::{RangePadding, Task, Vacation, ViewMode};

/// Inclusive date window covered by the chart grid.
///
/// The grid is day-granular in every view mode; Week and Month only change
/// header grouping and column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
    /// Number of day columns, always >= 1.
    pub total_days: usize,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date <= self.max
    }

    /// Column index of `date` relative to `min` (may be negative or past the end).
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.min).num_days()
    }

    pub fn date_at(&self, column: usize) -> NaiveDate {
        dates::shift_days(self.min, column as i64)
    }
}

fn task_dates(task: &Task) -> impl Iterator<Item = NaiveDate> {
    [task.start, task.effective_end()].into_iter().flatten()
}

fn vacation_dates(vacation: &Vacation) -> impl Iterator<Item = NaiveDate> {
    [vacation.start, vacation.end_or_start()].into_iter()
}

/// Compute the window from data extents, snapped and padded per view mode.
///
/// With no dated records the window is one month either side of `today`.
pub fn resolve_range(
    tasks: &[Task],
    vacations: &[Vacation],
    view_mode: ViewMode,
    padding: RangePadding,
    today: NaiveDate,
) -> DateWindow {
    let collected = tasks
        .iter()
        .flat_map(task_dates)
        .chain(vacations.iter().flat_map(vacation_dates));

    let (mut min, mut max) = collected.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(d), hi.max(d)),
            None => (d, d),
        })
    })
    .unwrap_or_else(|| (dates::shift_months(today, -1), dates::shift_months(today, 1)));

    match view_mode {
        ViewMode::Day => {}
        ViewMode::Week => {
            min = dates::shift_days(min, -dates::monday_index(min));
            max = dates::shift_days(max, 6 - dates::monday_index(max));
        }
        ViewMode::Month => {
            min = dates::first_of_month(min);
            max = dates::last_of_month(max);
        }
    }

    let padding = padding.clamped();
    match view_mode {
        ViewMode::Day => {
            min = dates::shift_days(min, -padding.before);
            max = dates::shift_days(max, padding.after);
        }
        ViewMode::Week => {
            min = dates::shift_days(min, -padding.before.saturating_mul(7));
            max = dates::shift_days(max, padding.after.saturating_mul(7));
        }
        ViewMode::Month => {
            min = dates::first_of_month(dates::shift_months(min, -padding.before));
            max = dates::last_of_month(dates::shift_months(dates::first_of_month(max), padding.after));
        }
    }

    let span = days_between(&min, &max).unwrap_or(0).max(0);
    DateWindow {
        min,
        max: max.max(min),
        total_days: span as usize + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_task() -> Vec<Task> {
        vec![Task::new("Requirements", ymd(2024, 5, 1), ymd(2024, 5, 9))]
    }

    #[test]
    fn day_mode_pads_in_days() {
        let w = resolve_range(&one_task(), &[], ViewMode::Day, RangePadding::new(15, 15), ymd(2030, 1, 1));
        assert_eq!(w.min, ymd(2024, 4, 16));
        assert_eq!(w.max, ymd(2024, 5, 24));
        assert_eq!(w.total_days, 39);
    }

    #[test]
    fn week_mode_snaps_to_monday_and_sunday() {
        // 2024-05-01 is a Wednesday, 2024-05-09 a Thursday.
        let w = resolve_range(&one_task(), &[], ViewMode::Week, RangePadding::new(0, 0), ymd(2030, 1, 1));
        assert_eq!(w.min, ymd(2024, 4, 29));
        assert_eq!(w.max, ymd(2024, 5, 12));
        assert_eq!(w.total_days, 14);

        let padded = resolve_range(&one_task(), &[], ViewMode::Week, RangePadding::new(2, 1), ymd(2030, 1, 1));
        assert_eq!(padded.min, ymd(2024, 4, 15));
        assert_eq!(padded.max, ymd(2024, 5, 19));
    }

    #[test]
    fn month_mode_snaps_to_month_edges() {
        let tasks = vec![Task::new("x", ymd(2024, 1, 31), ymd(2024, 2, 10))];
        let w = resolve_range(&tasks, &[], ViewMode::Month, RangePadding::new(1, 1), ymd(2030, 1, 1));
        assert_eq!(w.min, ymd(2023, 12, 1));
        assert_eq!(w.max, ymd(2024, 3, 31));
        assert_eq!(w.total_days, 122);
    }

    #[test]
    fn empty_input_defaults_around_today() {
        let today = ymd(2024, 3, 15);
        let w = resolve_range(&[], &[], ViewMode::Day, RangePadding::default(), today);
        assert_eq!(w.min, ymd(2024, 2, 15));
        assert_eq!(w.max, ymd(2024, 4, 15));
        assert!(w.contains(today));
    }

    #[test]
    fn vacations_and_open_ended_tasks_extend_the_range() {
        let mut t = Task::new("open", ymd(2024, 5, 1), ymd(2024, 5, 1));
        t.end = None;
        let tasks = vec![t, Task::unscheduled("later")];
        let vacations = vec![Vacation::new("Trip", ymd(2024, 5, 20), Some(ymd(2024, 5, 22)))];
        let w = resolve_range(&tasks, &vacations, ViewMode::Day, RangePadding::default(), ymd(2030, 1, 1));
        assert_eq!(w.min, ymd(2024, 5, 1));
        assert_eq!(w.max, ymd(2024, 5, 22));
        assert_eq!(w.total_days, 22);
    }

    #[test]
    fn negative_padding_is_ignored() {
        let w = resolve_range(
            &one_task(),
            &[],
            ViewMode::Day,
            RangePadding { before: -10, after: -10 },
            ymd(2030, 1, 1),
        );
        assert_eq!(w.min, ymd(2024, 5, 1));
        assert_eq!(w.total_days, 9);
    }
}
