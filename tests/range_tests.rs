use chrono::NaiveDate;

use gantt_planner::chart::resolve_range;
use gantt_planner::model::{RangePadding, Task, Vacation, ViewMode};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn day_view_pads_the_data_extent() {
    let tasks = vec![Task::new("Requirements", ymd(2024, 5, 1), ymd(2024, 5, 9))];
    let window = resolve_range(&tasks, &[], ViewMode::Day, RangePadding::new(15, 15), ymd(2024, 1, 1));
    assert_eq!(window.min, ymd(2024, 4, 16));
    assert_eq!(window.max, ymd(2024, 5, 24));
    assert_eq!(window.total_days, 39);
}

#[test]
fn vacations_widen_the_window() {
    let tasks = vec![Task::new("Build", ymd(2024, 5, 1), ymd(2024, 5, 9))];
    let vacations = vec![Vacation::new("Summer", ymd(2024, 7, 1), Some(ymd(2024, 7, 5)))];
    let window = resolve_range(&tasks, &vacations, ViewMode::Day, RangePadding::new(0, 0), ymd(2024, 1, 1));
    assert_eq!(window.min, ymd(2024, 5, 1));
    assert_eq!(window.max, ymd(2024, 7, 5));
}

#[test]
fn unscheduled_only_project_centres_on_today() {
    let tasks = vec![Task::unscheduled("Someday")];
    let today = ymd(2024, 3, 15);
    let window = resolve_range(&tasks, &[], ViewMode::Day, RangePadding::new(0, 0), today);
    assert!(window.contains(today));
    assert!(window.min < today && window.max > today);
}

#[test]
fn week_and_month_views_snap_to_boundaries() {
    let tasks = vec![Task::new("Build", ymd(2024, 5, 8), ymd(2024, 5, 22))];
    let today = ymd(2024, 1, 1);

    let week = resolve_range(&tasks, &[], ViewMode::Week, RangePadding::new(0, 0), today);
    assert_eq!(week.min, ymd(2024, 5, 6)); // Monday
    assert_eq!(week.max, ymd(2024, 5, 26)); // Sunday
    assert_eq!(week.total_days % 7, 0);

    let month = resolve_range(&tasks, &[], ViewMode::Month, RangePadding::new(1, 1), today);
    assert_eq!(month.min, ymd(2024, 4, 1));
    assert_eq!(month.max, ymd(2024, 6, 30));
}

#[test]
fn window_is_never_empty_or_inverted() {
    let today = ymd(2024, 6, 1);
    let samples = [
        vec![],
        vec![Task::new("Same day", ymd(2024, 2, 29), ymd(2024, 2, 29))],
        // End before start must still yield a sane window.
        vec![Task::new("Backwards", ymd(2024, 9, 10), ymd(2024, 9, 1))],
        vec![
            Task::new("A", ymd(2023, 12, 30), ymd(2024, 1, 2)),
            Task::unscheduled("B"),
        ],
    ];

    for tasks in &samples {
        for mode in ViewMode::ALL {
            for (before, after) in [(0, 0), (3, 0), (0, 3), (-5, -5), (400, 400)] {
                let window = resolve_range(tasks, &[], mode, RangePadding::new(before, after), today);
                assert!(window.total_days >= 1, "{mode:?} {before}/{after}");
                assert!(window.min <= window.max, "{mode:?} {before}/{after}");
                assert_eq!(
                    (window.max - window.min).num_days() as usize + 1,
                    window.total_days
                );
            }
        }
    }
}
