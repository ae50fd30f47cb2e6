//! Composition of one chart frame: header tiers, grid, overlays and bars.
//!
//! Everything here is plain geometry in content coordinates (origin at the top
//! left of the scrollable timeline, header included). The egui painter only
//! has to walk the plan; no date math happens at paint time.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::drag::DragPreview;
use super::layout::ColumnLayout;
use super::range::DateWindow;
use super::virtualize::IndexWindow;
use crate::dates;
use crate::model::{Task, TaskStatus, Vacation, ViewMode};

pub const ROW_HEIGHT: f32 = 56.0;
pub const HEADER_TOP_HEIGHT: f32 = 36.0;
pub const HEADER_BOTTOM_HEIGHT: f32 = 32.0;
pub const HEADER_HEIGHT: f32 = HEADER_TOP_HEIGHT + HEADER_BOTTOM_HEIGHT;

/// Vertical placement of vacation titles.
const VACATION_LABEL_TOP: f32 = 4.0;
const VACATION_TODAY_LABEL_TOP: f32 = 24.0;
const VACATION_LABEL_STACK: f32 = 18.0;

/// One cell of a header tier, spanning `span` day columns.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub first_column: usize,
    pub span: usize,
    pub label: Option<String>,
    pub weekend: bool,
    pub month_start: bool,
}

impl HeaderCell {
    pub fn x(&self, col_width: f32) -> f32 {
        self.first_column as f32 * col_width
    }

    pub fn width(&self, col_width: f32) -> f32 {
        self.span as f32 * col_width
    }
}

/// Two-tier header: coarse groups over fine units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderPlan {
    pub top: Vec<HeaderCell>,
    pub bottom: Vec<HeaderCell>,
}

/// Background shading for one visible day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridColumn {
    pub column: usize,
    pub date: NaiveDate,
    pub weekend: bool,
    pub month_start: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VacationBand {
    pub id: Uuid,
    pub title: String,
    pub left: f32,
    pub width: f32,
    pub label_top: f32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodayMarker {
    pub date: NaiveDate,
    /// Center of today's column.
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: TaskStatus,
    pub progress: u8,
    /// Showing live drag dates rather than the stored ones.
    pub dragging: bool,
}

impl BarGeometry {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Bar(BarGeometry),
    /// No start date.
    Unscheduled,
    /// Duration is zero or negative.
    DateError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub index: usize,
    pub task_id: Uuid,
    pub name: String,
    pub department: String,
    pub assignee: String,
    pub kind: RowKind,
}

impl TaskRow {
    /// Top of the row in content coordinates.
    pub fn y(&self) -> f32 {
        HEADER_HEIGHT + self.index as f32 * ROW_HEIGHT
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub view_mode: ViewMode,
    pub window: DateWindow,
    pub layout: ColumnLayout,
    pub row_count: usize,
    pub rows: IndexWindow,
    pub columns: IndexWindow,
    pub header: HeaderPlan,
    pub grid: Vec<GridColumn>,
    pub vacations: Vec<VacationBand>,
    pub today: Option<TodayMarker>,
    pub task_rows: Vec<TaskRow>,
    pub export: bool,
    pub interactive: bool,
}

impl ChartPlan {
    pub fn content_width(&self) -> f32 {
        self.layout.chart_width
    }

    pub fn content_height(&self) -> f32 {
        HEADER_HEIGHT + self.row_count as f32 * ROW_HEIGHT
    }

    pub fn row_spacers(&self) -> (f32, f32) {
        (
            self.rows.spacer_before(ROW_HEIGHT),
            self.rows.spacer_after(self.row_count, ROW_HEIGHT),
        )
    }

    pub fn column_spacers(&self) -> (f32, f32) {
        let cw = self.layout.col_width;
        (
            self.columns.spacer_before(cw),
            self.columns.spacer_after(self.window.total_days, cw),
        )
    }
}

/// Vertical offset applied to the frozen label pane for a given scroll.
/// Export renders in natural flow, so it is never offset.
pub fn frozen_pane_offset(scroll_top: f32, export: bool) -> f32 {
    if export {
        0.0
    } else {
        -scroll_top.max(0.0)
    }
}

/// Inputs that vary per frame.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    pub tasks: &'a [Task],
    pub vacations: &'a [Vacation],
    pub view_mode: ViewMode,
    pub today: NaiveDate,
    pub window: DateWindow,
    pub layout: ColumnLayout,
    pub rows: IndexWindow,
    pub columns: IndexWindow,
    pub preview: Option<DragPreview>,
    pub export: bool,
    pub interactive: bool,
}

pub fn build_plan(input: PlanInput<'_>) -> ChartPlan {
    let total_days = input.window.total_days;
    let (rows, columns) = if input.export {
        (IndexWindow::full(input.tasks.len()), IndexWindow::full(total_days))
    } else {
        (input.rows.clamped(input.tasks.len()), input.columns.clamped(total_days))
    };

    ChartPlan {
        view_mode: input.view_mode,
        window: input.window,
        layout: input.layout,
        row_count: input.tasks.len(),
        rows,
        columns,
        header: build_header(input.view_mode, &input.window, columns),
        grid: build_grid(&input.window, columns),
        vacations: build_vacations(input.vacations, &input.window, input.layout, input.today),
        today: build_today(&input.window, input.layout, input.today),
        task_rows: build_rows(&input, rows),
        export: input.export,
        interactive: input.interactive && !input.export,
    }
}

/// Split the whole window into runs of days sharing `key`.
fn runs<K: PartialEq>(window: &DateWindow, key: impl Fn(NaiveDate) -> K) -> Vec<(usize, usize, NaiveDate)> {
    let mut out: Vec<(usize, usize, NaiveDate)> = Vec::new();
    let mut current: Option<K> = None;
    for column in 0..window.total_days {
        let date = window.date_at(column);
        let k = key(date);
        if current.as_ref() == Some(&k) {
            if let Some(run) = out.last_mut() {
                run.1 += 1;
            }
        } else {
            out.push((column, 1, date));
            current = Some(k);
        }
    }
    out
}

fn group_cells(runs: Vec<(usize, usize, NaiveDate)>, label: impl Fn(NaiveDate) -> String) -> Vec<HeaderCell> {
    runs.into_iter()
        .map(|(first_column, span, date)| HeaderCell {
            first_column,
            span,
            label: Some(label(date)),
            weekend: false,
            month_start: false,
        })
        .collect()
}

fn build_header(mode: ViewMode, window: &DateWindow, columns: IndexWindow) -> HeaderPlan {
    let month_key = |d: NaiveDate| (d.year(), d.month());
    match mode {
        ViewMode::Day | ViewMode::Week => {
            let top = group_cells(runs(window, month_key), |d| d.format("%b %Y").to_string());
            let bottom = columns
                .range()
                .map(|column| {
                    let date = window.date_at(column);
                    let label = match mode {
                        ViewMode::Day => Some(date.format("%-d (%a)").to_string()),
                        _ => (dates::monday_index(date) == 0).then(|| {
                            format!("{}/{} (W{})", date.month(), date.day(), dates::week_of_year(date))
                        }),
                    };
                    HeaderCell {
                        first_column: column,
                        span: 1,
                        label,
                        weekend: dates::is_weekend(date),
                        month_start: date.day() == 1,
                    }
                })
                .collect();
            HeaderPlan { top, bottom }
        }
        ViewMode::Month => HeaderPlan {
            top: group_cells(runs(window, |d| d.year()), |d| d.year().to_string()),
            bottom: group_cells(runs(window, month_key), |d| d.format("%b").to_string()),
        },
    }
}

fn build_grid(window: &DateWindow, columns: IndexWindow) -> Vec<GridColumn> {
    columns
        .range()
        .map(|column| {
            let date = window.date_at(column);
            GridColumn {
                column,
                date,
                weekend: dates::is_weekend(date),
                month_start: date.day() == 1,
            }
        })
        .collect()
}

fn build_vacations(
    vacations: &[Vacation],
    window: &DateWindow,
    layout: ColumnLayout,
    today: NaiveDate,
) -> Vec<VacationBand> {
    let mut today_stack = 0;
    vacations
        .iter()
        .filter_map(|v| {
            let (start, end) = (v.start, v.end_or_start());
            let duration = (end - start).num_days() + 1;
            if duration <= 0 {
                return None;
            }
            let label_top = if v.contains(today) {
                let top = VACATION_TODAY_LABEL_TOP + today_stack as f32 * VACATION_LABEL_STACK;
                today_stack += 1;
                top
            } else {
                VACATION_LABEL_TOP
            };
            Some(VacationBand {
                id: v.id,
                title: v.title.clone(),
                left: layout.x_of(window.offset_of(start)),
                width: duration as f32 * layout.col_width,
                label_top,
                start,
                end,
            })
        })
        .collect()
}

fn build_today(window: &DateWindow, layout: ColumnLayout, today: NaiveDate) -> Option<TodayMarker> {
    window.contains(today).then(|| TodayMarker {
        date: today,
        x: (window.offset_of(today) as f32 + 0.5) * layout.col_width,
    })
}

fn build_rows(input: &PlanInput<'_>, rows: IndexWindow) -> Vec<TaskRow> {
    let cw = input.layout.col_width;
    input.tasks[rows.range()]
        .iter()
        .zip(rows.range())
        .map(|(task, index)| {
            let preview = input.preview.filter(|p| p.task_id == task.id);
            let dates = match preview {
                Some(p) => Some((p.start, p.end)),
                None => task.start.map(|s| (s, task.end.unwrap_or(s))),
            };
            let kind = match dates {
                None => RowKind::Unscheduled,
                Some((start, end)) => {
                    let duration = (end - start).num_days() + 1;
                    if duration <= 0 {
                        RowKind::DateError
                    } else {
                        RowKind::Bar(BarGeometry {
                            left: input.window.offset_of(start) as f32 * cw,
                            width: duration as f32 * cw,
                            start,
                            end,
                            status: Task::status_for(task.progress, end, input.today),
                            progress: task.progress,
                            dragging: preview.is_some(),
                        })
                    }
                }
            };
            TaskRow {
                index,
                task_id: task.id,
                name: task.task_name.clone(),
                department: task.department.clone(),
                assignee: task.assignee.clone(),
                kind,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::drag::DragMode;
    use crate::chart::layout::LayoutInput;
    use crate::chart::range::resolve_range;
    use crate::model::RangePadding;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan_for(tasks: &[Task], vacations: &[Vacation], mode: ViewMode, today: NaiveDate) -> ChartPlan {
        let window = resolve_range(tasks, vacations, mode, RangePadding::default(), today);
        let layout = ColumnLayout::resolve(LayoutInput {
            view_mode: mode,
            zoom: 1.0,
            fit_enabled: false,
            fit_pages: 1,
            total_days: window.total_days,
            viewport_width: None,
        });
        build_plan(PlanInput {
            tasks,
            vacations,
            view_mode: mode,
            today,
            window,
            layout,
            rows: IndexWindow::full(tasks.len()),
            columns: IndexWindow::full(window.total_days),
            preview: None,
            export: false,
            interactive: true,
        })
    }

    #[test]
    fn day_header_groups_months_and_labels_days() {
        let tasks = vec![Task::new("a", ymd(2024, 4, 29), ymd(2024, 5, 2))];
        let plan = plan_for(&tasks, &[], ViewMode::Day, ymd(2024, 4, 30));
        let top: Vec<_> = plan.header.top.iter().map(|c| (c.label.clone().unwrap(), c.span)).collect();
        assert_eq!(top, [("Apr 2024".to_string(), 2), ("May 2024".to_string(), 2)]);
        assert_eq!(plan.header.bottom[0].label.as_deref(), Some("29 (Mon)"));
        assert!(plan.header.bottom[2].month_start);
    }

    #[test]
    fn week_header_labels_mondays_only() {
        let tasks = vec![Task::new("a", ymd(2024, 5, 1), ymd(2024, 5, 9))];
        let plan = plan_for(&tasks, &[], ViewMode::Week, ymd(2024, 5, 1));
        let labels: Vec<_> = plan
            .header
            .bottom
            .iter()
            .filter_map(|c| c.label.clone())
            .collect();
        assert_eq!(labels, ["4/29 (W18)", "5/6 (W19)"]);
        assert_eq!(plan.header.bottom.len(), 14);
        assert!(plan.header.bottom[5].weekend);
    }

    #[test]
    fn month_header_groups_years_then_months() {
        let tasks = vec![Task::new("a", ymd(2024, 12, 10), ymd(2025, 1, 5))];
        let plan = plan_for(&tasks, &[], ViewMode::Month, ymd(2024, 12, 10));
        let top: Vec<_> = plan.header.top.iter().map(|c| c.label.clone().unwrap()).collect();
        assert_eq!(top, ["2024", "2025"]);
        let bottom: Vec<_> = plan.header.bottom.iter().map(|c| (c.label.clone().unwrap(), c.span)).collect();
        assert_eq!(bottom, [("Dec".to_string(), 31), ("Jan".to_string(), 31)]);
    }

    #[test]
    fn rows_classify_placeholders() {
        let mut open = Task::new("open", ymd(2024, 5, 3), ymd(2024, 5, 3));
        open.end = None;
        let mut broken = Task::new("broken", ymd(2024, 5, 5), ymd(2024, 5, 1));
        broken.progress = 10;
        let tasks = vec![
            Task::new("ok", ymd(2024, 5, 1), ymd(2024, 5, 2)),
            Task::unscheduled("later"),
            broken,
            open,
        ];
        let plan = plan_for(&tasks, &[], ViewMode::Day, ymd(2024, 5, 1));
        assert!(matches!(plan.task_rows[0].kind, RowKind::Bar(_)));
        assert_eq!(plan.task_rows[1].kind, RowKind::Unscheduled);
        assert_eq!(plan.task_rows[2].kind, RowKind::DateError);
        match &plan.task_rows[3].kind {
            RowKind::Bar(bar) => assert_eq!(bar.width, 60.0),
            other => panic!("expected a bar, got {other:?}"),
        }
    }

    #[test]
    fn bars_are_positioned_by_offset_and_duration() {
        let tasks = vec![
            Task::new("first", ymd(2024, 5, 1), ymd(2024, 5, 1)),
            Task::new("second", ymd(2024, 5, 3), ymd(2024, 5, 6)).with_progress(100),
        ];
        let plan = plan_for(&tasks, &[], ViewMode::Day, ymd(2024, 6, 1));
        let RowKind::Bar(bar) = &plan.task_rows[1].kind else {
            panic!("expected bar");
        };
        assert_eq!(bar.left, 120.0);
        assert_eq!(bar.width, 240.0);
        assert_eq!(bar.status, TaskStatus::Complete);
        let RowKind::Bar(first) = &plan.task_rows[0].kind else {
            panic!("expected bar");
        };
        assert_eq!(first.status, TaskStatus::Delayed);
        assert_eq!(plan.task_rows[1].y(), HEADER_HEIGHT + ROW_HEIGHT);
    }

    #[test]
    fn drag_preview_overrides_stored_dates() {
        let tasks = vec![
            Task::new("a", ymd(2024, 5, 1), ymd(2024, 5, 2)),
            Task::new("b", ymd(2024, 5, 1), ymd(2024, 5, 10)),
        ];
        let window = resolve_range(&tasks, &[], ViewMode::Day, RangePadding::default(), ymd(2024, 5, 1));
        let layout = ColumnLayout {
            col_width: 10.0,
            chart_width: 100.0,
        };
        let plan = build_plan(PlanInput {
            tasks: &tasks,
            vacations: &[],
            view_mode: ViewMode::Day,
            today: ymd(2024, 5, 1),
            window,
            layout,
            rows: IndexWindow::full(2),
            columns: IndexWindow::full(10),
            preview: Some(DragPreview {
                task_id: tasks[0].id,
                mode: DragMode::Move,
                start: ymd(2024, 5, 4),
                end: ymd(2024, 5, 5),
            }),
            export: false,
            interactive: true,
        });
        let RowKind::Bar(bar) = &plan.task_rows[0].kind else {
            panic!("expected bar");
        };
        assert!(bar.dragging);
        assert_eq!(bar.left, 30.0);
        let RowKind::Bar(other) = &plan.task_rows[1].kind else {
            panic!("expected bar");
        };
        assert!(!other.dragging);
    }

    #[test]
    fn vacations_overlapping_today_stack_their_labels() {
        let today = ymd(2024, 5, 10);
        let vacations = vec![
            Vacation::new("Early", ymd(2024, 5, 1), Some(ymd(2024, 5, 2))),
            Vacation::new("A", ymd(2024, 5, 9), Some(ymd(2024, 5, 11))),
            Vacation::new("B", ymd(2024, 5, 10), None),
        ];
        let plan = plan_for(&[], &vacations, ViewMode::Day, today);
        let tops: Vec<f32> = plan.vacations.iter().map(|v| v.label_top).collect();
        assert_eq!(tops, [4.0, 24.0, 42.0]);
        assert_eq!(plan.vacations[1].width, 180.0);
    }

    #[test]
    fn today_marker_only_inside_the_window() {
        let tasks = vec![Task::new("a", ymd(2024, 5, 1), ymd(2024, 5, 9))];
        let inside = plan_for(&tasks, &[], ViewMode::Day, ymd(2024, 5, 3));
        assert_eq!(inside.today.unwrap().x, 2.5 * 60.0);
        let outside = plan_for(&tasks, &[], ViewMode::Day, ymd(2025, 1, 1));
        assert!(outside.today.is_none());
    }

    #[test]
    fn frozen_pane_tracks_scroll_except_in_export() {
        assert_eq!(frozen_pane_offset(120.0, false), -120.0);
        assert_eq!(frozen_pane_offset(120.0, true), 0.0);
    }
}
