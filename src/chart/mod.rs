//! Timeline geometry and interaction state, independent of the UI toolkit.

pub mod drag;
pub mod layout;
pub mod plan;
pub mod range;
pub mod virtualize;

pub use drag::{CaptureGuard, DateChange, DragController, DragMode, DragPreview, PointerPress};
pub use layout::{ColumnLayout, LayoutInput};
pub use plan::{build_plan, ChartPlan, PlanInput, RowKind, TaskRow, HEADER_HEIGHT, ROW_HEIGHT};
pub use range::{resolve_range, DateWindow};
pub use virtualize::{IndexWindow, ScrollMetrics, Virtualizer, WindowParams};

use chrono::NaiveDate;

use crate::model::{RenderConfig, Task, Vacation};

/// Id of the interactive chart on the main screen.
pub const MAIN_CHART_ID: &str = "gantt-main";
/// Id of the chart rendered for print/export. Must stay stable.
pub const EXPORT_CHART_ID: &str = "gantt-export-target";

/// Data for one render.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub tasks: &'a [Task],
    pub vacations: &'a [Vacation],
    pub config: RenderConfig,
    pub today: NaiveDate,
    /// Whether date changes will be accepted. Without it bars are display-only.
    pub editable: bool,
}

/// Per-chart state that survives between frames.
#[derive(Debug)]
pub struct ChartState {
    export: bool,
    drag: DragController,
    virtualizer: Option<Virtualizer>,
}

impl ChartState {
    pub fn interactive() -> Self {
        Self {
            export: false,
            drag: DragController::new(),
            virtualizer: None,
        }
    }

    /// Static rendering: every row and column, no drags.
    pub fn export() -> Self {
        let mut drag = DragController::new();
        drag.set_enabled(false);
        Self {
            export: true,
            drag,
            virtualizer: None,
        }
    }

    pub fn is_export(&self) -> bool {
        self.export
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragController {
        &mut self.drag
    }

    /// Resolve range, column width and windows, then compose the frame.
    /// `metrics` is `None` until the viewport has been measured.
    pub fn plan(&mut self, input: &ChartInput<'_>, metrics: Option<ScrollMetrics>) -> ChartPlan {
        let config = input.config;
        let window = resolve_range(
            input.tasks,
            input.vacations,
            config.view_mode,
            config.range_padding,
            input.today,
        );
        let layout = ColumnLayout::resolve(LayoutInput {
            view_mode: config.view_mode,
            zoom: config.zoom,
            fit_enabled: config.fit_enabled,
            fit_pages: config.fit_pages,
            total_days: window.total_days,
            viewport_width: metrics.map(|m| m.viewport_width),
        });

        let params = WindowParams {
            row_count: input.tasks.len(),
            row_height: ROW_HEIGHT,
            header_height: HEADER_HEIGHT,
            total_days: window.total_days,
            col_width: layout.col_width,
            fit_enabled: config.fit_enabled,
            export: self.export,
        };
        let virtualizer = self.virtualizer.get_or_insert_with(|| Virtualizer::new(params));
        virtualizer.set_params(params);
        if let Some(m) = metrics {
            virtualizer.observe(m);
        }
        virtualizer.flush();
        let (rows, columns) = (virtualizer.rows(), virtualizer.columns());

        let interactive = input.editable && !self.export;
        if self.drag.is_enabled() != interactive {
            self.drag.set_enabled(interactive);
        }
        // The dragged task may have been deleted or filtered out.
        if let Some(id) = self.drag.active_task() {
            if !input.tasks.iter().any(|t| t.id == id) {
                self.drag.cancel();
            }
        }

        build_plan(PlanInput {
            tasks: input.tasks,
            vacations: input.vacations,
            view_mode: config.view_mode,
            today: input.today,
            window,
            layout,
            rows,
            columns,
            preview: self.drag.preview(),
            export: self.export,
            interactive,
        })
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::interactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::PointerButton;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn many_tasks(n: usize) -> Vec<Task> {
        (0..n)
            .map(|i| Task::new(format!("t{i}"), ymd(2024, 1, 1), ymd(2024, 12, 31)))
            .collect()
    }

    fn input(tasks: &[Task], editable: bool) -> ChartInput<'_> {
        ChartInput {
            tasks,
            vacations: &[],
            config: RenderConfig::default(),
            today: ymd(2024, 6, 1),
            editable,
        }
    }

    fn metrics() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 0.0,
            scroll_left: 0.0,
            viewport_width: 1200.0,
            viewport_height: 600.0,
        }
    }

    #[test]
    fn interactive_chart_windows_large_data() {
        let tasks = many_tasks(300);
        let mut state = ChartState::interactive();
        let plan = state.plan(&input(&tasks, true), Some(metrics()));
        assert!(plan.task_rows.len() < 300);
        assert!(plan.grid.len() < plan.window.total_days);
        assert!(plan.interactive);
    }

    #[test]
    fn export_chart_renders_everything_and_is_static() {
        let tasks = many_tasks(300);
        let mut state = ChartState::export();
        let plan = state.plan(&input(&tasks, true), Some(metrics()));
        assert_eq!(plan.task_rows.len(), 300);
        assert_eq!(plan.grid.len(), plan.window.total_days);
        assert!(!plan.interactive);
        assert!(!state.drag().is_enabled());
    }

    #[test]
    fn read_only_input_disables_drags() {
        let tasks = many_tasks(1);
        let mut state = ChartState::interactive();
        let press = PointerPress {
            x: 0.0,
            button: PointerButton::Primary,
        };
        state
            .drag_mut()
            .begin(&tasks[0], DragMode::Move, press, 60.0, CaptureGuard::noop);
        assert!(state.drag().is_active());
        let plan = state.plan(&input(&tasks, false), None);
        assert!(!plan.interactive);
        assert!(!state.drag().is_active());
    }

    #[test]
    fn drag_of_a_removed_task_is_cancelled() {
        let tasks = many_tasks(2);
        let mut state = ChartState::interactive();
        let press = PointerPress {
            x: 0.0,
            button: PointerButton::Primary,
        };
        state
            .drag_mut()
            .begin(&tasks[0], DragMode::Move, press, 60.0, CaptureGuard::noop);
        state.plan(&input(&tasks[1..], true), None);
        assert!(!state.drag().is_active());
    }
}
