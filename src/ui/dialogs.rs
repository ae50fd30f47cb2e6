use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};
use uuid::Uuid;

use gantt_planner::chart::{ChartInput, EXPORT_CHART_ID};
use gantt_planner::model::Task;

use crate::app::GanttApp;
use crate::ui::{gantt_chart, theme};

/// Editable copy of a task shown in the add/edit dialog.
#[derive(Debug, Clone)]
pub struct TaskForm {
    /// `None` when creating a new task.
    pub editing: Option<Uuid>,
    pub category: String,
    pub task_name: String,
    pub department: String,
    pub assignee: String,
    pub scheduled: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: u8,
}

impl TaskForm {
    pub fn new_task(today: NaiveDate) -> Self {
        Self {
            editing: None,
            category: String::new(),
            task_name: String::new(),
            department: String::new(),
            assignee: String::new(),
            scheduled: true,
            start: today,
            end: today + chrono::Duration::days(7),
            progress: 0,
        }
    }

    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        let start = task.start.unwrap_or(today);
        Self {
            editing: Some(task.id),
            category: task.category.clone(),
            task_name: task.task_name.clone(),
            department: task.department.clone(),
            assignee: task.assignee.clone(),
            scheduled: task.start.is_some(),
            start,
            end: task.end.unwrap_or(start),
            progress: task.progress,
        }
    }

    /// Build the task to store. An end before the start is kept as entered;
    /// the chart flags it as a date error.
    pub fn to_task(&self) -> Task {
        let name = if self.task_name.trim().is_empty() {
            "New Task".to_string()
        } else {
            self.task_name.trim().to_string()
        };
        let mut task = Task::new(name, self.start, self.end)
            .with_category(self.category.trim())
            .with_department(self.department.trim())
            .with_assignee(self.assignee.trim())
            .with_progress(i64::from(self.progress));
        if let Some(id) = self.editing {
            task.id = id;
        }
        if !self.scheduled {
            task.start = None;
            task.end = None;
        }
        task
    }
}

/// Render the add/edit task dialog.
pub fn show_task_dialog(app: &mut GanttApp, ctx: &Context) {
    let Some(form) = app.task_form.as_mut() else {
        return;
    };
    let title = if form.editing.is_some() { "Edit Task" } else { "Add Task" };
    let mut save = false;
    let mut close = false;

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("task_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (label, value, hint) in [
                        ("Category", &mut form.category, "Planning, Design, ..."),
                        ("Task", &mut form.task_name, "Task name..."),
                        ("Department", &mut form.department, "Team"),
                        ("Assignee", &mut form.assignee, "Unassigned"),
                    ] {
                        ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
                        ui.add_sized([220.0, 24.0], egui::TextEdit::singleline(value).hint_text(hint));
                        ui.end_row();
                    }

                    ui.label("");
                    ui.checkbox(&mut form.scheduled, "Scheduled");
                    ui.end_row();

                    ui.add_enabled_ui(form.scheduled, |ui| {
                        ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    });
                    ui.add_enabled(
                        form.scheduled,
                        egui_extras::DatePickerButton::new(&mut form.start).id_salt("task_form_start"),
                    );
                    ui.end_row();

                    ui.add_enabled_ui(form.scheduled, |ui| {
                        ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    });
                    ui.add_enabled(
                        form.scheduled,
                        egui_extras::DatePickerButton::new(&mut form.end).id_salt("task_form_end"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Progress").color(theme::TEXT_SECONDARY));
                    ui.add(egui::Slider::new(&mut form.progress, 0..=100).suffix("%"));
                    ui.end_row();
                });

            if form.scheduled && form.end < form.start {
                ui.add_space(4.0);
                ui.label(RichText::new("End is before start").color(theme::ERROR_TEXT).small());
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    save = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    close = true;
                }
            });
            ui.add_space(2.0);
        });

    if save {
        app.submit_task_form();
    } else if close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.task_form = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Gantt Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars to move tasks, drag edges to resize.");
                ui.label("Press Escape to cancel a drag.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Static, fully expanded chart for printing or screenshots.
pub fn show_print_preview(app: &mut GanttApp, ctx: &Context) {
    let mut open = app.show_print_preview;
    let today = app.today();
    let tasks = app.visible_tasks();
    Window::new(RichText::new("Print preview").strong())
        .id(egui::Id::new(EXPORT_CHART_ID))
        .open(&mut open)
        .resizable(true)
        .default_size([1000.0, 600.0])
        .show(ctx, |ui| {
            let input = ChartInput {
                tasks: &tasks,
                vacations: &app.project.vacations,
                config: app.settings.chart.render_config(),
                today,
                editable: false,
            };
            gantt_chart::show_gantt_chart(ui, &mut app.export_chart, &input, None, EXPORT_CHART_ID);
        });
    app.show_print_preview = open;
}
