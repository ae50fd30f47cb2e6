use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use uuid::Uuid;

use gantt_planner::chart::{ChartInput, ChartState, DateChange, MAIN_CHART_ID};
use gantt_planner::io::{Debounce, WorkingCopy, AUTOSAVE_DELAY};
use gantt_planner::model::{ChartSettings, Project, ProjectStats, SortOrder, Task, VacationRejection};
use gantt_planner::settings::AppSettings;

use crate::ui;
use crate::ui::dialogs::TaskForm;
use crate::ui::task_table::TaskTableAction;
use crate::ui::vacation_panel::{VacationAction, VacationForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Schedule,
    Tasks,
}

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub file_path: Option<PathBuf>,
    /// Edits since the project was last opened or saved.
    pub dirty: bool,
    pub selected_task: Option<Uuid>,
    pub tab: Tab,
    pub filter: String,

    pub settings: AppSettings,
    settings_path: PathBuf,
    settings_save: Debounce,
    working_copy_path: PathBuf,
    autosave: Debounce,

    // Charts
    pub chart: ChartState,
    pub export_chart: ChartState,
    pub show_print_preview: bool,

    // Dialog state
    pub task_form: Option<TaskForm>,
    pub show_about: bool,
    pub vacation_form: VacationForm,
    pub move_target: i64,

    // Status message
    pub status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let settings_path = AppSettings::default_path();
        let settings = AppSettings::load_from(&settings_path);
        let today = chrono::Local::now().date_naive();

        let mut app = Self {
            project: Self::sample_project(),
            file_path: None,
            dirty: false,
            selected_task: None,
            tab: Tab::Schedule,
            filter: String::new(),
            settings,
            settings_path,
            settings_save: Debounce::new(AUTOSAVE_DELAY),
            working_copy_path: AppSettings::working_copy_path(),
            autosave: Debounce::new(AUTOSAVE_DELAY),
            chart: ChartState::interactive(),
            export_chart: ChartState::export(),
            show_print_preview: false,
            task_form: None,
            show_about: false,
            vacation_form: VacationForm::new(today),
            move_target: 1,
            status_message: "Ready".to_string(),
        };

        app.restore_session();
        app
    }

    /// Pick up the autosaved working copy, else reopen the last project file,
    /// else keep the sample project.
    fn restore_session(&mut self) {
        match gantt_planner::io::load_working_copy(&self.working_copy_path) {
            Ok(Some(copy)) => {
                self.status_message = format!("Restored '{}' ({} tasks)", copy.project.name, copy.project.tasks.len());
                self.project = copy.project;
                self.file_path = copy.file_path;
                self.dirty = copy.dirty;
                return;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring working copy: {e:#}"),
        }
        if let Some(path) = self.settings.last_project.clone().filter(|p| p.exists()) {
            self.load_from(path);
        }
    }

    /// Generate a sample project for demonstration.
    fn sample_project() -> Project {
        let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let mut project = Project::new("Sample Project");
        project.tasks = vec![
            Task::new("Requirements analysis", ymd(2024, 5, 1), ymd(2024, 5, 9))
                .with_category("Planning")
                .with_department("Planning")
                .with_assignee("Kim")
                .with_progress(100),
            Task::new("UI/UX mockups", ymd(2024, 5, 12), ymd(2024, 5, 25))
                .with_category("Design")
                .with_department("Design")
                .with_assignee("Lee")
                .with_progress(60),
            Task::new("Frontend architecture", ymd(2024, 5, 15), ymd(2024, 6, 5))
                .with_category("Development")
                .with_department("Engineering")
                .with_assignee("Park")
                .with_progress(45),
            Task::new("API integration", ymd(2024, 6, 1), ymd(2024, 6, 20))
                .with_category("Development")
                .with_department("Engineering")
                .with_assignee("Choi"),
            Task::new("Unit tests", ymd(2024, 6, 15), ymd(2024, 6, 30))
                .with_category("Testing")
                .with_department("QA")
                .with_assignee("Jung"),
        ];
        project
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Tasks passing the current filter, in list order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.project.filtered_tasks(&self.filter)
    }

    // --- Settings ---

    /// Apply new chart settings now; the file write waits for a quiet period
    /// so slider drags and zoom gestures produce a single write.
    pub fn update_chart_settings(&mut self, chart: ChartSettings) {
        self.settings.chart = chart;
        self.settings.chart.sanitize();
        self.settings_save.mark(Instant::now());
        self.autosave.mark(Instant::now());
    }

    fn persist_settings(&mut self) {
        self.settings_save.take_pending();
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            tracing::warn!("could not save settings: {e:#}");
            self.status_message = format!("Could not save settings: {e}");
        }
    }

    // --- Working copy ---

    /// Record an edit to the project: it is now unsaved and the working copy
    /// is rewritten after the next quiet period.
    fn mark_edited(&mut self) {
        self.dirty = true;
        self.autosave.mark(Instant::now());
    }

    fn write_working_copy(&mut self) {
        self.autosave.take_pending();
        let mut project = self.project.clone();
        project.remember_view(&self.settings.chart);
        let copy = WorkingCopy {
            project,
            file_path: self.file_path.clone(),
            dirty: self.dirty,
        };
        if let Err(e) = gantt_planner::io::save_working_copy(&copy, &self.working_copy_path) {
            tracing::warn!("could not autosave: {e:#}");
            self.status_message = format!("Could not autosave: {e}");
        }
    }

    /// Run whichever debounced writes are due and wake up for the rest.
    fn run_pending_writes(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.autosave.take_due(now) {
            self.write_working_copy();
        }
        if self.settings_save.take_due(now) {
            self.persist_settings();
        }
        let next = [self.autosave.remaining(now), self.settings_save.remaining(now)]
            .into_iter()
            .flatten()
            .min();
        if let Some(wait) = next {
            ctx.request_repaint_after(wait);
        }
    }

    /// Write everything still pending before the window closes.
    fn flush_pending_writes(&mut self) {
        if self.autosave.is_pending() {
            self.write_working_copy();
        }
        if self.settings_save.is_pending() {
            self.persist_settings();
        }
    }

    fn remember_project_path(&mut self, path: PathBuf) {
        self.settings.last_project = Some(path.clone());
        self.file_path = Some(path);
        self.persist_settings();
    }

    // --- File operations ---

    pub fn new_project(&mut self) {
        self.project = Project::default();
        self.file_path = None;
        self.dirty = false;
        self.selected_task = None;
        self.chart.drag_mut().cancel();
        self.autosave.mark(Instant::now());
        self.status_message = "New project created".to_string();
    }

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match gantt_planner::io::load_project(&path) {
            Ok(project) => {
                self.status_message = format!("Loaded '{}' ({} tasks)", project.name, project.tasks.len());
                project.apply_view(&mut self.settings.chart);
                self.project = project;
                self.dirty = false;
                self.selected_task = None;
                self.chart.drag_mut().cancel();
                self.remember_project_path(path);
                self.autosave.mark(Instant::now());
            }
            Err(e) => {
                tracing::warn!("load failed: {e:#}");
                self.status_message = format!("Error loading: {e:#}");
            }
        }
    }

    pub fn save_project(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.save_to(path),
            None => self.save_project_as(),
        }
    }

    pub fn save_project_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["json"])
            .set_file_name(format!("{}.json", self.project.name))
            .save_file()
        {
            self.save_to(path);
        }
    }

    fn save_to(&mut self, path: PathBuf) {
        self.project.touch();
        self.project.remember_view(&self.settings.chart);
        match gantt_planner::io::save_project(&self.project, &path) {
            Ok(()) => {
                self.status_message = "Project saved".to_string();
                self.dirty = false;
                self.remember_project_path(path);
                self.autosave.mark(Instant::now());
            }
            Err(e) => self.status_message = format!("Error saving: {e:#}"),
        }
    }

    pub fn export_csv(&mut self) {
        if self.project.tasks.is_empty() {
            self.status_message = "Nothing to export: project has no tasks".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}.csv", self.project.name))
            .save_file()
        {
            match gantt_planner::io::export_csv(&self.project.tasks, &path) {
                Ok(count) => self.status_message = format!("Exported {count} tasks to CSV"),
                Err(e) => self.status_message = format!("CSV export failed: {e:#}"),
            }
        }
    }

    // --- Task operations ---

    pub fn open_task_form(&mut self, id: Option<Uuid>) {
        let today = self.today();
        self.task_form = match id.and_then(|id| self.project.task(id)) {
            Some(task) => Some(TaskForm::from_task(task, today)),
            None => Some(TaskForm::new_task(today)),
        };
    }

    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.take() else {
            return;
        };
        let task = form.to_task();
        let name = task.task_name.clone();
        if form.editing.is_some() {
            if self.project.update_task(task) {
                self.mark_edited();
                self.status_message = format!("Updated '{name}'");
            } else {
                self.status_message = format!("'{name}' no longer exists");
            }
        } else {
            self.selected_task = Some(task.id);
            self.project.add_task(task);
            self.mark_edited();
            self.status_message = format!("Added '{name}'");
        }
    }

    pub fn delete_task(&mut self, id: Uuid) {
        if self.project.delete_task(id) {
            self.mark_edited();
            if self.selected_task == Some(id) {
                self.selected_task = None;
            }
            self.status_message = "Task deleted".to_string();
        }
    }

    /// Move within the filtered view: `position` is 1-based in that view.
    fn move_task_to_visible_position(&mut self, id: Uuid, position: i64) {
        let visible = self.visible_tasks();
        let slot = (position.max(1) as usize).min(visible.len().max(1)) - 1;
        let target = visible
            .get(slot)
            .and_then(|t| self.project.tasks.iter().position(|p| p.id == t.id))
            .map_or(position, |idx| idx as i64 + 1);
        let before = self.project.tasks.iter().position(|t| t.id == id);
        self.project.move_task_to_position(id, target);
        if self.project.tasks.iter().position(|t| t.id == id) != before {
            self.mark_edited();
        }
    }

    fn apply_date_change(&mut self, change: DateChange) {
        if self.project.apply_date_change(change.task_id, change.start, change.end) {
            self.mark_edited();
            let name = self
                .project
                .task(change.task_id)
                .map(|t| t.task_name.clone())
                .unwrap_or_default();
            self.status_message = format!("Updated '{}' ({} → {})", name, change.start_ymd(), change.end_ymd());
        }
    }

    fn add_vacation(&mut self) {
        let form = self.vacation_form.clone();
        match self.project.add_vacation(&form.title, form.start, form.end()) {
            Ok(_) => {
                self.mark_edited();
                self.status_message = "Vacation added".to_string();
                self.vacation_form = VacationForm::new(form.start);
            }
            Err(VacationRejection::EndBeforeStart) => {
                self.status_message = "Vacation end must not be before its start".to_string();
            }
        }
    }

    fn handle_table_action(&mut self, action: TaskTableAction) {
        match action {
            TaskTableAction::None => {}
            TaskTableAction::Add => self.open_task_form(None),
            TaskTableAction::Select(id) => {
                self.selected_task = Some(id);
                if let Some(pos) = self.visible_tasks().iter().position(|t| t.id == id) {
                    self.move_target = pos as i64 + 1;
                }
            }
            TaskTableAction::Edit(id) => self.open_task_form(Some(id)),
            TaskTableAction::Delete(id) => self.delete_task(id),
            TaskTableAction::Move(id, direction) => {
                let visible = self.visible_tasks();
                if let Some(pos) = visible.iter().position(|t| t.id == id) {
                    self.move_task_to_visible_position(id, pos as i64 + 1 + direction);
                }
            }
            TaskTableAction::MoveTo(id, position) => self.move_task_to_visible_position(id, position),
            TaskTableAction::Sort(order) => {
                self.project.sort_by_start(order);
                self.mark_edited();
                self.status_message = match order {
                    SortOrder::Ascending => "Sorted by start date".to_string(),
                    SortOrder::Descending => "Sorted by start date, latest first".to_string(),
                };
            }
        }
    }

    fn show_schedule(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("vacation_panel")
            .default_width(ui::theme::VACATION_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                match ui::vacation_panel::show_vacation_panel(&self.project.vacations, &mut self.vacation_form, ui) {
                    VacationAction::None => {}
                    VacationAction::Add => self.add_vacation(),
                    VacationAction::Delete(id) => {
                        if self.project.delete_vacation(id) {
                            self.mark_edited();
                            self.status_message = "Vacation deleted".to_string();
                        }
                    }
                }
            });

        egui::TopBottomPanel::top("view_controls").show(ctx, |ui| {
            ui.add_space(2.0);
            ui::toolbar::show_view_controls(self, ui);
            ui.add_space(2.0);
        });

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            // Ctrl+scroll zooms the timeline
            let zoom_delta = ui.input(|i| i.zoom_delta());
            if zoom_delta != 1.0 && ui.rect_contains_pointer(ui.max_rect()) {
                let zoom = self.settings.chart.zoom * zoom_delta;
                self.settings.chart.set_zoom(zoom);
                self.settings_save.mark(Instant::now());
                self.autosave.mark(Instant::now());
            }

            let tasks = self.visible_tasks();
            let today = self.today();
            let input = ChartInput {
                tasks: &tasks,
                vacations: &self.project.vacations,
                config: self.settings.chart.render_config(),
                today,
                editable: self.task_form.is_none(),
            };
            let interaction =
                ui::gantt_chart::show_gantt_chart(ui, &mut self.chart, &input, self.selected_task, MAIN_CHART_ID);

            if let Some(change) = interaction.date_change {
                self.apply_date_change(change);
            }
            if interaction.clear_selection {
                self.selected_task = None;
            }
            if let Some(id) = interaction.select {
                self.selected_task = Some(id);
            }
            if let Some(id) = interaction.edit {
                self.open_task_form(Some(id));
            }
        });
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S)) {
            self.save_project();
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            self.flush_pending_writes();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::STATUS_BAR_BG)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let chart = &self.settings.chart;
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · {} view · Zoom: {:.0}%",
                                self.project.tasks.len(),
                                chart.view_mode.label(),
                                chart.zoom * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        match self.tab {
            Tab::Schedule => self.show_schedule(ctx),
            Tab::Tasks => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let tasks = self.visible_tasks();
                    let action = ui::task_table::show_task_table(
                        &tasks,
                        self.selected_task,
                        &mut self.filter,
                        &mut self.move_target,
                        ui,
                    );
                    self.handle_table_action(action);
                });
            }
            Tab::Dashboard => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let stats = ProjectStats::from_tasks(&self.project.tasks, self.today());
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui::dashboard::show_dashboard(&stats, &self.project.tasks, ui);
                    });
                });
            }
        }

        // A tab switch or dialog leaves no drag behind.
        if self.tab != Tab::Schedule || self.task_form.is_some() {
            self.chart.drag_mut().cancel();
        }

        // Dialogs
        if self.task_form.is_some() {
            ui::dialogs::show_task_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_print_preview {
            ui::dialogs::show_print_preview(self, ctx);
        }

        self.run_pending_writes(ctx);
    }
}
