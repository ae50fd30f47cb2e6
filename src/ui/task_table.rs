use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

use gantt_planner::dates;
use gantt_planner::model::{SortOrder, Task};

use crate::ui::theme;

/// Actions that the task table can request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskTableAction {
    None,
    Add,
    Select(Uuid),
    Edit(Uuid),
    Delete(Uuid),
    Move(Uuid, i64),
    MoveTo(Uuid, i64),
    Sort(SortOrder),
}

/// Render the task management list. `tasks` is the filtered view; positions
/// shown are 1-based indices into it.
pub fn show_task_table(
    tasks: &[Task],
    selected_task: Option<Uuid>,
    filter: &mut String,
    move_target: &mut i64,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Tasks").strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.label(RichText::new(format!("({})", tasks.len())).size(11.0).color(theme::TEXT_DIM));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  Add Task", icons::PLUS)).color(Color32::WHITE),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = TaskTableAction::Add;
            }
            if ui
                .button(icons::SORT_DESCENDING)
                .on_hover_text("Sort by start, latest first")
                .clicked()
            {
                action = TaskTableAction::Sort(SortOrder::Descending);
            }
            if ui
                .button(icons::SORT_ASCENDING)
                .on_hover_text("Sort by start, earliest first")
                .clicked()
            {
                action = TaskTableAction::Sort(SortOrder::Ascending);
            }
        });
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label(icons::MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(filter)
                .hint_text("Filter by task, department or assignee")
                .desired_width(260.0),
        );
        if !filter.is_empty() && ui.small_button(icons::X).clicked() {
            filter.clear();
        }

        if let Some(id) = selected_task {
            ui.separator();
            ui.label(RichText::new("Move to").color(theme::TEXT_SECONDARY));
            ui.add(egui::DragValue::new(move_target).range(1..=tasks.len().max(1) as i64));
            if ui.button("Go").clicked() {
                action = TaskTableAction::MoveTo(id, *move_target);
            }
        }
    });

    ui.add_space(6.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("task_table_grid")
                .num_columns(9)
                .spacing([10.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    for header in ["#", "CATEGORY", "TASK", "DEPARTMENT", "ASSIGNEE", "START", "END", "DONE", ""] {
                        ui.label(RichText::new(header).size(9.0).color(theme::TEXT_DIM).strong());
                    }
                    ui.end_row();

                    for (i, task) in tasks.iter().enumerate() {
                        let is_selected = selected_task == Some(task.id);
                        let name_color = if is_selected { Color32::WHITE } else { theme::TEXT_PRIMARY };

                        ui.label(RichText::new(format!("{}", i + 1)).color(theme::TEXT_DIM));
                        ui.label(RichText::new(&task.category).color(theme::TEXT_SECONDARY));
                        let name = ui.selectable_label(is_selected, RichText::new(&task.task_name).color(name_color));
                        if name.clicked() {
                            action = TaskTableAction::Select(task.id);
                        }
                        if name.double_clicked() {
                            action = TaskTableAction::Edit(task.id);
                        }
                        ui.label(&task.department);
                        ui.label(if task.assignee.is_empty() { "Unassigned" } else { task.assignee.as_str() });

                        match task.start {
                            Some(_) => {
                                ui.label(dates::format_date(&task.start));
                                ui.label(dates::format_date(&task.effective_end()));
                            }
                            None => {
                                ui.label(RichText::new("Unscheduled").italics().color(theme::PLACEHOLDER_TEXT));
                                ui.label("");
                            }
                        }

                        ui.add(
                            egui::ProgressBar::new(f32::from(task.progress) / 100.0)
                                .desired_width(60.0)
                                .text(format!("{}%", task.progress)),
                        );

                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = 2.0;
                            if ui.small_button(icons::ARROW_UP).on_hover_text("Move up").clicked() {
                                action = TaskTableAction::Move(task.id, -1);
                            }
                            if ui.small_button(icons::ARROW_DOWN).on_hover_text("Move down").clicked() {
                                action = TaskTableAction::Move(task.id, 1);
                            }
                            if ui.small_button(icons::PENCIL_SIMPLE).on_hover_text("Edit task").clicked() {
                                action = TaskTableAction::Edit(task.id);
                            }
                            if ui.small_button(icons::TRASH).on_hover_text("Delete task").clicked() {
                                action = TaskTableAction::Delete(task.id);
                            }
                        });
                        ui.end_row();
                    }
                });

            if tasks.is_empty() {
                ui.add_space(12.0);
                ui.label(RichText::new("No tasks match.").color(theme::TEXT_DIM));
            }
        });

    action
}
