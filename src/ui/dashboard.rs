use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use gantt_planner::model::{ProjectStats, Task};

use crate::ui::theme;

fn stat_card(ui: &mut Ui, icon: &str, label: &str, value: String, accent: Color32) {
    egui::Frame::default()
        .fill(theme::BG_HEADER)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_min_width(180.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).size(26.0).color(accent));
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(10.0).color(theme::TEXT_DIM).strong());
                    ui.label(RichText::new(value).size(24.0).strong());
                });
            });
        });
}

pub fn show_dashboard(stats: &ProjectStats, tasks: &[Task], ui: &mut Ui) {
    ui.add_space(8.0);
    ui.heading(RichText::new("Dashboard").strong());
    ui.add_space(10.0);

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, icons::PULSE, "TOTAL PROGRESS", format!("{}%", stats.total_progress), theme::ACCENT);
        stat_card(
            ui,
            icons::CHECK_CIRCLE,
            "COMPLETED TASKS",
            format!("{} / {}", stats.completed, stats.total_tasks),
            theme::BAR_COMPLETE,
        );
        stat_card(ui, icons::WARNING, "DELAYED", stats.delayed.to_string(), theme::BAR_DELAYED);
        stat_card(
            ui,
            icons::USERS_THREE,
            "ACTIVE DEPARTMENTS",
            stats.active_departments().to_string(),
            theme::VACATION_STROKE,
        );
        if stats.unscheduled > 0 {
            stat_card(
                ui,
                icons::CALENDAR_X,
                "UNSCHEDULED",
                stats.unscheduled.to_string(),
                theme::PLACEHOLDER_TEXT,
            );
        }
    });

    ui.add_space(16.0);
    ui.columns(2, |cols| {
        cols[0].label(RichText::new("Progress by department").strong().size(14.0));
        cols[0].add_space(6.0);
        for dept in &stats.departments {
            let name = if dept.name.is_empty() { "(none)" } else { dept.name.as_str() };
            cols[0].label(RichText::new(format!("{name} · {} tasks", dept.tasks)).color(theme::TEXT_SECONDARY));
            cols[0].add(
                egui::ProgressBar::new(f32::from(dept.average) / 100.0)
                    .text(format!("{}%", dept.average))
                    .fill(theme::ACCENT),
            );
            cols[0].add_space(4.0);
        }

        cols[1].label(RichText::new("Recent tasks").strong().size(14.0));
        cols[1].add_space(6.0);
        egui::ScrollArea::vertical()
            .id_salt("dashboard_tasks")
            .max_height(360.0)
            .show(&mut cols[1], |ui| {
                for task in tasks {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&task.task_name).strong());
                            let assignee = if task.assignee.is_empty() { "Unassigned" } else { task.assignee.as_str() };
                            ui.label(
                                RichText::new(format!("{} · {assignee}", task.category))
                                    .size(10.5)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let color = if task.is_complete() { theme::BAR_COMPLETE } else { theme::ACCENT };
                            ui.label(RichText::new(format!("{}%", task.progress)).strong().color(color));
                        });
                    });
                    ui.separator();
                }
            });
    });
}
