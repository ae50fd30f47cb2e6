use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use gantt_planner::model::config::{FIT_PAGES_MAX, FIT_PAGES_MIN, ZOOM_MAX, ZOOM_MIN};
use gantt_planner::model::ViewMode;

use crate::app::{GanttApp, Tab};
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  New Project", icons::FILE_PLUS)).clicked() {
                app.new_project();
                ui.close_menu();
            }
            if ui.button(format!("{}  Open...", icons::FOLDER_OPEN)).clicked() {
                app.open_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Save          Ctrl+S", icons::FLOPPY_DISK)).clicked() {
                app.save_project();
                ui.close_menu();
            }
            if ui.button("     Save As...").clicked() {
                app.save_project_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Export CSV...", icons::FILE_CSV)).clicked() {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button(format!("{}  Print preview", icons::PRINTER)).clicked() {
                app.show_print_preview = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        for (tab, icon, label) in [
            (Tab::Dashboard, icons::SQUARES_FOUR, "Dashboard"),
            (Tab::Schedule, icons::CHART_BAR_HORIZONTAL, "Schedule"),
            (Tab::Tasks, icons::LIST_CHECKS, "Tasks"),
        ] {
            if ui
                .selectable_label(app.tab == tab, format!("{icon}  {label}"))
                .clicked()
            {
                app.tab = tab;
            }
        }

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.dirty { " (unsaved)" } else { "" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}

/// View controls shown above the schedule.
pub fn show_view_controls(app: &mut GanttApp, ui: &mut Ui) {
    let mut chart = app.settings.chart.clone();

    ui.horizontal(|ui| {
        for mode in ViewMode::ALL {
            ui.selectable_value(&mut chart.view_mode, mode, mode.label());
        }

        ui.separator();
        let mut padding = chart.padding();
        ui.label(RichText::new("Padding").color(theme::TEXT_SECONDARY));
        ui.add(egui::DragValue::new(&mut padding.before).range(0..=365).prefix("before "));
        ui.add(
            egui::DragValue::new(&mut padding.after)
                .range(0..=365)
                .prefix("after ")
                .suffix(format!(" {}", chart.view_mode.unit())),
        );
        if padding != chart.padding() {
            chart.set_padding(padding.before, padding.after);
        }

        ui.separator();
        let mut fit = chart.fit_settings();
        ui.checkbox(&mut fit.enabled, "Fit to screen");
        ui.add_enabled(
            fit.enabled,
            egui::DragValue::new(&mut fit.pages)
                .range(FIT_PAGES_MIN..=FIT_PAGES_MAX)
                .suffix(" pages"),
        );
        if fit != chart.fit_settings() {
            chart.set_fit(fit.enabled, fit.pages);
        }

        ui.separator();
        let mut zoom = chart.zoom;
        ui.label(icons::MAGNIFYING_GLASS_MINUS);
        ui.add(
            egui::Slider::new(&mut zoom, ZOOM_MIN..=ZOOM_MAX)
                .logarithmic(true)
                .show_value(false),
        );
        ui.label(icons::MAGNIFYING_GLASS_PLUS);
        ui.label(RichText::new(format!("{:.0}%", zoom * 100.0)).color(theme::TEXT_DIM));
        if ui.small_button("100%").clicked() {
            zoom = 1.0;
        }
        if zoom != chart.zoom {
            chart.set_zoom(zoom);
        }

        ui.separator();
        ui.label(icons::FUNNEL);
        ui.add(
            egui::TextEdit::singleline(&mut app.filter)
                .hint_text("Filter")
                .desired_width(140.0),
        );
    });

    if chart != app.settings.chart {
        app.update_chart_settings(chart);
    }
}
