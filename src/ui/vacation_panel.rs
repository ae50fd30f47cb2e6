use chrono::NaiveDate;
use egui::{RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

use gantt_planner::model::Vacation;

use crate::ui::theme;

/// Input fields for a new vacation.
#[derive(Debug, Clone)]
pub struct VacationForm {
    pub title: String,
    pub start: NaiveDate,
    pub has_end: bool,
    pub end: NaiveDate,
}

impl VacationForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            start: today,
            has_end: false,
            end: today,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.has_end.then_some(self.end)
    }
}

pub enum VacationAction {
    None,
    Add,
    Delete(Uuid),
}

pub fn show_vacation_panel(vacations: &[Vacation], form: &mut VacationForm, ui: &mut Ui) -> VacationAction {
    let mut action = VacationAction::None;

    ui.add_space(2.0);
    ui.label(RichText::new(format!("{}  Vacations", icons::AIRPLANE_TILT)).strong().size(14.0));
    ui.add_space(6.0);

    egui::Grid::new("vacation_form")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
            ui.add(egui::TextEdit::singleline(&mut form.title).hint_text("Vacation").desired_width(140.0));
            ui.end_row();

            ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
            ui.add(egui_extras::DatePickerButton::new(&mut form.start).id_salt("vacation_start"));
            ui.end_row();

            ui.checkbox(&mut form.has_end, "End");
            ui.add_enabled(
                form.has_end,
                egui_extras::DatePickerButton::new(&mut form.end).id_salt("vacation_end"),
            );
            ui.end_row();
        });

    ui.add_space(4.0);
    if ui
        .add_sized([ui.available_width(), 26.0], egui::Button::new(format!("{}  Add vacation", icons::PLUS)))
        .clicked()
    {
        action = VacationAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        if vacations.is_empty() {
            ui.label(RichText::new("No vacations").color(theme::TEXT_DIM));
        }
        for vacation in vacations {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&vacation.title).color(theme::VACATION_STROKE));
                    let range = match vacation.end {
                        Some(end) if end != vacation.start => format!("{} → {}", vacation.start, end),
                        _ => vacation.start.to_string(),
                    };
                    ui.label(RichText::new(range).size(10.5).color(theme::TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button(icons::TRASH).on_hover_text("Delete vacation").clicked() {
                        action = VacationAction::Delete(vacation.id);
                    }
                });
            });
            ui.add_space(2.0);
        }
    });

    action
}
