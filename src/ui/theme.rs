use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use gantt_planner::model::TaskStatus;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 7);
pub const STATUS_BAR_BG: Color32 = Color32::from_rgb(20, 20, 28);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);
pub const MONTH_BORDER: Color32 = Color32::from_rgb(78, 82, 100);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 55);

pub const BAR_IN_PROGRESS: Color32 = Color32::from_rgb(99, 102, 241);
pub const BAR_COMPLETE: Color32 = Color32::from_rgb(16, 185, 129);
pub const BAR_DELAYED: Color32 = Color32::from_rgb(239, 68, 68);

pub const VACATION_FILL: Color32 = Color32::from_rgba_premultiplied(60, 45, 10, 70);
pub const VACATION_STROKE: Color32 = Color32::from_rgb(245, 158, 11);
pub const PLACEHOLDER_TEXT: Color32 = Color32::from_rgb(148, 163, 184);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const LABEL_PANE_WIDTH: f32 = 260.0;
pub const HANDLE_WIDTH: f32 = 8.0;
pub const BAR_ROUNDING: f32 = 6.0;
pub const BAR_INSET: f32 = 14.0; // vertical inset inside a row
pub const VACATION_PANEL_WIDTH: f32 = 230.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;
pub const DIALOG_WIDTH: f32 = 360.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn bar_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::InProgress => BAR_IN_PROGRESS,
        TaskStatus::Complete => BAR_COMPLETE,
        TaskStatus::Delayed => BAR_DELAYED,
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;

    let rounding = Rounding::same(4.0);
    for (widget, fill, stroke) in [
        (&mut visuals.widgets.noninteractive, BG_PANEL, BORDER_SUBTLE),
        (&mut visuals.widgets.inactive, Color32::from_rgb(42, 44, 56), BORDER_SUBTLE),
        (&mut visuals.widgets.hovered, Color32::from_rgb(52, 54, 68), ACCENT),
        (&mut visuals.widgets.active, Color32::from_rgb(60, 62, 76), ACCENT),
        (&mut visuals.widgets.open, Color32::from_rgb(50, 52, 66), ACCENT),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.bg_stroke = Stroke::new(1.0, stroke);
        widget.rounding = rounding;
    }
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;
    visuals.faint_bg_color = BG_PANEL;

    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}
