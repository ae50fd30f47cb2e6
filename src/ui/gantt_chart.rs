use egui::{Align2, Color32, CursorIcon, Id, Painter, PointerButton, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use gantt_planner::chart::plan::{frozen_pane_offset, BarGeometry, HeaderCell, TaskRow, HEADER_TOP_HEIGHT};
use gantt_planner::chart::{
    CaptureGuard, ChartInput, ChartPlan, ChartState, DateChange, DragMode, PointerPress, RowKind, ScrollMetrics,
    HEADER_HEIGHT, ROW_HEIGHT,
};
use gantt_planner::model::{TaskStatus, ViewMode};

use crate::ui::theme;

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A drag finished with new dates.
    pub date_change: Option<DateChange>,
    pub select: Option<Uuid>,
    pub clear_selection: bool,
    /// Double-click on a bar or label.
    pub edit: Option<Uuid>,
}

/// Render a chart. Export charts are static and fully expanded; interactive
/// ones keep a frozen label pane next to a scrollable, virtualized timeline.
pub fn show_gantt_chart(
    ui: &mut Ui,
    state: &mut ChartState,
    input: &ChartInput<'_>,
    selected: Option<Uuid>,
    chart_id: &str,
) -> ChartInteraction {
    if state.is_export() {
        show_export(ui, state, input, chart_id);
        return ChartInteraction::default();
    }

    let mut interaction = ChartInteraction {
        date_change: track_active_drag(ui.ctx(), state),
        ..Default::default()
    };

    let id = Id::new(chart_id);
    let full = ui.available_rect_before_wrap();
    let (label_rect, chart_rect) = full.split_left_right_at_x(full.left() + theme::LABEL_PANE_WIDTH);
    let mut chart_ui = ui.new_child(egui::UiBuilder::new().max_rect(chart_rect).id_salt(id));

    let output = egui::ScrollArea::both()
        .id_salt(id.with("timeline"))
        .auto_shrink([false, false])
        .show_viewport(&mut chart_ui, |ui, viewport| {
            let metrics = ScrollMetrics {
                scroll_top: viewport.min.y,
                scroll_left: viewport.min.x,
                viewport_width: viewport.width(),
                viewport_height: viewport.height(),
            };
            let plan = state.plan(input, Some(metrics));
            let (rect, response) = ui.allocate_exact_size(
                Vec2::new(plan.content_width(), plan.content_height().max(viewport.height())),
                Sense::click(),
            );
            let origin = rect.min;
            let visible = viewport.translate(origin.to_vec2());

            let mut hovered = None;
            let mut consumed_click = false;
            if plan.interactive {
                for row in &plan.task_rows {
                    if let RowKind::Bar(bar) = &row.kind {
                        let bar_rect = bar_rect(origin, row, bar);
                        let outcome = interact_bar(ui, id, state, input, &plan, row.task_id, bar_rect);
                        if outcome.hovered {
                            hovered = Some(row.task_id);
                        }
                        if let Some(task_id) = outcome.selected {
                            interaction.select = Some(task_id);
                            consumed_click = true;
                        }
                        if outcome.edit {
                            interaction.edit = Some(row.task_id);
                        }
                    }
                }
            }
            if response.clicked() && !consumed_click {
                interaction.clear_selection = true;
            }

            paint_chart(ui.painter(), origin, &plan, visible, selected, hovered);
            plan
        });

    let offset = frozen_pane_offset(output.state.offset.y, false);
    paint_label_pane(ui, id, label_rect, &output.inner, offset, selected, Some(&mut interaction));
    ui.allocate_rect(full, Sense::hover());

    interaction
}

fn show_export(ui: &mut Ui, state: &mut ChartState, input: &ChartInput<'_>, chart_id: &str) {
    let id = Id::new(chart_id);
    let viewport_width = (ui.available_width() - theme::LABEL_PANE_WIDTH).max(1.0);
    let viewport_height = ui.available_height();

    egui::ScrollArea::both()
        .id_salt(id)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let plan = state.plan(
                input,
                Some(ScrollMetrics {
                    viewport_width,
                    viewport_height,
                    ..Default::default()
                }),
            );
            let size = Vec2::new(
                theme::LABEL_PANE_WIDTH + plan.content_width(),
                plan.content_height(),
            );
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            let (label_rect, chart_rect) = rect.split_left_right_at_x(rect.left() + theme::LABEL_PANE_WIDTH);
            paint_chart(ui.painter(), chart_rect.min, &plan, chart_rect, None, None);
            paint_label_pane(ui, id, label_rect, &plan, frozen_pane_offset(0.0, true), None, None);
        });
}

// ── Drag capture ─────────────────────────────────────────────────────────────

/// Suppress label text selection for the length of a drag.
fn acquire_capture(ctx: &egui::Context) -> CaptureGuard {
    let previous = ctx.style().interaction.selectable_labels;
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
    let ctx = ctx.clone();
    CaptureGuard::new(move || ctx.style_mut(|s| s.interaction.selectable_labels = previous))
}

/// Follow the pointer anywhere on screen while a drag is held.
fn track_active_drag(ctx: &egui::Context, state: &mut ChartState) -> Option<DateChange> {
    if !state.drag().is_active() {
        return None;
    }
    let (pos, down, escape, focused) = ctx.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_down(),
            i.key_pressed(egui::Key::Escape),
            i.focused,
        )
    });

    if escape || !focused {
        state.drag_mut().cancel();
        return None;
    }
    if let Some(pos) = pos {
        state.drag_mut().update(pos.x);
    }
    if down {
        let cursor = match state.drag().preview().map(|p| p.mode) {
            Some(DragMode::Move) => CursorIcon::Grabbing,
            _ => CursorIcon::ResizeHorizontal,
        };
        ctx.set_cursor_icon(cursor);
        ctx.request_repaint();
        return None;
    }
    state.drag_mut().finish()
}

#[derive(Default)]
struct BarOutcome {
    hovered: bool,
    selected: Option<Uuid>,
    edit: bool,
}

fn interact_bar(
    ui: &Ui,
    chart_id: Id,
    state: &mut ChartState,
    input: &ChartInput<'_>,
    plan: &ChartPlan,
    task_id: Uuid,
    bar_rect: Rect,
) -> BarOutcome {
    let half = theme::HANDLE_WIDTH * 0.5;
    let left_rect = Rect::from_min_max(
        Pos2::new(bar_rect.left() - half, bar_rect.top()),
        Pos2::new(bar_rect.left() + half, bar_rect.bottom()),
    );
    let right_rect = Rect::from_min_max(
        Pos2::new(bar_rect.right() - half, bar_rect.top()),
        Pos2::new(bar_rect.right() + half, bar_rect.bottom()),
    );

    let bar = ui.interact(bar_rect, chart_id.with(("bar", task_id)), Sense::click_and_drag());
    let left = ui.interact(left_rect, chart_id.with(("resize-start", task_id)), Sense::drag());
    let right = ui.interact(right_rect, chart_id.with(("resize-end", task_id)), Sense::drag());

    let mut outcome = BarOutcome {
        hovered: bar.hovered() || left.hovered() || right.hovered(),
        ..Default::default()
    };

    if left.hovered() || right.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    } else if bar.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }

    if bar.clicked() {
        outcome.selected = Some(task_id);
    }
    if bar.double_clicked() {
        outcome.edit = true;
    }

    let started = [
        (&left, DragMode::ResizeStart),
        (&right, DragMode::ResizeEnd),
        (&bar, DragMode::Move),
    ]
    .into_iter()
    .find(|(r, _)| r.drag_started());

    if let Some((response, mode)) = started {
        let button = if response.drag_started_by(PointerButton::Primary) {
            PointerButton::Primary
        } else {
            PointerButton::Secondary
        };
        let x = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos())
            .map(|p| p.x)
            .unwrap_or_default();
        if let Some(task) = input.tasks.iter().find(|t| t.id == task_id) {
            let ctx = ui.ctx().clone();
            let began = state.drag_mut().begin(
                task,
                mode,
                PointerPress { x, button },
                plan.layout.col_width,
                || acquire_capture(&ctx),
            );
            if began.is_some() {
                outcome.selected = Some(task_id);
                ui.ctx().request_repaint();
            }
        }
    }

    if outcome.hovered && !state.drag().is_active() {
        if let Some(row) = plan.task_rows.iter().find(|r| r.task_id == task_id) {
            if let RowKind::Bar(geometry) = &row.kind {
                egui::show_tooltip_at_pointer(ui.ctx(), ui.layer_id(), chart_id.with(("tip", task_id)), |ui| {
                    bar_tooltip(ui, row, geometry);
                });
            }
        }
    }

    outcome
}

fn bar_tooltip(ui: &mut Ui, row: &TaskRow, bar: &BarGeometry) {
    ui.strong(&row.name);
    ui.label(format!("{} → {}", bar.start.format("%Y-%m-%d"), bar.end.format("%Y-%m-%d")));
    let status = match bar.status {
        TaskStatus::InProgress => "In progress",
        TaskStatus::Complete => "Complete",
        TaskStatus::Delayed => "Delayed",
    };
    ui.label(format!("Progress: {}% · {status}", bar.progress));
    if !row.assignee.is_empty() {
        ui.label(format!("Assignee: {}", row.assignee));
    }
}

// ── Painting ─────────────────────────────────────────────────────────────────

fn bar_rect(origin: Pos2, row: &TaskRow, bar: &BarGeometry) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + bar.left, origin.y + row.y() + theme::BAR_INSET),
        Vec2::new(bar.width.max(2.0), ROW_HEIGHT - theme::BAR_INSET * 2.0),
    )
}

/// Paint the timeline. `visible` is the on-screen part of the content; the
/// header and vacation titles stick to its top edge.
fn paint_chart(
    painter: &Painter,
    origin: Pos2,
    plan: &ChartPlan,
    visible: Rect,
    selected: Option<Uuid>,
    hovered: Option<Uuid>,
) {
    let cw = plan.layout.col_width;
    let width = plan.content_width();
    let bottom = origin.y + plan.content_height().max(visible.height());
    let header_top = visible.top();
    let body_top = header_top + HEADER_HEIGHT;

    painter.rect_filled(
        Rect::from_min_max(origin, Pos2::new(origin.x + width, bottom)),
        0.0,
        theme::BG_DARK,
    );

    // Grid
    for col in &plan.grid {
        let x = origin.x + col.column as f32 * cw;
        if col.weekend && plan.view_mode != ViewMode::Month {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x, origin.y), Pos2::new(x + cw, bottom)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        if col.month_start {
            painter.vline(x, origin.y..=bottom, Stroke::new(1.0, theme::MONTH_BORDER));
        } else if cw >= 12.0 {
            painter.vline(x, origin.y..=bottom, Stroke::new(0.5, theme::GRID_LINE));
        }
    }
    for row in &plan.task_rows {
        let y = origin.y + row.y() + ROW_HEIGHT;
        painter.hline(origin.x..=origin.x + width, y, Stroke::new(0.5, theme::BORDER_SUBTLE));
    }

    // Vacations
    for band in &plan.vacations {
        let rect = Rect::from_min_max(
            Pos2::new(origin.x + band.left, origin.y),
            Pos2::new(origin.x + band.left + band.width, bottom),
        );
        painter.rect_filled(rect, 0.0, theme::VACATION_FILL);
        painter.vline(rect.left(), rect.y_range(), Stroke::new(1.0, theme::VACATION_STROKE.gamma_multiply(0.5)));
        painter.vline(rect.right(), rect.y_range(), Stroke::new(1.0, theme::VACATION_STROKE.gamma_multiply(0.5)));
        painter.text(
            Pos2::new(rect.left() + 4.0, body_top + band.label_top),
            Align2::LEFT_TOP,
            &band.title,
            theme::font_small(),
            theme::VACATION_STROKE,
        );
    }

    // Rows
    for row in &plan.task_rows {
        let y = origin.y + row.y();
        match &row.kind {
            RowKind::Bar(bar) => {
                let emphasis = if selected == Some(row.task_id) || hovered == Some(row.task_id) {
                    BarEmphasis::Selected
                } else {
                    BarEmphasis::None
                };
                paint_bar(painter, bar_rect(origin, row, bar), row, bar, emphasis, plan.interactive);
            }
            RowKind::Unscheduled => paint_placeholder(painter, visible, y, "Unscheduled (no start date)", theme::PLACEHOLDER_TEXT),
            RowKind::DateError => paint_placeholder(painter, visible, y, "Date error: end is before start", theme::ERROR_TEXT),
        }
    }

    // Today
    if let Some(today) = plan.today {
        let x = origin.x + today.x;
        painter.extend(egui::Shape::dashed_line(
            &[Pos2::new(x, body_top), Pos2::new(x, bottom)],
            Stroke::new(1.5, theme::TODAY_LINE),
            6.0,
            4.0,
        ));
    }

    paint_header(painter, origin.x, header_top, plan);

    if let Some(today) = plan.today {
        let x = origin.x + today.x;
        let badge = Rect::from_center_size(Pos2::new(x, body_top - 7.0), Vec2::new(40.0, 14.0));
        painter.rect_filled(badge, Rounding::same(3.0), theme::TODAY_LINE);
        painter.text(badge.center(), Align2::CENTER_CENTER, "Today", theme::font_small(), Color32::WHITE);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BarEmphasis {
    None,
    Selected,
}

fn paint_bar(painter: &Painter, rect: Rect, row: &TaskRow, bar: &BarGeometry, emphasis: BarEmphasis, interactive: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING.min(rect.height() / 2.0));
    let color = theme::bar_color(bar.status);

    painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, color);

    if bar.progress > 0 && bar.progress < 100 {
        let progress_width = rect.width() * f32::from(bar.progress) / 100.0;
        let progress_rect = Rect::from_min_size(rect.min, Vec2::new(progress_width, rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if bar.dragging {
        painter.rect_stroke(rect.expand(1.5), rounding, Stroke::new(2.0, theme::TEXT_ON_BAR));
        painter.text(
            Pos2::new(rect.left(), rect.top() - 2.0),
            Align2::LEFT_BOTTOM,
            format!("{} → {}", bar.start.format("%m/%d"), bar.end.format("%m/%d")),
            theme::font_small(),
            theme::TEXT_PRIMARY,
        );
    } else if emphasis == BarEmphasis::Selected {
        painter.rect_stroke(rect.expand(1.5), rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
        if interactive {
            let handle_h = rect.height() * 0.55;
            let handle_y = rect.center().y - handle_h / 2.0;
            for x in [rect.left() - 1.5, rect.right() - 2.5] {
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                    Rounding::same(2.0),
                    theme::HANDLE_COLOR,
                );
            }
        }
    }

    if rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(row.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(rect.shrink(2.0))
            .galley(Pos2::new(rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    }
}

fn paint_placeholder(painter: &Painter, visible: Rect, row_top: f32, text: &str, color: Color32) {
    painter.text(
        Pos2::new(visible.left() + 12.0, row_top + ROW_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        text,
        theme::font_bar(),
        color,
    );
}

fn paint_header(painter: &Painter, left: f32, top: f32, plan: &ChartPlan) {
    let cw = plan.layout.col_width;
    let width = plan.content_width();
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(left, top), Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    let bottom_top = top + HEADER_TOP_HEIGHT;
    for cell in &plan.header.top {
        let rect = Rect::from_min_size(
            Pos2::new(left + cell.x(cw), top),
            Vec2::new(cell.width(cw), HEADER_TOP_HEIGHT),
        );
        paint_header_cell(painter, rect, cell, rect.width(), theme::font_header(), theme::TEXT_PRIMARY);
    }

    for cell in &plan.header.bottom {
        let rect = Rect::from_min_size(
            Pos2::new(left + cell.x(cw), bottom_top),
            Vec2::new(cell.width(cw), HEADER_HEIGHT - HEADER_TOP_HEIGHT),
        );
        if cell.weekend {
            painter.rect_filled(rect, 0.0, theme::BG_WEEKEND);
        }
        // Week labels sit on Mondays but may run across the whole week.
        let room = match plan.view_mode {
            ViewMode::Week => 7.0 * cw,
            _ => rect.width(),
        };
        let color = if cell.weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
        paint_header_cell(painter, rect, cell, room, theme::font_sub(), color);
    }

    painter.hline(left..=left + width, bottom_top, Stroke::new(0.5, theme::BORDER_SUBTLE));
    painter.hline(left..=left + width, top + HEADER_HEIGHT, Stroke::new(1.0, theme::BORDER_SUBTLE));
}

fn paint_header_cell(painter: &Painter, rect: Rect, cell: &HeaderCell, room: f32, font: egui::FontId, color: Color32) {
    let border = if cell.month_start { theme::MONTH_BORDER } else { theme::GRID_LINE };
    painter.vline(rect.left(), rect.y_range(), Stroke::new(0.5, border));
    let Some(label) = &cell.label else {
        return;
    };
    let galley = painter.layout_no_wrap(label.clone(), font, color);
    if galley.size().x + 6.0 > room {
        return;
    }
    let y = rect.center().y - galley.size().y / 2.0;
    painter.galley(Pos2::new(rect.left() + 3.0, y), galley, color);
}

// ── Frozen label pane ────────────────────────────────────────────────────────

fn paint_label_pane(
    ui: &Ui,
    chart_id: Id,
    rect: Rect,
    plan: &ChartPlan,
    offset_y: f32,
    selected: Option<Uuid>,
    mut interaction: Option<&mut ChartInteraction>,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_PANEL);

    let body = Rect::from_min_max(Pos2::new(rect.left(), rect.top() + HEADER_HEIGHT), rect.max);
    let rows = painter.with_clip_rect(body);
    for row in &plan.task_rows {
        let row_rect = Rect::from_min_size(
            Pos2::new(rect.left(), rect.top() + row.y() + offset_y),
            Vec2::new(rect.width(), ROW_HEIGHT),
        );
        if !row_rect.intersects(body) {
            continue;
        }

        if let Some(interaction) = interaction.as_deref_mut() {
            let response = ui.interact(
                row_rect.intersect(body),
                chart_id.with(("label", row.task_id)),
                Sense::click(),
            );
            if response.clicked() {
                interaction.select = Some(row.task_id);
            }
            if response.double_clicked() {
                interaction.edit = Some(row.task_id);
            }
        }

        let fill = if selected == Some(row.task_id) {
            theme::BG_SELECTED
        } else if row.index % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        rows.rect_filled(row_rect, 0.0, fill);
        rows.hline(row_rect.x_range(), row_rect.bottom(), Stroke::new(0.5, theme::BORDER_SUBTLE));

        let name = if row.name.is_empty() { "(untitled)" } else { row.name.as_str() };
        let galley = rows.layout_no_wrap(name.to_string(), theme::font_bar(), theme::TEXT_PRIMARY);
        rows.with_clip_rect(row_rect.shrink(4.0).intersect(body)).galley(
            Pos2::new(row_rect.left() + 10.0, row_rect.top() + 10.0),
            galley,
            theme::TEXT_PRIMARY,
        );

        let detail = match (row.department.is_empty(), row.assignee.is_empty()) {
            (false, false) => format!("{} · {}", row.department, row.assignee),
            (false, true) => row.department.clone(),
            (true, false) => row.assignee.clone(),
            (true, true) => String::new(),
        };
        if !detail.is_empty() {
            rows.text(
                Pos2::new(row_rect.left() + 10.0, row_rect.bottom() - 10.0),
                Align2::LEFT_BOTTOM,
                detail,
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HEADER_HEIGHT));
    painter.rect_filled(header, 0.0, theme::BG_HEADER);
    painter.text(
        Pos2::new(header.left() + 10.0, header.center().y),
        Align2::LEFT_CENTER,
        "Task",
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        Pos2::new(header.right() - 10.0, header.center().y),
        Align2::RIGHT_CENTER,
        "Department · Assignee",
        theme::font_small(),
        theme::TEXT_DIM,
    );
    painter.hline(header.x_range(), header.bottom(), Stroke::new(1.0, theme::BORDER_SUBTLE));
    painter.vline(rect.right(), rect.y_range(), Stroke::new(1.0, theme::BORDER_SUBTLE));
}
