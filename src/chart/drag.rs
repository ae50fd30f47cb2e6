//! Pointer-driven move/resize of task bars.
//!
//! A drag holds a [`CaptureGuard`] for its whole lifetime: the host registers
//! whatever it needs (global pointer tracking, selection suppression) when the
//! drag starts and hands back a guard that undoes it. The guard is dropped on
//! pointer-up, on cancel, when a new drag replaces the old one, and when the
//! controller itself goes away, so the release can never be skipped.

use std::fmt;

use chrono::NaiveDate;
use egui::PointerButton;
use uuid::Uuid;

use crate::dates;
use crate::model::Task;

/// Which part of the bar is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// The whole bar; duration is preserved.
    Move,
    /// Left edge; the end stays fixed.
    ResizeStart,
    /// Right edge; the start stays fixed.
    ResizeEnd,
}

/// Releases a host-side capture when dropped.
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Live dates shown while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub task_id: Uuid,
    pub mode: DragMode,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A finished drag that changed the task's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateChange {
    pub task_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateChange {
    pub fn start_ymd(&self) -> String {
        dates::format_date(&self.start)
    }

    pub fn end_ymd(&self) -> String {
        dates::format_date(&self.end)
    }
}

/// Pointer-down that may start a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub x: f32,
    pub button: PointerButton,
}

#[derive(Debug)]
struct ActiveDrag {
    task_id: Uuid,
    mode: DragMode,
    origin_x: f32,
    col_width: f32,
    origin_start: NaiveDate,
    origin_end: NaiveDate,
    latest_start: NaiveDate,
    latest_end: NaiveDate,
    _capture: CaptureGuard,
}

impl ActiveDrag {
    fn preview(&self) -> DragPreview {
        DragPreview {
            task_id: self.task_id,
            mode: self.mode,
            start: self.latest_start,
            end: self.latest_end,
        }
    }

    fn dates_at(&self, pointer_x: f32) -> (NaiveDate, NaiveDate) {
        // Half-column ties go toward later dates in both directions.
        let delta_days = ((pointer_x - self.origin_x) / self.col_width + 0.5).floor() as i64;
        match self.mode {
            DragMode::Move => (
                dates::shift_days(self.origin_start, delta_days),
                dates::shift_days(self.origin_end, delta_days),
            ),
            DragMode::ResizeStart => {
                let start = dates::shift_days(self.origin_start, delta_days);
                (start.min(self.origin_end), self.origin_end)
            }
            DragMode::ResizeEnd => {
                let end = dates::shift_days(self.origin_end, delta_days);
                (self.origin_start, end.max(self.origin_start))
            }
        }
    }
}

/// Idle/dragging state machine shared by every bar in a chart.
#[derive(Debug)]
pub struct DragController {
    enabled: bool,
    active: Option<ActiveDrag>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            enabled: true,
            active: None,
        }
    }

    /// Display-only charts never start drags; disabling cancels any in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_task(&self) -> Option<Uuid> {
        self.active.as_ref().map(|d| d.task_id)
    }

    pub fn preview(&self) -> Option<DragPreview> {
        self.active.as_ref().map(ActiveDrag::preview)
    }

    /// Start dragging `task`. Ignored for non-primary buttons, undated tasks,
    /// or a disabled controller. Any previous drag is released first, then
    /// `capture` is invoked to acquire the host resources for this one.
    pub fn begin(
        &mut self,
        task: &Task,
        mode: DragMode,
        press: PointerPress,
        col_width: f32,
        capture: impl FnOnce() -> CaptureGuard,
    ) -> Option<DragPreview> {
        if !self.enabled || press.button != PointerButton::Primary {
            return None;
        }
        let start = task.start?;
        let end = task.effective_end()?;

        // Release the old capture before acquiring a new one.
        self.active = None;

        let (origin_start, origin_end) = if end < start { (end, start) } else { (start, end) };
        let col_width = if col_width.is_finite() { col_width.max(1.0) } else { 1.0 };

        let drag = ActiveDrag {
            task_id: task.id,
            mode,
            origin_x: press.x,
            col_width,
            origin_start,
            origin_end,
            latest_start: origin_start,
            latest_end: origin_end,
            _capture: capture(),
        };
        tracing::debug!(task = %task.id, ?mode, "drag started");
        let preview = drag.preview();
        self.active = Some(drag);
        Some(preview)
    }

    /// Track the pointer. Returns a preview only when the dates changed.
    pub fn update(&mut self, pointer_x: f32) -> Option<DragPreview> {
        let drag = self.active.as_mut()?;
        let (start, end) = drag.dates_at(pointer_x);
        if start == drag.latest_start && end == drag.latest_end {
            return None;
        }
        drag.latest_start = start;
        drag.latest_end = end;
        Some(drag.preview())
    }

    /// Pointer released: end the drag and report a change if the dates moved.
    pub fn finish(&mut self) -> Option<DateChange> {
        let drag = self.active.take()?;
        let changed = drag.latest_start != drag.origin_start || drag.latest_end != drag.origin_end;
        if !changed {
            return None;
        }
        tracing::debug!(
            task = %drag.task_id,
            start = %drag.latest_start,
            end = %drag.latest_end,
            "drag committed"
        );
        Some(DateChange {
            task_id: drag.task_id,
            start: drag.latest_start,
            end: drag.latest_end,
        })
    }

    /// Abandon the drag without committing.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.active.take() {
            tracing::debug!(task = %drag.task_id, "drag cancelled");
        }
    }
}
