//! Column width for each view mode, zoom and fit-to-viewport.

use crate::model::config::{clamp_fit_pages, clamp_zoom};
use crate::model::ViewMode;

/// Natural column widths in pixels. Day > Week > Month must hold.
pub const DAY_COLUMN_WIDTH: f32 = 60.0;
pub const WEEK_COLUMN_WIDTH: f32 = 24.0;
pub const MONTH_COLUMN_WIDTH: f32 = 8.0;

/// Smallest column a fitted chart may shrink to.
pub const MIN_FIT_COLUMN_WIDTH: f32 = 1.0;

pub fn natural_column_width(mode: ViewMode) -> f32 {
    match mode {
        ViewMode::Day => DAY_COLUMN_WIDTH,
        ViewMode::Week => WEEK_COLUMN_WIDTH,
        ViewMode::Month => MONTH_COLUMN_WIDTH,
    }
}

/// Inputs to the column-width calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub view_mode: ViewMode,
    pub zoom: f32,
    pub fit_enabled: bool,
    pub fit_pages: u32,
    pub total_days: usize,
    /// Timeline viewport width, `None` until measured.
    pub viewport_width: Option<f32>,
}

/// Horizontal geometry of the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub col_width: f32,
    pub chart_width: f32,
}

impl ColumnLayout {
    pub fn resolve(input: LayoutInput) -> Self {
        let max_col_width = natural_column_width(input.view_mode) * clamp_zoom(input.zoom);

        let col_width = match input.viewport_width {
            Some(viewport) if input.fit_enabled && viewport > 0.0 => {
                let columns = input.total_days.max(1) as f32 * clamp_fit_pages(input.fit_pages) as f32;
                (viewport / columns).clamp(MIN_FIT_COLUMN_WIDTH, max_col_width.max(MIN_FIT_COLUMN_WIDTH))
            }
            _ => max_col_width,
        };

        Self {
            col_width,
            chart_width: input.total_days as f32 * col_width,
        }
    }

    /// Left edge of a column.
    pub fn x_of(&self, column: i64) -> f32 {
        column as f32 * self.col_width
    }
}
