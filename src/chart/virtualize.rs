//! Row and column windowing for large charts.
//!
//! Only the rows and day columns near the viewport are laid out; everything
//! else is replaced by a leading and a trailing spacer so the scrollable extent
//! stays exact. Scroll and resize notifications are coalesced and resolved at
//! most once per frame through [`Virtualizer::flush`].

/// Row virtualization kicks in above this many rows.
pub const ROW_THRESHOLD: usize = 80;
/// Column virtualization kicks in above this many day columns.
pub const COLUMN_THRESHOLD: usize = 120;
pub const OVERSCAN_ROWS: i64 = 8;
/// Roughly this many pixels of columns are pre-built on each side.
pub const OVERSCAN_PX: f32 = 800.0;
/// Windows used before the viewport has been measured.
pub const INITIAL_ROWS: usize = 50;
pub const INITIAL_COLUMNS: usize = 200;

/// Half-open index range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexWindow {
    pub start: usize,
    pub end: usize,
}

impl IndexWindow {
    pub fn full(count: usize) -> Self {
        Self { start: 0, end: count }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Clamp into `[0, count]`, keeping `start <= end`.
    pub fn clamped(self, count: usize) -> Self {
        let start = self.start.min(count);
        Self {
            start,
            end: self.end.clamp(start, count),
        }
    }

    /// Size of the leading spacer in pixels.
    pub fn spacer_before(&self, unit: f32) -> f32 {
        self.start as f32 * unit
    }

    /// Size of the trailing spacer in pixels.
    pub fn spacer_after(&self, count: usize, unit: f32) -> f32 {
        count.saturating_sub(self.end) as f32 * unit
    }

    fn from_signed(start: i64, end: i64, count: usize) -> Self {
        let count_i = count as i64;
        let start = start.clamp(0, count_i);
        let end = end.clamp(start, count_i);
        Self {
            start: start as usize,
            end: end as usize,
        }
    }
}

/// Scroll offset and size of the timeline viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_left: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// Everything besides scroll position that shapes the windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    pub row_count: usize,
    pub row_height: f32,
    pub header_height: f32,
    pub total_days: usize,
    pub col_width: f32,
    pub fit_enabled: bool,
    /// Export renders everything; no windowing at all.
    pub export: bool,
}

impl WindowParams {
    pub fn rows_virtualized(&self) -> bool {
        !self.export && self.row_count > ROW_THRESHOLD
    }

    pub fn columns_virtualized(&self) -> bool {
        !self.export
            && !self.fit_enabled
            && self.total_days > COLUMN_THRESHOLD
            && self.col_width.is_finite()
            && self.col_width > 0.0
    }

    fn initial_rows(&self) -> IndexWindow {
        if self.rows_virtualized() {
            IndexWindow::full(self.row_count.min(INITIAL_ROWS))
        } else {
            IndexWindow::full(self.row_count)
        }
    }

    fn initial_columns(&self) -> IndexWindow {
        if self.columns_virtualized() {
            IndexWindow::full(self.total_days.min(INITIAL_COLUMNS))
        } else {
            IndexWindow::full(self.total_days)
        }
    }
}

/// Rows whose pixel band intersects the viewport, plus overscan.
pub fn row_window(params: &WindowParams, metrics: &ScrollMetrics) -> IndexWindow {
    let count = params.row_count;
    if !params.rows_virtualized() || metrics.viewport_height <= 0.0 || params.row_height <= 0.0 {
        return IndexWindow::full(count);
    }
    let top = (metrics.scroll_top - params.header_height) as f64;
    let bottom = (metrics.scroll_top + metrics.viewport_height - params.header_height) as f64;
    let rh = params.row_height as f64;
    let start = (top / rh).floor() as i64 - OVERSCAN_ROWS;
    let end = (bottom / rh).ceil() as i64 + OVERSCAN_ROWS;
    IndexWindow::from_signed(start, end, count)
}

/// Day columns intersecting the viewport, plus roughly [`OVERSCAN_PX`] per side.
pub fn column_window(params: &WindowParams, metrics: &ScrollMetrics) -> IndexWindow {
    let count = params.total_days;
    if !params.columns_virtualized() || metrics.viewport_width <= 0.0 {
        return IndexWindow::full(count);
    }
    let cw = params.col_width as f64;
    let overscan = (OVERSCAN_PX as f64 / cw).ceil() as i64;
    let start = (metrics.scroll_left as f64 / cw).floor() as i64 - overscan;
    let end = ((metrics.scroll_left + metrics.viewport_width) as f64 / cw).ceil() as i64 + overscan;
    IndexWindow::from_signed(start, end, count)
}

/// Holds the current windows and coalesces recomputation to one per frame.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    params: WindowParams,
    metrics: Option<ScrollMetrics>,
    dirty: bool,
    rows: IndexWindow,
    columns: IndexWindow,
}

impl Virtualizer {
    pub fn new(params: WindowParams) -> Self {
        Self {
            params,
            metrics: None,
            dirty: false,
            rows: params.initial_rows(),
            columns: params.initial_columns(),
        }
    }

    /// Record new layout inputs (row count, column width, ...).
    pub fn set_params(&mut self, params: WindowParams) {
        if params != self.params {
            self.params = params;
            self.dirty = true;
        }
    }

    /// Record a scroll or resize. Cheap; does no windowing work.
    pub fn observe(&mut self, metrics: ScrollMetrics) {
        if self.metrics != Some(metrics) {
            self.metrics = Some(metrics);
            self.dirty = true;
        }
    }

    /// Resolve pending changes. Call once per frame; returns true when a
    /// window moved.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let (rows, columns) = match self.metrics {
            Some(m) => (row_window(&self.params, &m), column_window(&self.params, &m)),
            None => (self.params.initial_rows(), self.params.initial_columns()),
        };
        let changed = rows != self.rows || columns != self.columns;
        self.rows = rows;
        self.columns = columns;
        if changed {
            tracing::trace!(?rows, ?columns, "virtual windows moved");
        }
        changed
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn rows(&self) -> IndexWindow {
        self.rows.clamped(self.params.row_count)
    }

    pub fn columns(&self) -> IndexWindow {
        self.columns.clamped(self.params.total_days)
    }
}
