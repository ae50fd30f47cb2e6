//! Chart configuration values and their clamping rules.

use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f32 = 0.25;
pub const ZOOM_MAX: f32 = 4.0;
pub const FIT_PAGES_MIN: u32 = 1;
pub const FIT_PAGES_MAX: u32 = 20;

/// Column unit and header grouping of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        }
    }

    /// Plural unit name used for padding inputs.
    pub fn unit(self) -> &'static str {
        match self {
            ViewMode::Day => "days",
            ViewMode::Week => "weeks",
            ViewMode::Month => "months",
        }
    }
}

/// Extra view-mode units added before and after the data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangePadding {
    pub before: i64,
    pub after: i64,
}

impl RangePadding {
    pub fn new(before: i64, after: i64) -> Self {
        Self { before, after }.clamped()
    }

    /// Negative padding is treated as zero.
    pub fn clamped(self) -> Self {
        Self {
            before: self.before.max(0),
            after: self.after.max(0),
        }
    }

    pub fn default_for(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Day => Self::new(15, 15),
            ViewMode::Week => Self::new(2, 2),
            ViewMode::Month => Self::new(1, 1),
        }
    }
}

/// Fit-to-viewport: squeeze the range into `pages` screen widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    pub enabled: bool,
    pub pages: u32,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            pages: 1,
        }
    }
}

impl FitSettings {
    pub fn clamped(self) -> Self {
        Self {
            enabled: self.enabled,
            pages: clamp_fit_pages(self.pages),
        }
    }
}

pub fn clamp_fit_pages(pages: u32) -> u32 {
    pages.clamp(FIT_PAGES_MIN, FIT_PAGES_MAX)
}

/// Non-finite zoom falls back to 1.0 before clamping.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(ZOOM_MIN, ZOOM_MAX)
    } else {
        1.0
    }
}

/// One value per view mode, serialized as `{ "Day": .., "Week": .., "Month": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerViewMode<T> {
    #[serde(rename = "Day")]
    pub day: T,
    #[serde(rename = "Week")]
    pub week: T,
    #[serde(rename = "Month")]
    pub month: T,
}

impl<T> PerViewMode<T> {
    pub fn get(&self, mode: ViewMode) -> &T {
        match mode {
            ViewMode::Day => &self.day,
            ViewMode::Week => &self.week,
            ViewMode::Month => &self.month,
        }
    }

    pub fn get_mut(&mut self, mode: ViewMode) -> &mut T {
        match mode {
            ViewMode::Day => &mut self.day,
            ViewMode::Week => &mut self.week,
            ViewMode::Month => &mut self.month,
        }
    }

    fn from_fn(mut f: impl FnMut(ViewMode) -> T) -> Self {
        Self {
            day: f(ViewMode::Day),
            week: f(ViewMode::Week),
            month: f(ViewMode::Month),
        }
    }
}

/// User-adjustable chart settings, remembered per view mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartSettings {
    pub view_mode: ViewMode,
    pub range_padding: PerViewMode<RangePadding>,
    pub fit: PerViewMode<FitSettings>,
    pub zoom: f32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Day,
            range_padding: PerViewMode::from_fn(RangePadding::default_for),
            fit: PerViewMode::from_fn(|_| FitSettings::default()),
            zoom: 1.0,
        }
    }
}

impl ChartSettings {
    /// Bring every field back into its valid range.
    pub fn sanitize(&mut self) {
        for mode in ViewMode::ALL {
            let padding = self.range_padding.get_mut(mode);
            *padding = padding.clamped();
            let fit = self.fit.get_mut(mode);
            *fit = fit.clamped();
        }
        self.zoom = clamp_zoom(self.zoom);
    }

    pub fn set_padding(&mut self, before: i64, after: i64) {
        *self.range_padding.get_mut(self.view_mode) = RangePadding::new(before, after);
    }

    pub fn set_fit(&mut self, enabled: bool, pages: u32) {
        *self.fit.get_mut(self.view_mode) = FitSettings { enabled, pages }.clamped();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn padding(&self) -> RangePadding {
        *self.range_padding.get(self.view_mode)
    }

    pub fn fit_settings(&self) -> FitSettings {
        *self.fit.get(self.view_mode)
    }

    /// Snapshot for a single render.
    pub fn render_config(&self) -> RenderConfig {
        let fit = self.fit_settings();
        RenderConfig {
            view_mode: self.view_mode,
            range_padding: self.padding(),
            fit_enabled: fit.enabled,
            fit_pages: fit.pages,
            zoom: self.zoom,
        }
    }
}

/// Plain values passed into every chart render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub view_mode: ViewMode,
    pub range_padding: RangePadding,
    pub fit_enabled: bool,
    pub fit_pages: u32,
    pub zoom: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        ChartSettings::default().render_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut s = ChartSettings::default();
        s.set_padding(-3, 4);
        assert_eq!(s.padding(), RangePadding { before: 0, after: 4 });
        s.set_fit(true, 99);
        assert_eq!(s.fit_settings().pages, FIT_PAGES_MAX);
        s.set_fit(true, 0);
        assert_eq!(s.fit_settings().pages, FIT_PAGES_MIN);
        s.set_zoom(10.0);
        assert_eq!(s.zoom, ZOOM_MAX);
        s.set_zoom(f32::NAN);
        assert_eq!(s.zoom, 1.0);
    }

    #[test]
    fn padding_is_remembered_per_mode() {
        let mut s = ChartSettings::default();
        assert_eq!(s.padding(), RangePadding::new(15, 15));
        s.view_mode = ViewMode::Week;
        assert_eq!(s.padding(), RangePadding::new(2, 2));
        s.set_padding(5, 6);
        s.view_mode = ViewMode::Day;
        assert_eq!(s.padding(), RangePadding::new(15, 15));
        s.view_mode = ViewMode::Week;
        assert_eq!(s.render_config().range_padding, RangePadding::new(5, 6));
    }

    #[test]
    fn partial_json_fills_defaults_then_sanitizes() {
        let mut s: ChartSettings =
            serde_json::from_str(r#"{ "viewMode": "Month", "zoom": 0.01 }"#).unwrap();
        s.sanitize();
        assert_eq!(s.view_mode, ViewMode::Month);
        assert_eq!(s.zoom, ZOOM_MIN);
        assert_eq!(s.padding(), RangePadding::new(1, 1));
    }
}
