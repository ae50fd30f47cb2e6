//! Persisted user preferences.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::ChartSettings;

const APP_NAME: &str = "GanttPlanner";
const SETTINGS_FILE: &str = "settings.json";
const WORKING_COPY_FILE: &str = "autosave.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub chart: ChartSettings,
    /// Reopened on startup when it still exists.
    pub last_project: Option<PathBuf>,
}

impl AppSettings {
    /// Location of `settings.json`, falling back to the working directory
    /// when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        config_file(SETTINGS_FILE)
    }

    /// Location of the autosaved working copy, next to `settings.json`.
    pub fn working_copy_path() -> PathBuf {
        config_file(WORKING_COPY_FILE)
    }

    /// Read settings, falling back to defaults when the file is missing or
    /// unreadable. Values are clamped into range either way.
    pub fn load_from(path: &Path) -> Self {
        let mut settings = match Self::read(path) {
            Ok(Some(s)) => {
                tracing::info!(path = %path.display(), "settings loaded");
                s
            }
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring settings: {err:#}");
                Self::default()
            }
        };
        settings.chart.sanitize();
        settings
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let settings = serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

fn config_file(name: &str) -> PathBuf {
    match directories::ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.config_dir().join(name),
        None => PathBuf::from(".").join(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RangePadding, ViewMode};

    #[test]
    fn working_copy_lives_beside_settings() {
        let settings = AppSettings::default_path();
        let copy = AppSettings::working_copy_path();
        assert_eq!(copy.parent(), settings.parent());
        assert_eq!(copy.file_name().unwrap(), "autosave.json");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = AppSettings::load_from(&dir.path().join("settings.json"));
        assert_eq!(s, AppSettings::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut s = AppSettings::default();
        s.chart.view_mode = ViewMode::Week;
        s.chart.set_padding(3, 4);
        s.chart.set_fit(true, 3);
        s.last_project = Some(PathBuf::from("/tmp/plan.json"));
        s.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, s);
        assert_eq!(loaded.chart.padding(), RangePadding::new(3, 4));
    }

    #[test]
    fn corrupt_or_out_of_range_values_are_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        std::fs::write(&path, "{{{").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());

        std::fs::write(
            &path,
            r#"{ "chart": { "zoom": 12, "fit": { "Day": { "enabled": true, "pages": 0 },
                 "Week": { "pages": 50 }, "Month": {} } } }"#,
        )
        .unwrap();
        let s = AppSettings::load_from(&path);
        assert_eq!(s.chart.zoom, 4.0);
        assert_eq!(s.chart.fit.day.pages, 1);
        assert_eq!(s.chart.fit.week.pages, 20);
    }
}
