use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::normalize::{normalize_tasks, normalize_vacations};
use crate::model::{ChartSettings, PerViewMode, Project, ViewMode};

/// Save a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(project).context("serializing project")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), tasks = project.tasks.len(), "project saved");
    Ok(())
}

/// Load a project from a JSON file.
///
/// Files that don't match the current schema (hand-edited, or exported by an
/// older version) are read leniently: task and vacation records go through
/// the normalizer, and unreadable dates become unscheduled tasks. Either way
/// progress and view settings are clamped and vacations ending before they
/// start are dropped.
pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;

    let mut project = match serde_json::from_value::<Project>(value.clone()) {
        Ok(project) => project,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "falling back to lenient project load");
            lenient_project(&value, path)?
        }
    };
    let dropped = project.sanitize();
    if dropped > 0 {
        tracing::warn!(path = %path.display(), dropped, "dropped vacations ending before they start");
    }
    tracing::info!(
        path = %path.display(),
        tasks = project.tasks.len(),
        vacations = project.vacations.len(),
        "project loaded"
    );
    Ok(project)
}

fn records<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Read `{ "Day": .., "Week": .., "Month": .. }`, keeping `defaults` for any
/// mode that is missing or unreadable.
fn per_view_mode<T>(value: &Value, key: &str, defaults: PerViewMode<T>) -> Option<PerViewMode<T>>
where
    T: DeserializeOwned,
{
    let map = value.get(key)?.as_object()?;
    let mut merged = defaults;
    for mode in ViewMode::ALL {
        if let Some(v) = map.get(mode.label()) {
            match serde_json::from_value::<T>(v.clone()) {
                Ok(parsed) => *merged.get_mut(mode) = parsed,
                Err(err) => tracing::warn!(key, mode = mode.label(), %err, "ignoring view setting"),
            }
        }
    }
    Some(merged)
}

fn lenient_project(value: &Value, path: &Path) -> Result<Project> {
    // A bare array is a plain task list.
    let (tasks, vacations) = match value {
        Value::Array(items) => (normalize_tasks(items), Vec::new()),
        Value::Object(_) => (
            normalize_tasks(records(value, "tasks")),
            normalize_vacations(records(value, "vacations")),
        ),
        _ => anyhow::bail!("{} is not a project file", path.display()),
    };

    let name = value
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let mut project = Project::new(name);
    project.tasks = tasks;
    project.vacations = vacations;

    let defaults = ChartSettings::default();
    project.range_padding = per_view_mode(value, "rangePadding", defaults.range_padding);
    project.fit_settings = per_view_mode(value, "fitSettings", defaults.fit);
    Ok(project)
}
