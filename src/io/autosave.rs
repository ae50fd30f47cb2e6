//! Working copy kept between sessions, and the debounce that paces its writes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Project;

/// Quiet period after the last edit before the working copy is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(400);

/// Coalesces a burst of changes into one write once `delay` has passed
/// without a new change.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    last_change: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
        }
    }

    /// Record a change, restarting the quiet period.
    pub fn mark(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// Time left before the pending write is due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let since = now.saturating_duration_since(self.last_change?);
        Some(self.delay.saturating_sub(since))
    }

    /// True exactly once per burst, when the quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.remaining(now) {
            Some(left) if left.is_zero() => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// Clear a pending write regardless of timing. Returns whether one was pending.
    pub fn take_pending(&mut self) -> bool {
        self.last_change.take().is_some()
    }
}

/// Everything needed to pick up where the last session stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCopy {
    pub project: Project,
    /// File the project was last opened from or saved to.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    /// Edits not yet saved to `file_path`.
    #[serde(default)]
    pub dirty: bool,
}

pub fn save_working_copy(copy: &WorkingCopy, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(copy).context("serializing working copy")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), dirty = copy.dirty, "working copy saved");
    Ok(())
}

/// `Ok(None)` when no working copy has been written yet.
pub fn load_working_copy(path: &Path) -> Result<Option<WorkingCopy>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut copy: WorkingCopy =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    copy.project.sanitize();
    tracing::info!(
        path = %path.display(),
        tasks = copy.project.tasks.len(),
        dirty = copy.dirty,
        "working copy restored"
    );
    Ok(Some(copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn a_burst_of_changes_writes_once_after_the_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debounce::new(AUTOSAVE_DELAY);
        assert!(!d.take_due(t0));

        d.mark(t0);
        d.mark(t0 + 100 * MS);
        d.mark(t0 + 300 * MS);
        assert!(!d.take_due(t0 + 500 * MS));
        assert_eq!(d.remaining(t0 + 500 * MS), Some(200 * MS));
        assert!(d.take_due(t0 + 700 * MS));
        assert!(!d.take_due(t0 + 800 * MS));
        assert!(!d.is_pending());
    }

    #[test]
    fn take_pending_flushes_early() {
        let t0 = Instant::now();
        let mut d = Debounce::new(AUTOSAVE_DELAY);
        assert!(!d.take_pending());
        d.mark(t0);
        assert!(d.take_pending());
        assert!(!d.take_due(t0 + 1000 * MS));
    }

    #[test]
    fn working_copy_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("autosave.json");
        assert!(load_working_copy(&path).unwrap().is_none());

        let mut project = Project::new("Draft");
        let mut task = Task::new(
            "Pour",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        );
        task.progress = 120;
        project.add_task(task);
        let copy = WorkingCopy {
            project,
            file_path: Some(PathBuf::from("/tmp/draft.json")),
            dirty: true,
        };
        save_working_copy(&copy, &path).unwrap();

        let restored = load_working_copy(&path).unwrap().unwrap();
        assert_eq!(restored.project.name, "Draft");
        assert_eq!(restored.project.tasks[0].progress, 100);
        assert_eq!(restored.file_path, copy.file_path);
        assert!(restored.dirty);
    }

    #[test]
    fn corrupt_working_copy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autosave.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(load_working_copy(&path).is_err());
    }
}
