use std::path::Path;

use anyhow::{Context, Result};

use crate::dates;
use crate::model::Task;

const HEADER: [&str; 7] = ["Category", "Task", "Department", "Assignee", "Start", "End", "Progress"];

/// Export tasks to a semicolon-delimited CSV file.
///
/// Dates are written as `YYYY-MM-DD`; unscheduled tasks get empty date cells.
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    wtr.write_record(HEADER).context("writing CSV header")?;

    for task in tasks {
        wtr.write_record([
            task.category.as_str(),
            task.task_name.as_str(),
            task.department.as_str(),
            task.assignee.as_str(),
            dates::format_date(&task.start).as_str(),
            dates::format_date(&task.end).as_str(),
            task.progress.to_string().as_str(),
        ])
        .with_context(|| format!("writing task '{}'", task.task_name))?;
    }

    wtr.flush().with_context(|| format!("flushing {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = tasks.len(), "tasks exported");
    Ok(tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        let tasks = vec![
            Task::new(
                "Kickoff; all hands",
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            )
            .with_category("Planning")
            .with_department("PMO")
            .with_assignee("Kim")
            .with_progress(50),
            Task::unscheduled("Later"),
        ];

        assert_eq!(export_csv(&tasks, &path).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Category;Task;Department;Assignee;Start;End;Progress");
        assert_eq!(lines[1], "Planning;\"Kickoff; all hands\";PMO;Kim;2024-05-01;2024-05-02;50");
        assert_eq!(lines[2], ";Later;;;;;0");
    }
}
