use chrono::NaiveDate;

use super::task::{Task, TaskStatus};

/// Average progress of one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentProgress {
    pub name: String,
    pub average: u8,
    pub tasks: usize,
}

/// Dashboard summary of a task list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub total_tasks: usize,
    /// Rounded mean progress; 0 for an empty project.
    pub total_progress: u8,
    pub completed: usize,
    pub delayed: usize,
    pub unscheduled: usize,
    /// In first-seen order.
    pub departments: Vec<DepartmentProgress>,
}

impl ProjectStats {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = Self {
            total_tasks: tasks.len(),
            ..Default::default()
        };
        if tasks.is_empty() {
            return stats;
        }

        let sum: u64 = tasks.iter().map(|t| t.progress as u64).sum();
        stats.total_progress = rounded_mean(sum, tasks.len());
        stats.completed = tasks.iter().filter(|t| t.is_complete()).count();
        stats.delayed = tasks
            .iter()
            .filter(|t| t.status(today) == Some(TaskStatus::Delayed))
            .count();
        stats.unscheduled = tasks.iter().filter(|t| t.start.is_none()).count();

        let mut sums: Vec<(String, u64, usize)> = Vec::new();
        for task in tasks {
            match sums.iter_mut().find(|(name, _, _)| *name == task.department) {
                Some((_, sum, count)) => {
                    *sum += task.progress as u64;
                    *count += 1;
                }
                None => sums.push((task.department.clone(), task.progress as u64, 1)),
            }
        }
        stats.departments = sums
            .into_iter()
            .map(|(name, sum, count)| DepartmentProgress {
                name,
                average: rounded_mean(sum, count),
                tasks: count,
            })
            .collect();
        stats
    }

    pub fn active_departments(&self) -> usize {
        self.departments.len()
    }
}

fn rounded_mean(sum: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    ((sum as f64 / count as f64).round() as u64).min(100) as u8
}
