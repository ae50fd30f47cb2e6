//! Boundary normalization for loosely-shaped task and vacation records.
//!
//! Backups and legacy files carry a handful of alternate field names
//! (`actStart`, `planEnd`, `startDate`, `name`, ...) and dates in whatever
//! format the user typed. Everything is coerced here so the chart only ever
//! sees [`Task`] and [`Vacation`] values with calendar dates or `None`.

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use super::task::Task;
use super::vacation::{Vacation, DEFAULT_VACATION_TITLE};
use crate::dates::{self, Timestamp};

fn field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| is_truthy(v))
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && f.is_finite()),
        _ => true,
    }
}

fn text(record: &Value, keys: &[&str]) -> String {
    match field(record, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn date(record: &Value, keys: &[&str]) -> Option<NaiveDate> {
    match field(record, keys)? {
        Value::String(s) => dates::to_date(s.as_str()),
        Value::Number(n) => n.as_i64().and_then(|ms| dates::to_date(&Timestamp(ms))),
        _ => None,
    }
}

fn progress(record: &Value) -> i64 {
    let raw = match record.get("progress") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0).round() as i64,
        _ => 0,
    }
}

fn id(record: &Value) -> Uuid {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Coerce raw task records. Never drops a record: undated tasks come back
/// with `start == None` and are shown as unscheduled.
pub fn normalize_tasks(records: &[Value]) -> Vec<Task> {
    records
        .iter()
        .map(|r| {
            let mut task = Task::unscheduled(text(r, &["taskName"]));
            task.id = id(r);
            task.category = text(r, &["category"]);
            task.department = text(r, &["department"]);
            task.assignee = text(r, &["assignee"]);
            task.start = date(r, &["start", "actStart", "planStart"]);
            task.end = date(r, &["end", "actEnd", "planEnd"]);
            task.set_progress(progress(r));
            task
        })
        .collect()
}

/// Coerce raw vacation records, dropping any without a readable start.
pub fn normalize_vacations(records: &[Value]) -> Vec<Vacation> {
    records
        .iter()
        .filter_map(|r| {
            let start = date(r, &["start", "startDate"])?;
            let end = date(r, &["end", "endDate", "start", "startDate"]);
            let title = match text(r, &["title", "name"]) {
                t if t.is_empty() => DEFAULT_VACATION_TITLE.to_string(),
                t => t,
            };
            Some(Vacation {
                id: id(r),
                title,
                start,
                end,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tasks_use_alternate_date_fields_and_clamp_progress() {
        let tasks = normalize_tasks(&[
            json!({ "taskName": "A", "actStart": "2024/5/1", "planEnd": "2024-05-09", "progress": 140 }),
            json!({ "taskName": "B", "start": "", "planStart": "2024-06-01", "progress": "45" }),
            json!({ "taskName": "C", "start": "2024-02-30", "progress": "lots" }),
        ]);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].start, Some(ymd(2024, 5, 1)));
        assert_eq!(tasks[0].end, Some(ymd(2024, 5, 9)));
        assert_eq!(tasks[0].progress, 100);
        assert_eq!(tasks[1].start, Some(ymd(2024, 6, 1)));
        assert_eq!(tasks[1].end, None);
        assert_eq!(tasks[1].progress, 45);
        assert_eq!(tasks[2].start, None);
        assert_eq!(tasks[2].progress, 0);
    }

    #[test]
    fn task_ids_survive_when_they_are_uuids() {
        let id = Uuid::new_v4();
        let tasks = normalize_tasks(&[json!({ "id": id.to_string() }), json!({ "id": 7 })]);
        assert_eq!(tasks[0].id, id);
        assert_ne!(tasks[1].id, id);
    }

    #[test]
    fn vacations_default_title_and_end() {
        let vacations = normalize_vacations(&[
            json!({ "name": "Summer", "startDate": "2024-08-01", "endDate": "2024-08-05" }),
            json!({ "start": "2024-09-02" }),
            json!({ "title": "No start" }),
        ]);
        assert_eq!(vacations.len(), 2);
        assert_eq!(vacations[0].title, "Summer");
        assert_eq!(vacations[0].end, Some(ymd(2024, 8, 5)));
        assert_eq!(vacations[1].title, DEFAULT_VACATION_TITLE);
        assert_eq!(vacations[1].end_or_start(), ymd(2024, 9, 2));
    }
}
