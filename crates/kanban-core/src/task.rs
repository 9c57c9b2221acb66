//! Task Model
//!
//! Tasks as delivered by the task service. Only `status` drives board
//! placement; everything else is carried through for display.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::column::column_id_for_status;

/// A task (matches the task service payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub title: String,
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Value>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub logged_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Value>,
    /// Fields the board does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: status.into(),
            priority: None,
            due_date: None,
            assigned_to: None,
            estimated_time: None,
            logged_time: None,
            subtasks: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Column this task belongs in, derived from `status` alone
    pub fn derived_column_id(&self) -> String {
        column_id_for_status(&self.status)
    }

    /// Completed subtasks out of total, when the task has any
    pub fn subtask_progress(&self) -> Option<(usize, usize)> {
        if self.subtasks.is_empty() {
            return None;
        }
        let done = self
            .subtasks
            .iter()
            .filter(|s| s.get("completed").and_then(Value::as_bool).unwrap_or(false))
            .count();
        Some((done, self.subtasks.len()))
    }

    /// Assignee as shown on a card: a plain string, or an object's `name`
    /// (then `email`)
    pub fn assignee_name(&self) -> Option<String> {
        match self.assigned_to.as_ref()? {
            Value::String(name) if !name.trim().is_empty() => Some(name.clone()),
            Value::Object(person) => ["name", "email"]
                .iter()
                .find_map(|key| person.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

// Display fields accept whatever the service sends. A value of the wrong
// type reads as absent instead of failing the whole task list.

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}

/// Decode a task list entry by entry. Entries that are not tasks (no
/// `_id` or `status`) are dropped with a warning.
pub fn decode_task_list(items: Vec<Value>) -> Vec<Task> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Task>(item) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("skipping task list entry {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// A task placed on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Column the card is currently shown under
    pub column_id: String,
    pub task: Task,
}

impl Card {
    pub fn from_task(task: Task) -> Self {
        Self {
            column_id: task.derived_column_id(),
            task,
        }
    }

    pub fn id(&self) -> &str {
        &self.task.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_task_payload() {
        let json = r#"{
            "_id": "t1",
            "title": "Write docs",
            "status": "In Progress",
            "priority": "High",
            "dueDate": "2026-11-01",
            "estimatedTime": 3.5,
            "subtasks": [{"title": "a", "completed": true}, {"title": "b"}],
            "project": "p9"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.derived_column_id(), "inprogress");
        assert_eq!(task.priority.as_deref(), Some("High"));
        assert_eq!(task.estimated_time, Some(3.5));
        assert_eq!(task.subtask_progress(), Some((1, 2)));
        assert_eq!(task.extra.get("project"), Some(&Value::from("p9")));
    }

    #[test]
    fn test_odd_display_fields_read_as_absent() {
        let json = r#"{
            "_id": "t3",
            "title": null,
            "status": "Review",
            "priority": 3,
            "dueDate": {"at": "soon"},
            "estimatedTime": "2.5",
            "loggedTime": "n/a",
            "subtasks": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "");
        assert_eq!(task.priority.as_deref(), Some("3"));
        assert_eq!(task.due_date, None);
        assert_eq!(task.estimated_time, Some(2.5));
        assert_eq!(task.logged_time, None);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.subtask_progress(), None);
    }

    #[test]
    fn test_task_list_keeps_good_entries() {
        let items: Vec<Value> = serde_json::from_str(
            r#"[
                {"_id": "t1", "status": "To Do", "subtasks": null},
                {"title": "no id or status"},
                {"_id": "t2", "status": "Completed", "priority": 3}
            ]"#,
        )
        .unwrap();
        let tasks = decode_task_list(items);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_opaque_fields_survive_serialization() {
        let json = r#"{"_id":"t2","status":"To Do","project":"p1"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["_id"], "t2");
        assert_eq!(back["project"], "p1");
        assert!(back.get("priority").is_none());
    }

    #[test]
    fn test_assignee_name() {
        let mut task = Task::new("t4", "Review", "Review");
        assert_eq!(task.assignee_name(), None);

        task.assigned_to = Some(Value::from("Ana"));
        assert_eq!(task.assignee_name().as_deref(), Some("Ana"));

        task.assigned_to = Some(serde_json::json!({"_id": "u1", "email": "bo@example.com"}));
        assert_eq!(task.assignee_name().as_deref(), Some("bo@example.com"));

        task.assigned_to = Some(serde_json::json!(["u1", "u2"]));
        assert_eq!(task.assignee_name(), None);
    }

    #[test]
    fn test_card_from_task() {
        let card = Card::from_task(Task::new("t3", "Ship", "Completed"));
        assert_eq!(card.column_id, "completed");
        assert_eq!(card.id(), "t3");
    }
}
