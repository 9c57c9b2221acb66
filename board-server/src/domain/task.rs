//! Task Entity
//!
//! A task on a board. `status` is free text; the board groups tasks into
//! columns by normalizing it, so the server never rejects an unknown one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Status given to tasks created without one
pub const DEFAULT_STATUS: &str = "To Do";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub board_id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_time: Option<f64>,
    #[serde(default)]
    pub subtasks: Vec<Value>,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

impl Entity for Task {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Creation payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to: Option<Value>,
    pub estimated_time: Option<f64>,
    pub logged_time: Option<f64>,
    #[serde(default)]
    pub subtasks: Vec<Value>,
}

/// Partial update; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub status: Option<String>,
    pub title: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to: Option<Value>,
    pub estimated_time: Option<f64>,
    pub logged_time: Option<f64>,
    pub subtasks: Option<Vec<Value>>,
}

fn require_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

impl Task {
    /// Build a fresh task from a creation payload
    pub fn create(board_id: &str, input: NewTask) -> DomainResult<Self> {
        let board_id = require_text("boardId", board_id)?;
        let title = require_text("title", &input.title)?;
        let status = match input.status {
            Some(s) => require_text("status", &s)?,
            None => DEFAULT_STATUS.to_string(),
        };
        let now = chrono::Utc::now().timestamp_millis();
        Ok(Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            status,
            priority: input.priority,
            due_date: input.due_date,
            assigned_to: input.assigned_to,
            estimated_time: input.estimated_time,
            logged_time: input.logged_time,
            subtasks: input.subtasks,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch, validating before touching anything
    pub fn apply(&mut self, patch: TaskPatch) -> DomainResult<()> {
        let status = patch.status.as_deref().map(|s| require_text("status", s)).transpose()?;
        let title = patch.title.as_deref().map(|t| require_text("title", t)).transpose()?;

        if let Some(status) = status {
            self.status = status;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if patch.priority.is_some() {
            self.priority = patch.priority;
        }
        if patch.due_date.is_some() {
            self.due_date = patch.due_date;
        }
        if patch.assigned_to.is_some() {
            self.assigned_to = patch.assigned_to;
        }
        if patch.estimated_time.is_some() {
            self.estimated_time = patch.estimated_time;
        }
        if patch.logged_time.is_some() {
            self.logged_time = patch.logged_time;
        }
        if let Some(subtasks) = patch.subtasks {
            self.subtasks = subtasks;
        }
        self.updated_at = chrono::Utc::now().timestamp_millis().max(self.updated_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_status() {
        let task = Task::create(
            "b1",
            NewTask {
                title: "  Write docs ".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, DEFAULT_STATUS);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let err = Task::create("b1", NewTask::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_status_patch_changes_nothing() {
        let mut task = Task::create("b1", NewTask { title: "A".into(), ..Default::default() }).unwrap();
        let before = task.clone();
        let err = task
            .apply(TaskPatch {
                status: Some("   ".into()),
                title: Some("B".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidInput("status must not be blank".into()));
        assert_eq!(task, before);
    }

    #[test]
    fn test_serializes_wire_names() {
        let task = Task::create("b1", NewTask { title: "A".into(), ..Default::default() }).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], task.id.to_string());
        assert_eq!(json["boardId"], "b1");
        assert_eq!(json["status"], "To Do");
        assert!(json.get("priority").is_none());
        assert_eq!(json["subtasks"], serde_json::json!([]));
    }
}
