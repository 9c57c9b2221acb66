//! Task Repository Implementation
//!
//! SQLite-backed implementation of Repository<Task> and BoardRepository<Task>.
//! JSON-valued fields are stored as text.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;
use uuid::Uuid;

use super::db::SharedConnection;
use super::traits::{BoardRepository, Repository};
use crate::domain::{DomainError, DomainResult, Task, TaskPatch};

const COLUMNS: &str = "id, board_id, title, status, priority, due_date, assigned_to, \
                       estimated_time, logged_time, subtasks, created_at, updated_at";

#[derive(Clone)]
pub struct TaskRepository {
    conn: SharedConnection,
}

impl TaskRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Load, patch and store a task in one locked step
    pub async fn apply_patch(&self, id: Uuid, patch: TaskPatch) -> DomainResult<Task> {
        let conn = self.conn.lock().await;
        let mut task = find(&conn, id)?.ok_or_else(|| not_found(id))?;
        task.apply(patch)?;
        write(&conn, &task)?;
        Ok(task)
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound(format!("Task {} not found", id))
}

fn to_json(value: &impl serde::Serialize) -> DomainResult<String> {
    serde_json::to_string(value).map_err(|e| DomainError::Internal(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(text: &str) -> rusqlite::Result<T> {
    serde_json::from_str(text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let assigned_to: Option<String> = row.get(6)?;
    let subtasks: String = row.get(9)?;
    Ok(Task {
        id,
        board_id: row.get(1)?,
        title: row.get(2)?,
        status: row.get(3)?,
        priority: row.get(4)?,
        due_date: row.get(5)?,
        assigned_to: assigned_to.as_deref().map(from_json::<Value>).transpose()?,
        estimated_time: row.get(7)?,
        logged_time: row.get(8)?,
        subtasks: from_json(&subtasks)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn find(conn: &Connection, id: Uuid) -> DomainResult<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE id = ?", COLUMNS);
    Ok(conn
        .query_row(&sql, params![id.to_string()], row_to_task)
        .optional()?)
}

fn write(conn: &Connection, task: &Task) -> DomainResult<()> {
    let assigned_to = task.assigned_to.as_ref().map(to_json).transpose()?;
    let changed = conn.execute(
        "UPDATE tasks SET title = ?, status = ?, priority = ?, due_date = ?, assigned_to = ?, \
         estimated_time = ?, logged_time = ?, subtasks = ?, updated_at = ? WHERE id = ?",
        params![
            task.title,
            task.status,
            task.priority,
            task.due_date,
            assigned_to,
            task.estimated_time,
            task.logged_time,
            to_json(&task.subtasks)?,
            task.updated_at,
            task.id.to_string()
        ],
    )?;
    if changed == 0 {
        return Err(not_found(task.id));
    }
    Ok(())
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        let conn = self.conn.lock().await;
        let assigned_to = entity.assigned_to.as_ref().map(to_json).transpose()?;
        conn.execute(
            &format!("INSERT INTO tasks ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)", COLUMNS),
            params![
                entity.id.to_string(),
                entity.board_id,
                entity.title,
                entity.status,
                entity.priority,
                entity.due_date,
                assigned_to,
                entity.estimated_time,
                entity.logged_time,
                to_json(&entity.subtasks)?,
                entity.created_at,
                entity.updated_at
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(format!("Task {} already exists", entity.id))
            }
            other => DomainError::from(other),
        })?;
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Task>> {
        let conn = self.conn.lock().await;
        find(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks ORDER BY board_id, created_at, rowid",
            COLUMNS
        ))?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        let conn = self.conn.lock().await;
        write(&conn, entity)?;
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let removed = conn.execute("DELETE FROM tasks WHERE id = ?", params![id.to_string()])?;
        if removed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl BoardRepository<Task> for TaskRepository {
    async fn list_by_board(&self, board_id: &str) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE board_id = ? ORDER BY created_at, rowid",
            COLUMNS
        ))?;
        let tasks = stmt
            .query_map(params![board_id], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}
