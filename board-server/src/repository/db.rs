//! Database Connection and Setup
//!
//! Opens the SQLite database and runs idempotent migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database at `path`; `:memory:` for an ephemeral one
pub fn open_db(path: &Path) -> DomainResult<SharedConnection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && path != Path::new(":memory:") {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
    }
    let conn = Connection::open(path)
        .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
pub(crate) fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            board_id TEXT NOT NULL,
            title TEXT NOT NULL,
            status TEXT NOT NULL,
            priority TEXT,
            due_date TEXT,
            assigned_to TEXT,
            estimated_time REAL,
            logged_time REAL,
            subtasks TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Added after the first schema
    if !column_exists(conn, "tasks", "updated_at")? {
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add updated_at: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_board ON tasks(board_id, created_at)",
        [],
    )?;

    Ok(())
}
