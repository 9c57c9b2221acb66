//! Task Service Client
//!
//! The external service that owns task status. The board only reads the
//! task list and writes status changes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoardError, BoardResult};
use crate::task::{decode_task_list, Task};

/// Shown when the service gives no usable reason
pub const GENERIC_FAILURE: &str = "Failed to update task status";

/// Task service operations the board depends on.
///
/// Not `Send`: the board runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait TaskService {
    /// Full task list for a board
    async fn list_tasks(&self, board_id: &str) -> BoardResult<Vec<Task>>;

    /// Persist a new status for one task
    async fn update_status(&self, task_id: &str, status: &str) -> BoardResult<()>;
}

#[derive(Serialize)]
struct StatusPatch<'a> {
    status: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Failure reason from a response body's `error` field, else the generic message
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// HTTP task service (`/api/boards/{id}/tasks`, `/api/tasks/{id}`)
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self, board_id: &str) -> String {
        format!("{}/api/boards/{}/tasks", self.base_url, board_id)
    }

    fn task_url(&self, task_id: &str) -> String {
        format!("{}/api/tasks/{}", self.base_url, task_id)
    }
}

#[async_trait(?Send)]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self, board_id: &str) -> BoardResult<Vec<Task>> {
        let response = self
            .client
            .get(self.tasks_url(board_id))
            .send()
            .await
            .map_err(|e| BoardError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Request(failure_message(&body)));
        }
        let items = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| BoardError::Request(e.to_string()))?;
        Ok(decode_task_list(items))
    }

    async fn update_status(&self, task_id: &str, status: &str) -> BoardResult<()> {
        let response = match self
            .client
            .patch(self.task_url(task_id))
            .json(&StatusPatch { status })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("status update for task {} did not reach the service: {}", task_id, e);
                return Err(BoardError::Request(GENERIC_FAILURE.to_string()));
            }
        };

        if response.status().is_success() {
            return Ok(());
        }
        let code = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("status update for task {} rejected with {}", task_id, code);
        Err(BoardError::Request(failure_message(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_error_field() {
        assert_eq!(failure_message(r#"{"error":"Task is archived"}"#), "Task is archived");
    }

    #[test]
    fn test_failure_message_falls_back() {
        assert_eq!(failure_message(""), GENERIC_FAILURE);
        assert_eq!(failure_message("<html>502</html>"), GENERIC_FAILURE);
        assert_eq!(failure_message(r#"{"message":"nope"}"#), GENERIC_FAILURE);
        assert_eq!(failure_message(r#"{"error":"  "}"#), GENERIC_FAILURE);
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let service = HttpTaskService::new("http://localhost:3030/");
        assert_eq!(service.base_url(), "http://localhost:3030");
        assert_eq!(service.tasks_url("b1"), "http://localhost:3030/api/boards/b1/tasks");
        assert_eq!(service.task_url("t1"), "http://localhost:3030/api/tasks/t1");
    }
}
