//! The board's HTTP task client against a live server

use std::path::Path;
use std::sync::Arc;

use board_server::api::AppState;
use board_server::build_router;
use board_server::domain::{NewTask, Task};
use board_server::repository::{open_db, Repository, TaskRepository};
use kanban_core::{BoardError, HttpTaskService, TaskService, GENERIC_FAILURE};

/// Serve a fresh in-memory database on an ephemeral port
async fn start_server() -> (String, TaskRepository) {
    let conn = open_db(Path::new(":memory:")).expect("Failed to init test DB");
    let tasks = TaskRepository::new(conn);
    let app = build_router(Arc::new(AppState { tasks: tasks.clone() }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), tasks)
}

async fn seed(repo: &TaskRepository, board: &str, title: &str, status: &str) -> Task {
    let task = Task::create(
        board,
        NewTask {
            title: title.to_string(),
            status: Some(status.to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    repo.create(&task).await.unwrap()
}

#[tokio::test]
async fn test_list_tasks_reads_board() {
    let (base, repo) = start_server().await;
    let task = seed(&repo, "b1", "Plan", "In Progress").await;
    seed(&repo, "b2", "Elsewhere", "To Do").await;

    let service = HttpTaskService::new(&base);
    let tasks = service.list_tasks("b1").await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id.to_string());
    assert_eq!(tasks[0].derived_column_id(), "inprogress");
}

#[tokio::test]
async fn test_update_status_is_stored() {
    let (base, repo) = start_server().await;
    let task = seed(&repo, "b1", "Plan", "To Do").await;

    let service = HttpTaskService::new(&base);
    service.update_status(&task.id.to_string(), "Review").await.unwrap();

    let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.status, "Review");
}

#[tokio::test]
async fn test_rejection_carries_server_reason() {
    let (base, repo) = start_server().await;
    let task = seed(&repo, "b1", "Plan", "To Do").await;
    let service = HttpTaskService::new(&base);

    let err = service.update_status(&task.id.to_string(), "  ").await.unwrap_err();
    assert_eq!(err, BoardError::Request("status must not be blank".to_string()));

    let missing = uuid::Uuid::new_v4().to_string();
    let err = service.update_status(&missing, "Review").await.unwrap_err();
    assert_eq!(err, BoardError::Request(format!("Task {} not found", missing)));

    let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.status, "To Do");
}

#[tokio::test]
async fn test_unreachable_service_gives_generic_reason() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpTaskService::new(&format!("http://{}", addr));
    let err = service.update_status("t1", "Review").await.unwrap_err();
    assert_eq!(err, BoardError::Request(GENERIC_FAILURE.to_string()));
}
