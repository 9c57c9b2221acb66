//! Board session: loading, column layout persistence, drag dispatch

mod common;

use common::{sample_tasks, Harness};
use kanban_core::{
    default_columns, layout_key, BoardError, DragPayload, MemoryLayoutBackend, Task,
};

fn col(id: &str) -> DragPayload {
    DragPayload::Column(id.to_string())
}

fn column_ids(h: &Harness) -> Vec<String> {
    h.board.borrow().columns().iter().map(|c| c.id.clone()).collect()
}

#[test]
fn test_load_places_tasks_by_status() {
    let h = Harness::new();
    let board = h.board.borrow();

    for task in sample_tasks() {
        let card = board.card(&task.id).unwrap();
        let column = board.column(&card.column_id).unwrap();
        assert_eq!(
            kanban_core::column_id_for_status(&column.status_key),
            kanban_core::column_id_for_status(&task.status)
        );
    }
    assert_eq!(board.columns(), default_columns().as_slice());
}

#[test]
fn test_column_drop_reorders_and_saves_layout() {
    let h = Harness::new();
    assert!(h.backend.raw(&layout_key("b1")).is_none());

    assert!(h.session.drop_on(&col("completed"), Some(&col("todo"))).is_none());

    assert_eq!(column_ids(&h), vec!["completed", "todo", "inprogress", "review"]);
    let saved = h.backend.raw(&layout_key("b1")).unwrap();
    assert!(saved.starts_with(r#"[{"id":"completed","title":"Completed","statusKey":"Completed"}"#));
    assert_eq!(h.service.call_count(), 0);
}

#[test]
fn test_rejected_reorder_does_not_save() {
    let h = Harness::new();

    assert!(!h.session.reorder_columns(1, 1));
    assert!(!h.session.reorder_columns(0, 10));
    assert!(h.backend.raw(&layout_key("b1")).is_none());
}

#[test]
fn test_layout_survives_reload() {
    let backend = MemoryLayoutBackend::new();
    let first = Harness::with_backend(backend.clone());
    first.session.add_column("Blocked").unwrap();
    first.session.reorder_columns(4, 0);
    drop(first);

    let second = Harness::with_backend(backend);
    assert_eq!(
        column_ids(&second),
        vec!["blocked", "todo", "inprogress", "review", "completed"]
    );
    let orders: Vec<usize> = second.board.borrow().columns().iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_layout_round_trip_is_byte_identical() {
    let backend = MemoryLayoutBackend::new();
    let first = Harness::with_backend(backend.clone());
    first.session.add_column("QA").unwrap();
    first.session.rename_column("todo", "Backlog").unwrap();
    first.session.reorder_columns(0, 4);
    let saved = backend.raw(&layout_key("b1")).unwrap();

    let second = Harness::with_backend(backend.clone());
    second.session.reorder_columns(0, 1);
    second.session.reorder_columns(1, 0);

    assert_eq!(backend.raw(&layout_key("b1")).unwrap(), saved);
}

#[test]
fn test_malformed_layout_falls_back_to_defaults() {
    let backend = MemoryLayoutBackend::new();
    backend.insert_raw(&layout_key("b1"), "{\"columns\": oops");

    let h = Harness::with_backend(backend);
    assert_eq!(h.board.borrow().columns(), default_columns().as_slice());
    assert_eq!(h.board.borrow().column_cards("todo").count(), 1);
}

#[test]
fn test_delete_column_saves_and_rejects_defaults() {
    let h = Harness::new();
    h.session.add_column("Blocked").unwrap();

    let removed = h.session.delete_column("blocked").unwrap();
    assert_eq!(removed.title, "Blocked");
    assert!(!h.backend.raw(&layout_key("b1")).unwrap().contains("blocked"));

    assert!(matches!(
        h.session.delete_column("todo"),
        Err(BoardError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_open_fetches_tasks() {
    let h = Harness::new();
    h.board.borrow_mut().replace_tasks(vec![]);

    h.session.open("b1").await.unwrap();
    assert_eq!(h.board.borrow().cards().len(), 3);
    assert_eq!(h.board.borrow().board_id(), "b1");
}

#[tokio::test]
async fn test_refresh_keeps_columns() {
    let h = Harness::new();
    h.session.reorder_columns(3, 0);
    h.board
        .borrow_mut()
        .replace_tasks(vec![Task::new("x", "Stale", "Review")]);

    h.session.refresh().await.unwrap();
    assert_eq!(column_ids(&h)[0], "completed");
    assert!(h.board.borrow().card("x").is_none());
    assert_eq!(h.board.borrow().cards().len(), 3);
}
