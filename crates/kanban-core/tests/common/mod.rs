//! Test doubles for the task service and notifications

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use kanban_core::{
    BoardError, BoardResult, BoardState, BoardSession, MemoryLayoutBackend, ColumnLayouts, Notification,
    NotificationVariant, Notifier, Task, TaskService,
};

/// Task service that answers status updates from a script keyed by
/// (task id, status), so results do not depend on poll order.
///
/// Unscripted calls succeed. Each call yields once so concurrent requests
/// can interleave if nothing serializes them.
#[derive(Default)]
pub struct ScriptedService {
    pub tasks: Vec<Task>,
    pub outcomes: RefCell<HashMap<(String, String), VecDeque<BoardResult<()>>>>,
    pub calls: RefCell<Vec<(String, String)>>,
    pub events: RefCell<Vec<String>>,
}

impl ScriptedService {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Default::default()
        }
    }

    fn push(&self, task_id: &str, status: &str, outcome: BoardResult<()>) {
        self.outcomes
            .borrow_mut()
            .entry((task_id.to_string(), status.to_string()))
            .or_default()
            .push_back(outcome);
    }

    pub fn push_ok(&self, task_id: &str, status: &str) {
        self.push(task_id, status, Ok(()));
    }

    pub fn push_err(&self, task_id: &str, status: &str, message: &str) {
        self.push(task_id, status, Err(BoardError::Request(message.to_string())));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl TaskService for ScriptedService {
    async fn list_tasks(&self, _board_id: &str) -> BoardResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    async fn update_status(&self, task_id: &str, status: &str) -> BoardResult<()> {
        self.calls
            .borrow_mut()
            .push((task_id.to_string(), status.to_string()));
        self.events.borrow_mut().push(format!("start {} {}", task_id, status));
        tokio::task::yield_now().await;
        self.events.borrow_mut().push(format!("end {} {}", task_id, status));
        self.outcomes
            .borrow_mut()
            .get_mut(&(task_id.to_string(), status.to_string()))
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn count(&self, variant: NotificationVariant) -> usize {
        self.seen.borrow().iter().filter(|n| n.variant == variant).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("t1", "Plan sprint", "To Do"),
        Task::new("t2", "Build API", "In Progress"),
        Task::new("t3", "Release", "Completed"),
    ]
}

pub struct Harness {
    pub board: Rc<RefCell<BoardState>>,
    pub service: Rc<ScriptedService>,
    pub notifier: Rc<RecordingNotifier>,
    pub backend: MemoryLayoutBackend,
    pub session: BoardSession<Rc<RefCell<BoardState>>, MemoryLayoutBackend>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_backend(MemoryLayoutBackend::new())
    }

    pub fn with_backend(backend: MemoryLayoutBackend) -> Self {
        let board = Rc::new(RefCell::new(BoardState::default()));
        let service = Rc::new(ScriptedService::with_tasks(sample_tasks()));
        let notifier = Rc::new(RecordingNotifier::default());
        let session = BoardSession::new(
            board.clone(),
            Rc::new(ColumnLayouts::new(backend.clone())),
            service.clone(),
            notifier.clone(),
        );
        session.load("b1", sample_tasks());
        Self {
            board,
            service,
            notifier,
            backend,
            session,
        }
    }

    pub fn column_of(&self, task_id: &str) -> String {
        self.board.borrow().card(task_id).unwrap().column_id.clone()
    }
}
