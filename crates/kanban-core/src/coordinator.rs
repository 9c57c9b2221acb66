//! Optimistic Mutation Coordinator
//!
//! A card move is applied to the board immediately, then persisted with a
//! single status request. Success keeps the move; failure puts the card
//! back and reports the reason. There is no retry.
//!
//! Requests for the same task are sent one at a time in gesture order.
//! Only the newest gesture for a task may roll it back, and it rolls back
//! to the last column the service confirmed, so the card always ends up
//! where the server thinks it is.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use tokio::sync::oneshot;

use crate::cell::BoardCell;
use crate::error::BoardResult;
use crate::notify::{Notification, Notifier};
use crate::service::TaskService;

/// How a card move ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed,
    /// Request failed and the card went back to its confirmed column
    RolledBack { reason: String },
    /// Request failed but a newer move of the same card owns its placement
    Superseded { reason: String },
    /// Board was torn down before the request finished
    Detached,
}

/// Per-task bookkeeping while moves are in flight
struct TaskLedger {
    /// Last column the service is known to agree with
    confirmed_column: String,
    /// Sequence number of the newest gesture
    latest: u64,
    /// Completion signal of the newest gesture; the next one waits on it
    tail: Option<oneshot::Receiver<()>>,
}

struct Inner<B> {
    board: B,
    service: Rc<dyn TaskService>,
    notifier: Rc<dyn Notifier>,
    ledgers: RefCell<HashMap<String, TaskLedger>>,
    next_seq: Cell<u64>,
}

pub struct MutationCoordinator<B: BoardCell> {
    inner: Rc<Inner<B>>,
}

impl<B: BoardCell> Clone for MutationCoordinator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: BoardCell> MutationCoordinator<B> {
    pub fn new(board: B, service: Rc<dyn TaskService>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            inner: Rc::new(Inner {
                board,
                service,
                notifier,
                ledgers: RefCell::new(HashMap::new()),
                next_seq: Cell::new(0),
            }),
        }
    }

    pub fn service(&self) -> Rc<dyn TaskService> {
        Rc::clone(&self.inner.service)
    }

    /// Move a card and start persisting it.
    ///
    /// The board is updated before this returns. The returned future sends
    /// the status request and reconciles; it must be polled (spawned) for
    /// the move to be persisted. `None` means nothing moved: unknown task
    /// or column, the card is already there, or the board is gone.
    pub fn move_task(&self, task_id: &str, to_column_id: &str) -> Option<LocalBoxFuture<'static, MoveOutcome>> {
        let (from_column_id, status_key, title) = self
            .inner
            .board
            .try_update(|board| {
                let from = board.card(task_id)?.column_id.clone();
                let target = board.column(to_column_id)?;
                let (status_key, title) = (target.status_key.clone(), target.title.clone());
                board
                    .move_task(task_id, &from, to_column_id)
                    .then_some((from, status_key, title))
            })
            .flatten()?;

        let seq = self.inner.next_seq.get() + 1;
        self.inner.next_seq.set(seq);

        // Chain behind the previous gesture for this task, in call order
        let (done, done_rx) = oneshot::channel::<()>();
        let previous = {
            let mut ledgers = self.inner.ledgers.borrow_mut();
            let ledger = ledgers.entry(task_id.to_string()).or_insert_with(|| TaskLedger {
                confirmed_column: from_column_id.clone(),
                latest: seq,
                tail: None,
            });
            ledger.latest = seq;
            ledger.tail.replace(done_rx)
        };

        log::debug!(
            "task {}: {} -> {} (move #{}), sending status '{}'",
            task_id,
            from_column_id,
            to_column_id,
            seq,
            status_key
        );

        let inner = Rc::clone(&self.inner);
        let task_id = task_id.to_string();
        let to_column_id = to_column_id.to_string();
        Some(
            async move {
                if let Some(previous) = previous {
                    // Resolves on completion or when the earlier future is dropped
                    let _ = previous.await;
                }
                let result = inner.service.update_status(&task_id, &status_key).await;
                let outcome = inner.settle(&task_id, seq, &to_column_id, &status_key, &title, result);
                drop(done);
                outcome
            }
            .boxed_local(),
        )
    }

    /// Whether a task has a move waiting on the service
    pub fn is_pending(&self, task_id: &str) -> bool {
        self.inner.ledgers.borrow().contains_key(task_id)
    }
}

impl<B: BoardCell> Inner<B> {
    fn settle(
        &self,
        task_id: &str,
        seq: u64,
        to_column_id: &str,
        status_key: &str,
        to_title: &str,
        result: BoardResult<()>,
    ) -> MoveOutcome {
        let (confirmed_column, is_latest) = {
            let mut ledgers = self.ledgers.borrow_mut();
            match ledgers.get_mut(task_id) {
                Some(ledger) => {
                    if result.is_ok() {
                        ledger.confirmed_column = to_column_id.to_string();
                    }
                    let is_latest = ledger.latest == seq;
                    let confirmed = ledger.confirmed_column.clone();
                    if is_latest {
                        ledgers.remove(task_id);
                    }
                    (Some(confirmed), is_latest)
                }
                None => (None, true),
            }
        };

        if !self.board.is_alive() {
            log::debug!("task {}: move #{} finished after the board closed", task_id, seq);
            return MoveOutcome::Detached;
        }

        match result {
            Ok(()) => {
                // A refetch may have put the card back at its old status
                if is_latest {
                    self.board
                        .try_update(|board| board.confirm_task(task_id, to_column_id, status_key));
                }
                self.notifier.notify(Notification::success(
                    "Task updated",
                    format!("Task moved to {}", to_title),
                ));
                MoveOutcome::Committed
            }
            Err(e) => {
                let reason = e.message().to_string();
                log::warn!("task {}: move #{} failed: {}", task_id, seq, reason);

                let outcome = match (is_latest, confirmed_column) {
                    (true, Some(confirmed)) => {
                        self.board.try_update(|board| board.place_task(task_id, &confirmed));
                        MoveOutcome::RolledBack { reason: reason.clone() }
                    }
                    _ => MoveOutcome::Superseded { reason: reason.clone() },
                };
                self.notifier
                    .notify(Notification::destructive("Failed to update task", reason));
                outcome
            }
        }
    }
}
