//! Board Context
//!
//! Shared board state provided via Leptos Context API: the reactive board,
//! drag tracking and the session that runs board operations.

use std::rc::Rc;

use kanban_core::{
    BoardCell, BoardError, BoardSession, BoardState, Column, ColumnLayouts, DragPayload,
    HttpTaskService, MoveOutcome, Notification, Notifier,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{create_dnd, ActivationConstraint, Dnd};

use crate::layout_storage::LocalStorageBackend;
use crate::store::ToastNotifier;

/// Board kept in a signal so views re-render on every change.
/// Access fails once the owning scope is disposed.
#[derive(Clone, Copy)]
pub struct SignalBoard(pub RwSignal<BoardState>);

impl BoardCell for SignalBoard {
    fn try_update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn try_read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}

pub type Session = BoardSession<SignalBoard, LocalStorageBackend>;

#[derive(Clone, Copy)]
pub struct BoardContext {
    pub board: RwSignal<BoardState>,
    pub dnd: Dnd<DragPayload>,
    session: StoredValue<Session, LocalStorage>,
    notifier: ToastNotifier,
    /// A fetch is in flight
    pub loading: RwSignal<bool>,
}

impl BoardContext {
    pub fn new(api_base: &str, notifier: ToastNotifier, constraint: ActivationConstraint) -> Self {
        let board = RwSignal::new(BoardState::default());
        let session = BoardSession::new(
            SignalBoard(board),
            Rc::new(ColumnLayouts::new(LocalStorageBackend)),
            Rc::new(HttpTaskService::new(api_base)),
            Rc::new(notifier),
        );
        Self {
            board,
            dnd: create_dnd(constraint),
            session: StoredValue::new_local(session),
            notifier,
            loading: RwSignal::new(false),
        }
    }

    fn session(&self) -> Option<Session> {
        self.session.try_get_value()
    }

    fn report(&self, title: &str, error: &BoardError) {
        self.notifier
            .notify(Notification::destructive(title, error.message()));
    }

    /// Fetch a board's tasks and lay them out
    pub fn open(&self, board_id: String) {
        let Some(session) = self.session() else { return };
        let ctx = *self;
        ctx.loading.set(true);
        spawn_local(async move {
            if let Err(e) = session.open(&board_id).await {
                log::error!("board {}: load failed: {}", board_id, e);
                ctx.report("Failed to load tasks", &e);
            }
            ctx.loading.try_set(false);
        });
    }

    /// Re-fetch tasks without touching the column layout
    pub fn reload(&self) {
        let Some(session) = self.session() else { return };
        let ctx = *self;
        ctx.loading.set(true);
        spawn_local(async move {
            if let Err(e) = session.refresh().await {
                log::error!("reload failed: {}", e);
                ctx.report("Failed to load tasks", &e);
            }
            ctx.loading.try_set(false);
        });
    }

    /// Apply a finished drag; card moves persist in the background
    pub fn drop_on(&self, active: DragPayload, over: Option<DragPayload>) {
        let Some(session) = self.session() else { return };
        if let Some(pending) = session.drop_on(&active, over.as_ref()) {
            spawn_local(async move {
                let outcome = pending.await;
                if outcome != MoveOutcome::Committed {
                    log::debug!("move of {} ended as {:?}", active.id(), outcome);
                }
            });
        }
    }

    pub fn add_column(&self, title: &str) -> Result<Column, String> {
        let session = self.session().ok_or("Board is closed")?;
        session.add_column(title).map_err(|e| e.message().to_string())
    }

    pub fn rename_column(&self, column_id: &str, title: &str) -> Result<(), String> {
        let session = self.session().ok_or("Board is closed")?;
        session
            .rename_column(column_id, title)
            .map_err(|e| e.message().to_string())
    }

    pub fn delete_column(&self, column_id: &str) {
        let Some(session) = self.session() else { return };
        if let Err(e) = session.delete_column(column_id) {
            self.report("Cannot delete column", &e);
        }
    }

    /// Number of tasks whose status matches no column
    pub fn hidden_count(&self) -> usize {
        self.board.with(|b| b.hidden_cards().len())
    }
}

/// Get the board context
pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}
