//! Board Session
//!
//! Wires the store, layout persistence and the coordinator together and
//! dispatches finished drags to the right operation.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::board::BoardState;
use crate::cell::BoardCell;
use crate::column::Column;
use crate::coordinator::{MoveOutcome, MutationCoordinator};
use crate::drag::{classify_drop, DragPayload, DropIntent};
use crate::error::{BoardError, BoardResult};
use crate::layout::{ColumnLayouts, LayoutBackend};
use crate::notify::Notifier;
use crate::service::TaskService;
use crate::task::Task;

pub struct BoardSession<B: BoardCell, L: LayoutBackend> {
    board: B,
    layouts: Rc<ColumnLayouts<L>>,
    coordinator: MutationCoordinator<B>,
}

impl<B: BoardCell, L: LayoutBackend> Clone for BoardSession<B, L> {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            layouts: Rc::clone(&self.layouts),
            coordinator: self.coordinator.clone(),
        }
    }
}

impl<B: BoardCell, L: LayoutBackend> BoardSession<B, L> {
    pub fn new(
        board: B,
        layouts: Rc<ColumnLayouts<L>>,
        service: Rc<dyn TaskService>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let coordinator = MutationCoordinator::new(board.clone(), service, notifier);
        Self {
            board,
            layouts,
            coordinator,
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn coordinator(&self) -> &MutationCoordinator<B> {
        &self.coordinator
    }

    /// Replace the board with `tasks` laid out by the board's saved columns
    pub fn load(&self, board_id: &str, tasks: Vec<Task>) {
        let saved = self.layouts.load(board_id);
        self.board
            .try_update(|board| *board = BoardState::load(board_id, tasks, saved));
    }

    /// Fetch the board's tasks and load them
    pub async fn open(&self, board_id: &str) -> BoardResult<()> {
        let tasks = self.coordinator.service().list_tasks(board_id).await?;
        log::info!("board {}: loaded {} task(s)", board_id, tasks.len());
        self.load(board_id, tasks);
        Ok(())
    }

    /// Re-fetch tasks for the current board, keeping its columns
    pub async fn refresh(&self) -> BoardResult<()> {
        let board_id = self
            .board
            .try_read(|board| board.board_id().to_string())
            .ok_or_else(|| BoardError::NotFound("Board is closed".to_string()))?;
        let tasks = self.coordinator.service().list_tasks(&board_id).await?;
        self.board.try_update(|board| board.replace_tasks(tasks));
        Ok(())
    }

    /// Handle a drag-end. A card move returns the persistence future to spawn.
    pub fn drop_on(&self, active: &DragPayload, over: Option<&DragPayload>) -> Option<LocalBoxFuture<'static, MoveOutcome>> {
        let intent = self
            .board
            .try_read(|board| classify_drop(board, active, over))?;
        log::debug!("drop {:?} over {:?}: {:?}", active, over, intent);

        match intent {
            DropIntent::ReorderColumns { from, to } => {
                self.reorder_columns(from, to);
                None
            }
            DropIntent::MoveCard {
                task_id,
                to_column_id,
                ..
            } => self.coordinator.move_task(&task_id, &to_column_id),
            DropIntent::Ignore => None,
        }
    }

    /// Reorder columns and save the layout when something changed
    pub fn reorder_columns(&self, from: usize, to: usize) -> bool {
        let changed = self
            .board
            .try_update(|board| board.reorder_columns(from, to))
            .unwrap_or(false);
        if changed {
            self.save_layout();
        }
        changed
    }

    pub fn add_column(&self, title: &str) -> BoardResult<Column> {
        let column = self
            .board
            .try_update(|board| board.add_column(title).cloned())
            .ok_or_else(|| BoardError::NotFound("Board is closed".to_string()))??;
        self.save_layout();
        Ok(column)
    }

    pub fn rename_column(&self, column_id: &str, title: &str) -> BoardResult<()> {
        self.board
            .try_update(|board| board.rename_column(column_id, title))
            .ok_or_else(|| BoardError::NotFound("Board is closed".to_string()))??;
        self.save_layout();
        Ok(())
    }

    pub fn delete_column(&self, column_id: &str) -> BoardResult<Column> {
        let removed = self
            .board
            .try_update(|board| board.delete_column(column_id))
            .ok_or_else(|| BoardError::NotFound("Board is closed".to_string()))??;
        self.save_layout();
        Ok(removed)
    }

    fn save_layout(&self) {
        let Some((board_id, columns)) = self
            .board
            .try_read(|board| (board.board_id().to_string(), board.columns().to_vec()))
        else {
            return;
        };
        if let Err(e) = self.layouts.save(&board_id, &columns) {
            log::warn!("board {}: failed to save column layout: {}", board_id, e);
        }
    }
}
