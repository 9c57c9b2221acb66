//! Board State Store
//!
//! Columns plus the cards bucketed under them. A card whose `column_id`
//! matches no column is kept but hidden from every bucket.

use crate::column::{default_columns, renumber, Column};
use crate::error::{BoardError, BoardResult};
use crate::task::{Card, Task};

/// In-memory board for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    board_id: String,
    columns: Vec<Column>,
    cards: Vec<Card>,
}

impl BoardState {
    /// Build a board from a task list and an optional saved column layout.
    ///
    /// Falls back to the default columns when nothing was saved. Tasks whose
    /// status maps to no column are hidden and logged.
    pub fn load(board_id: impl Into<String>, tasks: Vec<Task>, saved_columns: Option<Vec<Column>>) -> Self {
        let mut columns = saved_columns.unwrap_or_else(default_columns);
        renumber(&mut columns);

        let mut board = Self {
            board_id: board_id.into(),
            columns,
            cards: Vec::new(),
        };
        board.replace_tasks(tasks);
        board
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn card(&self, task_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == task_id)
    }

    /// Status a card is shown with: its column's status key, which already
    /// reflects a move in flight, or the fetched status for a hidden card
    pub fn shown_status(&self, task_id: &str) -> Option<&str> {
        let card = self.card(task_id)?;
        Some(match self.column(&card.column_id) {
            Some(column) => &column.status_key,
            None => &card.task.status,
        })
    }

    /// Cards shown under a column, in arrival order
    pub fn column_cards<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| c.column_id == column_id)
    }

    /// Cards whose column does not exist on this board
    pub fn hidden_cards(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| self.column(&card.column_id).is_none())
            .collect()
    }

    /// Swap in a freshly fetched task list, keeping the column layout
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.cards = tasks.into_iter().map(Card::from_task).collect();

        let hidden = self.hidden_cards();
        if !hidden.is_empty() {
            let ids: Vec<&str> = hidden.iter().map(|c| c.id()).collect();
            log::warn!(
                "board {}: {} task(s) have a status matching no column and are hidden: {:?}",
                self.board_id,
                ids.len(),
                ids
            );
        }
    }

    /// Move a card between columns. Returns whether anything changed.
    ///
    /// No-op when `from == to`, when the card is not currently in `from`,
    /// or when `to` is not a column on this board.
    pub fn move_task(&mut self, task_id: &str, from_column_id: &str, to_column_id: &str) -> bool {
        if from_column_id == to_column_id || self.column(to_column_id).is_none() {
            return false;
        }
        let Some(index) = self
            .cards
            .iter()
            .position(|c| c.id() == task_id && c.column_id == from_column_id)
        else {
            return false;
        };

        // Land at the bottom of the target column
        let mut card = self.cards.remove(index);
        card.column_id = to_column_id.to_string();
        self.cards.push(card);
        true
    }

    /// Put a card back under a column without validation.
    ///
    /// Used to restore a confirmed placement, which may point at a column
    /// deleted in the meantime; the card is then hidden.
    pub(crate) fn place_task(&mut self, task_id: &str, column_id: &str) -> bool {
        match self.cards.iter_mut().find(|c| c.id() == task_id) {
            Some(card) if card.column_id != column_id => {
                card.column_id = column_id.to_string();
                true
            }
            _ => false,
        }
    }

    /// Record a status the service accepted and place the card under its
    /// column, whatever a refetch in the meantime said.
    pub(crate) fn confirm_task(&mut self, task_id: &str, column_id: &str, status: &str) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.id() == task_id) else {
            return false;
        };
        card.task.status = status.to_string();
        if card.column_id == column_id {
            return false;
        }
        card.column_id = column_id.to_string();
        true
    }

    /// Move the column at `old_index` to `new_index`. Returns whether anything changed.
    pub fn reorder_columns(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.columns.len();
        if old_index >= len || new_index >= len || old_index == new_index {
            return false;
        }
        let column = self.columns.remove(old_index);
        self.columns.insert(new_index, column);
        renumber(&mut self.columns);
        true
    }

    /// Append a user-created column. Hidden cards whose status matches it show up.
    pub fn add_column(&mut self, title: &str) -> BoardResult<&Column> {
        let column = Column::from_title(title, self.columns.len());
        if column.id.is_empty() {
            return Err(BoardError::InvalidInput("Column title cannot be empty".to_string()));
        }
        if self.column(&column.id).is_some() {
            return Err(BoardError::InvalidInput(format!("Column '{}' already exists", column.title)));
        }
        self.columns.push(column);
        Ok(&self.columns[self.columns.len() - 1])
    }

    /// Change a column's display label. The wire status stays as it was.
    pub fn rename_column(&mut self, column_id: &str, title: &str) -> BoardResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::InvalidInput("Column title cannot be empty".to_string()));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {} not found", column_id)))?;
        column.title = title.to_string();
        Ok(())
    }

    /// Delete a user-created column. Its cards become hidden.
    pub fn delete_column(&mut self, column_id: &str) -> BoardResult<Column> {
        let index = self
            .column_index(column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {} not found", column_id)))?;
        if self.columns[index].is_default() {
            return Err(BoardError::InvalidInput(format!(
                "Default column '{}' cannot be deleted",
                self.columns[index].title
            )));
        }
        let removed = self.columns.remove(index);
        renumber(&mut self.columns);

        let orphaned = self.column_cards(&removed.id).count();
        if orphaned > 0 {
            log::warn!(
                "board {}: deleting column {} hides {} task(s)",
                self.board_id,
                removed.id,
                orphaned
            );
        }
        Ok(removed)
    }
}
