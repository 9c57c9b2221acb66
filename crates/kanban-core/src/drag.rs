//! Drag Classification
//!
//! Turns a finished drag (what was held, what it was released over) into a
//! board intent. The payload kind is carried explicitly rather than sniffed
//! from an id prefix.

use crate::board::BoardState;

/// Something that can be picked up or hovered on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragPayload {
    Column(String),
    Card(String),
}

impl DragPayload {
    pub fn id(&self) -> &str {
        match self {
            DragPayload::Column(id) | DragPayload::Card(id) => id,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, DragPayload::Column(_))
    }
}

/// What a drop asks the board to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropIntent {
    ReorderColumns { from: usize, to: usize },
    MoveCard {
        task_id: String,
        from_column_id: String,
        to_column_id: String,
    },
    /// Abandoned or meaningless drop; nothing changes
    Ignore,
}

/// Classify a drag-end against the current board
pub fn classify_drop(board: &BoardState, active: &DragPayload, over: Option<&DragPayload>) -> DropIntent {
    let Some(over) = over else {
        return DropIntent::Ignore;
    };

    match (active, over) {
        (DragPayload::Column(active_id), DragPayload::Column(over_id)) => {
            if active_id == over_id {
                return DropIntent::Ignore;
            }
            match (board.column_index(active_id), board.column_index(over_id)) {
                (Some(from), Some(to)) => DropIntent::ReorderColumns { from, to },
                _ => DropIntent::Ignore,
            }
        }
        (DragPayload::Card(task_id), over) => {
            let Some(card) = board.card(task_id) else {
                return DropIntent::Ignore;
            };
            let Some(to_column_id) = resolve_column(board, over) else {
                return DropIntent::Ignore;
            };
            if card.column_id == to_column_id {
                return DropIntent::Ignore;
            }
            DropIntent::MoveCard {
                task_id: task_id.clone(),
                from_column_id: card.column_id.clone(),
                to_column_id,
            }
        }
        // A column released over a card has no meaning
        (DragPayload::Column(_), DragPayload::Card(_)) => DropIntent::Ignore,
    }
}

/// Column a drop target stands for: itself, or the column holding the card
fn resolve_column(board: &BoardState, over: &DragPayload) -> Option<String> {
    match over {
        DragPayload::Column(id) => board.column(id).map(|c| c.id.clone()),
        DragPayload::Card(id) => board
            .card(id)
            .filter(|card| board.column(&card.column_id).is_some())
            .map(|card| card.column_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn board() -> BoardState {
        BoardState::load(
            "b1",
            vec![
                Task::new("t1", "Plan", "To Do"),
                Task::new("t2", "Build", "In Progress"),
                Task::new("t3", "Ghost", "Archived"),
            ],
            None,
        )
    }

    fn col(id: &str) -> DragPayload {
        DragPayload::Column(id.to_string())
    }

    fn card(id: &str) -> DragPayload {
        DragPayload::Card(id.to_string())
    }

    #[test]
    fn test_no_target_is_ignored() {
        assert_eq!(classify_drop(&board(), &card("t1"), None), DropIntent::Ignore);
        assert_eq!(classify_drop(&board(), &col("todo"), None), DropIntent::Ignore);
    }

    #[test]
    fn test_column_over_column_reorders() {
        assert_eq!(
            classify_drop(&board(), &col("todo"), Some(&col("review"))),
            DropIntent::ReorderColumns { from: 0, to: 2 }
        );
        assert_eq!(classify_drop(&board(), &col("todo"), Some(&col("todo"))), DropIntent::Ignore);
        assert_eq!(classify_drop(&board(), &col("todo"), Some(&col("gone"))), DropIntent::Ignore);
    }

    #[test]
    fn test_card_over_column_moves() {
        assert_eq!(
            classify_drop(&board(), &card("t1"), Some(&col("review"))),
            DropIntent::MoveCard {
                task_id: "t1".to_string(),
                from_column_id: "todo".to_string(),
                to_column_id: "review".to_string(),
            }
        );
    }

    #[test]
    fn test_card_over_card_uses_its_column() {
        assert_eq!(
            classify_drop(&board(), &card("t1"), Some(&card("t2"))),
            DropIntent::MoveCard {
                task_id: "t1".to_string(),
                from_column_id: "todo".to_string(),
                to_column_id: "inprogress".to_string(),
            }
        );
        // Hidden card has no column to resolve to
        assert_eq!(classify_drop(&board(), &card("t1"), Some(&card("t3"))), DropIntent::Ignore);
    }

    #[test]
    fn test_card_over_own_column_is_ignored() {
        assert_eq!(classify_drop(&board(), &card("t1"), Some(&col("todo"))), DropIntent::Ignore);
    }

    #[test]
    fn test_column_over_card_is_ignored() {
        assert_eq!(classify_drop(&board(), &col("todo"), Some(&card("t2"))), DropIntent::Ignore);
    }
}
