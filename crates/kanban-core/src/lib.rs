//! Kanban Board Core
//!
//! Client-side board state for a task dashboard:
//! - board: columns and cards, derived from task status
//! - drag: classify a finished drag into a board intent
//! - coordinator: optimistic status updates with rollback
//! - layout: per-board column layout persistence
//! - service: the task service the board reads from and writes to

mod board;
mod cell;
mod column;
mod coordinator;
mod drag;
mod error;
mod layout;
mod notify;
mod service;
mod session;
mod task;

pub use board::BoardState;
pub use cell::BoardCell;
pub use column::{column_id_for_status, default_columns, default_status_key, Column, DEFAULT_COLUMNS};
pub use coordinator::{MoveOutcome, MutationCoordinator};
pub use drag::{classify_drop, DragPayload, DropIntent};
pub use error::{BoardError, BoardResult};
pub use layout::{
    decode_layout, encode_layout, layout_key, ColumnLayouts, LayoutBackend, MemoryLayoutBackend,
    LAYOUT_KEY_PREFIX,
};
pub use notify::{Notification, NotificationVariant, Notifier};
pub use service::{failure_message, HttpTaskService, TaskService, GENERIC_FAILURE};
pub use session::BoardSession;
pub use task::{decode_task_list, Card, Task};
