//! UI Components
//!
//! Leptos components for the board view.

mod add_column_form;
mod delete_confirm_button;
mod kanban_board;
mod kanban_column;
mod task_card;
mod task_detail;
mod toast_stack;

pub use add_column_form::AddColumnForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use kanban_board::KanbanBoard;
pub use kanban_column::KanbanColumn;
pub use task_card::TaskCard;
pub use task_detail::TaskDetail;
pub use toast_stack::ToastStack;
