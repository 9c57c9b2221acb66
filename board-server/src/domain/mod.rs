//! Domain Layer
//!
//! Entities and the error type shared by the repository and API layers.

mod entity;
mod task;

pub use entity::{DomainError, DomainResult, Entity};
pub use task::{NewTask, Task, TaskPatch};
