//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod db;
mod task_repo;
mod traits;


pub use db::{open_db, SharedConnection};
pub use task_repo::TaskRepository;
pub use traits::{BoardRepository, Repository};
