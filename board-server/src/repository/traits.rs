//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace a stored entity; `NotFound` if it does not exist
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// `NotFound` if it does not exist
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Entities partitioned by board
#[async_trait]
pub trait BoardRepository<T: Entity>: Repository<T> {
    /// Entities of one board in creation order
    async fn list_by_board(&self, board_id: &str) -> DomainResult<Vec<T>>;
}
