use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::todo::{Todo, TodoId};
use crate::remote::dto::{NewTodo, TodoPatch};

/// The remote `todos` collection, one call per logical operation.
///
/// There is no batch endpoint; callers that need to delete several records
/// issue one `delete` per record.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn create(&self, input: &NewTodo) -> Result<Todo, StoreError>;
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo, StoreError>;
    async fn delete(&self, id: &TodoId) -> Result<(), StoreError>;
}
