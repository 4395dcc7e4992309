use crate::error::{user_message, Operation, StoreError};
use crate::model::filter::{Counts, Filter};
use crate::model::list::{Placement, TodoList};
use crate::model::todo::{normalize_text, Todo, TodoId};
use crate::remote::{NewTodo, TodoApi, TodoPatch};
use crate::service::state::LoadState;

/// Todo list backed by a remote collection.
///
/// Writes are confirmed: the request goes out first and the in-memory list
/// only changes once the server accepted it, using the record the server
/// sent back. A failed request leaves the list untouched and sets
/// `last_error`. Nothing is retried.
pub struct RemoteTodoStore<A: TodoApi> {
    api: A,
    todos: TodoList,
    state: LoadState,
    last_error: Option<String>,
}

impl<A: TodoApi> RemoteTodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: TodoList::default(),
            state: LoadState::NotLoaded,
            last_error: None,
        }
    }

    /// Replaces the list with the server's, newest first.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.last_error = None;
        match self.api.list().await {
            Ok(items) => {
                let (items, dropped) = TodoList::sanitized(items);
                if dropped > 0 {
                    tracing::warn!(dropped, "server returned invalid todos, ignoring them");
                }
                self.todos = TodoList::newest_first(items);
                self.state = LoadState::Loaded;
                tracing::info!(count = self.todos.len(), "loaded todos from server");
                Ok(())
            }
            Err(e) => {
                let err = self.fail(Operation::Load, e);
                self.state = LoadState::Failed(self.last_error.clone().unwrap_or_default());
                Err(err)
            }
        }
    }

    /// Creates a todo on the server and puts the returned record first.
    /// Blank text is ignored and yields `Ok(None)`.
    pub async fn add(&mut self, text: &str) -> Result<Option<Todo>, StoreError> {
        self.last_error = None;
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        let created = match self.api.create(&NewTodo { text }).await {
            Ok(todo) => todo,
            Err(e) => return Err(self.fail(Operation::Create, e)),
        };
        tracing::debug!(id = %created.id, "created todo");
        self.todos = self.todos.with_inserted(created.clone(), Placement::Prepend);
        Ok(Some(created))
    }

    pub async fn toggle(&mut self, id: &TodoId) -> Result<Todo, StoreError> {
        self.last_error = None;
        let completed = match self.todos.get(id) {
            Some(todo) => !todo.completed,
            None => return Err(self.fail(Operation::Update, StoreError::NotFound(id.clone()))),
        };
        self.update(id, TodoPatch::completed(completed)).await
    }

    /// Replaces the text of one todo. Blank text is ignored and yields
    /// `Ok(None)`.
    pub async fn edit(&mut self, id: &TodoId, text: &str) -> Result<Option<Todo>, StoreError> {
        self.last_error = None;
        if self.todos.get(id).is_none() {
            return Err(self.fail(Operation::Update, StoreError::NotFound(id.clone())));
        }
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        self.update(id, TodoPatch::text(text)).await.map(Some)
    }

    pub async fn remove(&mut self, id: &TodoId) -> Result<Todo, StoreError> {
        self.last_error = None;
        let Some(removed) = self.todos.get(id).cloned() else {
            return Err(self.fail(Operation::Delete, StoreError::NotFound(id.clone())));
        };
        if let Err(e) = self.api.delete(id).await {
            return Err(self.fail(Operation::Delete, e));
        }
        self.drop_local(id);
        tracing::debug!(%id, "deleted todo");
        Ok(removed)
    }

    /// Deletes completed todos one request at a time; the collection has no
    /// batch delete.
    ///
    /// Each confirmed delete is applied to the list straight away, so after a
    /// partial failure the list matches the server: the survivors are still
    /// there and are named in the returned `PartialClear`.
    pub async fn clear_completed(&mut self) -> Result<usize, StoreError> {
        self.last_error = None;
        let mut removed = 0;
        let mut remaining = Vec::new();
        for id in self.todos.completed_ids() {
            match self.api.delete(&id).await {
                Ok(()) => {
                    self.drop_local(&id);
                    removed += 1;
                }
                Err(e) => {
                    tracing::warn!(%id, "could not delete completed todo: {}", e);
                    remaining.push(id);
                }
            }
        }
        if remaining.is_empty() {
            Ok(removed)
        } else {
            Err(self.fail(
                Operation::ClearCompleted,
                StoreError::PartialClear { removed, remaining },
            ))
        }
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.items()
    }

    pub fn list(&self) -> &TodoList {
        &self.todos
    }

    pub fn filter(&self, filter: Filter) -> Vec<&Todo> {
        self.todos.filtered(filter)
    }

    pub fn counts(&self) -> Counts {
        self.todos.counts()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Hands the client back so the caller can close it.
    pub fn into_api(self) -> A {
        self.api
    }

    async fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Result<Todo, StoreError> {
        let updated = match self.api.update(id, &patch).await {
            Ok(todo) => todo,
            Err(e) => return Err(self.fail(Operation::Update, e)),
        };
        match self.todos.with_replaced(updated.clone()) {
            Some(next) => self.todos = next,
            None => tracing::warn!(%id, returned = %updated.id, "server returned a different record, list left as is"),
        }
        Ok(updated)
    }

    fn drop_local(&mut self, id: &TodoId) {
        if let Some(next) = self.todos.without(id) {
            self.todos = next;
        }
    }

    fn fail(&mut self, op: Operation, err: StoreError) -> StoreError {
        let message = user_message(op, &err);
        tracing::error!("{}", message);
        self.last_error = Some(message);
        err
    }
}
