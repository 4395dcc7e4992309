use crate::error::{user_message, Operation, StoreError};
use crate::model::filter::{Counts, Filter};
use crate::model::list::{Placement, TodoList};
use crate::model::todo::{Todo, TodoId};
use crate::repository::SlotStorage;
use crate::service::state::LoadState;

/// Todo list mirrored into a single storage slot as a JSON array.
///
/// Every mutation computes the next list, rewrites the whole slot, and only
/// then replaces the in-memory list. If the write fails the list stays as it
/// was and `last_error` carries the message.
///
/// Nothing is written before the first successful `load`, so an early
/// mutation can never overwrite saved data with a partial list.
pub struct LocalTodoStore<S: SlotStorage> {
    storage: S,
    key: String,
    todos: TodoList,
    state: LoadState,
    last_error: Option<String>,
}

impl<S: SlotStorage> LocalTodoStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            todos: TodoList::default(),
            state: LoadState::NotLoaded,
            last_error: None,
        }
    }

    /// Rebuilds the list from the slot.
    ///
    /// An empty slot is an empty list. So is a slot holding malformed JSON;
    /// that case is logged and the store continues as if nothing was saved.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.last_error = None;
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                let err = self.fail(Operation::Load, e);
                if !self.state.is_loaded() {
                    self.state = LoadState::Failed(self.last_error.clone().unwrap_or_default());
                }
                return Err(err);
            }
        };

        let items = match raw {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Todo>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(key = %self.key, "saved todos are not valid JSON, starting empty: {}", e);
                    Vec::new()
                }
            },
        };

        let (items, dropped) = TodoList::sanitized(items);
        if dropped > 0 {
            tracing::warn!(key = %self.key, dropped, "ignored invalid saved todos");
        }
        self.todos = TodoList::new(items);
        self.state = LoadState::Loaded;
        tracing::info!(key = %self.key, count = self.todos.len(), "loaded todos");
        Ok(())
    }

    /// Appends a new todo. Blank text is ignored and yields `Ok(None)`.
    pub fn add(&mut self, text: &str) -> Result<Option<Todo>, StoreError> {
        self.last_error = None;
        let Some(todo) = Todo::new(text) else {
            return Ok(None);
        };
        let next = self.todos.with_inserted(todo.clone(), Placement::Append);
        self.commit(next, Operation::Create)?;
        Ok(Some(todo))
    }

    pub fn toggle(&mut self, id: &TodoId) -> Result<Todo, StoreError> {
        self.last_error = None;
        let toggled = match self.todos.get(id) {
            Some(todo) => todo.toggled(),
            None => return Err(self.fail(Operation::Update, StoreError::NotFound(id.clone()))),
        };
        let next = self
            .todos
            .with_replaced(toggled.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.commit(next, Operation::Update)?;
        Ok(toggled)
    }

    /// Replaces the text of one todo. Blank text is ignored and yields
    /// `Ok(None)`.
    pub fn edit(&mut self, id: &TodoId, text: &str) -> Result<Option<Todo>, StoreError> {
        self.last_error = None;
        let edited = match self.todos.get(id) {
            Some(todo) => todo.with_text(text),
            None => return Err(self.fail(Operation::Update, StoreError::NotFound(id.clone()))),
        };
        let Some(edited) = edited else {
            return Ok(None);
        };
        let next = self
            .todos
            .with_replaced(edited.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.commit(next, Operation::Update)?;
        Ok(Some(edited))
    }

    pub fn remove(&mut self, id: &TodoId) -> Result<Todo, StoreError> {
        self.last_error = None;
        let (removed, next) = match (self.todos.get(id).cloned(), self.todos.without(id)) {
            (Some(removed), Some(next)) => (removed, next),
            _ => return Err(self.fail(Operation::Delete, StoreError::NotFound(id.clone()))),
        };
        self.commit(next, Operation::Delete)?;
        Ok(removed)
    }

    /// Drops every completed todo in one slot write. Returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        self.last_error = None;
        let next = self.todos.without_completed();
        let removed = self.todos.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }
        self.commit(next, Operation::ClearCompleted)?;
        Ok(removed)
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

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&mut self, next: TodoList, op: Operation) -> Result<(), StoreError> {
        if self.state.is_loaded() {
            if let Err(e) = self.persist(&next) {
                return Err(self.fail(op, e));
            }
        } else {
            tracing::warn!(key = %self.key, state = ?self.state, "todos not loaded yet, change kept in memory only");
        }
        self.todos = next;
        Ok(())
    }

    fn persist(&self, list: &TodoList) -> Result<(), StoreError> {
        let json = serde_json::to_string(list.items())?;
        self.storage.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = list.len(), "saved todos");
        Ok(())
    }

    fn fail(&mut self, op: Operation, err: StoreError) -> StoreError {
        let message = user_message(op, &err);
        tracing::error!("{}", message);
        self.last_error = Some(message);
        err
    }
}
