use std::collections::HashSet;

use crate::model::filter::{Counts, Filter};
use crate::model::todo::{Todo, TodoId};

/// Where a new record goes in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// Ordered, immutable collection of todos.
///
/// Every transition returns a new list and leaves `self` untouched, so a
/// store can compute the next state, persist it, and only then swap it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new(items: Vec<Todo>) -> Self {
        Self { items }
    }

    /// Newest first. Ties keep their incoming order.
    pub fn newest_first(mut items: Vec<Todo>) -> Self {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { items }
    }

    /// Drops records a backend should never have handed back: blank text or
    /// an id seen earlier in the list. Returns the list and how many records
    /// were dropped.
    pub fn sanitized(items: Vec<Todo>) -> (Vec<Todo>, usize) {
        let before = items.len();
        let mut seen = HashSet::new();
        let kept: Vec<Todo> = items
            .into_iter()
            .filter(|t| !t.text.trim().is_empty())
            .filter(|t| seen.insert(t.id.clone()))
            .collect();
        let dropped = before - kept.len();
        (kept, dropped)
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Todo> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| &t.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &TodoId> {
        self.items.iter().map(|t| &t.id)
    }

    pub fn with_inserted(&self, todo: Todo, placement: Placement) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        match placement {
            Placement::Append => {
                items.extend(self.items.iter().cloned());
                items.push(todo);
            }
            Placement::Prepend => {
                items.push(todo);
                items.extend(self.items.iter().cloned());
            }
        }
        Self { items }
    }

    /// Swaps in `todo` for the record with the same id. `None` if absent.
    pub fn with_replaced(&self, todo: Todo) -> Option<Self> {
        self.get(&todo.id)?;
        let items = self
            .items
            .iter()
            .map(|t| if t.id == todo.id { todo.clone() } else { t.clone() })
            .collect();
        Some(Self { items })
    }

    pub fn with_toggled(&self, id: &TodoId) -> Option<Self> {
        let toggled = self.get(id)?.toggled();
        self.with_replaced(toggled)
    }

    /// `None` if the id is unknown or the text is blank.
    pub fn with_text(&self, id: &TodoId, text: &str) -> Option<Self> {
        let edited = self.get(id)?.with_text(text)?;
        self.with_replaced(edited)
    }

    pub fn without(&self, id: &TodoId) -> Option<Self> {
        self.get(id)?;
        let items = self.items.iter().filter(|t| &t.id != id).cloned().collect();
        Some(Self { items })
    }

    pub fn without_completed(&self) -> Self {
        let items = self.items.iter().filter(|t| !t.completed).cloned().collect();
        Self { items }
    }

    pub fn completed_ids(&self) -> Vec<TodoId> {
        self.items
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn filtered(&self, filter: Filter) -> Vec<&Todo> {
        self.items.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.items)
    }
}
