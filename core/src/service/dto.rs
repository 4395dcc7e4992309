use serde::{Deserialize, Serialize};

use crate::input::ShortIds;
use crate::model::filter::Counts;
use crate::model::todo::{Todo, TodoId};
use crate::time::format_created_at;

/// A todo flattened for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TodoDto {
    pub id: String,
    pub short_id: String,
    pub text: String,
    pub completed: bool,
    pub created: String,
}

impl TodoDto {
    /// `short_ids` comes from the whole list, not just the rows shown.
    pub fn from_entity(todo: &Todo, short_ids: &ShortIds) -> Self {
        Self {
            id: todo.id.to_string(),
            short_id: display_id(&todo.id, short_ids),
            text: todo.text.clone(),
            completed: todo.completed,
            created: format_created_at(&todo.created_at),
        }
    }
}

/// Falls back to the full id for a record no longer in the list.
pub fn display_id(id: &TodoId, short_ids: &ShortIds) -> String {
    short_ids
        .get(id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}

/// "3 items · 2 active · 1 completed"
pub fn summary_line(counts: &Counts) -> String {
    let noun = if counts.total == 1 { "item" } else { "items" };
    format!(
        "{} {} · {} active · {} completed",
        counts.total, noun, counts.active, counts.completed
    )
}
