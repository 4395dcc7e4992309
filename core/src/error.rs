use std::fmt;

use thiserror::Error;

use crate::model::todo::TodoId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("could not encode todos: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("removed {removed} completed todos, {} could not be deleted", .remaining.len())]
    PartialClear {
        removed: usize,
        remaining: Vec<TodoId>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Whether the backend never answered with a usable response.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, StoreError::Request(_) | StoreError::Status { .. })
    }
}

/// What the store was doing when something went wrong. Feeds the
/// user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
    ClearCompleted,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Load => "load todos",
            Operation::Create => "create todo",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
            Operation::ClearCompleted => "clear completed todos",
        })
    }
}

pub fn user_message(op: Operation, err: &StoreError) -> String {
    format!("Failed to {}: {}", op, err)
}
