use serde::{Deserialize, Serialize};

/// Body of a create request. The server assigns id, `completed` and
/// `createdAt`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub text: String,
}

/// Partial update; absent fields are left alone by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            completed: None,
            text: Some(text.into()),
        }
    }
}

/// Failure responses may carry `{ "error": "..." }`, nothing more is
/// guaranteed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
