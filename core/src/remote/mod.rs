pub mod api;
pub mod dto;
pub mod http;

pub use api::TodoApi;
pub use dto::{ErrorBody, NewTodo, TodoPatch};
pub use http::HttpTodoApi;
