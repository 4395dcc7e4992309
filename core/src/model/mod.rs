pub mod filter;
pub mod list;
pub mod todo;

pub use filter::{Counts, Filter, ParseFilterError};
pub use list::{Placement, TodoList};
pub use todo::{normalize_text, Todo, TodoId};
