pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod remote;
pub mod repository;
pub mod service;
pub mod time;

pub use config::{BackendConfig, Config, LocalConfig, RemoteConfig};
pub use error::StoreError;
pub use input::{join_words, resolve_id, short_ids, ResolveError, ShortIds};
pub use model::{Counts, Filter, Placement, Todo, TodoId, TodoList};
pub use remote::{HttpTodoApi, TodoApi};
pub use repository::{FileSlotStorage, MemorySlotStorage, SlotStorage};
pub use service::{LoadState, LocalTodoStore, RemoteTodoStore, TodoDto};
