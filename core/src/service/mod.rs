pub mod dto;
pub mod local_store;
pub mod remote_store;
pub mod state;


pub use dto::TodoDto;
pub use local_store::LocalTodoStore;
pub use remote_store::RemoteTodoStore;
pub use state::LoadState;
