pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
pub use traits::SlotStorage;
