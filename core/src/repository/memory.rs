use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StoreError;
use crate::repository::traits::SlotStorage;

/// In-process slot storage. Clones share the same map, so a caller can keep
/// a handle and look at what a store wrote.
#[derive(Clone, Default)]
pub struct MemorySlotStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let storage = MemorySlotStorage::new();
        let handle = storage.clone();
        storage.set("todos", "[]").unwrap();
        assert_eq!(handle.get("todos").unwrap().as_deref(), Some("[]"));
        handle.remove("todos").unwrap();
        assert!(storage.get("todos").unwrap().is_none());
        assert!(storage.is_empty());
    }
}
