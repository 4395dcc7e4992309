use crate::error::StoreError;

/// A string-keyed key/value store; each key holds one serialized value.
pub trait SlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
