use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::repository::traits::SlotStorage;

const DEFAULT_DIR_NAME: &str = ".todolist";
const SLOT_EXTENSION: &str = "json";

/// Slot storage backed by a directory, one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Opens (and creates if needed) the data directory. Without an explicit
    /// directory this is `~/.todolist`.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened slot storage");
        Ok(FileSlotStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidConfig(format!(
                "storage key '{}' must be non-empty and use only letters, digits, '-' or '_'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }
}

pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        StoreError::InvalidConfig("could not determine home directory".to_string())
    })?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

impl SlotStorage for FileSlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(value.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
