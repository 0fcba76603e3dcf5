//! Storage
//!
//! A named-slot key-value store standing in for the browser's origin-scoped
//! local storage, plus the JSON snapshot layout the cart is persisted in.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::items::CartItem;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error touching the backing store
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be encoded
    #[error("failed to encode cart snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// Slot names must be non-empty file-safe names
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable named-slot string storage.
pub trait CartStorage {
    /// Read the value held in a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value held in a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empty a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one slot already filled.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = FxHashMap::default();
        slots.insert(key.into(), value.into());

        Self { slots }
    }

    /// Peek at a slot.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);

        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per slot in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Use `root` as the storage directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Read the cart snapshot held in `key`.
///
/// An empty slot yields `None`. A value that is not a JSON array of cart items,
/// or that holds a line with zero quantity, is discarded: the slot is cleared
/// and `None` is returned.
pub fn load_snapshot<S: CartStorage + ?Sized>(storage: &mut S, key: &str) -> Option<Vec<CartItem>> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "failed to read cart snapshot");
            return None;
        }
    };

    let problem = match serde_json::from_str::<Vec<CartItem>>(&raw) {
        Ok(items) if items.iter().all(|item| item.quantity >= 1) => {
            debug!(key, items = items.len(), "loaded cart snapshot");
            return Some(items);
        }
        Ok(_) => String::from("line with zero quantity"),
        Err(err) => err.to_string(),
    };

    warn!(key, error = %problem, "discarding malformed cart snapshot");

    if let Err(err) = storage.remove(key) {
        warn!(key, error = %err, "failed to clear malformed cart snapshot");
    }

    None
}

/// Write the cart snapshot into `key` as a JSON array.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the write fails.
pub fn save_snapshot<S: CartStorage + ?Sized>(
    storage: &mut S,
    key: &str,
    items: &[CartItem],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items)?;

    storage.write(key, &json)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item() -> CartItem {
        CartItem {
            product_id: "mark-1".to_string(),
            product_name: "MARK 1".to_string(),
            product_subtitle: "NEGATIVE CUT".to_string(),
            color_id: "negro".to_string(),
            color_name: "Negro".to_string(),
            size: 10,
            quantity: 1,
            price: 250_000,
            image: "/images/illustrations/Mark1_negro.png".to_string(),
        }
    }

    #[test]
    fn snapshot_round_trip() -> TestResult {
        let mut storage = MemoryStorage::new();
        let items = vec![item()];

        save_snapshot(&mut storage, "cart", &items)?;

        assert_eq!(load_snapshot(&mut storage, "cart"), Some(items));

        Ok(())
    }

    #[test]
    fn empty_slot_has_no_snapshot() {
        let mut storage = MemoryStorage::new();

        assert_eq!(load_snapshot(&mut storage, "cart"), None);
    }

    #[test]
    fn malformed_snapshot_is_cleared() {
        let mut storage = MemoryStorage::with_slot("cart", "{not json");

        assert_eq!(load_snapshot(&mut storage, "cart"), None);
        assert_eq!(storage.get("cart"), None);
    }

    #[test]
    fn wrong_shape_snapshot_is_cleared() {
        let mut storage = MemoryStorage::with_slot("cart", r#"{"productId":"mark-1"}"#);

        assert_eq!(load_snapshot(&mut storage, "cart"), None);
        assert_eq!(storage.get("cart"), None);
    }

    #[test]
    fn zero_quantity_snapshot_is_cleared() -> TestResult {
        let mut zero = item();
        zero.quantity = 0;
        let raw = serde_json::to_string(&[item(), zero])?;
        let mut storage = MemoryStorage::with_slot("cart", raw);

        assert_eq!(load_snapshot(&mut storage, "cart"), None);
        assert_eq!(storage.get("cart"), None);

        Ok(())
    }

    #[test]
    fn snapshot_reads_storefront_layout() {
        let raw = r#"[{"productId":"mark-2","productName":"MARK 2","productSubtitle":"NEGATIVE CUT DOBLE CIERRE","colorId":"rojo","colorName":"Rojo","size":8,"quantity":3,"price":230000,"image":"/images/illustrations/mark2_rojo.png"}]"#;
        let mut storage = MemoryStorage::with_slot("ao33-cart", raw);

        let items = load_snapshot(&mut storage, "ao33-cart").unwrap_or_default();

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|i| i.quantity), Some(3));
    }

    #[test]
    fn file_storage_round_trip() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::open(dir.path().join("store"))?;

        assert_eq!(storage.read("ao33-cart")?, None);

        storage.write("ao33-cart", "[]")?;
        assert_eq!(storage.read("ao33-cart")?.as_deref(), Some("[]"));

        storage.remove("ao33-cart")?;
        storage.remove("ao33-cart")?;
        assert_eq!(storage.read("ao33-cart")?, None);

        Ok(())
    }

    #[test]
    fn file_storage_rejects_path_like_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        assert!(matches!(
            storage.read("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.read(""), Err(StorageError::InvalidKey(_))));

        Ok(())
    }
}
