//! Key-value persistence seam for favorites and copy history.
//!
//! The pipeline never touches storage directly; it reads values through the
//! [`Store`] trait. [`JsonFileStore`] persists to a JSON file and
//! [`MemoryStore`] is the in-memory stand-in used by tests and one-shot runs.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::log_debug;

/// Callback invoked with the new value after every successful `set`.
pub type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Errors raised by persistent stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access store file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode or decode store '{}': {source}", path.display())]
    Serde {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A single observable value.
pub trait Store<T> {
    fn get(&self) -> T;

    /// Replace the value and notify subscribers.
    ///
    /// # Errors
    /// Returns an error if the value cannot be persisted; the previous value
    /// is kept in that case.
    fn set(&mut self, value: T) -> Result<(), StoreError>;

    fn subscribe(&mut self, listener: Listener<T>);
}

fn notify<T>(listeners: &[Listener<T>], value: &T) {
    for listener in listeners {
        listener(value);
    }
}

/// Volatile store.
pub struct MemoryStore<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T: Default> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> MemoryStore<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MemoryStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn set(&mut self, value: T) -> Result<(), StoreError> {
        self.value = value;
        notify(&self.listeners, &self.value);
        Ok(())
    }

    fn subscribe(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }
}

/// Store backed by a pretty-printed JSON file, written atomically.
pub struct JsonFileStore<T> {
    path: PathBuf,
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T: fmt::Debug> fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Open the store at `path`, starting from `T::default()` if the file
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let value = Self::load_json(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            value,
            listeners: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_json(path: &Path) -> Result<Option<T>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Serde {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Write to a sibling temp file, then rename over the target.
    fn atomic_write(&self, value: &T) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serde {
            path: self.path.clone(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        log_debug!("Saved {}", self.path.display());
        Ok(())
    }
}

impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    fn get(&self) -> T {
        self.value.clone()
    }

    fn set(&mut self, value: T) -> Result<(), StoreError> {
        self.atomic_write(&value)?;
        self.value = value;
        notify(&self.listeners, &self.value);
        Ok(())
    }

    fn subscribe(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_store_notifies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut store = MemoryStore::new(vec![1u32]);
        store.subscribe(Box::new(move |value: &Vec<u32>| {
            seen.fetch_add(value.len(), Ordering::SeqCst);
        }));

        store.set(vec![1, 2, 3]).unwrap();
        assert_eq!(store.get(), vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
