//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations and entropy, allowing
//! services to be tested with in-memory and fixed-sequence implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::application::services::parse_records_lenient;
use crate::application::{ApplicationError, ApplicationResult, ResultExt};
use crate::domain::{Log, RandomSource};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Persistent list of already-available logs.
///
/// Planning never touches the store; callers load it and pass the logs in.
pub trait InventoryStore: Send + Sync {
    /// All stored logs, in insertion order.
    fn load(&self) -> ApplicationResult<Vec<Log>>;

    /// Replace the whole inventory.
    fn replace(&self, logs: &[Log]) -> ApplicationResult<()>;

    /// Add one log at the end.
    fn append(&self, log: Log) -> ApplicationResult<()> {
        let mut logs = self.load()?;
        logs.push(log);
        self.replace(&logs)
    }

    /// Remove the log at `index`. Out of range is a no-op.
    fn remove_at(&self, index: usize) -> ApplicationResult<()> {
        let mut logs = self.load()?;
        if index < logs.len() {
            logs.remove(index);
            self.replace(&logs)?;
        }
        Ok(())
    }

    /// Remove all logs.
    fn clear(&self) -> ApplicationResult<()> {
        self.replace(&[])
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Inventory kept as a JSON array in a single file.
///
/// A missing file is an empty inventory.
pub struct JsonInventoryStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonInventoryStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryStore for JsonInventoryStore {
    fn load(&self) -> ApplicationResult<Vec<Log>> {
        if !self.fs.exists(&self.path) {
            debug!("load: no inventory at {}", self.path.display());
            return Ok(Vec::new());
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read inventory", &self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        parse_records_lenient(&content).map_err(|e| ApplicationError::OperationFailed {
            context: format!("parse inventory: {}", self.path.display()),
            source: Box::new(e),
        })
    }

    fn replace(&self, logs: &[Log]) -> ApplicationResult<()> {
        let content = serde_json::to_string_pretty(logs)
            .with_path_context("serialize inventory", &self.path)?;
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create inventory directory", &self.path)?;
        self.fs
            .write(&self.path, &content)
            .with_path_context("write inventory", &self.path)?;
        debug!("replace: wrote {} logs to {}", logs.len(), self.path.display());
        Ok(())
    }
}

/// Inventory held in memory only.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    logs: Mutex<Vec<Log>>,
}

impl MemoryInventoryStore {
    pub fn new(logs: Vec<Log>) -> Self {
        Self {
            logs: Mutex::new(logs),
        }
    }

    fn poisoned() -> ApplicationError {
        ApplicationError::OperationFailed {
            context: "memory inventory".into(),
            source: "lock poisoned".into(),
        }
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn load(&self) -> ApplicationResult<Vec<Log>> {
        self.logs
            .lock()
            .map(|logs| logs.clone())
            .map_err(|_| Self::poisoned())
    }

    fn replace(&self, logs: &[Log]) -> ApplicationResult<()> {
        let mut guard = self.logs.lock().map_err(|_| Self::poisoned())?;
        *guard = logs.to_vec();
        Ok(())
    }
}

/// Random source backed by `rand`'s `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RandomSource for StdRandom {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}
