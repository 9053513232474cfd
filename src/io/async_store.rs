//! Asynchronous JSON file store
//!
//! Same file format and semantics as [`JsonFileStore`], but the file I/O
//! runs on tokio.
//!
//! # Design
//!
//! The store exposes `load_async` / `save_async` for callers that already
//! live on a tokio runtime. Its [`RegistryStore`] implementation builds a
//! current-thread runtime per call and blocks on those futures, so the store
//! can be handed to the synchronous `BankService` like any other. When the
//! calling thread already runs inside a runtime, that work moves to a scoped
//! helper thread, since a runtime cannot be blocked on from within another.
//!
//! [`JsonFileStore`]: crate::io::JsonFileStore

use crate::core::{RegistryStore, UserRegistry};
use crate::io::json_format::{parse_registry, registry_to_json};
use crate::io::json_store::temp_path;
use crate::types::BankError;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Registry store backed by a JSON file, using tokio for I/O
#[derive(Debug, Clone)]
pub struct AsyncJsonFileStore {
    path: PathBuf,
}

impl AsyncJsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry; a missing file yields an empty registry
    pub async fn load_async(&self) -> Result<UserRegistry, BankError> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(UserRegistry::new());
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        let registry = parse_registry(&json)?;
        tracing::debug!(path = %self.path.display(), users = registry.len(), "loaded registry");
        Ok(registry)
    }

    /// Atomically replace the data file with `registry`
    pub async fn save_async(&self, registry: &UserRegistry) -> Result<(), BankError> {
        let json = registry_to_json(registry)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = temp_path(&self.path);
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), users = registry.len(), "saved registry");
        Ok(())
    }
}

/// Drive `future` to completion on a fresh current-thread runtime
fn run_to_completion<F, T>(future: F) -> Result<T, BankError>
where
    F: Future<Output = Result<T, BankError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

/// Block on `future` from synchronous code, whether or not a runtime is
/// already running on this thread
fn block_on<F, T>(future: F) -> Result<T, BankError>
where
    F: Future<Output = Result<T, BankError>> + Send,
    T: Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return run_to_completion(future);
    }
    std::thread::scope(|scope| {
        scope
            .spawn(|| run_to_completion(future))
            .join()
            .unwrap_or_else(|_| {
                Err(BankError::Io {
                    message: "registry I/O thread panicked".to_string(),
                })
            })
    })
}

impl RegistryStore for AsyncJsonFileStore {
    fn load(&self) -> Result<UserRegistry, BankError> {
        block_on(self.load_async())
    }

    fn save(&self, registry: &UserRegistry) -> Result<(), BankError> {
        block_on(self.save_async(registry))
    }
}
