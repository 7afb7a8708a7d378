use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::EvalError;

use super::traits::ExperimentStore;
use super::types::{Experiment, NewExperiment};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: i64,
    experiments: Vec<Experiment>,
}

/// Keeps every experiment in one JSON document.
///
/// Every read-modify-write holds an exclusive lock on a sibling `.lock` file, so separate
/// processes (or store instances) sharing one path never lose each other's records.
/// Writes go to a temp file that is renamed over the original, so a failed write leaves
/// the previous document intact.
#[derive(Debug)]
pub struct JsonExperimentStore {
    path: Arc<PathBuf>,
    lock: Mutex<()>,
}

impl JsonExperimentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Runs `op` on a blocking thread while holding the file lock.
    async fn locked<T, F>(&self, op: F) -> Result<T, EvalError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, EvalError> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            let _lock = acquire_lock(&path)?;
            op(path.as_path())
        })
        .await
        .map_err(|e| EvalError::StorageError(format!("storage task failed: {e}")))?
    }
}

/// Opens `<path>.lock` and blocks until the exclusive lock is held; closing releases it.
fn acquire_lock(path: &Path) -> Result<File, EvalError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(path))?;
    FileExt::lock_exclusive(&file)?;
    Ok(file)
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn load(path: &Path) -> Result<StoreFile, EvalError> {
    match fs::read(path) {
        Ok(data) => serde_json::from_slice(&data).map_err(|e| {
            EvalError::StorageError(format!("corrupt experiment file {}: {e}", path.display()))
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
        Err(err) => Err(err.into()),
    }
}

fn save(path: &Path, file: &StoreFile) -> Result<(), EvalError> {
    let payload =
        serde_json::to_vec_pretty(file).map_err(|e| EvalError::StorageError(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[async_trait]
impl ExperimentStore for JsonExperimentStore {
    async fn create(&self, experiment: NewExperiment) -> Result<Experiment, EvalError> {
        let stored = self
            .locked(move |path| {
                let mut file = load(path)?;
                let id = file.next_id.max(1);
                let stored = Experiment::from_new(id, experiment, Utc::now());
                file.experiments.push(stored.clone());
                file.next_id = id + 1;
                save(path, &file)?;
                Ok(stored)
            })
            .await?;
        log::debug!("Stored experiment {} in {}", stored.id, self.path.display());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Experiment>, EvalError> {
        self.locked(|path| Ok(load(path)?.experiments)).await
    }
}
