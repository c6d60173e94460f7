use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use review_sentiment::DatasetKind;

use crate::dash::{io_common::dataset_file_name, io_csv::*, *};

/// The result of looking for the data of an application.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Arc<RawTable>),
    /// There is no file for this application. This is not an error for the loader.
    NotFound { path: PathBuf },
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct CacheKey {
    pub app: String,
    pub kind: DatasetKind,
}

#[derive(Debug)]
struct CachedTable {
    // None if the file system does not report modification times. The entry then stays
    // valid for the lifetime of the cache.
    modified: Option<SystemTime>,
    table: Arc<RawTable>,
}

type Slot = Arc<Mutex<Option<CachedTable>>>;

/// Tables read from the data directory, keyed by application name and dataset kind.
///
/// An entry is reused as long as the modification time of its file does not change.
/// Each key has its own lock, so concurrent first loads of the same file read it once.
#[derive(Debug)]
pub struct DatasetCache {
    data_dir: PathBuf,
    entries: Mutex<HashMap<CacheKey, Slot>>,
    reads: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // The protected data is only replaced wholesale, a poisoned lock still holds a valid value.
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl DatasetCache {
    pub fn new(data_dir: impl Into<PathBuf>) -> DatasetCache {
        DatasetCache {
            data_dir: data_dir.into(),
            entries: Mutex::new(HashMap::new()),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, app: &str, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(dataset_file_name(app, kind))
    }

    /// Number of times a data file was actually read.
    pub fn disk_reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn load(&self, app: &str, kind: DatasetKind) -> DashResult<LoadOutcome> {
        let key = CacheKey {
            app: app.trim().to_lowercase(),
            kind,
        };
        let path = self.path_for(&key.app, kind);

        let modified = match fs::metadata(&path) {
            Ok(m) => m.modified().ok(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No data file for {:?} at {:?}", key.app, path);
                return Ok(LoadOutcome::NotFound { path });
            }
            Err(e) => {
                return Err(e).context(OpeningFileSnafu {
                    path: path.display().to_string(),
                })
            }
        };

        let slot: Slot = lock(&self.entries).entry(key.clone()).or_default().clone();
        let mut cached = lock(slot.as_ref());
        if let Some(c) = cached.as_ref() {
            if c.modified == modified {
                debug!("load: cache hit for {:?}", key);
                return Ok(LoadOutcome::Loaded(c.table.clone()));
            }
            info!("{:?} changed on disk, reloading", path);
        }

        let table = Arc::new(read_table(&path)?);
        self.reads.fetch_add(1, Ordering::SeqCst);
        *cached = Some(CachedTable {
            modified,
            table: table.clone(),
        });
        Ok(LoadOutcome::Loaded(table))
    }
}
