use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory file lock serializing writes to the planner store.
///
/// Uses platform-native flock (Unix) to coordinate between the dashboard
/// and CLI processes. The store has a single-writer discipline; this lock
/// is what enforces it across processes.
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another aisle process may be writing")]
    Timeout { path: PathBuf },
    #[error("lock error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreLock {
    /// Acquire an advisory lock on the aisle data directory.
    /// Blocks up to `timeout` waiting for the lock.
    pub fn acquire(aisle_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = aisle_dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    return Ok(StoreLock {
                        _file: file,
                        path: lock_path,
                    });
                }
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => {
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with default timeout (5 seconds)
    pub fn acquire_default(aisle_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(aisle_dir, Duration::from_secs(5))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Lock is released automatically when the file is dropped (flock semantics)
        let _ = fs::remove_file(&self.path);
    }
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // On non-Unix platforms, just succeed (advisory locking)
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_and_release() {
        let tmp = TempDir::new().unwrap();
        let aisle_dir = tmp.path().join("aisle");
        fs::create_dir_all(&aisle_dir).unwrap();

        let lock = StoreLock::acquire_default(&aisle_dir);
        assert!(lock.is_ok());

        drop(lock);

        let lock2 = StoreLock::acquire_default(&aisle_dir);
        assert!(lock2.is_ok());
    }

    #[test]
    fn contention_times_out() {
        let tmp = TempDir::new().unwrap();
        let aisle_dir = tmp.path().join("aisle");
        fs::create_dir_all(&aisle_dir).unwrap();

        let _lock1 = StoreLock::acquire_default(&aisle_dir).unwrap();

        let lock2 = StoreLock::acquire(&aisle_dir, Duration::from_millis(50));
        assert!(lock2.is_err());
    }
}
