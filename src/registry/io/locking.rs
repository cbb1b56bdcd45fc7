use crate::error::{McpkgError, Result};
use crate::utils::paths;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Exclusive advisory lock on one package id, held until dropped.
///
/// Lock files live in `<storage_root>/.locks/` and are never deleted:
/// removing a lock file while another caller waits on it would let two
/// holders lock different inodes.
pub struct IdLock {
    file: File,
    path: PathBuf,
}

impl IdLock {
    /// Block until the lock for `id` is held
    pub fn acquire(storage_root: &Path, id: &str) -> Result<IdLock> {
        let path = paths::lock_file(storage_root, id);
        let lock_err = |source: std::io::Error| McpkgError::Lock {
            id: id.to_string(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(lock_err)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(lock_err)?;

        file.lock_exclusive().map_err(lock_err)?;

        let _ = write_pid(&mut file);

        tracing::trace!(id, lock = %path.display(), "acquired package lock");
        Ok(IdLock { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_pid(file: &mut File) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    writeln!(file, "{}", std::process::id())
}

impl Drop for IdLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::IdLock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn second_holder_waits_until_first_releases() {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().to_path_buf();

        let first = IdLock::acquire(&root, "redis-cache").expect("first lock");
        let acquired = Arc::new(AtomicBool::new(false));

        let waiter = {
            let root = root.clone();
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                let _second = IdLock::acquire(&root, "redis-cache").expect("second lock");
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(150));
        assert!(!acquired.load(Ordering::SeqCst), "lock must still be held");

        drop(first);
        waiter.join().expect("waiter thread");
        assert!(acquired.load(Ordering::SeqCst));
    }

    #[test]
    fn different_ids_do_not_contend() {
        let dir = tempdir().expect("tempdir");
        let _a = IdLock::acquire(dir.path(), "alpha").expect("alpha lock");
        let b = IdLock::acquire(dir.path(), "beta").expect("beta lock");
        assert!(b.path().ends_with(".locks/beta.lock"));
    }

    #[test]
    fn lock_file_survives_release() {
        let dir = tempdir().expect("tempdir");
        let path = {
            let lock = IdLock::acquire(dir.path(), "alpha").expect("lock");
            lock.path().to_path_buf()
        };
        assert!(path.exists());
        let _again = IdLock::acquire(dir.path(), "alpha").expect("relock");
    }
}
