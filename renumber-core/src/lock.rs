use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const LOCK_DIR_NAME: &str = "renumber-locks";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Guards one directory against concurrent `renumber` runs.
///
/// The lock file lives in the system temp directory, not in the directory
/// being renumbered, so it never shows up in a listing.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    pid: u32,
    timestamp: u64,
}

/// Where the lock for `target` lives.
pub fn lock_path_for(target: &Path) -> PathBuf {
    let canonical = target.canonicalize().unwrap_or_else(|_| target.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in &digest[..8] {
        let _ = write!(hex, "{byte:02x}");
    }
    std::env::temp_dir()
        .join(LOCK_DIR_NAME)
        .join(format!("renumber-{hex}.lock"))
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl LockFile {
    /// Acquire the lock for renumbering `target`
    pub fn acquire(target: &Path) -> Result<Self> {
        Self::acquire_path(lock_path_for(target))
    }

    fn acquire_path(lock_path: PathBuf) -> Result<Self> {
        if lock_path.exists() {
            let mut content = String::new();
            File::open(&lock_path)
                .context("Failed to read lock file")?
                .read_to_string(&mut content)
                .context("Failed to read lock file content")?;

            // Format: "pid:timestamp"
            let parts: Vec<&str> = content.trim().split(':').collect();
            if parts.len() == 2 {
                let pid = parts[0].parse::<u32>().unwrap_or(0);
                let timestamp = parts[1].parse::<u64>().unwrap_or(0);

                if now_secs().saturating_sub(timestamp) > STALE_LOCK_TIMEOUT_SECS {
                    tracing::debug!("Removing stale lock {}", lock_path.display());
                    fs::remove_file(&lock_path).context("Failed to remove stale lock file")?;
                } else if is_process_running(pid) {
                    return Err(anyhow!(
                        "Another renumber process is already running on this directory (PID: {}). \
                        If this is incorrect, remove the lock file at: {}",
                        pid,
                        lock_path.display()
                    ));
                } else {
                    tracing::debug!("Removing orphaned lock {} (PID {})", lock_path.display(), pid);
                    fs::remove_file(&lock_path).context("Failed to remove orphaned lock file")?;
                }
            }
        }

        let pid = process::id();
        let timestamp = now_secs();
        let lock_content = format!("{}:{}", pid, timestamp);

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).context("Failed to create lock directory")?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true) // Fail if file exists (race condition protection)
            .open(&lock_path)
            .context("Failed to create lock file")?;

        file.write_all(lock_content.as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self {
            path: lock_path,
            pid,
            timestamp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock
    pub fn release(self) -> Result<()> {
        if self.path.exists() {
            // Only remove it if it is still ours
            let mut content = String::new();
            File::open(&self.path)
                .context("Failed to read lock file")?
                .read_to_string(&mut content)
                .context("Failed to read lock file content")?;

            let expected_content = format!("{}:{}", self.pid, self.timestamp);
            if content.trim() == expected_content {
                fs::remove_file(&self.path).context("Failed to remove lock file")?;
            }
        }
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Check if a process with the given PID is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ago(secs: u64) -> u64 {
        now_secs() - secs
    }

    #[test]
    fn test_lock_path_is_outside_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = lock_path_for(temp_dir.path());
        assert!(!path.starts_with(temp_dir.path()));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("renumber-"));
        assert_eq!(path, lock_path_for(temp_dir.path()));
    }

    #[test]
    fn test_different_directories_get_different_locks() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert_ne!(lock_path_for(a.path()), lock_path_for(b.path()));
    }

    #[test]
    fn test_acquire_lock_success() {
        let temp_dir = TempDir::new().unwrap();

        let lock = LockFile::acquire(temp_dir.path()).unwrap();
        let lock_path = lock.path().to_path_buf();
        assert!(lock_path.exists());
        assert_eq!(lock.pid, process::id());

        lock.release().unwrap();
        assert!(!lock_path.exists());
    }

    #[test]
    fn test_double_acquire_fails() {
        let temp_dir = TempDir::new().unwrap();

        let _lock1 = LockFile::acquire(temp_dir.path()).unwrap();

        let result = LockFile::acquire(temp_dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already running"));
    }

    #[test]
    fn test_stale_lock_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = lock_path_for(temp_dir.path());
        fs::create_dir_all(lock_path.parent().unwrap()).unwrap();

        let stale_content = format!("{}:{}", process::id(), ago(STALE_LOCK_TIMEOUT_SECS + 100));
        fs::write(&lock_path, stale_content).unwrap();

        let lock = LockFile::acquire(temp_dir.path()).unwrap();
        assert!(lock_path.exists());

        lock.release().unwrap();
    }

    #[test]
    fn test_orphaned_lock_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = lock_path_for(temp_dir.path());
        fs::create_dir_all(lock_path.parent().unwrap()).unwrap();

        let orphaned_content = format!("999999:{}", ago(10));
        fs::write(&lock_path, orphaned_content).unwrap();

        let lock = LockFile::acquire(temp_dir.path()).unwrap();
        assert!(lock_path.exists());

        lock.release().unwrap();
    }

    #[test]
    fn test_lock_drop_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = lock_path_for(temp_dir.path());

        {
            let _lock = LockFile::acquire(temp_dir.path()).unwrap();
            assert!(lock_path.exists());
        }

        assert!(!lock_path.exists());
    }

    #[test]
    fn test_release_leaves_foreign_lock() {
        let temp_dir = TempDir::new().unwrap();

        let lock = LockFile::acquire(temp_dir.path()).unwrap();
        let lock_path = lock.path().to_path_buf();
        fs::write(&lock_path, "different:content").unwrap();

        // release() skips it; Drop still cleans up
        lock.release().unwrap();
        let _ = fs::remove_file(&lock_path);
    }

    #[test]
    fn test_process_running_detection() {
        assert!(is_process_running(process::id()));
        assert!(!is_process_running(999_999));
    }
}
