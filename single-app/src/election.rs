use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use crate::naming::InstanceName;

/// Outcome of the cross-process election for one [`InstanceName`].
#[derive(Debug)]
pub enum Election {
    /// This process owns the instance lock until it exits or releases it.
    Leader(InstanceLock),
    /// Another process already owns it.
    Follower,
}

/// The instance lock could not be created or checked at all.
///
/// Losing the election is not this error; that is the normal
/// [`Election::Follower`] outcome. This one means the caller cannot tell
/// whether another instance runs, so the single-instance guarantee is gone.
#[derive(Debug, thiserror::Error)]
#[error("instance lock unavailable at {}: {source}", .path.display())]
pub struct ElectionUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Try to become the single running instance for `name`.
///
/// The `flock` attempt itself reports won or lost, so two racing processes
/// can never both see a win. `dir` is created if missing and should be a
/// per-user location such as [`crate::naming::default_runtime_dir`].
pub fn try_become_leader(
    name: &InstanceName,
    dir: &Path,
) -> Result<Election, ElectionUnavailable> {
    let path = name.lock_path(dir);
    let unavailable = |source: io::Error| ElectionUnavailable {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(unavailable)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .map_err(unavailable)?;

    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc != 0 {
        let e = io::Error::last_os_error();
        // EWOULDBLOCK means another instance holds the lock.
        if e.raw_os_error() == Some(libc::EWOULDBLOCK) {
            log::debug!("election lost, lock busy: {}", path.display());
            return Ok(Election::Follower);
        }
        return Err(unavailable(e));
    }

    log::debug!("election won: {}", path.display());
    Ok(Election::Leader(InstanceLock {
        file: Some(file),
        path,
    }))
}

/// Holds the won election for the rest of the process lifetime.
///
/// Dropping releases the lock, and the kernel also releases it if the
/// process dies without unwinding, so a crashed leader never locks the
/// application out.
#[derive(Debug)]
pub struct InstanceLock {
    file: Option<File>,
    path: PathBuf,
}

impl InstanceLock {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock early. Idempotent; `Drop` does the same thing.
    ///
    /// The lock file itself stays behind. Unlinking it would let a racing
    /// launch lock a fresh inode while an older handle still holds the
    /// original, and then both would believe they won.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            // flock is released when the last handle to the fd closes.
            drop(file);
            log::debug!("instance lock released: {}", self.path.display());
        }
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> InstanceName {
        InstanceName::new("tester", "LockTest")
    }

    #[test]
    fn second_attempt_loses_while_lock_held() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = try_become_leader(&name(), dir.path()).expect("first election");
        assert!(matches!(first, Election::Leader(_)));
        let second = try_become_leader(&name(), dir.path()).expect("second election");
        assert!(matches!(second, Election::Follower));
    }

    #[test]
    fn releasing_lets_the_next_attempt_win() {
        let dir = tempfile::tempdir().expect("tempdir");
        let Election::Leader(mut lock) = try_become_leader(&name(), dir.path()).expect("election")
        else {
            panic!("fresh dir must elect us");
        };
        lock.release();
        lock.release();
        let next = try_become_leader(&name(), dir.path()).expect("election after release");
        assert!(matches!(next, Election::Leader(_)));
    }

    #[test]
    fn dropping_releases_like_a_process_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let won = try_become_leader(&name(), dir.path()).expect("election");
            assert!(matches!(won, Election::Leader(_)));
        }
        let again = try_become_leader(&name(), dir.path()).expect("election after drop");
        assert!(matches!(again, Election::Leader(_)));
    }

    #[test]
    fn different_app_ids_do_not_contend() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = try_become_leader(&InstanceName::new("tester", "AppA"), dir.path()).expect("a");
        let b = try_become_leader(&InstanceName::new("tester", "AppB"), dir.path()).expect("b");
        assert!(matches!(a, Election::Leader(_)));
        assert!(matches!(b, Election::Leader(_)));
    }

    #[test]
    fn racing_attempts_elect_exactly_one_leader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut handles = Vec::new();
        for _ in 0..8 {
            let d = dir.path().to_path_buf();
            handles.push(std::thread::spawn(move || {
                try_become_leader(&InstanceName::new("tester", "Race"), &d).expect("election")
            }));
        }
        // Keep every outcome alive while counting, so no winner releases
        // early and lets a second one through.
        let outcomes: Vec<Election> = handles
            .into_iter()
            .map(|h| h.join().expect("join"))
            .collect();
        let wins = outcomes
            .iter()
            .filter(|e| matches!(e, Election::Leader(_)))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn unavailable_when_lock_dir_is_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocked = dir.path().join("occupied");
        std::fs::write(&blocked, b"not a directory").expect("write");
        let err = try_become_leader(&name(), &blocked).expect_err("must fail");
        assert!(err.path.starts_with(&blocked));
    }
}
