use std::path::{Path, PathBuf};

use crate::consts::{APP_DIR_NAME, PORTABLE_DIR_NAME, VERSION};

/// Portable mode: a `UserData` directory sitting next to the executable.
/// Shipping that directory inside the archive is the whole opt-in; nothing
/// is ever written outside it then.
pub fn portable_data_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.join(PORTABLE_DIR_NAME);
    if dir.is_dir() {
        return Some(dir);
    }
    None
}

pub fn default_data_dir() -> PathBuf {
    if let Some(d) = portable_data_dir() {
        return d;
    }
    if let Some(base) = dirs::data_dir() {
        return base.join(APP_DIR_NAME);
    }
    // Last resort: /tmp exists everywhere we run.
    PathBuf::from("/tmp").join(APP_DIR_NAME)
}

/// Logs are grouped per version so an upgrade starts a clean folder and old
/// folders age out with their files.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs").join(VERSION)
}
