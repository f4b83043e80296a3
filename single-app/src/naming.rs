use std::path::{Path, PathBuf};

const DELIMITER: &str = ":";
const CHANNEL_SUFFIX: &str = "SingleApplication";

/// One single-instance scope: one OS user running one application.
///
/// The names derived here are a compatibility contract. A newer build must
/// produce the exact same strings as the running older build, or it will
/// neither see the held lock nor find the activation channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceName {
    user: String,
    app: String,
}

impl InstanceName {
    /// `app` is the stable application identifier. It must be non-empty and
    /// must not change across releases.
    pub fn new(user: &str, app: &str) -> Self {
        debug_assert!(!app.is_empty(), "app identifier must not be empty");
        Self {
            user: user.to_string(),
            app: app.to_string(),
        }
    }

    /// Name of the exclusion token: `{user}:{app}`.
    pub fn token_name(&self) -> String {
        format!("{}{}{}", self.user, DELIMITER, self.app)
    }

    /// Name of the activation channel: the token name with a fixed
    /// `SingleApplication` suffix, so the two endpoints can never collide.
    pub fn channel_name(&self) -> String {
        format!("{}{}{}", self.token_name(), DELIMITER, CHANNEL_SUFFIX)
    }

    /// Lock file backing the exclusion token, placed under `dir`.
    pub fn lock_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.lock", safe_for_filename(&self.token_name())))
    }

    /// Socket file backing the activation channel, placed under `dir`.
    pub fn socket_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.sock", safe_for_filename(&self.channel_name())))
    }
}

/// Default directory for the lock and socket files.
///
/// `XDG_RUNTIME_DIR` is per-user and cleared when the session ends, which is
/// exactly the lifetime the election needs. The /tmp fallback carries the
/// euid so two users cannot collide there either.
pub fn default_runtime_dir(app_dir: &str) -> PathBuf {
    if let Ok(d) = std::env::var("XDG_RUNTIME_DIR") {
        let base = PathBuf::from(d);
        return base.join(app_dir);
    }
    let uid = unsafe { libc::geteuid() };
    PathBuf::from(format!("/tmp/{}-{}", app_dir, uid))
}

// Endpoint files sit in a per-user directory, so sanitizing only has to keep
// app ids apart, and those are developer-chosen constants.
fn safe_for_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect()
}
