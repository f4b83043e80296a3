use std::path::Path;
use std::time::{Duration, SystemTime};

// Dated files older than this are removed by the startup sweep.
const MAX_LOG_AGE_DAYS: u64 = 30;

/// Set up logging into `{log_dir}/{YYYY-MM-DD}.log`, filter controlled by
/// RUST_LOG ("info" by default).
///
/// Logging never blocks startup: if the file cannot be opened the output
/// stays on stderr and the app runs on.
pub fn init(log_dir: &Path) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);

    match open_log_file(log_dir) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("quickpick: file log unavailable ({e}); logging to stderr");
        }
    }
    let _ = builder.try_init();

    sweep_old_logs(log_dir);
}

fn open_log_file(log_dir: &Path) -> std::io::Result<std::fs::File> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(format!("{}.log", today_stamp()));
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Best-effort retention: drop `.log` files past the age cap. Anything that
/// cannot be inspected or removed is simply left for the next run.
fn sweep_old_logs(log_dir: &Path) {
    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return;
    };
    let max_age = Duration::from_secs(MAX_LOG_AGE_DAYS * 24 * 60 * 60);
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        let Ok(modified) = meta.modified() else { continue };
        if modified < cutoff {
            log::debug!("removing old log {}", path.display());
            let _ = std::fs::remove_file(&path);
        }
    }
}
