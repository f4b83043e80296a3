use clap::Parser;
use std::path::PathBuf;

use launcher::consts::{APP_DIR_NAME, APP_ID, VERSION};
use launcher::{app, logging, paths};
use single_app::naming::{default_runtime_dir, InstanceName};

/// Keyboard launcher for the desktop. One instance runs per session;
/// launching it again brings the running window to the foreground.
#[derive(Parser)]
#[command(name = "quickpick", version)]
struct Cli {
    /// Directory for the instance lock and activation socket
    /// (default: XDG runtime dir).
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Directory for user data and logs (default: `UserData` next to the
    /// binary when present, else the XDG data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(paths::default_data_dir);
    logging::init(&paths::log_dir(&data_dir));
    log::info!("quickpick {} starting", VERSION);

    let state_dir = cli
        .state_dir
        .unwrap_or_else(|| default_runtime_dir(APP_DIR_NAME));
    let name = InstanceName::new(&current_user_name(), APP_ID);

    app::run(&name, &state_dir).await
}

// The session's user name scopes the instance: two users on one machine each
// get their own. The euid fallback cannot fail, just reads worse in logs.
fn current_user_name() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("uid{}", unsafe { libc::geteuid() }))
}
