use std::path::Path;

use anyhow::Context;
use log::{info, warn};

use single_app::dispatch::{activation_queue, ActivationQueue};
use single_app::election::{try_become_leader, Election};
use single_app::listener::spawn_activation_listener;
use single_app::naming::InstanceName;
use single_app::notifier::notify_leader;

use crate::window::MainWindow;

/// Run one launch attempt end to end. Returns when the app should exit.
///
/// Exactly one of three things happens: we become the leader and run the UI
/// loop until quit; we find a leader, poke it awake and return right away
/// (a duplicate launch is not an error, so this exits 0); or the election
/// itself is broken and the error aborts startup.
pub async fn run(name: &InstanceName, runtime_dir: &Path) -> anyhow::Result<()> {
    match try_become_leader(name, runtime_dir).context("single-instance election")? {
        Election::Leader(mut lock) => {
            let outcome = run_as_leader(name, runtime_dir).await;
            lock.release();
            outcome
        }
        Election::Follower => {
            info!("another instance is running; asking it to come forward");
            notify_leader(&name.socket_path(runtime_dir)).await;
            Ok(())
        }
    }
}

async fn run_as_leader(name: &InstanceName, runtime_dir: &Path) -> anyhow::Result<()> {
    let (gate, queue) = activation_queue();

    // Bind before the first await: a launch that lost the election a moment
    // ago must already find the channel when its connect lands.
    let listener = match spawn_activation_listener(&name.socket_path(runtime_dir), gate) {
        Ok(handle) => Some(handle),
        Err(e) => {
            // Startup goes on. The lock still holds, so single-instance is
            // intact; only surfacing from later launches is lost.
            warn!("activation channel unavailable: {e:?}");
            None
        }
    };

    let outcome = run_main_loop(queue).await;

    // Stop accepting before the lock goes, so no connection lands between
    // a released lock and a dying listener.
    if let Some(handle) = listener {
        handle.abort();
    }
    outcome
}

/// The UI loop: owns the window, serves activation hand-offs one at a time,
/// leaves on ctrl-c.
async fn run_main_loop(mut queue: ActivationQueue) -> anyhow::Result<()> {
    let mut window = MainWindow::new();
    info!("ready; ctrl-c exits");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
            maybe = queue.recv() => {
                match maybe {
                    Some(signal) => {
                        window.restore_and_focus();
                        signal.complete();
                    }
                    None => {
                        // The channel never came up or the listener died.
                        // Nothing left to serve; wait for the user to quit.
                        let _ = tokio::signal::ctrl_c().await;
                        info!("shutting down");
                        return Ok(());
                    }
                }
            }
        }
    }
}
