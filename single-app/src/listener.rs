use std::io;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

use crate::dispatch::ActivationGate;

// Pause after a failed accept so an fd-exhaustion storm cannot pin a core.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Bind the activation channel endpoint.
///
/// Only the election winner may call this. Holding the instance lock is what
/// makes the sweep safe: a socket file that still exists here belongs to a
/// dead leader, so nothing live can be listening on it.
pub fn bind_channel(path: &Path) -> io::Result<UnixListener> {
    let _ = std::fs::remove_file(path);
    UnixListener::bind(path)
}

/// Accept loop for the leader. Runs until the process exits or the queue
/// owner goes away.
///
/// One accepted connection means one launch attempt elsewhere; the
/// connection itself carries nothing. The next accept starts only after the
/// owner reports the previous restore finished, so a burst of launches lines
/// up behind one restore at a time instead of piling onto the window. The
/// backlog holds the waiting connections meanwhile.
pub async fn run_activation_listener(listener: UnixListener, gate: ActivationGate) {
    loop {
        match listener.accept().await {
            Ok((conn, _addr)) => {
                info!("activation signal: another launch attempt");
                if !gate.signal_and_wait().await {
                    debug!("activation queue closed; stopping listener");
                    return;
                }
                drop(conn);
            }
            Err(e) => {
                // One bad accept must not cost the leader its channel.
                warn!("activation accept failed: {e:?}");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

/// Bind and start the accept loop in the background.
///
/// The handle is returned rather than detached so the owner can abort it on
/// shutdown and a panic inside the loop stays observable.
pub fn spawn_activation_listener(
    path: &Path,
    gate: ActivationGate,
) -> io::Result<JoinHandle<()>> {
    let listener = bind_channel(path)?;
    debug!("activation channel bound: {}", path.display());
    Ok(tokio::spawn(run_activation_listener(listener, gate)))
}
