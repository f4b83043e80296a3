use std::path::Path;
use std::time::Duration;

use tokio::net::UnixStream;

// Connecting on the same machine is effectively instant once the leader
// listens. The bound only caps the exit path when the leader is wedged.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(250);

/// One-shot, best-effort "bring yourself forward" ping to the running
/// instance.
///
/// Connecting is the whole message: nothing is written and the stream is
/// dropped right away. Failure is an expected outcome (leader still booting,
/// or already gone), gets logged, and never bubbles up. No retries either;
/// the user can simply launch again, and a retry loop here would only delay
/// the duplicate's exit.
pub async fn notify_leader(socket_path: &Path) {
    match tokio::time::timeout(CONNECT_TIMEOUT, UnixStream::connect(socket_path)).await {
        Ok(Ok(stream)) => {
            log::debug!("leader notified via {}", socket_path.display());
            drop(stream);
        }
        Ok(Err(e)) => {
            log::debug!("leader not reachable ({e}); giving up");
        }
        Err(_) => {
            log::debug!("leader connect timed out after {:?}", CONNECT_TIMEOUT);
        }
    }
}
