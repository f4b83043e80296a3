use tokio::sync::{mpsc, oneshot};

/// Sender half of the activation queue, held by the listener. Asks the
/// queue owner (the thread that owns the window) to run the restore action
/// and waits until it is done.
#[derive(Debug, Clone)]
pub struct ActivationGate {
    tx: mpsc::Sender<oneshot::Sender<()>>,
}

/// Receiver half, owned by the main thread. Drain it with
/// [`ActivationQueue::recv`] from the loop that may touch the window.
#[derive(Debug)]
pub struct ActivationQueue {
    rx: mpsc::Receiver<oneshot::Sender<()>>,
}

/// One pending hand-off. The owner runs its restore action, then calls
/// [`ActivationSignal::complete`] so the listener can take the next
/// connection.
#[derive(Debug)]
pub struct ActivationSignal {
    done: oneshot::Sender<()>,
}

/// Build the queue connecting the listener to the main thread.
///
/// The queue carries no payload. As on the activation channel itself, the
/// item is the whole message; the restore action lives with the queue owner,
/// which keeps window access on its own thread.
///
/// Capacity is one slot on purpose. The listener waits for each completion
/// before accepting again, so a deeper buffer could never fill up anyway.
pub fn activation_queue() -> (ActivationGate, ActivationQueue) {
    let (tx, rx) = mpsc::channel(1);
    (ActivationGate { tx }, ActivationQueue { rx })
}

impl ActivationGate {
    /// Enqueue one activation and wait for the owner to finish serving it.
    ///
    /// Returns `false` when the owner is gone or bails without completing,
    /// which is the listener's cue to stop. Never waits on a dead owner.
    pub async fn signal_and_wait(&self) -> bool {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(done_tx).await.is_err() {
            return false;
        }
        done_rx.await.is_ok()
    }
}

impl ActivationQueue {
    /// Wait for the next activation. `None` once every gate is dropped.
    pub async fn recv(&mut self) -> Option<ActivationSignal> {
        self.rx.recv().await.map(|done| ActivationSignal { done })
    }
}

impl ActivationSignal {
    /// Mark the hand-off finished and unblock the listener.
    pub fn complete(self) {
        // The listener may already have given up; nothing to do then.
        let _ = self.done.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn signal_completes_after_owner_acks() {
        let (gate, mut queue) = activation_queue();
        let owner = tokio::spawn(async move {
            let signal = queue.recv().await.expect("one signal");
            signal.complete();
        });
        assert!(gate.signal_and_wait().await);
        owner.await.expect("owner task");
    }

    #[tokio::test]
    async fn signals_are_served_one_at_a_time_in_order() {
        let (gate, mut queue) = activation_queue();
        let served = Arc::new(AtomicUsize::new(0));
        let served_by_owner = served.clone();
        let owner = tokio::spawn(async move {
            while let Some(signal) = queue.recv().await {
                served_by_owner.fetch_add(1, Ordering::SeqCst);
                signal.complete();
            }
        });
        for expected in 1..=3 {
            assert!(gate.signal_and_wait().await);
            assert_eq!(served.load(Ordering::SeqCst), expected);
        }
        drop(gate);
        owner.await.expect("owner exits once gates are gone");
    }

    #[tokio::test]
    async fn gate_reports_owner_gone() {
        let (gate, queue) = activation_queue();
        drop(queue);
        assert!(!gate.signal_and_wait().await);
    }

    #[tokio::test]
    async fn dropped_signal_unblocks_the_gate() {
        let (gate, mut queue) = activation_queue();
        let owner = tokio::spawn(async move {
            let signal = queue.recv().await.expect("one signal");
            // Owner bails mid-shutdown without completing.
            drop(signal);
        });
        assert!(!gate.signal_and_wait().await);
        owner.await.expect("owner task");
    }
}
