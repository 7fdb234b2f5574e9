//! Bounded connection draining after a shutdown signal

use std::time::Duration;

use tokio::sync::oneshot;

/// Drive `server` to completion, giving up `timeout` after `signalled` fires
///
/// Returns `None` when the deadline passed before the server finished. A
/// dropped sender never starts the deadline.
pub async fn drain_with_timeout<F>(
    server: F,
    signalled: oneshot::Receiver<()>,
    timeout: Duration,
) -> Option<F::Output>
where
    F: Future,
{
    let deadline = async move {
        if signalled.await.is_ok() {
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        output = server => Some(output),
        () = deadline => None,
    }
}
