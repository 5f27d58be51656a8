use std::future::Future;

use tokio::task::JoinHandle;

use crate::quiz::store::QuestionStore;

/// Waits for a termination signal, removes the store file and exits with status 0.
///
/// `std::process::exit` skips destructors, so the `StoreGuard` held by the game
/// never runs on this path; the purge here covers it.
pub fn spawn_cleanup_watcher(store: QuestionStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        cleanup_on(shutdown_signal(), &store).await;
        std::process::exit(0);
    })
}

pub async fn cleanup_on(signal: impl Future<Output = ()>, store: &QuestionStore) {
    signal.await;
    log::info!("Termination requested, cleaning up");
    if let Err(err) = store.purge() {
        log::warn!("Failed to remove {}: {}", store.path().display(), err);
    }
}

/// Resolves on Ctrl-C, or on SIGTERM / SIGHUP where those exist.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::warn!("Unable to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let wait_for = |kind: SignalKind| async move {
            match signal(kind) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    log::warn!("Unable to listen for {:?}: {}", kind, err);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = wait_for(SignalKind::terminate()) => {},
            _ = wait_for(SignalKind::hangup()) => {},
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
