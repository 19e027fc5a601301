//! Bounded fan-out, single-consumer fan-in.
//!
//! Every unit of the scan space is attempted exactly once. A semaphore
//! permit is held across each probe, so at most `max_workers` probes are
//! in flight at any instant. The join loop is the only place outcomes
//! are collected; workers share no mutable state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Completions between progress report lines.
pub const PROGRESS_INTERVAL: usize = 50;

/// Runs `probe` over every unit with at most `max_workers` in flight,
/// draining completely before returning.
///
/// `on_progress` observes every completion with the running count; it is
/// called from the drain loop only, so it never blocks a worker. Probe
/// errors and empty outcomes are discarded here, visibly, rather than
/// swallowed inside the workers.
pub async fn run_bounded<T, R, F, Fut, P>(
    units: Vec<T>,
    max_workers: usize,
    mut on_progress: P,
    probe: F,
) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Option<R>>> + Send + 'static,
    P: FnMut(usize),
{
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut tasks: JoinSet<anyhow::Result<Option<R>>> = JoinSet::new();

    for unit in units {
        let semaphore = Arc::clone(&semaphore);
        let probe = probe.clone();
        tasks.spawn(async move {
            // Holding the permit across the probe is what bounds the
            // in-flight count.
            let _permit = semaphore.acquire_owned().await?;
            probe(unit).await
        });
    }

    let mut outcomes: Vec<R> = Vec::new();
    let mut completed: usize = 0;

    while let Some(joined) = tasks.join_next().await {
        completed += 1;
        on_progress(completed);

        match joined {
            Ok(Ok(Some(outcome))) => outcomes.push(outcome),
            Ok(Ok(None)) => {} // probe answered: nothing there
            Ok(Err(e)) => debug!("probe failed: {e:#}"),
            Err(e) => debug!("probe task aborted: {e}"),
        }
    }

    outcomes
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
