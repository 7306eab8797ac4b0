use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use super::{classify, ProbeReporter, ProbeResult, ProbeTarget, RegistryProbe};
use crate::core::tooling::timings::StageTimer;

/// Number of threads rendering probe results.
pub const PRINTER_WORKERS: usize = 5;

/// Probes every target concurrently and returns once each one has been
/// fetched and reported, in completion order.
///
/// All fetches start immediately, one thread per target. Only reporting is
/// pooled: `PRINTER_WORKERS` threads share one result channel and hand each
/// rendered result to the coordinator, which counts down to zero.
pub fn probe_aliases(
    targets: &[ProbeTarget],
    probe: &dyn RegistryProbe,
    reporter: &dyn ProbeReporter,
) -> Vec<ProbeResult> {
    let mut timer = StageTimer::start("probe_aliases");
    timer.items(targets.len());
    if targets.is_empty() {
        return Vec::new();
    }

    let (result_tx, result_rx) = mpsc::channel::<ProbeResult>();
    let result_rx = Mutex::new(result_rx);
    let (done_tx, done_rx) = mpsc::channel::<ProbeResult>();

    thread::scope(|scope| {
        for _ in 0..PRINTER_WORKERS {
            let result_rx = &result_rx;
            let done_tx = done_tx.clone();
            scope.spawn(move || loop {
                let next = {
                    let receiver = match result_rx.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    receiver.recv()
                };
                let Ok(result) = next else {
                    break;
                };
                reporter.report(&result);
                if done_tx.send(result).is_err() {
                    break;
                }
            });
        }
        drop(done_tx);

        for target in targets {
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                tracing::debug!(alias = %target.alias, uri = %target.uri, "probing registry");
                let response = probe.fetch(&target.uri);
                let _ = result_tx.send(classify(&target.alias, &target.uri, response));
            });
        }
        drop(result_tx);

        let mut pending = targets.len();
        let mut results = Vec::with_capacity(pending);
        while pending > 0 {
            let Ok(result) = done_rx.recv() else {
                break;
            };
            results.push(result);
            pending -= 1;
        }
        results
    })
}
