//! Concurrent probe fan-out with completion-order result delivery.

use crate::probe::{probe, DEFAULT_PROBE_TIMEOUT};
use log::debug;
use shared::{ProbeResult, ServerRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};

/// Fans a probe out per record and streams each completion back as it
/// happens, in completion order, never input order.
///
/// Every input record yields exactly one `(record, result)` pair; failed
/// probes are ordinary completions, not errors. Duplicate addresses are
/// probed independently. The stream closes once every probe has completed
/// or been abandoned.
pub struct ProbeAggregator {
    timeout: Duration,
    max_in_flight: Option<usize>,
}

impl ProbeAggregator {
    pub fn new() -> Self {
        ProbeAggregator {
            timeout: DEFAULT_PROBE_TIMEOUT,
            max_in_flight: None,
        }
    }

    /// Per-probe deadline; the round as a whole has no ceiling of its own.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps simultaneously in-flight probes so a huge list cannot exhaust
    /// local sockets. Delivery stays completion-ordered.
    pub fn with_max_in_flight(mut self, cap: usize) -> Self {
        self.max_in_flight = Some(cap.max(1));
        self
    }

    /// Starts a probe round. Must be called from within a Tokio runtime.
    pub fn probe_all(&self, records: Vec<ServerRecord>) -> ProbeStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let limiter = self
            .max_in_flight
            .map(|cap| Arc::new(Semaphore::new(cap)));
        let timeout = self.timeout;

        debug!("starting probe round for {} servers", records.len());

        for record in records {
            let tx = tx.clone();
            let limiter = limiter.clone();
            let target = record.addr();

            tokio::spawn(async move {
                let checked = async {
                    let _permit = match &limiter {
                        Some(semaphore) => match semaphore.clone().acquire_owned().await {
                            Ok(permit) => Some(permit),
                            // The limiter is never closed while probes run
                            Err(_) => return ProbeResult::Error {
                                cause: "probe limiter closed".to_string(),
                            },
                        },
                        None => None,
                    };
                    probe(&target, timeout).await
                };

                tokio::select! {
                    // Checked first so a dropped stream wins over starting
                    // another probe
                    biased;
                    // Consumer dropped the stream: abandon instead of
                    // probing on unobserved
                    _ = tx.closed() => {}
                    result = checked => {
                        let _ = tx.send((record, result));
                    }
                }
            });
        }

        // The clones held by the probe tasks are now the only senders, so
        // the stream closes when the last task finishes
        ProbeStream { rx }
    }
}

impl Default for ProbeAggregator {
    fn default() -> Self {
        ProbeAggregator::new()
    }
}

/// Pull side of a probe round. Dropping it cancels outstanding probes.
pub struct ProbeStream {
    rx: mpsc::UnboundedReceiver<(ServerRecord, ProbeResult)>,
}

impl ProbeStream {
    /// Next completed pair, or `None` once every probe has finished.
    pub async fn recv(&mut self) -> Option<(ServerRecord, ProbeResult)> {
        self.rx.recv().await
    }

    /// Drains the round to completion.
    pub async fn collect_all(mut self) -> Vec<(ServerRecord, ProbeResult)> {
        let mut results = Vec::new();
        while let Some(pair) = self.recv().await {
            results.push(pair);
        }
        results
    }
}
