//! Single-endpoint reachability checks bounded by a hard timeout.

use shared::ProbeResult;
use std::io;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::{timeout, Instant};

/// Default per-probe deadline when the caller does not supply one.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Measures reachability and round-trip latency of one `host:port` target.
///
/// Issues a single TCP connect against the target and times it. The check
/// never blocks past `limit` and never propagates a failure: expiry yields
/// `Timeout`, a refused or unroutable target yields `Unreachable`, and any
/// other local I/O fault yields `Error`. Retry policy, if any, belongs to
/// the caller.
pub async fn probe(target: &str, limit: Duration) -> ProbeResult {
    let started = Instant::now();

    let attempt = async move {
        let addr = match lookup_host(target).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => return ProbeResult::Unreachable,
            },
            // A name that does not resolve is an offline target, not a fault
            Err(_) => return ProbeResult::Unreachable,
        };

        match TcpStream::connect(addr).await {
            Ok(_stream) => ProbeResult::Success {
                round_trip: started.elapsed(),
            },
            Err(err) => classify(&err),
        }
    };

    timeout(limit, attempt)
        .await
        .unwrap_or(ProbeResult::Timeout)
}

/// Splits connect failures into "target is down" and "something is wrong
/// locally"; the two are surfaced differently upstream.
fn classify(err: &io::Error) -> ProbeResult {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable => ProbeResult::Unreachable,
        io::ErrorKind::TimedOut => ProbeResult::Timeout,
        _ => ProbeResult::Error {
            cause: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Address guaranteed to drop SYNs (RFC 5737 TEST-NET-1).
    const BLACKHOLE: &str = "192.0.2.1:9";

    #[tokio::test]
    async fn test_probe_reachable_target() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();

        let result = probe(&target, DEFAULT_PROBE_TIMEOUT).await;

        match result {
            ProbeResult::Success { round_trip } => {
                assert!(round_trip < DEFAULT_PROBE_TIMEOUT);
            }
            other => panic!("expected success against live listener, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_refused_target() {
        // Bind to learn a free port, then free it so the connect is refused.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();
        drop(listener);

        let result = probe(&target, DEFAULT_PROBE_TIMEOUT).await;
        assert_eq!(result, ProbeResult::Unreachable);
    }

    #[tokio::test]
    async fn test_probe_blackhole_respects_timeout() {
        let limit = Duration::from_millis(100);
        let started = Instant::now();

        let result = probe(BLACKHOLE, limit).await;
        let elapsed = started.elapsed();

        assert!(
            matches!(result, ProbeResult::Timeout | ProbeResult::Unreachable),
            "blackhole probe must not succeed, got {:?}",
            result
        );
        assert!(
            elapsed < limit + Duration::from_millis(200),
            "probe overran its deadline: {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_probe_unresolvable_name() {
        let result = probe("definitely-not-a-real-host.invalid:7777", DEFAULT_PROBE_TIMEOUT).await;
        assert_eq!(result, ProbeResult::Unreachable);
    }

    #[test]
    fn test_classify_error_kinds() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(classify(&refused), ProbeResult::Unreachable);

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert_eq!(classify(&timed_out), ProbeResult::Timeout);

        let local = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        match classify(&local) {
            ProbeResult::Error { cause } => assert!(cause.contains("denied")),
            other => panic!("expected local fault classification, got {:?}", other),
        }
    }
}
