//! # Server Browser Library
//!
//! This library provides the client-side core of the server directory: it
//! fetches the live server list from the directory service and measures the
//! reachability and latency of every listed server concurrently, surfacing
//! each result to the caller the moment it arrives.
//!
//! ## Architecture Overview
//!
//! The browser is built around incremental result delivery. A snapshot of
//! the server list is fetched once, a probe is fanned out per entry, and a
//! consumer drains a completion-ordered stream of `(record, result)` pairs.
//! The consumer can act on the first completed probe while the slowest or
//! most unreachable servers are still in flight; nothing ever waits for the
//! whole round to finish.
//!
//! ### Per-Target Failure Isolation
//! A probe that times out, is refused, or hits a local fault produces a
//! tagged result like any other completion. One dead server can never stall
//! or fail the round; only an unreachable or malformed directory aborts the
//! fetch itself.
//!
//! ### Snapshot Semantics
//! Each fetch builds a fresh, immutable set of records. Records carry no
//! identity across snapshots and results are paired with records rather
//! than written into them, so a snapshot can be probed repeatedly without
//! shared mutable state.
//!
//! ## Module Organization
//!
//! ### Directory Module (`directory`)
//! Talks to the external directory service:
//! - One `GET /servers` round trip per snapshot
//! - Strict required-field validation of the wire payload
//! - Distinct transport vs. protocol error classification
//!
//! ### Probe Module (`probe`)
//! Performs a single bounded reachability check:
//! - TCP connect round-trip timing against the record's own address
//! - Hard per-probe timeout, never blocks past it
//! - Non-throwing tagged outcome for every failure class
//!
//! ### Aggregator Module (`aggregator`)
//! Coordinates the concurrent probe round:
//! - Full fan-out, one task per record, no cross-probe ordering
//! - Completion-order delivery through a single result channel
//! - Cancellation of outstanding probes when the consumer walks away
//! - Optional cap on simultaneously in-flight probes
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use browser::aggregator::ProbeAggregator;
//! use browser::directory::DirectoryClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DirectoryClient::new("http://127.0.0.1:8080")?;
//!     let records = client.fetch_servers().await?;
//!
//!     let mut stream = ProbeAggregator::new().probe_all(records);
//!     while let Some((record, result)) = stream.recv().await {
//!         println!("{} -> {}", record, result);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod directory;
pub mod probe;
