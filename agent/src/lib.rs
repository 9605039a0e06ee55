//! # Registration Agent Library
//!
//! This library implements the server side of the directory contract: a
//! hosted game-server instance registers itself once at startup and then
//! renews that registration ahead of every expiry deadline the directory
//! hands back.
//!
//! ## Lifecycle
//!
//! - `register()` announces the instance and yields a `refresh_before`
//!   deadline when accepted.
//! - Heartbeats are scheduled with a safety margin (halfway to the
//!   deadline) so a single missed tick does not silently drop the instance
//!   from the directory.
//! - Missing a deadline is not an error delivered to the agent; the
//!   directory simply expires the entry, and the next heartbeat's rejection
//!   is the real signal. The agent recovers by re-registering.
//! - A `banned` reply is terminal for the process lifetime: the agent stops
//!   issuing heartbeats permanently and refuses further attempts locally.
//!
//! ## Module Organization
//!
//! ### Registration Module (`registration`)
//! Contains the agent itself:
//! - `ServerInfo` describing the advertised instance
//! - `register()` / `heartbeat()` round trips and reply interpretation
//! - The `run()` renewal loop with margin-based scheduling

pub mod registration;
