use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

pub mod wire;

/// Metadata for a mod running on a server. Carried on the wire verbatim and
/// never interpreted by the probing core.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ModInfo {
    pub name: String,
    pub organization: String,
    pub version: String,
}

/// One discoverable server instance from a directory snapshot.
///
/// Records are immutable once constructed and live only as long as the
/// snapshot that produced them; the next fetch builds fresh records with no
/// cross-snapshot identity. Probe results are paired with records, never
/// merged into them, so one snapshot can be probed repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub player_count: u32,
    pub max_players: u32,
    pub mods: Vec<ModInfo>,
}

impl ServerRecord {
    /// Renders the probe target as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}/{}] on {}",
            self.name,
            self.addr(),
            self.player_count,
            self.max_players,
            self.current_map
        )
    }
}

/// Outcome of a single reachability check. Exactly one variant holds per
/// probe attempt; failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The target answered within the deadline.
    Success { round_trip: Duration },
    /// No answer before the caller-supplied timeout elapsed.
    Timeout,
    /// The target actively refused or could not be routed to. Expected and
    /// benign (server offline).
    Unreachable,
    /// A local or environmental fault distinct from the target being down.
    Error { cause: String },
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeResult::Success { .. })
    }

    /// Measured latency, if the probe succeeded.
    pub fn round_trip(&self) -> Option<Duration> {
        match self {
            ProbeResult::Success { round_trip } => Some(*round_trip),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeResult::Success { round_trip } => write!(f, "{}ms", round_trip.as_millis()),
            ProbeResult::Timeout => write!(f, "timeout"),
            ProbeResult::Unreachable => write!(f, "unreachable"),
            ProbeResult::Error { cause } => write!(f, "error: {}", cause),
        }
    }
}

/// Registration outcome as seen by the registering server.
///
/// `Banned` is terminal for the process lifetime: once a directory answers
/// with it, no further heartbeats may be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    Registered { refresh_before: SystemTime },
    Banned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_record_addr_formatting() {
        let record = ServerRecord {
            host: "192.168.1.50".to_string(),
            port: 7777,
            name: "Test Server".to_string(),
            description: String::new(),
            current_map: "Arena".to_string(),
            player_count: 3,
            max_players: 64,
            mods: vec![],
        };

        assert_eq!(record.addr(), "192.168.1.50:7777");
    }

    #[test]
    fn test_record_display() {
        let record = ServerRecord {
            host: "10.0.0.1".to_string(),
            port: 8080,
            name: "Duels".to_string(),
            description: "24/7 duels".to_string(),
            current_map: "Courtyard".to_string(),
            player_count: 10,
            max_players: 20,
            mods: vec![],
        };

        assert_eq!(
            record.to_string(),
            "Duels (10.0.0.1:8080) [10/20] on Courtyard"
        );
    }

    #[test]
    fn test_probe_result_success_accessors() {
        let result = ProbeResult::Success {
            round_trip: Duration::from_millis(42),
        };

        assert!(result.is_success());
        assert_eq!(result.round_trip(), Some(Duration::from_millis(42)));
        assert_eq!(result.to_string(), "42ms");
    }

    #[test]
    fn test_probe_result_failure_accessors() {
        for result in [
            ProbeResult::Timeout,
            ProbeResult::Unreachable,
            ProbeResult::Error {
                cause: "no route".to_string(),
            },
        ] {
            assert!(!result.is_success());
            assert_eq!(result.round_trip(), None);
        }
    }

    #[test]
    fn test_probe_result_display_failures() {
        assert_eq!(ProbeResult::Timeout.to_string(), "timeout");
        assert_eq!(ProbeResult::Unreachable.to_string(), "unreachable");
        assert_eq!(
            ProbeResult::Error {
                cause: "socket exhausted".to_string()
            }
            .to_string(),
            "error: socket exhausted"
        );
    }

    #[test]
    fn test_registration_state_equality() {
        let deadline = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let a = RegistrationState::Registered {
            refresh_before: deadline,
        };
        let b = RegistrationState::Registered {
            refresh_before: deadline,
        };

        assert_eq!(a, b);
        assert_ne!(a, RegistrationState::Banned);
    }

    #[test]
    fn test_mod_info_clone_independence() {
        let original = ModInfo {
            name: "grapple".to_string(),
            organization: "community".to_string(),
            version: "1.2.0".to_string(),
        };
        let copy = original.clone();

        assert_eq!(original, copy);
    }
}
