//! Directory service client: one list round trip, strict payload checks.

use log::debug;
use shared::wire::ServerListResponse;
use shared::ServerRecord;
use std::time::Duration;
use thiserror::Error;

/// Deadline for the whole directory round trip, distinct from the
/// per-probe timeout.
pub const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a snapshot fetch failed. The split matters to callers: `Transport`
/// means the directory is unreachable, `Protocol` means it answered with a
/// payload that violates the wire contract. Either way the whole list is
/// unusable, unlike a single unreachable server in a probe round.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed directory payload: {0}")]
    Protocol(#[from] serde_json::Error),
}

/// Client for the external directory's list endpoint.
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: &str) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(DIRECTORY_TIMEOUT)
            .build()?;

        Ok(DirectoryClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the current snapshot and maps each wire entry into a
    /// `ServerRecord`.
    ///
    /// A response missing any required field fails with `Protocol` and
    /// produces zero records; defaults are never substituted. Unknown extra
    /// fields are ignored. Connection failures, DNS errors and non-2xx
    /// statuses fail with `Transport`.
    pub async fn fetch_servers(&self) -> Result<Vec<ServerRecord>, DirectoryError> {
        let url = format!("{}/servers", self.base_url);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let listing: ServerListResponse = serde_json::from_str(&body)?;

        debug!("directory returned {} servers", listing.servers.len());

        Ok(listing
            .servers
            .into_iter()
            .map(ServerRecord::from)
            .collect())
    }
}
