//! Registration and renewal against the external directory service.

use log::{error, info, warn};
use shared::wire::{HeartbeatRequest, RegisterRequest, RegistrationReply, RegistrationStatus};
use shared::{ModInfo, RegistrationState};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::time::sleep;

/// Deadline for one directory round trip.
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay before re-registering after a failed renewal.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Scheduling never sleeps shorter than this, even with an expired deadline.
const MIN_RENEWAL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("directory unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed directory reply: {0}")]
    Protocol(String),
    /// The directory banned this instance. Terminal for the process
    /// lifetime; no automatic un-ban retry.
    #[error("registration banned by directory")]
    Banned,
}

/// What the instance advertises about itself.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub port: u16,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub player_count: u32,
    pub max_players: u32,
    pub mods: Vec<ModInfo>,
}

/// Keeps one server instance registered with the directory.
pub struct RegistrationAgent {
    http: reqwest::Client,
    base_url: String,
    info: ServerInfo,
    banned: bool,
}

impl RegistrationAgent {
    pub fn new(base_url: &str, info: ServerInfo) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(RegistrationAgent {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            info,
            banned: false,
        })
    }

    /// Updates the status carried by subsequent heartbeats.
    pub fn set_status(&mut self, player_count: u32, current_map: &str) {
        self.info.player_count = player_count;
        self.info.current_map = current_map.to_string();
    }

    pub fn is_banned(&self) -> bool {
        self.banned
    }

    /// Announces the instance to the directory.
    pub async fn register(&mut self) -> Result<RegistrationState, AgentError> {
        if self.banned {
            return Err(AgentError::Banned);
        }

        let body = RegisterRequest {
            port: self.info.port,
            name: self.info.name.clone(),
            description: self.info.description.clone(),
            current_map: self.info.current_map.clone(),
            player_count: self.info.player_count,
            max_players: self.info.max_players,
            mods: self.info.mods.clone(),
        };

        let reply = self.round_trip("register", &body).await?;
        self.interpret(reply)
    }

    /// Renews the registration with the current instance status.
    pub async fn heartbeat(&mut self) -> Result<RegistrationState, AgentError> {
        if self.banned {
            return Err(AgentError::Banned);
        }

        let body = HeartbeatRequest {
            port: self.info.port,
            player_count: self.info.player_count,
            max_players: self.info.max_players,
            current_map: self.info.current_map.clone(),
        };

        let reply = self.round_trip("heartbeat", &body).await?;
        self.interpret(reply)
    }

    /// Registers, then renews ahead of every deadline until banned.
    ///
    /// A rejected or failed renewal is recovered by re-registering after a
    /// short delay; silent expiry on the directory side is expected and not
    /// treated as an agent error. Returns `Err(AgentError::Banned)` once the
    /// directory bans the instance.
    pub async fn run(&mut self) -> Result<(), AgentError> {
        let mut state = self.register().await?;
        info!(
            "Registered \"{}\" on port {}",
            self.info.name, self.info.port
        );

        loop {
            let refresh_before = match state {
                RegistrationState::Banned => {
                    warn!("Directory banned this instance; stopping heartbeats permanently");
                    self.banned = true;
                    return Err(AgentError::Banned);
                }
                RegistrationState::Registered { refresh_before } => refresh_before,
            };

            sleep(renewal_delay(refresh_before, SystemTime::now())).await;

            state = match self.heartbeat().await {
                Ok(next) => next,
                Err(AgentError::Banned) => return Err(AgentError::Banned),
                Err(err) => {
                    error!("Heartbeat failed: {}; re-registering", err);
                    sleep(RETRY_DELAY).await;
                    self.register().await?
                }
            };
        }
    }

    async fn round_trip<B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<RegistrationReply, AgentError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|err| AgentError::Protocol(err.to_string()))
    }

    fn interpret(&mut self, reply: RegistrationReply) -> Result<RegistrationState, AgentError> {
        match reply.status {
            RegistrationStatus::Banned => {
                self.banned = true;
                Ok(RegistrationState::Banned)
            }
            RegistrationStatus::Registered => {
                let seconds = reply.refresh_before.ok_or_else(|| {
                    AgentError::Protocol("registered reply missing refresh_before".to_string())
                })?;

                Ok(RegistrationState::Registered {
                    refresh_before: epoch_timestamp(seconds)?,
                })
            }
        }
    }
}

/// Sleeps half the remaining window so one missed tick still leaves a
/// renewal before expiry.
fn renewal_delay(refresh_before: SystemTime, now: SystemTime) -> Duration {
    let remaining = refresh_before
        .duration_since(now)
        .unwrap_or(Duration::ZERO);

    (remaining / 2).max(MIN_RENEWAL_DELAY)
}

/// The wire carries `refresh_before` as fractional Unix seconds.
fn epoch_timestamp(seconds: f64) -> Result<SystemTime, AgentError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(AgentError::Protocol(format!(
            "invalid refresh_before timestamp: {}",
            seconds
        )));
    }

    Ok(UNIX_EPOCH + Duration::from_secs_f64(seconds))
}
