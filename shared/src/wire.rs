//! HTTP+JSON wire contract for the directory service.
//!
//! All string fields are required on the wire (they may be empty but never
//! absent), integers are required, and `mods` is always present. Serde
//! enforces exactly that: a missing field fails deserialization while
//! unknown extra fields are ignored, keeping the schema forward compatible.

use crate::{ModInfo, ServerRecord};
use serde::{Deserialize, Serialize};

/// One server as published by `GET /servers`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerEntry {
    pub ip_address: String,
    pub port: u16,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub player_count: u32,
    pub max_players: u32,
    pub mods: Vec<ModInfo>,
}

/// Response envelope for `GET /servers`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerListResponse {
    pub servers: Vec<ServerEntry>,
}

/// Body for `POST /register`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub port: u16,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub player_count: u32,
    pub max_players: u32,
    pub mods: Vec<ModInfo>,
}

/// Body for `POST /heartbeat`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeartbeatRequest {
    pub port: u16,
    pub player_count: u32,
    pub max_players: u32,
    pub current_map: String,
}

/// Response shape shared by `/register` and `/heartbeat`.
///
/// `refresh_before` is a Unix timestamp in fractional seconds and is only
/// present when `status` is `registered`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegistrationReply {
    pub status: RegistrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_before: Option<f64>,
}

/// Wire `status` values. Both are expected, first-class outcomes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Banned,
}

impl From<ServerEntry> for ServerRecord {
    fn from(entry: ServerEntry) -> Self {
        ServerRecord {
            host: entry.ip_address,
            port: entry.port,
            name: entry.name,
            description: entry.description,
            current_map: entry.current_map,
            player_count: entry.player_count,
            max_players: entry.max_players,
            mods: entry.mods,
        }
    }
}
