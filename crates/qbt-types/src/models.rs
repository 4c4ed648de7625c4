//! Response records decoded from the daemon's JSON bodies.
//!
//! Field names follow the Web API v2 JSON keys. Records are decoded with
//! `#[serde(default)]` so fields a given daemon version does not send come
//! back as their zero value instead of failing the whole decode.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of `torrents/info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)] // rationale: same fields as the Web API JSON
pub struct TorrentInfo {
    pub hash: String,

    pub name: String,

    pub size: i64,

    pub total_size: i64,

    pub progress: f64,

    pub dlspeed: i64,

    pub upspeed: i64,

    pub priority: i64,

    pub num_seeds: i64,

    pub num_complete: i64,

    pub num_leechs: i64,

    pub num_incomplete: i64,

    pub ratio: f64,

    pub eta: i64,

    pub state: String,

    pub seq_dl: bool,

    pub f_l_piece_prio: bool,

    pub category: String,

    pub tags: String,

    pub super_seeding: bool,

    pub force_start: bool,

    pub auto_tmm: bool,

    pub save_path: String,

    pub added_on: i64,

    pub completion_on: i64,

    pub tracker: String,

    pub dl_limit: i64,

    pub up_limit: i64,

    pub downloaded: i64,

    pub uploaded: i64,

    pub amount_left: i64,

    pub magnet_uri: String,
}

/// Generic properties of one torrent (`torrents/properties`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TorrentProperties {
    pub save_path: String,

    pub creation_date: i64,

    pub piece_size: i64,

    pub comment: String,

    pub total_wasted: i64,

    pub total_uploaded: i64,

    pub total_uploaded_session: i64,

    pub total_downloaded: i64,

    pub total_downloaded_session: i64,

    pub up_limit: i64,

    pub dl_limit: i64,

    pub time_elapsed: i64,

    pub seeding_time: i64,

    pub nb_connections: i64,

    pub nb_connections_limit: i64,

    pub share_ratio: f64,

    pub addition_date: i64,

    pub completion_date: i64,

    pub created_by: String,

    pub dl_speed_avg: i64,

    pub dl_speed: i64,

    pub eta: i64,

    pub last_seen: i64,

    pub peers: i64,

    pub peers_total: i64,

    pub pieces_have: i64,

    pub pieces_num: i64,

    pub reannounce: i64,

    pub seeds: i64,

    pub seeds_total: i64,

    pub total_size: i64,

    pub up_speed_avg: i64,

    pub up_speed: i64,
}

/// A file inside a torrent (`torrents/files`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub index: Option<i64>,

    pub name: String,

    pub size: i64,

    pub progress: f64,

    pub priority: i64,

    pub is_seed: Option<bool>,

    pub piece_range: Vec<i64>,

    pub availability: f64,
}

/// A tracker of a torrent (`torrents/trackers`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Tracker {
    pub url: String,

    pub status: i64,

    /// Older daemons send an empty string for DHT/PeX/LSD pseudo-trackers.
    #[serde(deserialize_with = "lenient_i64")]
    pub tier: i64,

    pub num_peers: i64,

    pub num_seeds: i64,

    pub num_leeches: i64,

    pub num_downloaded: i64,

    pub msg: String,
}

/// A web seed of a torrent (`torrents/webseeds`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebSeed {
    /// Web seed URL.
    pub url: String,
}

/// A torrent category (`torrents/categories`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Save path associated with the category.
    #[serde(rename = "savePath")]
    pub save_path: String,
}

/// Global transfer information (`transfer/info`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TransferInfo {
    pub dl_info_speed: i64,

    pub dl_info_data: i64,

    pub up_info_speed: i64,

    pub up_info_data: i64,

    pub dl_rate_limit: i64,

    pub up_rate_limit: i64,

    pub dht_nodes: i64,

    pub connection_status: String,
}

/// Build information of the daemon (`app/buildInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BuildInfo {
    pub qt: String,

    pub libtorrent: String,

    pub boost: String,

    pub openssl: String,

    pub bitness: i64,
}

/// Application preferences (`app/preferences`).
///
/// The preference set differs between daemon versions, so it is kept as a raw
/// JSON object. The same shape is sent back by `app/setPreferences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(pub Map<String, Value>);

impl Preferences {
    /// Returns the value of one preference key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets one preference key, returning `self` for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// One entry of the main log (`log/main`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    /// Log entry id.
    pub id: i64,
    /// Log message.
    pub message: String,
    /// Milliseconds since epoch.
    pub timestamp: i64,
    /// Severity bit: 1 normal, 2 info, 4 warning, 8 critical.
    #[serde(rename = "type")]
    pub kind: i64,
}

/// One entry of the peer log (`log/peers`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PeerLogEntry {
    pub id: i64,

    pub ip: String,

    pub timestamp: i64,

    pub blocked: bool,

    pub reason: String,
}

/// Incremental snapshot returned by `sync/maindata`.
///
/// When `full_update` is false only changed entries and changed fields are
/// present, which is why torrents are kept as raw JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MainData {
    /// Response id to pass back on the next poll.
    pub rid: i64,
    /// Whether this snapshot replaces all previous state.
    pub full_update: bool,
    /// Changed torrents by hash, with only the changed fields.
    pub torrents: HashMap<String, Map<String, Value>>,
    /// Hashes of removed torrents.
    pub torrents_removed: Vec<String>,
    /// Added or changed categories by name.
    pub categories: HashMap<String, Category>,
    /// Names of removed categories.
    pub categories_removed: Vec<String>,
    /// Added tags.
    pub tags: Vec<String>,
    /// Removed tags.
    pub tags_removed: Vec<String>,
    /// Changed global state.
    pub server_state: Option<ServerState>,
}

/// Global state part of [`MainData`]. Every field is optional in deltas.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServerState {
    pub connection_status: Option<String>,

    pub dht_nodes: Option<i64>,

    pub dl_info_data: Option<i64>,

    pub dl_info_speed: Option<i64>,

    pub dl_rate_limit: Option<i64>,

    pub up_info_data: Option<i64>,

    pub up_info_speed: Option<i64>,

    pub up_rate_limit: Option<i64>,

    pub queueing: Option<bool>,

    pub use_alt_speed_limits: Option<bool>,

    pub refresh_interval: Option<i64>,

    pub free_space_on_disk: Option<i64>,
}

/// Incremental peer snapshot returned by `sync/torrentPeers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TorrentPeersData {
    /// Response id to pass back on the next poll.
    pub rid: i64,
    /// Whether this snapshot replaces all previous state.
    pub full_update: bool,
    /// Whether the daemon wants peer flags shown.
    pub show_flags: Option<bool>,
    /// Changed peers keyed by `ip:port`.
    pub peers: HashMap<String, PeerInfo>,
    /// Keys of peers that went away.
    pub peers_removed: Vec<String>,
}

/// A peer of a torrent. Every field is optional in deltas.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PeerInfo {
    pub client: Option<String>,

    pub connection: Option<String>,

    pub country: Option<String>,

    pub country_code: Option<String>,

    pub dl_speed: Option<i64>,

    pub downloaded: Option<i64>,

    pub files: Option<String>,

    pub flags: Option<String>,

    pub flags_desc: Option<String>,

    pub ip: Option<String>,

    pub port: Option<u16>,

    pub progress: Option<f64>,

    pub relevance: Option<f64>,

    pub up_speed: Option<i64>,

    pub uploaded: Option<i64>,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("{n} is not an integer"))),
        Value::String(s) if s.is_empty() => Ok(-1),
        Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        Value::Null => Ok(-1),
        other => Err(serde::de::Error::custom(format!(
            "expected integer, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn torrent_info_tolerates_missing_fields() {
        let info: TorrentInfo = serde_json::from_value(json!({
            "hash": "8c212779b4abde7c6bc608063a0d008b7e40ce32",
            "name": "debian.iso",
            "progress": 0.25,
            "state": "downloading"
        }))
        .unwrap();

        assert_eq!(info.name, "debian.iso");
        assert_eq!(info.progress, 0.25);
        assert_eq!(info.size, 0);
        assert!(info.category.is_empty());
    }

    #[test]
    fn tracker_tier_accepts_number_and_empty_string() {
        let trackers: Vec<Tracker> = serde_json::from_value(json!([
            { "url": "udp://tracker.example:1337", "tier": 0, "status": 2 },
            { "url": "** [DHT] **", "tier": "", "status": 2 }
        ]))
        .unwrap();

        assert_eq!(trackers[0].tier, 0);
        assert_eq!(trackers[1].tier, -1);
    }

    #[test]
    fn category_reads_camel_case_save_path() {
        let categories: HashMap<String, Category> = serde_json::from_value(json!({
            "movies": { "name": "movies", "savePath": "/data/movies" }
        }))
        .unwrap();

        assert_eq!(categories["movies"].save_path, "/data/movies");
    }

    #[test]
    fn main_data_keeps_partial_torrent_fields() {
        let data: MainData = serde_json::from_value(json!({
            "rid": 15,
            "full_update": false,
            "torrents": { "abc": { "progress": 0.5 } },
            "torrents_removed": ["def"],
            "server_state": { "dl_info_speed": 1024 }
        }))
        .unwrap();

        assert_eq!(data.rid, 15);
        assert!(!data.full_update);
        assert_eq!(data.torrents["abc"]["progress"], json!(0.5));
        assert_eq!(data.torrents_removed, vec!["def".to_string()]);
        let state = data.server_state.unwrap();
        assert_eq!(state.dl_info_speed, Some(1024));
        assert_eq!(state.connection_status, None);
    }

    #[test]
    fn log_entry_maps_type_field() {
        let entry: LogEntry = serde_json::from_value(json!({
            "id": 1, "message": "started", "timestamp": 1700000000000_i64, "type": 2
        }))
        .unwrap();
        assert_eq!(entry.kind, 2);
    }

    #[test]
    fn preferences_round_trip_as_plain_object() {
        let prefs = Preferences::default().set("dl_limit", 1024).set("locale", "en");
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value, json!({ "dl_limit": 1024, "locale": "en" }));
        assert_eq!(prefs.get("locale"), Some(&json!("en")));
    }
}
