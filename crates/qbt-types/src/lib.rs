//! # qBittorrent Web API types
//!
//! This crate defines the error type, response records and call options used
//! by the `qbt-client` crate. It performs no I/O.

mod error;
mod models;
mod options;

pub use error::{AuthRejection, QbtError};
pub use models::{
    BuildInfo, Category, LogEntry, MainData, PeerInfo, PeerLogEntry, Preferences, ServerState,
    TorrentFile, TorrentInfo, TorrentPeersData, TorrentProperties, Tracker, TransferInfo, WebSeed,
};
pub use options::{
    AddTorrentOptions, FilePriority, LogOptions, PeerLogOptions, TorrentFilter, TorrentsOptions,
};
