//! # qBittorrent Web API client.
//!
//! usage:
//!
//! ```rust,ignore
//! use qbt_client::{AddTorrentOptions, Session, TorrentsOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::try_new(Some("http://localhost:8080"))?;
//!     session.login("admin", "adminadmin").await?;
//!
//!     session
//!         .add_file("path/to/file.torrent", &AddTorrentOptions::default())
//!         .await?;
//!     for torrent in session.torrents(&TorrentsOptions::default()).await? {
//!         println!("{} {:.1}%", torrent.name, torrent.progress * 100.0);
//!     }
//!
//!     session.logout().await?;
//!     Ok(())
//! }
//! ```
//!

mod config;
mod conversions;
mod endpoints;
mod params;
mod response;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

// Used by the integration tests only.
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tracing_subscriber as _;
#[cfg(test)]
use wiremock as _;
#[cfg(test)]
use test_log as _;

pub use config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, SessionConfig};
pub use params::{Delimiter, ParamValue, Params, join, normalize_hash};
pub use qbt_types::{
    AddTorrentOptions, AuthRejection, BuildInfo, Category, FilePriority, LogEntry, LogOptions,
    MainData, PeerInfo, PeerLogEntry, PeerLogOptions, Preferences, QbtError, ServerState,
    TorrentFile, TorrentFilter, TorrentInfo, TorrentPeersData, TorrentProperties,
    TorrentsOptions, Tracker, TransferInfo, WebSeed,
};
pub use reqwest::{Response, StatusCode};
pub use session::Session;
pub use transport::HttpTransport;
