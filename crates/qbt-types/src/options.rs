//! Call options for endpoints that take optional parameters.
//!
//! Every field is optional: `None` leaves the parameter out of the request so
//! the daemon applies its own default.

use crate::QbtError;

/// Filters for `torrents/info`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TorrentsOptions {
    /// Only torrents in this state.
    pub filter: Option<TorrentFilter>,
    /// Only torrents in this category. An empty string selects uncategorized torrents.
    pub category: Option<String>,
    /// Only torrents with this tag.
    pub tag: Option<String>,
    /// Sort by this field of [`TorrentInfo`](crate::TorrentInfo).
    pub sort: Option<String>,
    /// Reverse the sort order.
    pub reverse: Option<bool>,
    /// Maximum number of torrents returned.
    pub limit: Option<i64>,
    /// Offset into the list; negative counts from the end.
    pub offset: Option<i64>,
    /// Only torrents with these hashes.
    pub hashes: Option<Vec<String>>,
}

/// Torrent state filter accepted by `torrents/info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TorrentFilter {
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Active,
    Inactive,
    Resumed,
    Stalled,
    StalledUploading,
    StalledDownloading,
    Errored,
}

impl TorrentFilter {
    /// Wire name of the filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Downloading => "downloading",
            Self::Seeding => "seeding",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Resumed => "resumed",
            Self::Stalled => "stalled",
            Self::StalledUploading => "stalled_uploading",
            Self::StalledDownloading => "stalled_downloading",
            Self::Errored => "errored",
        }
    }
}

/// Options shared by both add-torrent calls (links and file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddTorrentOptions {
    /// Download folder.
    pub savepath: Option<String>,
    /// Cookie header value forwarded when the daemon fetches the links.
    pub cookie: Option<String>,
    /// Category for the torrent.
    pub category: Option<String>,
    /// Tags for the torrent.
    pub tags: Option<Vec<String>>,
    /// Skip hash checking.
    pub skip_checking: Option<bool>,
    /// Add the torrent in the paused state.
    pub paused: Option<bool>,
    /// Create the root folder.
    pub root_folder: Option<bool>,
    /// Rename the torrent.
    pub rename: Option<String>,
    /// Upload speed limit in bytes per second.
    pub up_limit: Option<i64>,
    /// Download speed limit in bytes per second.
    pub dl_limit: Option<i64>,
    /// Use automatic torrent management.
    pub auto_tmm: Option<bool>,
    /// Download pieces in order.
    pub sequential_download: Option<bool>,
    /// Download first and last pieces first.
    pub first_last_piece_prio: Option<bool>,
}

/// Filters for `log/main`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Include normal messages.
    pub normal: Option<bool>,
    /// Include info messages.
    pub info: Option<bool>,
    /// Include warning messages.
    pub warning: Option<bool>,
    /// Include critical messages.
    pub critical: Option<bool>,
    /// Only entries with an id greater than this.
    pub last_known_id: Option<i64>,
}

/// Filters for `log/peers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerLogOptions {
    /// Only entries with an id greater than this.
    pub last_known_id: Option<i64>,
}

/// Download priority of a file inside a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePriority {
    /// Do not download.
    Skip,
    /// Normal priority.
    Normal,
    /// High priority.
    High,
    /// Maximal priority.
    Maximal,
}

impl FilePriority {
    /// Wire value of the priority.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Skip => 0,
            Self::Normal => 1,
            Self::High => 6,
            Self::Maximal => 7,
        }
    }
}

impl TryFrom<i64> for FilePriority {
    type Error = QbtError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Skip),
            1 => Ok(Self::Normal),
            6 => Ok(Self::High),
            7 => Ok(Self::Maximal),
            other => Err(QbtError::InvalidArgument(format!(
                "file priority {other} is not one of 0, 1, 6, 7"
            ))),
        }
    }
}
