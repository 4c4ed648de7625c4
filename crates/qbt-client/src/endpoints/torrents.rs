//! Torrent management: queries, state commands, trackers, priorities, limits,
//! categories and tags.

use std::collections::HashMap;
use std::path::Path;

use qbt_types::{
    AddTorrentOptions, Category, FilePriority, QbtError, TorrentFile, TorrentInfo,
    TorrentProperties, TorrentsOptions, Tracker, WebSeed,
};
use reqwest::{Response, StatusCode};
use tracing::debug;

use super::{expect_ok, no_explanation};
use crate::params::{Delimiter, Params, hash_list, join, normalize_hash};
use crate::response::{
    FAILS_BODY, decode_json, ensure_ok, ensure_ok_with, hash_not_found, read_text,
};
use crate::session::Session;
use crate::transport::Transport;

const INFO: &str = "api/v2/torrents/info";
const PROPERTIES: &str = "api/v2/torrents/properties";
const TRACKERS: &str = "api/v2/torrents/trackers";
const WEB_SEEDS: &str = "api/v2/torrents/webseeds";
const FILES: &str = "api/v2/torrents/files";
const PIECE_STATES: &str = "api/v2/torrents/pieceStates";
const PIECE_HASHES: &str = "api/v2/torrents/pieceHashes";
const PAUSE: &str = "api/v2/torrents/pause";
const RESUME: &str = "api/v2/torrents/resume";
const DELETE: &str = "api/v2/torrents/delete";
const RECHECK: &str = "api/v2/torrents/recheck";
const REANNOUNCE: &str = "api/v2/torrents/reannounce";
const ADD: &str = "api/v2/torrents/add";
const ADD_TRACKERS: &str = "api/v2/torrents/addTrackers";
const EDIT_TRACKER: &str = "api/v2/torrents/editTracker";
const REMOVE_TRACKERS: &str = "api/v2/torrents/removeTrackers";
const INCREASE_PRIO: &str = "api/v2/torrents/increasePrio";
const DECREASE_PRIO: &str = "api/v2/torrents/decreasePrio";
const TOP_PRIO: &str = "api/v2/torrents/topPrio";
const BOTTOM_PRIO: &str = "api/v2/torrents/bottomPrio";
const FILE_PRIO: &str = "api/v2/torrents/filePrio";
const DOWNLOAD_LIMIT: &str = "api/v2/torrents/downloadLimit";
const UPLOAD_LIMIT: &str = "api/v2/torrents/uploadLimit";
const SET_DOWNLOAD_LIMIT: &str = "api/v2/torrents/setDownloadLimit";
const SET_UPLOAD_LIMIT: &str = "api/v2/torrents/setUploadLimit";
const SET_SHARE_LIMITS: &str = "api/v2/torrents/setShareLimits";
const SET_LOCATION: &str = "api/v2/torrents/setLocation";
const RENAME: &str = "api/v2/torrents/rename";
const SET_CATEGORY: &str = "api/v2/torrents/setCategory";
const CATEGORIES: &str = "api/v2/torrents/categories";
const CREATE_CATEGORY: &str = "api/v2/torrents/createCategory";
const EDIT_CATEGORY: &str = "api/v2/torrents/editCategory";
const REMOVE_CATEGORIES: &str = "api/v2/torrents/removeCategories";
const ADD_TAGS: &str = "api/v2/torrents/addTags";
const REMOVE_TAGS: &str = "api/v2/torrents/removeTags";
const TAGS: &str = "api/v2/torrents/tags";
const CREATE_TAGS: &str = "api/v2/torrents/createTags";
const DELETE_TAGS: &str = "api/v2/torrents/deleteTags";
const SET_AUTO_MANAGEMENT: &str = "api/v2/torrents/setAutoManagement";
const TOGGLE_SEQUENTIAL: &str = "api/v2/torrents/toggleSequentialDownload";
const TOGGLE_FIRST_LAST_PRIO: &str = "api/v2/torrents/toggleFirstLastPiecePrio";
const SET_FORCE_START: &str = "api/v2/torrents/setForceStart";
const SET_SUPER_SEEDING: &str = "api/v2/torrents/setSuperSeeding";

/// Multipart part name the daemon reads torrent files from.
const TORRENTS_FIELD: &str = "torrents";

fn queueing_disabled(status: StatusCode) -> Option<&'static str> {
    (status == StatusCode::CONFLICT).then_some("torrent queueing is not enabled")
}

fn edit_tracker_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("new tracker URL is not valid"),
        StatusCode::CONFLICT => {
            Some("new tracker URL already exists or original URL was not found")
        }
        _ => hash_not_found(status),
    }
}

fn remove_trackers_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::CONFLICT => Some("none of the tracker URLs were found"),
        _ => hash_not_found(status),
    }
}

fn file_priority_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("priority is invalid or a file id is not an integer"),
        StatusCode::CONFLICT => {
            Some("torrent metadata is not downloaded yet or a file id was not found")
        }
        _ => hash_not_found(status),
    }
}

fn set_location_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("save path is empty"),
        StatusCode::FORBIDDEN => Some("no write access to the save path"),
        StatusCode::CONFLICT => Some("unable to create the save path directory"),
        _ => None,
    }
}

fn rename_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::CONFLICT => Some("torrent name is empty"),
        _ => hash_not_found(status),
    }
}

fn unknown_category(status: StatusCode) -> Option<&'static str> {
    (status == StatusCode::CONFLICT).then_some("category does not exist")
}

fn create_category_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("category name is empty"),
        StatusCode::CONFLICT => Some("category name is invalid"),
        _ => None,
    }
}

fn edit_category_failed(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("category name is empty"),
        StatusCode::CONFLICT => Some("category editing failed"),
        _ => None,
    }
}

/// Maps the add-torrent reply; a refused payload is an invalid torrent, not a bad response.
async fn check_added(response: Response) -> Result<(), QbtError> {
    if response.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        return Err(QbtError::InvalidTorrent(
            "daemon rejected the torrent file or link".into(),
        ));
    }
    let response = ensure_ok(response)?;
    let body = read_text(response).await?;
    if body.trim() == FAILS_BODY {
        return Err(QbtError::InvalidTorrent("daemon failed to add the torrent".into()));
    }
    Ok(())
}

fn hashes_param<S: AsRef<str>>(hashes: &[S]) -> Result<Params, QbtError> {
    Ok(Params::new().with("hashes", hash_list(hashes)?))
}

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Torrents matching `options`.
    pub async fn torrents(&self, options: &TorrentsOptions) -> Result<Vec<TorrentInfo>, QbtError> {
        debug!("Listing torrents: {options:?}");
        let response = ensure_ok(self.get(INFO, Params::from(options)).await?)?;
        decode_json(response).await
    }

    /// Generic properties of one torrent.
    pub async fn torrent_properties(&self, hash: &str) -> Result<TorrentProperties, QbtError> {
        self.get_torrent_json(PROPERTIES, hash).await
    }

    /// Trackers of one torrent.
    pub async fn torrent_trackers(&self, hash: &str) -> Result<Vec<Tracker>, QbtError> {
        self.get_torrent_json(TRACKERS, hash).await
    }

    /// Web seeds of one torrent.
    pub async fn torrent_web_seeds(&self, hash: &str) -> Result<Vec<WebSeed>, QbtError> {
        self.get_torrent_json(WEB_SEEDS, hash).await
    }

    /// Files of one torrent, in file id order.
    pub async fn torrent_files(&self, hash: &str) -> Result<Vec<TorrentFile>, QbtError> {
        self.get_torrent_json(FILES, hash).await
    }

    /// State of every piece: 0 not downloaded, 1 downloading, 2 downloaded.
    pub async fn torrent_piece_states(&self, hash: &str) -> Result<Vec<i64>, QbtError> {
        self.get_torrent_json(PIECE_STATES, hash).await
    }

    /// Hash of every piece.
    pub async fn torrent_piece_hashes(&self, hash: &str) -> Result<Vec<String>, QbtError> {
        self.get_torrent_json(PIECE_HASHES, hash).await
    }

    async fn get_torrent_json<D>(&self, endpoint: &str, hash: &str) -> Result<D, QbtError>
    where
        D: serde::de::DeserializeOwned,
    {
        let hash = normalize_hash(hash);
        debug!("GET {endpoint} for {hash}");
        let response = self.get(endpoint, Params::new().with("hash", hash)).await?;
        decode_json(ensure_ok_with(response, hash_not_found)?).await
    }

    /// Pauses the given torrents.
    pub async fn pause<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(PAUSE, hashes, no_explanation).await
    }

    /// Resumes the given torrents.
    pub async fn resume<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(RESUME, hashes, no_explanation).await
    }

    /// Removes the given torrents, and their data if `delete_files` is set.
    pub async fn delete<S: AsRef<str>>(
        &self,
        hashes: &[S],
        delete_files: bool,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("deleteFiles", delete_files);
        debug!("Deleting torrents {params:?}");
        expect_ok(self.post_form(DELETE, params).await?, no_explanation)
    }

    /// Rechecks the data of the given torrents.
    pub async fn recheck<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(RECHECK, hashes, no_explanation).await
    }

    /// Reannounces the given torrents to their trackers.
    pub async fn reannounce<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(REANNOUNCE, hashes, no_explanation).await
    }

    async fn hashes_command<S: AsRef<str>>(
        &self,
        endpoint: &str,
        hashes: &[S],
        explain: fn(StatusCode) -> Option<&'static str>,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?;
        debug!("POST {endpoint} for {:?}", params.get("hashes"));
        expect_ok(self.post_form(endpoint, params).await?, explain)
    }

    /// Adds torrents from HTTP(S) URLs or magnet links.
    pub async fn add_links<S: AsRef<str>>(
        &self,
        urls: &[S],
        options: &AddTorrentOptions,
    ) -> Result<(), QbtError> {
        if urls.is_empty() {
            return Err(QbtError::InvalidArgument(
                "at least one link is required".into(),
            ));
        }
        debug!("Adding {} torrent links", urls.len());
        let mut params = Params::from(options);
        params.insert("urls", join(urls, Delimiter::Newline));
        check_added(self.post_multipart(ADD, params).await?).await
    }

    /// Uploads a local `.torrent` file.
    pub async fn add_file(
        &self,
        path: impl AsRef<Path>,
        options: &AddTorrentOptions,
    ) -> Result<(), QbtError> {
        let path = path.as_ref();
        debug!("Adding torrent file {}", path.display());
        let response = self
            .post_multipart_file(ADD, TORRENTS_FIELD, path, Params::from(options))
            .await?;
        check_added(response).await
    }

    /// Adds trackers to one torrent.
    pub async fn add_trackers<S: AsRef<str>>(
        &self,
        hash: &str,
        urls: &[S],
    ) -> Result<(), QbtError> {
        let hash = normalize_hash(hash);
        debug!("Adding {} trackers to {hash}", urls.len());
        let params = Params::new()
            .with("hash", hash)
            .with("urls", join(urls, Delimiter::Newline));
        expect_ok(self.post_form(ADD_TRACKERS, params).await?, hash_not_found)
    }

    /// Replaces tracker `orig_url` of one torrent with `new_url`.
    pub async fn edit_tracker(
        &self,
        hash: &str,
        orig_url: &str,
        new_url: &str,
    ) -> Result<(), QbtError> {
        let hash = normalize_hash(hash);
        debug!("Replacing tracker {orig_url} of {hash} with {new_url}");
        let params = Params::new()
            .with("hash", hash)
            .with("origUrl", orig_url)
            .with("newUrl", new_url);
        expect_ok(self.post_form(EDIT_TRACKER, params).await?, edit_tracker_failed)
    }

    /// Removes trackers from one torrent.
    pub async fn remove_trackers<S: AsRef<str>>(
        &self,
        hash: &str,
        urls: &[S],
    ) -> Result<(), QbtError> {
        let hash = normalize_hash(hash);
        debug!("Removing {} trackers from {hash}", urls.len());
        let params = Params::new()
            .with("hash", hash)
            .with("urls", join(urls, Delimiter::Pipe));
        expect_ok(
            self.post_form(REMOVE_TRACKERS, params).await?,
            remove_trackers_failed,
        )
    }

    /// Moves the given torrents one step up the queue.
    pub async fn increase_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(INCREASE_PRIO, hashes, queueing_disabled)
            .await
    }

    /// Moves the given torrents one step down the queue.
    pub async fn decrease_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(DECREASE_PRIO, hashes, queueing_disabled)
            .await
    }

    /// Moves the given torrents to the top of the queue.
    pub async fn max_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(TOP_PRIO, hashes, queueing_disabled).await
    }

    /// Moves the given torrents to the bottom of the queue.
    pub async fn min_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), QbtError> {
        self.hashes_command(BOTTOM_PRIO, hashes, queueing_disabled)
            .await
    }

    /// Sets the download priority of files inside one torrent.
    ///
    /// `priority` must be one of the [`FilePriority`] values; anything else is
    /// rejected before a request is sent.
    pub async fn set_file_priority(
        &self,
        hash: &str,
        file_ids: &[u32],
        priority: i64,
    ) -> Result<(), QbtError> {
        let priority = FilePriority::try_from(priority)?;
        if file_ids.is_empty() {
            return Err(QbtError::InvalidArgument(
                "at least one file id is required".into(),
            ));
        }
        let hash = normalize_hash(hash);
        debug!("Setting priority {priority:?} on files {file_ids:?} of {hash}");
        let params = Params::new()
            .with("hash", hash)
            .with(
                "id",
                join(file_ids.iter().map(ToString::to_string), Delimiter::Pipe),
            )
            .with("priority", priority.as_i64());
        expect_ok(self.post_form(FILE_PRIO, params).await?, file_priority_failed)
    }

    /// Download limit of each of the given torrents, keyed by hash.
    pub async fn torrent_download_limits<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<HashMap<String, i64>, QbtError> {
        let params = hashes_param(hashes)?;
        debug!("Getting download limits of {:?}", params.get("hashes"));
        let response = ensure_ok(self.post_form(DOWNLOAD_LIMIT, params).await?)?;
        decode_json(response).await
    }

    /// Upload limit of each of the given torrents, keyed by hash.
    pub async fn torrent_upload_limits<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<HashMap<String, i64>, QbtError> {
        let params = hashes_param(hashes)?;
        debug!("Getting upload limits of {:?}", params.get("hashes"));
        let response = ensure_ok(self.post_form(UPLOAD_LIMIT, params).await?)?;
        decode_json(response).await
    }

    /// Sets the download limit of the given torrents in bytes per second.
    pub async fn set_torrent_download_limit<S: AsRef<str>>(
        &self,
        hashes: &[S],
        limit: i64,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("limit", limit);
        debug!("Setting download limit {limit} on {:?}", params.get("hashes"));
        expect_ok(
            self.post_form(SET_DOWNLOAD_LIMIT, params).await?,
            no_explanation,
        )
    }

    /// Sets the upload limit of the given torrents in bytes per second.
    pub async fn set_torrent_upload_limit<S: AsRef<str>>(
        &self,
        hashes: &[S],
        limit: i64,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("limit", limit);
        debug!("Setting upload limit {limit} on {:?}", params.get("hashes"));
        expect_ok(
            self.post_form(SET_UPLOAD_LIMIT, params).await?,
            no_explanation,
        )
    }

    /// Sets the share ratio and seeding time limits of the given torrents.
    ///
    /// `-2` uses the global limit, `-1` removes the limit.
    pub async fn set_share_limits<S: AsRef<str>>(
        &self,
        hashes: &[S],
        ratio_limit: f64,
        seeding_time_limit: i64,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?
            .with("ratioLimit", ratio_limit)
            .with("seedingTimeLimit", seeding_time_limit);
        debug!("Setting share limits {params:?}");
        expect_ok(
            self.post_form(SET_SHARE_LIMITS, params).await?,
            no_explanation,
        )
    }

    /// Moves the data of the given torrents to `location`.
    pub async fn set_location<S: AsRef<str>>(
        &self,
        hashes: &[S],
        location: &str,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("location", location);
        debug!("Moving {:?} to {location}", params.get("hashes"));
        expect_ok(
            self.post_form(SET_LOCATION, params).await?,
            set_location_failed,
        )
    }

    /// Renames one torrent.
    pub async fn rename(&self, hash: &str, name: &str) -> Result<(), QbtError> {
        let hash = normalize_hash(hash);
        debug!("Renaming {hash} to {name}");
        let params = Params::new().with("hash", hash).with("name", name);
        expect_ok(self.post_form(RENAME, params).await?, rename_failed)
    }

    /// Puts the given torrents in `category`; an empty name clears it.
    pub async fn set_category<S: AsRef<str>>(
        &self,
        hashes: &[S],
        category: &str,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("category", category);
        debug!("Setting category {category:?} on {:?}", params.get("hashes"));
        expect_ok(self.post_form(SET_CATEGORY, params).await?, unknown_category)
    }

    /// All categories, keyed by name.
    pub async fn categories(&self) -> Result<HashMap<String, Category>, QbtError> {
        debug!("Listing categories");
        let response = ensure_ok(self.get(CATEGORIES, Params::new()).await?)?;
        decode_json(response).await
    }

    /// Creates a category with an optional save path.
    pub async fn create_category(&self, category: &str, save_path: &str) -> Result<(), QbtError> {
        debug!("Creating category {category}");
        let params = Params::new()
            .with("category", category)
            .with("savePath", save_path);
        expect_ok(
            self.post_form(CREATE_CATEGORY, params).await?,
            create_category_failed,
        )
    }

    /// Changes the save path of an existing category.
    pub async fn edit_category(&self, category: &str, save_path: &str) -> Result<(), QbtError> {
        debug!("Editing category {category}");
        let params = Params::new()
            .with("category", category)
            .with("savePath", save_path);
        expect_ok(
            self.post_form(EDIT_CATEGORY, params).await?,
            edit_category_failed,
        )
    }

    /// Removes the given categories.
    pub async fn remove_categories<S: AsRef<str>>(&self, categories: &[S]) -> Result<(), QbtError> {
        debug!("Removing {} categories", categories.len());
        let params = Params::new().with(
            "categories",
            join(categories, Delimiter::Newline),
        );
        expect_ok(
            self.post_form(REMOVE_CATEGORIES, params).await?,
            no_explanation,
        )
    }

    /// Adds tags to the given torrents, creating tags that do not exist.
    pub async fn add_tags<S: AsRef<str>, U: AsRef<str>>(
        &self,
        hashes: &[S],
        tags: &[U],
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("tags", tag_list(tags));
        debug!("Adding tags {params:?}");
        expect_ok(self.post_form(ADD_TAGS, params).await?, no_explanation)
    }

    /// Removes tags from the given torrents; no tags removes all of them.
    pub async fn remove_tags<S: AsRef<str>, U: AsRef<str>>(
        &self,
        hashes: &[S],
        tags: &[U],
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("tags", tag_list(tags));
        debug!("Removing tags {params:?}");
        expect_ok(self.post_form(REMOVE_TAGS, params).await?, no_explanation)
    }

    /// All tags.
    pub async fn tags(&self) -> Result<Vec<String>, QbtError> {
        debug!("Listing tags");
        let response = ensure_ok(self.get(TAGS, Params::new()).await?)?;
        decode_json(response).await
    }

    /// Creates the given tags.
    pub async fn create_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<(), QbtError> {
        debug!("Creating {} tags", tags.len());
        let params = Params::new().with("tags", tag_list(tags));
        expect_ok(self.post_form(CREATE_TAGS, params).await?, no_explanation)
    }

    /// Deletes the given tags from the daemon and every torrent.
    pub async fn delete_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<(), QbtError> {
        debug!("Deleting {} tags", tags.len());
        let params = Params::new().with("tags", tag_list(tags));
        expect_ok(self.post_form(DELETE_TAGS, params).await?, no_explanation)
    }

    /// Enables or disables automatic torrent management.
    pub async fn set_auto_management<S: AsRef<str>>(
        &self,
        hashes: &[S],
        enable: bool,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("enable", enable);
        debug!("Setting automatic management {params:?}");
        expect_ok(
            self.post_form(SET_AUTO_MANAGEMENT, params).await?,
            no_explanation,
        )
    }

    /// Flips sequential download on the given torrents.
    pub async fn toggle_sequential_download<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<(), QbtError> {
        self.hashes_command(TOGGLE_SEQUENTIAL, hashes, no_explanation)
            .await
    }

    /// Flips first/last piece priority on the given torrents.
    pub async fn toggle_first_last_piece_priority<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<(), QbtError> {
        self.hashes_command(TOGGLE_FIRST_LAST_PRIO, hashes, no_explanation)
            .await
    }

    /// Sets or clears force start on the given torrents.
    pub async fn set_force_start<S: AsRef<str>>(
        &self,
        hashes: &[S],
        value: bool,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("value", value);
        debug!("Setting force start {params:?}");
        expect_ok(
            self.post_form(SET_FORCE_START, params).await?,
            no_explanation,
        )
    }

    /// Sets or clears super seeding on the given torrents.
    pub async fn set_super_seeding<S: AsRef<str>>(
        &self,
        hashes: &[S],
        value: bool,
    ) -> Result<(), QbtError> {
        let params = hashes_param(hashes)?.with("value", value);
        debug!("Setting super seeding {params:?}");
        expect_ok(
            self.post_form(SET_SUPER_SEEDING, params).await?,
            no_explanation,
        )
    }
}

fn tag_list<S: AsRef<str>>(tags: &[S]) -> String {
    join(tags, Delimiter::Comma)
}
