//! Conversions from call options in `qbt_types` to wire parameters.
//!
//! Only options that are set end up in the parameter map.

use qbt_types::{AddTorrentOptions, LogOptions, PeerLogOptions, TorrentsOptions};

use crate::params::{Delimiter, Params, join, normalize_hash};

impl From<&TorrentsOptions> for Params {
    fn from(options: &TorrentsOptions) -> Self {
        let mut params = Params::new();
        params.insert_opt("filter", options.filter.map(|f| f.as_str()));
        params.insert_opt("category", options.category.as_deref());
        params.insert_opt("tag", options.tag.as_deref());
        params.insert_opt("sort", options.sort.as_deref());
        params.insert_opt("reverse", options.reverse);
        params.insert_opt("limit", options.limit);
        params.insert_opt("offset", options.offset);
        if let Some(hashes) = options.hashes.as_deref().filter(|h| !h.is_empty()) {
            params.insert(
                "hashes",
                join(hashes.iter().map(|h| normalize_hash(h)), Delimiter::Pipe),
            );
        }
        params
    }
}

impl From<&AddTorrentOptions> for Params {
    fn from(options: &AddTorrentOptions) -> Self {
        let mut params = Params::new();
        params.insert_opt("savepath", options.savepath.as_deref());
        params.insert_opt("cookie", options.cookie.as_deref());
        params.insert_opt("category", options.category.as_deref());
        params.insert_opt(
            "tags",
            options
                .tags
                .as_deref()
                .map(|tags| join(tags, Delimiter::Comma)),
        );
        params.insert_opt("skip_checking", options.skip_checking);
        params.insert_opt("paused", options.paused);
        params.insert_opt("root_folder", options.root_folder);
        params.insert_opt("rename", options.rename.as_deref());
        params.insert_opt("upLimit", options.up_limit);
        params.insert_opt("dlLimit", options.dl_limit);
        params.insert_opt("autoTMM", options.auto_tmm);
        params.insert_opt("sequentialDownload", options.sequential_download);
        params.insert_opt("firstLastPiecePrio", options.first_last_piece_prio);
        params
    }
}

impl From<&LogOptions> for Params {
    fn from(options: &LogOptions) -> Self {
        let mut params = Params::new();
        params.insert_opt("normal", options.normal);
        params.insert_opt("info", options.info);
        params.insert_opt("warning", options.warning);
        params.insert_opt("critical", options.critical);
        params.insert_opt("last_known_id", options.last_known_id);
        params
    }
}

impl From<&PeerLogOptions> for Params {
    fn from(options: &PeerLogOptions) -> Self {
        let mut params = Params::new();
        params.insert_opt("last_known_id", options.last_known_id);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbt_types::TorrentFilter;

    #[test]
    fn test_empty_torrents_options() {
        let params = Params::from(&TorrentsOptions::default());
        assert!(params.is_empty());
    }

    #[test]
    fn test_torrents_options_conversion() {
        let options = TorrentsOptions {
            filter: Some(TorrentFilter::Downloading),
            sort: Some("name".into()),
            reverse: Some(true),
            limit: Some(10),
            hashes: Some(vec!["ABC".into(), "def".into()]),
            ..Default::default()
        };
        let params = Params::from(&options);

        assert_eq!(params.get("filter"), Some("downloading"));
        assert_eq!(params.get("sort"), Some("name"));
        assert_eq!(params.get("reverse"), Some("true"));
        assert_eq!(params.get("limit"), Some("10"));
        assert_eq!(params.get("hashes"), Some("abc|def"));
        assert_eq!(params.get("category"), None);
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_add_torrent_options_conversion() {
        let options = AddTorrentOptions {
            savepath: Some("/downloads/linux".into()),
            category: Some("linux".into()),
            tags: Some(vec!["iso".into(), "debian".into()]),
            paused: Some(true),
            skip_checking: Some(false),
            up_limit: Some(1024),
            dl_limit: Some(2048),
            sequential_download: Some(true),
            first_last_piece_prio: Some(false),
            ..Default::default()
        };
        let params = Params::from(&options);

        assert_eq!(params.get("savepath"), Some("/downloads/linux"));
        assert_eq!(params.get("category"), Some("linux"));
        assert_eq!(params.get("tags"), Some("iso,debian"));
        assert_eq!(params.get("paused"), Some("true"));
        assert_eq!(params.get("skip_checking"), Some("false"));
        assert_eq!(params.get("upLimit"), Some("1024"));
        assert_eq!(params.get("dlLimit"), Some("2048"));
        assert_eq!(params.get("sequentialDownload"), Some("true"));
        assert_eq!(params.get("firstLastPiecePrio"), Some("false"));
        assert_eq!(params.get("cookie"), None);
        assert_eq!(params.get("rename"), None);
        assert_eq!(params.get("autoTMM"), None);
    }

    #[test]
    fn test_log_options_conversion() {
        let options = LogOptions {
            warning: Some(true),
            critical: Some(true),
            last_known_id: Some(42),
            ..Default::default()
        };
        let params = Params::from(&options);

        assert_eq!(params.get("warning"), Some("true"));
        assert_eq!(params.get("critical"), Some("true"));
        assert_eq!(params.get("last_known_id"), Some("42"));
        assert_eq!(params.get("normal"), None);

        let peer = Params::from(&PeerLogOptions { last_known_id: Some(7) });
        assert_eq!(peer.get("last_known_id"), Some("7"));
    }
}
