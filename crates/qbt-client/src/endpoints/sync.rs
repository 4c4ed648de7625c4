use qbt_types::{MainData, QbtError, TorrentPeersData};
use tracing::debug;

use crate::params::{Params, normalize_hash};
use crate::response::{decode_json, ensure_ok, ensure_ok_with, hash_not_found};
use crate::session::Session;
use crate::transport::Transport;

const MAIN_DATA: &str = "api/v2/sync/maindata";
const TORRENT_PEERS: &str = "api/v2/sync/torrentPeers";

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Changes since response `rid`; pass `0` for a full snapshot.
    pub async fn main_data(&self, rid: i64) -> Result<MainData, QbtError> {
        debug!("Syncing main data from rid {rid}");
        let response = ensure_ok(self.get(MAIN_DATA, Params::new().with("rid", rid)).await?)?;
        decode_json(response).await
    }

    /// Peer changes of one torrent since response `rid`.
    pub async fn torrent_peers(&self, hash: &str, rid: i64) -> Result<TorrentPeersData, QbtError> {
        let hash = normalize_hash(hash);
        debug!("Syncing peers of {hash} from rid {rid}");
        let params = Params::new().with("hash", hash).with("rid", rid);
        let response = ensure_ok_with(self.get(TORRENT_PEERS, params).await?, hash_not_found)?;
        decode_json(response).await
    }
}
