use qbt_types::{LogEntry, LogOptions, PeerLogEntry, PeerLogOptions, QbtError};
use tracing::debug;

use crate::params::Params;
use crate::response::{decode_json, ensure_ok};
use crate::session::Session;
use crate::transport::Transport;

const MAIN: &str = "api/v2/log/main";
const PEERS: &str = "api/v2/log/peers";

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Entries of the main log matching `options`.
    pub async fn logs(&self, options: &LogOptions) -> Result<Vec<LogEntry>, QbtError> {
        debug!("Getting main log: {options:?}");
        let response = ensure_ok(self.get(MAIN, Params::from(options)).await?)?;
        decode_json(response).await
    }

    /// Entries of the peer log matching `options`.
    pub async fn peer_logs(&self, options: &PeerLogOptions) -> Result<Vec<PeerLogEntry>, QbtError> {
        debug!("Getting peer log: {options:?}");
        let response = ensure_ok(self.get(PEERS, Params::from(options)).await?)?;
        decode_json(response).await
    }
}
