use qbt_types::{QbtError, TransferInfo};
use tracing::debug;

use super::{expect_ok, no_explanation, read_integer};
use crate::params::Params;
use crate::response::{decode_json, ensure_ok, read_text};
use crate::session::Session;
use crate::transport::Transport;

const INFO: &str = "api/v2/transfer/info";
const SPEED_LIMITS_MODE: &str = "api/v2/transfer/speedLimitsMode";
const TOGGLE_SPEED_LIMITS_MODE: &str = "api/v2/transfer/toggleSpeedLimitsMode";
const DOWNLOAD_LIMIT: &str = "api/v2/transfer/downloadLimit";
const UPLOAD_LIMIT: &str = "api/v2/transfer/uploadLimit";
const SET_DOWNLOAD_LIMIT: &str = "api/v2/transfer/setDownloadLimit";
const SET_UPLOAD_LIMIT: &str = "api/v2/transfer/setUploadLimit";

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Global transfer statistics.
    pub async fn transfer_info(&self) -> Result<TransferInfo, QbtError> {
        debug!("Getting transfer info");
        let response = ensure_ok(self.get(INFO, Params::new()).await?)?;
        decode_json(response).await
    }

    /// Whether the alternative speed limits are active.
    pub async fn alt_speed_limits_enabled(&self) -> Result<bool, QbtError> {
        debug!("Getting speed limits mode");
        let response = ensure_ok(self.get(SPEED_LIMITS_MODE, Params::new()).await?)?;
        let body = read_text(response).await?;
        match body.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(QbtError::Decode(format!(
                "unexpected speed limits mode {other:?}"
            ))),
        }
    }

    /// Switches between normal and alternative speed limits.
    pub async fn toggle_alt_speed_limits(&self) -> Result<(), QbtError> {
        debug!("Toggling speed limits mode");
        let response = self
            .post_form(TOGGLE_SPEED_LIMITS_MODE, Params::new())
            .await?;
        expect_ok(response, no_explanation)
    }

    /// Global download limit in bytes per second; `0` means unlimited.
    pub async fn global_download_limit(&self) -> Result<i64, QbtError> {
        debug!("Getting global download limit");
        let response = ensure_ok(self.get(DOWNLOAD_LIMIT, Params::new()).await?)?;
        read_integer(response).await
    }

    /// Global upload limit in bytes per second; `0` means unlimited.
    pub async fn global_upload_limit(&self) -> Result<i64, QbtError> {
        debug!("Getting global upload limit");
        let response = ensure_ok(self.get(UPLOAD_LIMIT, Params::new()).await?)?;
        read_integer(response).await
    }

    /// Sets the global download limit in bytes per second.
    pub async fn set_global_download_limit(&self, limit: i64) -> Result<(), QbtError> {
        debug!("Setting global download limit to {limit}");
        let response = self
            .post_form(SET_DOWNLOAD_LIMIT, Params::new().with("limit", limit))
            .await?;
        expect_ok(response, no_explanation)
    }

    /// Sets the global upload limit in bytes per second.
    pub async fn set_global_upload_limit(&self, limit: i64) -> Result<(), QbtError> {
        debug!("Setting global upload limit to {limit}");
        let response = self
            .post_form(SET_UPLOAD_LIMIT, Params::new().with("limit", limit))
            .await?;
        expect_ok(response, no_explanation)
    }
}
