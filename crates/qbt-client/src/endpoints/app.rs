use qbt_types::{BuildInfo, Preferences, QbtError};
use tracing::debug;

use super::{expect_ok, no_explanation};
use crate::params::Params;
use crate::response::{decode_json, ensure_ok, read_text};
use crate::session::Session;
use crate::transport::Transport;

const VERSION: &str = "api/v2/app/version";
const WEB_API_VERSION: &str = "api/v2/app/webapiVersion";
const BUILD_INFO: &str = "api/v2/app/buildInfo";
const PREFERENCES: &str = "api/v2/app/preferences";
const SET_PREFERENCES: &str = "api/v2/app/setPreferences";
const DEFAULT_SAVE_PATH: &str = "api/v2/app/defaultSavePath";
const SHUTDOWN: &str = "api/v2/app/shutdown";

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Version of the daemon application, e.g. `v4.6.2`.
    pub async fn app_version(&self) -> Result<String, QbtError> {
        debug!("Getting application version");
        let response = ensure_ok(self.get(VERSION, Params::new()).await?)?;
        read_text(response).await
    }

    /// Version of the Web API, e.g. `2.9.3`.
    pub async fn web_api_version(&self) -> Result<String, QbtError> {
        debug!("Getting Web API version");
        let response = ensure_ok(self.get(WEB_API_VERSION, Params::new()).await?)?;
        read_text(response).await
    }

    /// Versions of the libraries the daemon was built with.
    pub async fn build_info(&self) -> Result<BuildInfo, QbtError> {
        debug!("Getting build info");
        let response = ensure_ok(self.get(BUILD_INFO, Params::new()).await?)?;
        decode_json(response).await
    }

    /// All application preferences.
    pub async fn preferences(&self) -> Result<Preferences, QbtError> {
        debug!("Getting preferences");
        let response = ensure_ok(self.get(PREFERENCES, Params::new()).await?)?;
        decode_json(response).await
    }

    /// Changes the given preferences. Keys not present keep their value.
    pub async fn set_preferences(&self, preferences: &Preferences) -> Result<(), QbtError> {
        debug!("Setting {} preferences", preferences.0.len());
        let json = serde_json::to_string(preferences)
            .map_err(|e| QbtError::Request(format!("failed to encode preferences: {e}")))?;
        let response = self
            .post_form(SET_PREFERENCES, Params::new().with("json", json))
            .await?;
        expect_ok(response, no_explanation)
    }

    /// Default save path for new torrents.
    pub async fn default_save_path(&self) -> Result<String, QbtError> {
        debug!("Getting default save path");
        let response = ensure_ok(self.get(DEFAULT_SAVE_PATH, Params::new()).await?)?;
        read_text(response).await
    }

    /// Shuts the daemon down.
    pub async fn shutdown(&self) -> Result<(), QbtError> {
        debug!("Shutting down the daemon");
        let response = self.post_form(SHUTDOWN, Params::new()).await?;
        expect_ok(response, no_explanation)
    }
}
