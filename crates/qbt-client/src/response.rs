//! Status checks and body decoding shared by the endpoint layer.

use qbt_types::QbtError;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::transport::map_reqwest_error;

/// Body the daemon sends with a `200` when it refuses an action.
pub(crate) const FAILS_BODY: &str = "Fails.";

/// Passes the response through if the status is `200 OK`.
pub(crate) fn ensure_ok(response: Response) -> Result<Response, QbtError> {
    ensure_ok_with(response, |_| None)
}

/// Like [`ensure_ok`], with `explain` giving the endpoint-specific meaning of a status.
pub(crate) fn ensure_ok_with(
    response: Response,
    explain: impl FnOnce(StatusCode) -> Option<&'static str>,
) -> Result<Response, QbtError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let message = explain(status)
        .or_else(|| status.canonical_reason())
        .unwrap_or("unexpected status")
        .to_owned();
    Err(QbtError::BadResponse {
        status: status.as_u16(),
        message,
    })
}

/// Reads the body and decodes it as JSON.
pub(crate) async fn decode_json<D: DeserializeOwned>(response: Response) -> Result<D, QbtError> {
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|e| QbtError::Decode(e.to_string()))
}

/// Reads the body as text.
pub(crate) async fn read_text(response: Response) -> Result<String, QbtError> {
    response.text().await.map_err(map_reqwest_error)
}

/// Status explanation for endpoints addressing a single torrent.
pub(crate) fn hash_not_found(status: StatusCode) -> Option<&'static str> {
    (status == StatusCode::NOT_FOUND).then_some("torrent hash was not found")
}
