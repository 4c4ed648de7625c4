//! Typed wrappers for the daemon's API v2 endpoints.
//!
//! Each operation builds its parameters, performs exactly one request through
//! the [`Session`](crate::Session) and decodes the reply. They are split by
//! API area the same way the daemon groups its paths.

use qbt_types::QbtError;
use reqwest::{Response, StatusCode};

use crate::response::{ensure_ok_with, read_text};

mod app;
mod log;
mod sync;
mod torrents;
mod transfer;


/// Checks the status and discards the body of a command reply.
pub(crate) fn expect_ok(
    response: Response,
    explain: impl FnOnce(StatusCode) -> Option<&'static str>,
) -> Result<(), QbtError> {
    ensure_ok_with(response, explain).map(drop)
}

/// Reads a plain-text integer reply such as a speed limit.
pub(crate) async fn read_integer(response: Response) -> Result<i64, QbtError> {
    let body = read_text(response).await?;
    body.trim()
        .parse()
        .map_err(|e| QbtError::Decode(format!("expected an integer, got {body:?}: {e}")))
}

pub(crate) fn no_explanation(_: StatusCode) -> Option<&'static str> {
    None
}
