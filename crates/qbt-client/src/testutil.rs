//! Shared test utilities and fixtures.

use reqwest::Response;
use serde_json::{Value, json};

pub(crate) fn response(status: u16, body: &str) -> Response {
    http::Response::builder()
        .status(status)
        .body(body.to_owned())
        .unwrap()
        .into()
}

pub(crate) fn json_response(status: u16, body: Value) -> Response {
    http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.to_string())
        .unwrap()
        .into()
}

pub(crate) fn login_response(cookie: &str) -> Response {
    http::Response::builder()
        .status(200)
        .header("set-cookie", cookie)
        .body("Ok.".to_owned())
        .unwrap()
        .into()
}

pub(crate) fn make_test_torrent(hash: &str, name: &str) -> Value {
    json!({
        "hash": hash,
        "name": name,
        "size": 1000,
        "total_size": 1000,
        "progress": 0.5,
        "dlspeed": 2048,
        "upspeed": 512,
        "state": "downloading",
        "category": "linux",
        "tags": "iso,debian",
        "save_path": "/downloads",
        "ratio": 0.25,
        "eta": 3600
    })
}
