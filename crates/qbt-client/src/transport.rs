//! HTTP transport: the four request shapes every endpoint is built from.
//!
//! The [`Transport`] trait abstracts the HTTP client so the session and the
//! endpoint layer can be tested against a mock. [`HttpTransport`] is the
//! reqwest implementation.

use std::path::Path;
use std::sync::Arc;

use qbt_types::QbtError;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, REFERER, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, trace};
use url::Url;

use crate::config::SessionConfig;
use crate::params::Params;

const TORRENT_MIME: &str = "application/x-bittorrent";

/// Internal trait that abstracts the HTTP request builders.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait Transport {
    /// GET with `params` as the query string.
    async fn get(&self, endpoint: &str, params: Params) -> Result<Response, QbtError>;
    /// POST with `params` as an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, endpoint: &str, params: Params) -> Result<Response, QbtError>;
    /// POST with `params` as `multipart/form-data` text parts.
    async fn post_multipart(&self, endpoint: &str, params: Params) -> Result<Response, QbtError>;
    /// POST `multipart/form-data` with `params` plus the contents of `file` in part `field`.
    async fn post_multipart_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &Path,
        params: Params,
    ) -> Result<Response, QbtError>;
    /// Stores the `Set-Cookie` values of a response in the session cookie store.
    fn install_cookies(&self, headers: &HeaderMap);
}

/// reqwest-backed transport bound to one daemon and one cookie store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Builds the HTTP client and its cookie store from `config`.
    pub fn new(config: &SessionConfig) -> Result<Self, QbtError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| QbtError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client,
            jar,
        })
    }

    /// The normalized base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, QbtError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| QbtError::Request(format!("invalid endpoint {endpoint:?}: {e}")))
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.client
            .post(url)
            .header(REFERER, self.base_url.as_str())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, QbtError> {
        let request = builder.build().map_err(map_reqwest_error)?;
        trace!("{} {}", request.method(), request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_reqwest_error)?;
        trace!("Response status {}", response.status());
        Ok(response)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, params: Params) -> Result<Response, QbtError> {
        let url = self.endpoint_url(endpoint)?;
        let mut builder = self.client.get(url);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        self.send(builder).await
    }

    async fn post_form(&self, endpoint: &str, params: Params) -> Result<Response, QbtError> {
        let url = self.endpoint_url(endpoint)?;
        self.send(self.post(url).form(&params)).await
    }

    async fn post_multipart(&self, endpoint: &str, params: Params) -> Result<Response, QbtError> {
        let url = self.endpoint_url(endpoint)?;
        self.send(self.post(url).multipart(text_form(params))).await
    }

    async fn post_multipart_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &Path,
        params: Params,
    ) -> Result<Response, QbtError> {
        let url = self.endpoint_url(endpoint)?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                QbtError::Request(format!("{} has no usable file name", file.display()))
            })?
            .to_owned();

        let contents = read_attachment(file).await?;
        debug!("Attaching {file_name} ({} bytes) as {field}", contents.len());
        let part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str(TORRENT_MIME)
            .map_err(map_reqwest_error)?;
        let form = text_form(params).part(field.to_owned(), part);

        self.send(self.post(url).multipart(form)).await
    }

    fn install_cookies(&self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            match value.to_str() {
                Ok(cookie) => self.jar.add_cookie_str(cookie, &self.base_url),
                Err(_) => debug!("Skipping Set-Cookie header that is not valid UTF-8"),
            }
        }
    }
}

/// Parses the base URL and makes sure it ends with `/` so endpoints join below it.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, QbtError> {
    let mut raw = raw.trim().to_owned();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url =
        Url::parse(&raw).map_err(|e| QbtError::Request(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(QbtError::Request(format!(
            "invalid base URL {raw:?}: expected an http(s) URL"
        )));
    }
    Ok(url)
}

fn text_form(params: Params) -> Form {
    params
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value))
}

/// Reads the whole file; the handle is dropped before returning, on success or error.
async fn read_attachment(path: &Path) -> Result<Vec<u8>, QbtError> {
    let mut file = File::open(path)
        .await
        .map_err(|e| QbtError::FileSystem(format!("failed to open {}: {e}", path.display())))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .await
        .map_err(|e| QbtError::FileSystem(format!("failed to read {}: {e}", path.display())))?;
    Ok(contents)
}

/// Maps reqwest errors to request-construction or network errors.
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> QbtError {
    if err.is_builder() {
        QbtError::Request(err.to_string())
    } else {
        QbtError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = normalize_base_url("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");

        let url = normalize_base_url("http://nas.lan/qbittorrent").unwrap();
        assert_eq!(url.as_str(), "http://nas.lan/qbittorrent/");
    }

    #[test]
    fn base_url_keeps_existing_slash() {
        let url = normalize_base_url("https://seedbox.example/webui/").unwrap();
        assert_eq!(url.as_str(), "https://seedbox.example/webui/");
    }

    #[test]
    fn base_url_rejects_garbage() {
        for raw in ["not-a-valid-url", "mailto:someone@example.org", "ftp://host/"] {
            match normalize_base_url(raw) {
                Err(QbtError::Request(msg)) => assert!(msg.contains("invalid base URL")),
                other => panic!("Expected Request error for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn endpoints_join_below_base_path() {
        let transport =
            HttpTransport::new(&SessionConfig::new("http://nas.lan/qbittorrent")).unwrap();
        let url = transport.endpoint_url("api/v2/torrents/info").unwrap();
        assert_eq!(url.as_str(), "http://nas.lan/qbittorrent/api/v2/torrents/info");
    }

    #[tokio::test]
    async fn missing_upload_file_is_a_file_system_error() {
        let transport = HttpTransport::new(&SessionConfig::default()).unwrap();
        let result = transport
            .post_multipart_file(
                "api/v2/torrents/add",
                "torrents",
                Path::new("/nonexistent/path/to/fake.torrent"),
                Params::new(),
            )
            .await;

        match result {
            Err(QbtError::FileSystem(msg)) => assert!(msg.contains("fake.torrent")),
            other => panic!("Expected FileSystem error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn path_without_file_name_is_a_request_error() {
        let transport = HttpTransport::new(&SessionConfig::default()).unwrap();
        let result = transport
            .post_multipart_file("api/v2/torrents/add", "torrents", Path::new("/"), Params::new())
            .await;

        assert!(matches!(result, Err(QbtError::Request(_))));
    }
}
