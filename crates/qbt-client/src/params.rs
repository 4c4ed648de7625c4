//! Flat string-keyed request parameters and the helpers that build them.

use std::collections::BTreeMap;
use std::collections::btree_map;

use qbt_types::QbtError;
use serde::Serialize;

/// Request parameters sent as a query string, a form body or multipart text parts.
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ParamValue) {
        self.0.insert(key.into(), value.into_param());
    }

    /// Adds a parameter only when a value is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl ParamValue>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: ParamValue> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// A value that can be sent as a request parameter.
///
/// Booleans become `"true"`/`"false"`, numbers their base-10 form.
pub trait ParamValue {
    /// Wire form of the value.
    fn into_param(self) -> String;
}

impl ParamValue for String {
    fn into_param(self) -> String {
        self
    }
}

impl ParamValue for &str {
    fn into_param(self) -> String {
        self.to_owned()
    }
}

impl ParamValue for &String {
    fn into_param(self) -> String {
        self.clone()
    }
}

macro_rules! display_param_value {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn into_param(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_param_value!(bool, i32, i64, u32, u64, usize, f64);

/// Delimiter the daemon expects between list items of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `|`, used for torrent hash lists, file ids and tracker removal.
    Pipe,
    /// `\n`, used for URL lists and category removal.
    Newline,
    /// `,`, used for tag lists.
    Comma,
}

impl Delimiter {
    /// The delimiter as it appears in the decoded parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pipe => "|",
            Self::Newline => "\n",
            Self::Comma => ",",
        }
    }
}

/// Joins list items into one parameter value, keeping their order.
pub fn join<I>(items: I, delimiter: Delimiter) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut joined = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(delimiter.as_str());
        }
        joined.push_str(item.as_ref());
    }
    joined
}

/// Lowercases a torrent hash.
pub fn normalize_hash(hash: &str) -> String {
    hash.to_ascii_lowercase()
}

/// Normalizes and pipe-joins a list of torrent hashes.
pub(crate) fn hash_list<S: AsRef<str>>(hashes: &[S]) -> Result<String, QbtError> {
    if hashes.is_empty() {
        return Err(QbtError::InvalidArgument(
            "at least one torrent hash is required".into(),
        ));
    }
    Ok(join(
        hashes.iter().map(|hash| normalize_hash(hash.as_ref())),
        Delimiter::Pipe,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_order_without_outer_delimiters() {
        let hashes = ["aaa", "bbb", "ccc"];
        assert_eq!(join(hashes, Delimiter::Pipe), "aaa|bbb|ccc");
        assert_eq!(join(["only"], Delimiter::Pipe), "only");
        assert_eq!(join(Vec::<String>::new(), Delimiter::Pipe), "");
    }

    #[test]
    fn join_uses_the_requested_delimiter() {
        let urls = ["magnet:?xt=urn:btih:abc", "https://example.org/a.torrent"];
        assert_eq!(
            join(urls, Delimiter::Newline),
            "magnet:?xt=urn:btih:abc\nhttps://example.org/a.torrent"
        );
        assert_eq!(join(["linux", "iso"], Delimiter::Comma), "linux,iso");
    }

    #[test]
    fn hash_list_lowercases_and_pipe_joins() {
        let joined = hash_list(&["ABC123", "def456"]).unwrap();
        assert_eq!(joined, "abc123|def456");
    }

    #[test]
    fn hash_list_rejects_empty_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            hash_list(&empty),
            Err(QbtError::InvalidArgument(_))
        ));
    }

    #[test]
    fn values_are_formatted_for_the_wire() {
        let params = Params::new()
            .with("paused", true)
            .with("skip_checking", false)
            .with("limit", 1024_i64)
            .with("offset", -10_i32)
            .with("ratioLimit", 1.5_f64)
            .with("name", "debian");

        assert_eq!(params.get("paused"), Some("true"));
        assert_eq!(params.get("skip_checking"), Some("false"));
        assert_eq!(params.get("limit"), Some("1024"));
        assert_eq!(params.get("offset"), Some("-10"));
        assert_eq!(params.get("ratioLimit"), Some("1.5"));
        assert_eq!(params.get("name"), Some("debian"));
    }

    #[test]
    fn absent_options_are_left_out() {
        let mut params = Params::new();
        params.insert_opt("sort", None::<&str>);
        params.insert_opt("limit", Some(5_i64));

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("sort"), None);
        assert_eq!(params.get("limit"), Some("5"));
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut params = Params::new().with("hash", "old");
        params.insert("hash", "new");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("hash"), Some("new"));
    }

    #[test]
    fn collects_from_pairs() {
        let params: Params = [("a", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
